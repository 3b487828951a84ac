//! CASHOUT: in-play draw bet Hold / Cash Out advisor
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod strategy;
pub mod form;
pub mod report;
