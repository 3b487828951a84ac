//! Integration tests: the full form → engine → report path.

mod fixtures;
mod scenarios;
mod presets;
