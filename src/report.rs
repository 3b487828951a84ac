//! Result rendering.
//!
//! Turns an `Outcome` into the result panel text (with a colour tone) or
//! into JSON, and lays out side-by-side preset comparisons.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::form::Outcome;
use crate::strategy::policy::PolicyPreset;
use crate::types::{Decision, DecisionResult, INVALID_INPUT_MESSAGE};

/// Panel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Neutral,
}

impl Tone {
    /// Wrap `text` in the ANSI colour for this tone.
    pub fn paint(&self, text: &str) -> String {
        match self {
            Tone::Green => format!("\x1b[32m{text}\x1b[0m"),
            Tone::Red => format!("\x1b[31m{text}\x1b[0m"),
            Tone::Neutral => text.to_string(),
        }
    }
}

/// Text shown in the result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub text: String,
    pub tone: Tone,
}

impl ResultPanel {
    pub fn from_result(result: &DecisionResult) -> Self {
        let text = format!(
            "Updated Edge: {:.4}\n\
             Goal Probability: {:.2}%\n\
             EV Hold: {:.4}\n\
             EV Cashout: {:.4}\n\
             Decision: {}",
            result.updated_edge,
            result.goal_probability * 100.0,
            result.ev_hold,
            result.ev_cashout,
            result.decision,
        );
        let tone = match result.decision {
            Decision::Hold => Tone::Green,
            Decision::CashOut => Tone::Red,
        };
        Self { text, tone }
    }

    pub fn invalid() -> Self {
        Self {
            text: INVALID_INPUT_MESSAGE.to_string(),
            tone: Tone::Neutral,
        }
    }

    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Computed(result) => Self::from_result(result),
            Outcome::Invalid(_) => Self::invalid(),
        }
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct InvalidJson<'a> {
    error: &'a str,
}

/// Render an outcome in the requested format. Text is left uncoloured.
pub fn render(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(ResultPanel::from_outcome(outcome).text),
        OutputFormat::Json => match outcome {
            Outcome::Computed(result) => {
                serde_json::to_string_pretty(result).context("Failed to serialise result")
            }
            Outcome::Invalid(_) => serde_json::to_string_pretty(&InvalidJson {
                error: INVALID_INPUT_MESSAGE,
            })
            .context("Failed to serialise error"),
        },
    }
}

/// One line per preset: decision, reason and goal probability.
pub fn render_comparison(results: &[(PolicyPreset, DecisionResult)]) -> String {
    let mut out = String::from("Preset          Decision  P(goal)  EV Hold  Reason");
    for (preset, r) in results {
        let _ = write!(
            out,
            "\n{:<15} {:<9} {:>6.2}%  {:>7.4}  {}",
            preset.to_string(),
            r.decision.to_string(),
            r.goal_probability * 100.0,
            r.ev_hold,
            r.reason,
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
