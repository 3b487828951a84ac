//! Shared types for the CASHOUT advisor.
//!
//! The input snapshot, the decision record and the error type used by the
//! strategy, form and report modules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed message shown in place of a result when the form can't be evaluated.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid numerical values.";

// ---------------------------------------------------------------------------
// Match snapshot
// ---------------------------------------------------------------------------

/// A favourite / underdog pair of the same statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamPair<T> {
    pub fav: T,
    pub underdog: T,
}

impl<T> TeamPair<T> {
    pub fn new(fav: T, underdog: T) -> Self {
        Self { fav, underdog }
    }
}

impl TeamPair<f64> {
    pub fn total(&self) -> f64 {
        self.fav + self.underdog
    }
}

/// In-play statistics for a match where the user holds a draw bet.
///
/// Built fresh for every evaluation and never mutated by the engine.
/// `xg` and `possession` are optional: older calculator revisions
/// didn't collect them, and the rules that need them are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// User's own fair decimal odds for the draw.
    pub model_odds: f64,
    /// Pre-match bookmaker decimal odds for the draw.
    pub bookmaker_odds: f64,
    /// Current in-play decimal odds for the draw.
    pub live_odds: f64,
    pub sot_fav: u32,
    pub sot_underdog: u32,
    /// Minutes played, stoppage time included.
    pub match_time: u32,
    pub fav_goals: u32,
    pub underdog_goals: u32,
    #[serde(default)]
    pub xg: Option<TeamPair<f64>>,
    /// Possession percentages (0–100).
    #[serde(default)]
    pub possession: Option<TeamPair<f64>>,
}

impl MatchSnapshot {
    /// Goals the underdog is ahead by (negative when the favourite leads).
    pub fn underdog_lead(&self) -> i64 {
        i64::from(self.underdog_goals) - i64::from(self.fav_goals)
    }

    pub fn total_sot(&self) -> u32 {
        self.sot_fav.saturating_add(self.sot_underdog)
    }

    /// Check the preconditions the engine relies on.
    pub fn validate(&self) -> Result<(), CashoutError> {
        for (field, odds) in [
            ("model_odds", self.model_odds),
            ("bookmaker_odds", self.bookmaker_odds),
            ("live_odds", self.live_odds),
        ] {
            if !odds.is_finite() || odds <= 0.0 {
                return Err(CashoutError::invalid(field, format!("odds must be positive, got {odds}")));
            }
        }

        if let Some(xg) = &self.xg {
            for (field, value) in [("xg_fav", xg.fav), ("xg_underdog", xg.underdog)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(CashoutError::invalid(field, format!("xG must be non-negative, got {value}")));
                }
            }
        }

        if let Some(possession) = &self.possession {
            for (field, value) in [
                ("possession_fav", possession.fav),
                ("possession_underdog", possession.underdog),
            ] {
                if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                    return Err(CashoutError::invalid(field, format!("possession must be 0–100, got {value}")));
                }
            }
        }

        Ok(())
    }

    /// Scenario used across tests: a level-ish second half with no strong signals.
    #[cfg(test)]
    pub fn sample() -> Self {
        MatchSnapshot {
            model_odds: 3.0,
            bookmaker_odds: 3.2,
            live_odds: 4.0,
            sot_fav: 3,
            sot_underdog: 3,
            match_time: 50,
            fav_goals: 1,
            underdog_goals: 0,
            xg: Some(TeamPair::new(0.8, 0.6)),
            possession: Some(TeamPair::new(50.0, 50.0)),
        }
    }
}

impl fmt::Display for MatchSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}' {}-{} (draw model {:.2} | book {:.2} | live {:.2} | SOT {}-{})",
            self.match_time,
            self.fav_goals,
            self.underdog_goals,
            self.model_odds,
            self.bookmaker_odds,
            self.live_odds,
            self.sot_fav,
            self.sot_underdog,
        )
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Recommendation for the open draw bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Hold,
    CashOut,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Hold => write!(f, "Hold"),
            Decision::CashOut => write!(f, "Cash Out"),
        }
    }
}

/// Which rule settled the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// No rule fired; the default Hold stands.
    Default,
    /// Enough underdog dominance signals to cash out.
    UnderdogDominance,
    /// Favourite is pressing for a goal.
    FavouriteComeback,
    /// Late game, underdog two goals up and on top.
    LateUnderdogLead,
    /// Late game, favourite still pressing.
    LateFavouriteComeback,
    /// Late game, favourite two goals up and in control.
    LateFavouriteLead,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionReason::Default => "no signal",
            DecisionReason::UnderdogDominance => "underdog dominance",
            DecisionReason::FavouriteComeback => "favourite comeback",
            DecisionReason::LateUnderdogLead => "late underdog lead",
            DecisionReason::LateFavouriteComeback => "late favourite comeback",
            DecisionReason::LateFavouriteLead => "late favourite lead",
        };
        write!(f, "{s}")
    }
}

/// Output of a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// `1/live_odds − 1/model_odds`.
    pub updated_edge: f64,
    /// Probability of another goal, clamped to the policy's cap.
    pub goal_probability: f64,
    pub ev_hold: f64,
    pub ev_cashout: f64,
    pub decision: Decision,
    /// Number of underdog dominance signals (0–3).
    pub dominance_score: u8,
    pub reason: DecisionReason,
}

impl fmt::Display for DecisionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) edge={:.4} p_goal={:.1}% ev_hold={:.4} ev_cashout={:.4}",
            self.decision,
            self.reason,
            self.updated_edge,
            self.goal_probability * 100.0,
            self.ev_hold,
            self.ev_cashout,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for CASHOUT.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CashoutError {
    #[error("Invalid input ({field}): {reason}")]
    InvalidInput { field: String, reason: String },
}

impl CashoutError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CashoutError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The message shown to the user in place of a result.
    pub fn user_message(&self) -> &'static str {
        match self {
            CashoutError::InvalidInput { .. } => INVALID_INPUT_MESSAGE,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
