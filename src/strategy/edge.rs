//! Edge and expected value of the open draw bet.
//!
//! Edge compares the probability implied by the live draw odds with the
//! one implied by the user's own model odds. The two EVs weigh keeping
//! the bet open against taking the cash-out value now.

use tracing::debug;

/// Probability implied by decimal odds.
pub fn implied_probability(decimal_odds: f64) -> f64 {
    1.0 / decimal_odds
}

/// `1/live_odds − 1/model_odds`. Positive when the market now rates the
/// draw as likelier than the model does.
pub fn updated_edge(model_odds: f64, live_odds: f64) -> f64 {
    implied_probability(live_odds) - implied_probability(model_odds)
}

/// Expected value of holding vs. cashing out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedValues {
    pub hold: f64,
    pub cashout: f64,
}

impl ExpectedValues {
    /// `hold = (1 − p)·(1/live) − p·(1/model)`, `cashout = 1/live`.
    pub fn compute(goal_probability: f64, model_odds: f64, live_odds: f64) -> Self {
        let live_implied = implied_probability(live_odds);
        let model_implied = implied_probability(model_odds);

        let hold = (1.0 - goal_probability) * live_implied - goal_probability * model_implied;
        let cashout = live_implied;

        debug!(
            p_goal = format!("{:.4}", goal_probability),
            ev_hold = format!("{:.4}", hold),
            ev_cashout = format!("{:.4}", cashout),
            "Expected values computed"
        );

        Self { hold, cashout }
    }

    /// How much holding beats cashing out (negative when it doesn't).
    pub fn hold_advantage(&self) -> f64 {
        self.hold - self.cashout
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
