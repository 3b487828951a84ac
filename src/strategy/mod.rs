//! Decision engine: edge, goal probability, expected values and the
//! Hold / Cash Out rules.

pub mod edge;
pub mod goal;
pub mod policy;
pub mod signals;

use tracing::{debug, info};

use crate::types::{CashoutError, DecisionResult, MatchSnapshot};
use edge::ExpectedValues;
use policy::{DecisionPolicy, PolicyPreset};
use signals::MatchSignals;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Pipelines validation → edge → goal probability → EVs → decision rules.
///
/// Holds no state beyond its policy; `evaluate` is a pure function of the
/// snapshot and can be called any number of times.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    policy: DecisionPolicy,
}

impl DecisionEngine {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }

    pub fn from_preset(preset: PolicyPreset) -> Self {
        Self::new(preset.policy())
    }

    /// Access the decision policy.
    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Evaluate one snapshot.
    ///
    /// Fails with `InvalidInput` when the snapshot breaks a precondition
    /// (zero or negative odds, negative xG, possession outside 0–100).
    pub fn evaluate(&self, snapshot: &MatchSnapshot) -> Result<DecisionResult, CashoutError> {
        snapshot.validate()?;

        let updated_edge = edge::updated_edge(snapshot.model_odds, snapshot.live_odds);
        let goal_probability = goal::goal_probability(snapshot, &self.policy);
        let ev = ExpectedValues::compute(goal_probability, snapshot.model_odds, snapshot.live_odds);

        let signals = MatchSignals::read(snapshot, &self.policy);
        debug!(
            dominance = signals.dominance_score,
            dominating = signals.underdog_dominating,
            comeback = signals.favourite_comeback,
            in_control = signals.favourite_in_control,
            "Match signals read"
        );
        let (decision, reason) = signals::decide(snapshot, &signals, &self.policy);

        let result = DecisionResult {
            updated_edge,
            goal_probability,
            ev_hold: ev.hold,
            ev_cashout: ev.cashout,
            decision,
            dominance_score: signals.dominance_score,
            reason,
        };

        info!(
            snapshot = %snapshot,
            result = %result,
            hold_advantage = format!("{:+.4}", ev.hold_advantage()),
            "Decision made"
        );

        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points
// ---------------------------------------------------------------------------

/// Evaluate under the canonical policy.
pub fn evaluate(snapshot: &MatchSnapshot) -> Result<DecisionResult, CashoutError> {
    DecisionEngine::default().evaluate(snapshot)
}

/// Evaluate one snapshot under every known preset, in `PolicyPreset::ALL` order.
pub fn compare_presets(
    snapshot: &MatchSnapshot,
) -> Result<Vec<(PolicyPreset, DecisionResult)>, CashoutError> {
    PolicyPreset::ALL
        .iter()
        .map(|&preset| {
            DecisionEngine::from_preset(preset)
                .evaluate(snapshot)
                .map(|result| (preset, result))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
