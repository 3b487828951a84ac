//! Goal probability estimate.
//!
//! Starts from a time-decayed base and nudges it by match intensity
//! (shots on target, combined xG) and the scoreline.

use tracing::debug;

use super::policy::DecisionPolicy;
use crate::types::MatchSnapshot;

/// Probability that at least one more goal is scored, in `[0, policy.probability_cap]`.
pub fn goal_probability(snapshot: &MatchSnapshot, policy: &DecisionPolicy) -> f64 {
    let minutes = f64::from(snapshot.match_time);
    let base = (policy.base_probability - policy.decay_per_minute * minutes)
        .max(policy.probability_floor);
    let mut p = base;

    let total_sot = f64::from(snapshot.total_sot());
    let sot_delta = policy.sot_rule.adjustment(total_sot);
    p += sot_delta;

    let xg_delta = snapshot
        .xg
        .map(|xg| policy.xg_rule.adjustment(xg.total()))
        .unwrap_or(0.0);
    p += xg_delta;

    if policy.cap_before_scoreline {
        p = p.min(policy.probability_cap);
    }

    let score_delta = scoreline_adjustment(snapshot, policy.scoreline_swing);
    p += score_delta;

    let p = p.max(0.0).min(policy.probability_cap);

    debug!(
        minute = snapshot.match_time,
        base = format!("{:.4}", base),
        sot = format!("{:+.4}", sot_delta),
        xg = format!("{:+.4}", xg_delta),
        score = format!("{:+.4}", score_delta),
        p_goal = format!("{:.4}", p),
        "Goal probability estimated"
    );

    p
}

/// A trailing favourite pushes for goals; a leading one sits back.
fn scoreline_adjustment(snapshot: &MatchSnapshot, swing: f64) -> f64 {
    match snapshot.underdog_lead() {
        lead if lead > 0 => swing,
        lead if lead < 0 => -swing,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
