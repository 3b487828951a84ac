//! Match-state signals and the Hold / Cash Out rules built on them.
//!
//! Rules are applied in order, later ones overriding earlier ones:
//! underdog dominance, favourite comeback, then the late-game rules.

use tracing::debug;

use super::policy::DecisionPolicy;
use crate::types::{Decision, DecisionReason, MatchSnapshot};

/// Boolean reading of the match, computed once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSignals {
    /// How many of the three underdog-dominance signals fired.
    pub dominance_score: u8,
    /// `dominance_score` reached the policy threshold.
    pub underdog_dominating: bool,
    /// Favourite is creating enough to score again.
    pub favourite_comeback: bool,
    /// Favourite has the game under control (used late on).
    pub favourite_in_control: bool,
}

impl MatchSignals {
    /// Missing xG or possession makes the signals that need them false.
    pub fn read(snapshot: &MatchSnapshot, policy: &DecisionPolicy) -> Self {
        let xg_edge = snapshot
            .xg
            .is_some_and(|xg| xg.underdog >= xg.fav + policy.xg_dominance_margin);
        let sot_edge = snapshot.sot_underdog > snapshot.sot_fav;
        let possession_edge = snapshot
            .possession
            .is_some_and(|p| p.fav < policy.possession_dominance_floor);

        let dominance_score = [xg_edge, sot_edge, possession_edge]
            .iter()
            .filter(|&&s| s)
            .count() as u8;

        let favourite_comeback = match (snapshot.xg, snapshot.possession) {
            (Some(xg), Some(possession)) => {
                xg.fav > policy.comeback_min_xg
                    && snapshot.sot_fav >= policy.comeback_min_sot
                    && possession.fav > policy.comeback_min_possession
            }
            _ => false,
        };

        let favourite_in_control = match (snapshot.xg, snapshot.possession) {
            (Some(xg), Some(possession)) => {
                xg.underdog < policy.late_lead_max_underdog_xg
                    && snapshot.sot_underdog < policy.late_lead_max_underdog_sot
                    && possession.fav > policy.late_lead_min_possession
            }
            _ => false,
        };

        Self {
            dominance_score,
            underdog_dominating: dominance_score >= policy.dominance_threshold,
            favourite_comeback,
            favourite_in_control,
        }
    }
}

/// Pick Hold or Cash Out from the signals.
pub fn decide(
    snapshot: &MatchSnapshot,
    signals: &MatchSignals,
    policy: &DecisionPolicy,
) -> (Decision, DecisionReason) {
    let mut outcome = (Decision::Hold, DecisionReason::Default);

    if policy.dominance_cashes_out && signals.underdog_dominating {
        outcome = (Decision::CashOut, DecisionReason::UnderdogDominance);
    }

    if signals.favourite_comeback {
        outcome = (Decision::CashOut, DecisionReason::FavouriteComeback);
    }

    if let Some(late_minute) = policy.late_game_minute {
        if snapshot.match_time >= late_minute {
            if let Some(late) = late_game_override(snapshot, signals, policy) {
                debug!(
                    minute = snapshot.match_time,
                    reason = %late.1,
                    "Late-game override"
                );
                outcome = late;
            }
        }
    }

    outcome
}

fn late_game_override(
    snapshot: &MatchSnapshot,
    signals: &MatchSignals,
    policy: &DecisionPolicy,
) -> Option<(Decision, DecisionReason)> {
    let margin = i64::from(policy.late_lead_margin);
    let underdog_lead = snapshot.underdog_lead();

    if underdog_lead >= margin && signals.underdog_dominating {
        Some((Decision::Hold, DecisionReason::LateUnderdogLead))
    } else if signals.favourite_comeback {
        Some((Decision::CashOut, DecisionReason::LateFavouriteComeback))
    } else if -underdog_lead >= margin && signals.favourite_in_control {
        Some((Decision::Hold, DecisionReason::LateFavouriteLead))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
