//! Decision policy: every weight and threshold the engine uses.
//!
//! Past revisions of the calculator disagreed on the probability cap, on
//! whether the SOT/xG adjustments are thresholded, and on how many
//! dominance signals trigger a cash out. Each revision is a
//! [`PolicyPreset`]; the canonical one is the `Default`.

use anyhow::{ensure, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Adjustment rules
// ---------------------------------------------------------------------------

/// How a match total (shots on target, combined xG) moves the goal probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjustmentRule {
    /// `+weight × total` once `total ≥ min_total`, otherwise `−penalty`.
    Thresholded {
        min_total: f64,
        weight: f64,
        penalty: f64,
    },
    /// `+weight × total`, always.
    Linear { weight: f64 },
}

impl AdjustmentRule {
    /// Probability delta for the given total.
    pub fn adjustment(&self, total: f64) -> f64 {
        match *self {
            AdjustmentRule::Thresholded {
                min_total,
                weight,
                penalty,
            } => {
                if total >= min_total {
                    weight * total
                } else {
                    -penalty
                }
            }
            AdjustmentRule::Linear { weight } => weight * total,
        }
    }

    fn weights_non_negative(&self) -> bool {
        match *self {
            AdjustmentRule::Thresholded {
                min_total,
                weight,
                penalty,
            } => min_total >= 0.0 && weight >= 0.0 && penalty >= 0.0,
            AdjustmentRule::Linear { weight } => weight >= 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Weights and thresholds for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPolicy {
    /// Goal probability at kick-off.
    pub base_probability: f64,
    /// Probability lost per minute played.
    pub decay_per_minute: f64,
    /// Lower bound of the time-decayed base.
    pub probability_floor: f64,
    pub sot_rule: AdjustmentRule,
    pub xg_rule: AdjustmentRule,
    /// Added when the underdog leads, subtracted when the favourite leads.
    pub scoreline_swing: f64,
    /// Upper bound of the final goal probability.
    pub probability_cap: f64,
    /// Apply the cap once more before the scoreline adjustment.
    pub cap_before_scoreline: bool,

    /// Underdog xG must beat favourite xG by at least this much.
    pub xg_dominance_margin: f64,
    /// Favourite possession below this counts as underdog dominance.
    pub possession_dominance_floor: f64,
    /// Signals (of 3) needed for the underdog to count as dominating.
    pub dominance_threshold: u8,
    /// Whether a dominating underdog alone is enough to cash out.
    pub dominance_cashes_out: bool,

    /// Favourite comeback: xG strictly above this...
    pub comeback_min_xg: f64,
    /// ...at least this many shots on target...
    pub comeback_min_sot: u32,
    /// ...and possession strictly above this.
    pub comeback_min_possession: f64,

    /// Minute from which the late-game rules apply. `None` disables them;
    /// in config, `late_game_minute = false` does the same.
    #[serde(default, deserialize_with = "minute_or_off")]
    pub late_game_minute: Option<u32>,
    /// Goal margin that counts as a comfortable lead late on.
    pub late_lead_margin: u32,
    /// Favourite in control: underdog xG strictly below this...
    pub late_lead_max_underdog_xg: f64,
    /// ...underdog SOT strictly below this...
    pub late_lead_max_underdog_sot: u32,
    /// ...and favourite possession strictly above this.
    pub late_lead_min_possession: f64,
}

/// Accepts a minute, `false` or null.
fn minute_or_off<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MinuteOrOff {
        Minute(u32),
        Switch(bool),
    }

    match Option::<MinuteOrOff>::deserialize(deserializer)? {
        Some(MinuteOrOff::Minute(minute)) => Ok(Some(minute)),
        Some(MinuteOrOff::Switch(false)) | None => Ok(None),
        Some(MinuteOrOff::Switch(true)) => Err(de::Error::custom(
            "late_game_minute takes a minute, or false to disable the late-game rules",
        )),
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            base_probability: 0.50,
            decay_per_minute: 0.0045,
            probability_floor: 0.10,
            sot_rule: AdjustmentRule::Thresholded {
                min_total: 6.0,
                weight: 0.020,
                penalty: 0.05,
            },
            xg_rule: AdjustmentRule::Thresholded {
                min_total: 1.2,
                weight: 0.02,
                penalty: 0.10,
            },
            scoreline_swing: 0.04,
            probability_cap: 1.0,
            cap_before_scoreline: false,

            xg_dominance_margin: 0.3,
            possession_dominance_floor: 45.0,
            dominance_threshold: 2,
            dominance_cashes_out: true,

            comeback_min_xg: 1.5,
            comeback_min_sot: 6,
            comeback_min_possession: 55.0,

            late_game_minute: Some(80),
            late_lead_margin: 2,
            late_lead_max_underdog_xg: 0.8,
            late_lead_max_underdog_sot: 3,
            late_lead_min_possession: 55.0,
        }
    }
}

impl DecisionPolicy {
    /// Reject policies the engine can't produce sensible output for.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.probability_cap > 0.0 && self.probability_cap <= 1.0,
            "probability_cap must be in (0, 1], got {}",
            self.probability_cap
        );
        ensure!(
            (0.0..=1.0).contains(&self.base_probability),
            "base_probability must be in [0, 1], got {}",
            self.base_probability
        );
        ensure!(
            (0.0..=1.0).contains(&self.probability_floor),
            "probability_floor must be in [0, 1], got {}",
            self.probability_floor
        );
        ensure!(
            self.decay_per_minute >= 0.0 && self.scoreline_swing >= 0.0,
            "decay_per_minute and scoreline_swing must be non-negative"
        );
        ensure!(
            self.sot_rule.weights_non_negative() && self.xg_rule.weights_non_negative(),
            "adjustment rule weights must be non-negative"
        );
        ensure!(
            (1..=3).contains(&self.dominance_threshold),
            "dominance_threshold must be 1..=3, got {}",
            self.dominance_threshold
        );
        ensure!(self.late_lead_margin > 0, "late_lead_margin must be at least 1");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Known calculator revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyPreset {
    /// Thresholded adjustments, uncapped, majority-of-3 cash out.
    #[default]
    Canonical,
    /// Goal probability capped at 75% (also before the scoreline step).
    Capped,
    /// Any single dominance signal cashes out.
    AnySignal,
    /// SOT and xG adjustments applied linearly, with no threshold or penalty.
    Linear,
    /// Hold unless a comeback or late-game rule fires.
    LatestSource,
}

impl PolicyPreset {
    pub const ALL: &'static [PolicyPreset] = &[
        PolicyPreset::Canonical,
        PolicyPreset::Capped,
        PolicyPreset::AnySignal,
        PolicyPreset::Linear,
        PolicyPreset::LatestSource,
    ];

    pub fn policy(&self) -> DecisionPolicy {
        let canonical = DecisionPolicy::default();
        match self {
            PolicyPreset::Canonical => canonical,
            PolicyPreset::Capped => DecisionPolicy {
                probability_cap: 0.75,
                cap_before_scoreline: true,
                ..canonical
            },
            PolicyPreset::AnySignal => DecisionPolicy {
                dominance_threshold: 1,
                ..canonical
            },
            PolicyPreset::Linear => DecisionPolicy {
                sot_rule: AdjustmentRule::Linear { weight: 0.020 },
                xg_rule: AdjustmentRule::Linear { weight: 0.02 },
                ..canonical
            },
            PolicyPreset::LatestSource => DecisionPolicy {
                dominance_cashes_out: false,
                ..canonical
            },
        }
    }
}

impl fmt::Display for PolicyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyPreset::Canonical => write!(f, "canonical"),
            PolicyPreset::Capped => write!(f, "capped"),
            PolicyPreset::AnySignal => write!(f, "any_signal"),
            PolicyPreset::Linear => write!(f, "linear"),
            PolicyPreset::LatestSource => write!(f, "latest_source"),
        }
    }
}

impl std::str::FromStr for PolicyPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "canonical" | "default" => Ok(PolicyPreset::Canonical),
            "capped" => Ok(PolicyPreset::Capped),
            "any_signal" | "any" => Ok(PolicyPreset::AnySignal),
            "linear" => Ok(PolicyPreset::Linear),
            "latest_source" | "latest" => Ok(PolicyPreset::LatestSource),
            _ => Err(anyhow::anyhow!("Unknown policy preset: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
