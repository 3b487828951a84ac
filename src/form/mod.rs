//! The calculator form: named input fields, parsing and reset.
//!
//! Defines the `FieldSource` trait (anything that can hand back the raw
//! text of a field) and `FormSession`, the in-memory form that the
//! terminal prompt fills in. Parsing failures become `InvalidInput` here
//! and never reach the engine.

pub mod console;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::strategy::DecisionEngine;
use crate::types::{CashoutError, DecisionResult, MatchSnapshot, TeamPair};

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Input fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ModelOdds,
    BookmakerOdds,
    LiveOdds,
    SotFav,
    SotUnderdog,
    MatchTime,
    FavGoals,
    UnderdogGoals,
    XgFav,
    XgUnderdog,
    PossessionFav,
    PossessionUnderdog,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::ModelOdds,
        Field::BookmakerOdds,
        Field::LiveOdds,
        Field::SotFav,
        Field::SotUnderdog,
        Field::MatchTime,
        Field::FavGoals,
        Field::UnderdogGoals,
        Field::XgFav,
        Field::XgUnderdog,
        Field::PossessionFav,
        Field::PossessionUnderdog,
    ];

    /// Stable identifier, also used in error messages.
    pub fn key(&self) -> &'static str {
        match self {
            Field::ModelOdds => "model_odds",
            Field::BookmakerOdds => "bookmaker_odds",
            Field::LiveOdds => "live_odds",
            Field::SotFav => "sot_fav",
            Field::SotUnderdog => "sot_underdog",
            Field::MatchTime => "match_time",
            Field::FavGoals => "fav_goals",
            Field::UnderdogGoals => "underdog_goals",
            Field::XgFav => "xg_fav",
            Field::XgUnderdog => "xg_underdog",
            Field::PossessionFav => "possession_fav",
            Field::PossessionUnderdog => "possession_underdog",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::ModelOdds => "Model Odds",
            Field::BookmakerOdds => "Bookmaker Odds",
            Field::LiveOdds => "Live Odds",
            Field::SotFav => "SOT Fav",
            Field::SotUnderdog => "SOT Underdog",
            Field::MatchTime => "Match Time",
            Field::FavGoals => "Fav Goals",
            Field::UnderdogGoals => "Underdog Goals",
            Field::XgFav => "xG Fav",
            Field::XgUnderdog => "xG Underdog",
            Field::PossessionFav => "Possession Fav",
            Field::PossessionUnderdog => "Possession Underdog",
        }
    }

    /// xG and possession may be left blank (both of a pair, not one).
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Field::XgFav | Field::XgUnderdog | Field::PossessionFav | Field::PossessionUnderdog
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Field source
// ---------------------------------------------------------------------------

/// Anything holding the raw text typed into the form.
#[cfg_attr(test, mockall::automock)]
pub trait FieldSource {
    /// Raw text of a field, `None` if it was never filled in.
    fn value(&self, field: Field) -> Option<String>;
}

/// Read every field from `source` and build a validated snapshot.
pub fn parse_snapshot(source: &dyn FieldSource) -> Result<MatchSnapshot, CashoutError> {
    let snapshot = MatchSnapshot {
        model_odds: required(source, Field::ModelOdds)?,
        bookmaker_odds: required(source, Field::BookmakerOdds)?,
        live_odds: required(source, Field::LiveOdds)?,
        sot_fav: required(source, Field::SotFav)?,
        sot_underdog: required(source, Field::SotUnderdog)?,
        match_time: required(source, Field::MatchTime)?,
        fav_goals: required(source, Field::FavGoals)?,
        underdog_goals: required(source, Field::UnderdogGoals)?,
        xg: optional_pair(source, Field::XgFav, Field::XgUnderdog)?,
        possession: optional_pair(source, Field::PossessionFav, Field::PossessionUnderdog)?,
    };
    snapshot.validate()?;
    Ok(snapshot)
}

/// Trimmed text, `None` when missing or blank.
fn text(source: &dyn FieldSource, field: Field) -> Option<String> {
    source
        .value(field)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_text<T>(field: Field, raw: &str) -> Result<T, CashoutError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| CashoutError::invalid(field.key(), format!("{raw:?}: {e}")))
}

fn required<T>(source: &dyn FieldSource, field: Field) -> Result<T, CashoutError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = text(source, field).ok_or_else(|| CashoutError::invalid(field.key(), "missing value"))?;
    parse_text(field, &raw)
}

fn optional_pair(
    source: &dyn FieldSource,
    fav: Field,
    underdog: Field,
) -> Result<Option<TeamPair<f64>>, CashoutError> {
    match (text(source, fav), text(source, underdog)) {
        (None, None) => Ok(None),
        (Some(f), Some(u)) => Ok(Some(TeamPair::new(parse_text(fav, &f)?, parse_text(underdog, &u)?))),
        (None, Some(_)) => Err(CashoutError::invalid(fav.key(), "missing value")),
        (Some(_), None) => Err(CashoutError::invalid(underdog.key(), "missing value")),
    }
}

// ---------------------------------------------------------------------------
// Form session
// ---------------------------------------------------------------------------

/// What the result area shows after a calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Computed(DecisionResult),
    Invalid(CashoutError),
}

impl Outcome {
    pub fn result(&self) -> Option<&DecisionResult> {
        match self {
            Outcome::Computed(r) => Some(r),
            Outcome::Invalid(_) => None,
        }
    }
}

/// Editable form state: the raw text per field and the last outcome.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    entries: HashMap<Field, String>,
    outcome: Option<Outcome>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        self.entries.insert(field, text.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    /// Last calculation, if any since the previous reset.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Clear every field and the result.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.outcome = None;
    }

    /// Parse the form, evaluate it and store the outcome.
    pub fn calculate(&mut self, engine: &DecisionEngine) -> &Outcome {
        let outcome = match parse_snapshot(&*self).and_then(|s| engine.evaluate(&s)) {
            Ok(result) => Outcome::Computed(result),
            Err(e) => {
                warn!(error = %e, "Form rejected");
                Outcome::Invalid(e)
            }
        };
        self.outcome.insert(outcome)
    }
}

impl FieldSource for FormSession {
    fn value(&self, field: Field) -> Option<String> {
        self.get(field).map(str::to_string)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
