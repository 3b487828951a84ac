//! Deterministic form fixtures for integration testing.
//!
//! `StaticForm` is a `FieldSource` backed by a plain map, so tests can
//! describe a match as the text a user would type.

use std::collections::HashMap;

use cashout::form::{Field, FieldSource, FormSession};
use cashout::types::{MatchSnapshot, TeamPair};

/// An in-memory form with fixed field text.
#[derive(Debug, Clone, Default)]
pub struct StaticForm {
    values: HashMap<Field, String>,
}

impl StaticForm {
    /// The match from the worked example: favourite 1–0 up at 50', even stats.
    pub fn scenario_a() -> Self {
        Self::from_pairs(&[
            (Field::ModelOdds, "3.0"),
            (Field::BookmakerOdds, "3.0"),
            (Field::LiveOdds, "4.0"),
            (Field::SotFav, "3"),
            (Field::SotUnderdog, "3"),
            (Field::MatchTime, "50"),
            (Field::FavGoals, "1"),
            (Field::UnderdogGoals, "0"),
            (Field::XgFav, "0.8"),
            (Field::XgUnderdog, "0.6"),
            (Field::PossessionFav, "50"),
            (Field::PossessionUnderdog, "50"),
        ])
    }

    pub fn from_pairs(pairs: &[(Field, &str)]) -> Self {
        Self {
            values: pairs.iter().map(|(f, v)| (*f, v.to_string())).collect(),
        }
    }

    /// Replace one field's text.
    pub fn with(mut self, field: Field, text: &str) -> Self {
        self.values.insert(field, text.to_string());
        self
    }

    /// Copy every field into a live form session.
    pub fn into_session(self) -> FormSession {
        let mut session = FormSession::new();
        for (field, text) in self.values {
            session.set(field, text);
        }
        session
    }
}

impl FieldSource for StaticForm {
    fn value(&self, field: Field) -> Option<String> {
        self.values.get(&field).cloned()
    }
}

/// Snapshot builder for engine-level tests.
pub fn snapshot(minute: u32, goals: (u32, u32), sot: (u32, u32), xg: (f64, f64), possession_fav: f64) -> MatchSnapshot {
    MatchSnapshot {
        model_odds: 3.0,
        bookmaker_odds: 3.0,
        live_odds: 4.0,
        sot_fav: sot.0,
        sot_underdog: sot.1,
        match_time: minute,
        fav_goals: goals.0,
        underdog_goals: goals.1,
        xg: Some(TeamPair::new(xg.0, xg.1)),
        possession: Some(TeamPair::new(possession_fav, 100.0 - possession_fav)),
    }
}
