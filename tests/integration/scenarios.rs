//! End-to-end scenarios under the canonical policy.

use cashout::form::{parse_snapshot, Field, Outcome};
use cashout::report::{render, OutputFormat, ResultPanel, Tone};
use cashout::strategy::{evaluate, DecisionEngine};
use cashout::types::{Decision, DecisionReason};

use crate::fixtures::{snapshot, StaticForm};

#[test]
fn test_scenario_a_edge() {
    let s = parse_snapshot(&StaticForm::scenario_a()).unwrap();
    let result = evaluate(&s).unwrap();
    assert!((result.updated_edge - (0.25 - 1.0 / 3.0)).abs() < 1e-9);
    assert!((result.updated_edge + 0.0833).abs() < 1e-4);
    assert_eq!(result.decision, Decision::Hold);
}

#[test]
fn test_scenario_a_through_form_session() {
    let mut session = StaticForm::scenario_a().into_session();
    let outcome = session.calculate(&DecisionEngine::default());
    let panel = ResultPanel::from_outcome(outcome);
    assert_eq!(panel.tone, Tone::Green);
    assert!(panel.text.starts_with("Updated Edge: -0.0833\n"));
    assert!(panel.text.contains("Goal Probability: 38.30%"));
}

#[test]
fn test_scenario_b_non_numeric_odds() {
    let mut session = StaticForm::scenario_a()
        .with(Field::ModelOdds, "abc")
        .into_session();
    let outcome = session.calculate(&DecisionEngine::default()).clone();
    assert!(matches!(outcome, Outcome::Invalid(_)));
    assert!(outcome.result().is_none());

    let text = render(&outcome, OutputFormat::Text).unwrap();
    assert_eq!(text, "Please enter valid numerical values.");
    assert!(!text.contains("Edge"));
    assert!(!text.contains("EV"));
}

#[test]
fn test_scenario_b_zero_odds() {
    let form = StaticForm::scenario_a().with(Field::LiveOdds, "0");
    assert!(parse_snapshot(&form).is_err());
}

#[test]
fn test_scenario_c_underdog_dominance_cashes_out() {
    let s = snapshot(55, (1, 0), (2, 4), (0.5, 0.9), 40.0);
    let result = evaluate(&s).unwrap();
    assert!(result.dominance_score >= 2);
    assert_eq!(result.decision, Decision::CashOut);
    assert_eq!(result.reason, DecisionReason::UnderdogDominance);
}

#[test]
fn test_scenario_d_favourite_comeback() {
    let s = snapshot(60, (0, 1), (8, 2), (2.0, 0.5), 60.0);
    let result = evaluate(&s).unwrap();
    assert_eq!(result.decision, Decision::CashOut);
    assert_eq!(result.reason, DecisionReason::FavouriteComeback);
}

#[test]
fn test_scenario_d_regardless_of_dominance() {
    let s = snapshot(60, (0, 1), (8, 9), (2.0, 2.4), 60.0);
    let result = evaluate(&s).unwrap();
    assert_eq!(result.dominance_score, 2);
    assert_eq!(result.decision, Decision::CashOut);
    assert_eq!(result.reason, DecisionReason::FavouriteComeback);
}

#[test]
fn test_late_game_boundary() {
    let at_79 = evaluate(&snapshot(79, (0, 2), (2, 5), (0.4, 1.1), 40.0)).unwrap();
    let at_80 = evaluate(&snapshot(80, (0, 2), (2, 5), (0.4, 1.1), 40.0)).unwrap();

    assert_eq!(at_79.decision, Decision::CashOut);
    assert_eq!(at_79.reason, DecisionReason::UnderdogDominance);
    assert_eq!(at_80.decision, Decision::Hold);
    assert_eq!(at_80.reason, DecisionReason::LateUnderdogLead);
}

#[test]
fn test_goal_probability_bounded_for_extremes() {
    let minutes = [0, 45, 80, 90, 130];
    let sots = [(0, 0), (3, 2), (50, 50)];
    let xgs = [(0.0, 0.0), (0.7, 0.6), (8.0, 7.5)];
    let goals = [(0, 0), (4, 0), (0, 4)];

    for &minute in &minutes {
        for &sot in &sots {
            for &xg in &xgs {
                for &score in &goals {
                    let r = evaluate(&snapshot(minute, score, sot, xg, 50.0)).unwrap();
                    assert!(
                        (0.0..=1.0).contains(&r.goal_probability),
                        "p_goal {} out of range at {minute}' {score:?} {sot:?} {xg:?}",
                        r.goal_probability
                    );
                }
            }
        }
    }
}

#[test]
fn test_edge_matches_implied_probabilities() {
    for (model, live) in [(3.0, 4.0), (2.5, 2.5), (4.2, 1.9), (1.01, 50.0)] {
        let s = cashout::types::MatchSnapshot {
            model_odds: model,
            live_odds: live,
            ..snapshot(30, (0, 0), (1, 1), (0.3, 0.2), 50.0)
        };
        let r = evaluate(&s).unwrap();
        assert!((r.updated_edge - (1.0 / live - 1.0 / model)).abs() < 1e-12);
        assert!((r.ev_cashout - 1.0 / live).abs() < 1e-12);
    }
}

#[test]
fn test_repeat_evaluation_identical() {
    let engine = DecisionEngine::default();
    let s = snapshot(67, (1, 1), (5, 4), (1.3, 1.1), 52.0);
    let first = engine.evaluate(&s).unwrap();
    for _ in 0..10 {
        assert_eq!(engine.evaluate(&s).unwrap(), first);
    }
}

#[test]
fn test_reset_then_recalculate_is_invalid() {
    let mut session = StaticForm::scenario_a().into_session();
    session.calculate(&DecisionEngine::default());
    session.reset();
    let outcome = session.calculate(&DecisionEngine::default());
    assert!(matches!(outcome, Outcome::Invalid(_)));
}
