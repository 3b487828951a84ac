//! Historical calculator revisions expressed as presets and config.

use cashout::config::AppConfig;
use cashout::form::{parse_snapshot, Field};
use cashout::strategy::policy::PolicyPreset;
use cashout::strategy::{compare_presets, DecisionEngine};
use cashout::types::Decision;

use crate::fixtures::{snapshot, StaticForm};

#[test]
fn test_capped_preset_bounds() {
    let engine = DecisionEngine::from_preset(PolicyPreset::Capped);
    for minute in [0, 20, 60, 85] {
        for score in [(0, 0), (0, 1), (2, 0)] {
            let r = engine
                .evaluate(&snapshot(minute, score, (20, 20), (3.0, 3.0), 50.0))
                .unwrap();
            assert!((0.0..=0.75).contains(&r.goal_probability));
        }
    }
}

#[test]
fn test_latest_source_holds_on_dominance() {
    let s = snapshot(55, (1, 0), (2, 4), (0.5, 0.9), 40.0);
    let canonical = DecisionEngine::default().evaluate(&s).unwrap();
    let latest = DecisionEngine::from_preset(PolicyPreset::LatestSource)
        .evaluate(&s)
        .unwrap();
    assert_eq!(canonical.decision, Decision::CashOut);
    assert_eq!(latest.decision, Decision::Hold);
}

#[test]
fn test_linear_preset_skips_low_activity_penalty() {
    let s = snapshot(30, (0, 0), (1, 1), (0.3, 0.2), 50.0);
    let canonical = DecisionEngine::default().evaluate(&s).unwrap();
    let linear = DecisionEngine::from_preset(PolicyPreset::Linear).evaluate(&s).unwrap();
    assert!(linear.goal_probability > canonical.goal_probability);
}

#[test]
fn test_compare_presets_from_form() {
    let form = StaticForm::scenario_a().with(Field::SotUnderdog, "5");
    let s = parse_snapshot(&form).unwrap();
    let results = compare_presets(&s).unwrap();
    let any_signal = results
        .iter()
        .find(|(p, _)| *p == PolicyPreset::AnySignal)
        .map(|(_, r)| r.decision);
    assert_eq!(any_signal, Some(Decision::CashOut));
}

#[test]
fn test_config_driven_engine() {
    let cfg = AppConfig::from_toml_str(
        r#"
        [policy]
        preset = "canonical"
        late_game_minute = 70
        "#,
    )
    .unwrap();
    let engine = DecisionEngine::new(cfg.policy.resolve().unwrap());

    // Underdog two up and dominating at 72': late rules already active
    let r = engine
        .evaluate(&snapshot(72, (0, 2), (2, 5), (0.4, 1.1), 40.0))
        .unwrap();
    assert_eq!(r.decision, Decision::Hold);
}

#[test]
fn test_optional_extensions_omitted() {
    let form = StaticForm::scenario_a()
        .with(Field::XgFav, "")
        .with(Field::XgUnderdog, "")
        .with(Field::PossessionFav, "")
        .with(Field::PossessionUnderdog, "");
    let s = parse_snapshot(&form).unwrap();
    let r = DecisionEngine::default().evaluate(&s).unwrap();
    // 0.275 base + 0.12 SOT − 0.04 favourite ahead, no xG step
    assert!((r.goal_probability - 0.355).abs() < 1e-9);
    assert_eq!(r.decision, Decision::Hold);
}
