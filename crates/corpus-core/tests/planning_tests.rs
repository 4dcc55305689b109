use corpus_core::corpus::{self, CorpusRequirement};
use corpus_core::plan::{RetirementMode, RetirementPlanInput};
use corpus_core::planning::{self, Timeline};
use corpus_core::{calculate_retirement_plan, CorpusError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

// ===========================================================================
// End-to-end plans, built from JSON the way callers send them
// ===========================================================================

fn plan_from(value: serde_json::Value) -> RetirementPlanInput {
    serde_json::from_value(value).unwrap()
}

fn base_plan(mode: &str) -> serde_json::Value {
    json!({
        "mode": mode,
        "person_a": { "age": 32, "retirement_age": 60 },
        "person_b": { "age": 30, "retirement_age": 58 },
        "life_expectancy": 88,
        "current_year": 2025,
        "assumptions": {
            "inflation": "0.06",
            "pre_retirement_return": "0.12",
            "post_retirement_return": "0.08",
            "fi_age": 45,
            "full_retirement_age": 55
        },
        "assets": [
            { "name": "EPF", "current_value": 1500000, "category": "epf" },
            { "name": "Equity", "current_value": 2500000, "category": "mf_equity" },
            { "name": "Flat", "current_value": 9000000, "category": "real_estate", "is_liquid": false }
        ],
        "expenses": [
            { "name": "Living", "type": "monthly_living", "amount": 90000 },
            { "name": "Car", "type": "onetime", "amount": 1200000, "target_year": 2030 },
            { "name": "School fees", "type": "yearly", "amount": 300000,
              "start_year": 2028, "end_year": 2040, "escalation": 0.08 }
        ],
        "income_streams": [
            { "name": "Consulting", "type": "parttime", "amount": 40000, "start_age": 45, "end_age": 55 },
            { "name": "Rent", "type": "rental", "amount": 25000, "start_age": 45 }
        ],
        "existing_sip": 50000
    })
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[test]
fn test_timeline_uses_household_minimums_and_fi_age() {
    let out = calculate_retirement_plan(&plan_from(base_plan("fire"))).unwrap();
    assert_eq!(
        out.result.timeline,
        Timeline {
            current_age: 30,
            retirement_age: 45,
            life_expectancy: 88,
            years_to_retirement: 15,
            years_in_retirement: 43,
        }
    );
}

#[test]
fn test_age_at_retirement_clamps_and_still_needs_sip() {
    let plan = plan_from(json!({
        "person_a": { "age": 60, "retirement_age": 60 },
        "current_year": 2025,
        "expenses": [{ "type": "monthly_living", "amount": 100000 }]
    }));
    let out = calculate_retirement_plan(&plan).unwrap();
    let r = &out.result;
    assert_eq!(r.timeline.years_to_retirement, 1);
    assert!(r.gap.has_shortfall);
    assert!(r.gap.required_sip > Decimal::ZERO);
    assert!(!r.gap.required_sip_linear_fallback);
    assert!(!out.warnings.is_empty());
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

#[test]
fn test_every_mode_produces_a_plan() {
    for mode in ["traditional", "fire", "fatfire", "coast", "barista"] {
        let out = calculate_retirement_plan(&plan_from(base_plan(mode))).unwrap();
        let r = &out.result;
        assert!(r.corpus.total_fv_required >= Decimal::ZERO, "{mode}");
        assert!(r.corpus.total_pv_required > Decimal::ZERO, "{mode}");
        assert_eq!(r.gap.required_corpus, r.corpus.total_fv_required, "{mode}");
    }
}

#[test]
fn test_fat_fire_reuses_fire_model() {
    let fire = calculate_retirement_plan(&plan_from(base_plan("fire"))).unwrap();
    let fat = calculate_retirement_plan(&plan_from(base_plan("fatfire"))).unwrap();
    assert_eq!(fat.result.mode, RetirementMode::FatFire);
    assert_eq!(fire.result.corpus.requirement, fat.result.corpus.requirement);
    assert_eq!(fire.result.gap, fat.result.gap);
}

#[test]
fn test_fire_nets_income_started_by_fi_age() {
    let out = calculate_retirement_plan(&plan_from(base_plan("fire"))).unwrap();
    match &out.result.corpus.requirement {
        CorpusRequirement::Fire(f) => {
            // (40k + 25k) * 12
            assert_eq!(f.annual_income, dec!(780_000));
            assert_eq!(f.swr, dec!(0.04));
        }
        other => panic!("expected FIRE corpus, got {other:?}"),
    }
}

#[test]
fn test_barista_phases() {
    let out = calculate_retirement_plan(&plan_from(base_plan("barista"))).unwrap();
    match &out.result.corpus.requirement {
        CorpusRequirement::Barista(b) => {
            assert_eq!(b.years_in_phase1, 10);
            assert_eq!(b.years_in_phase2, 33);
            // 90k - 40k part-time, annualised
            assert_eq!(b.annual_phase1, dec!(600_000));
        }
        other => panic!("expected Barista corpus, got {other:?}"),
    }
}

#[test]
fn test_barista_forty_five_to_eighty_five() {
    let mut plan = base_plan("barista");
    plan["life_expectancy"] = json!(85);
    let out = calculate_retirement_plan(&plan_from(plan)).unwrap();
    match &out.result.corpus.requirement {
        CorpusRequirement::Barista(b) => {
            assert_eq!(b.years_in_phase1, 10);
            assert_eq!(b.years_in_phase2, 30);
        }
        other => panic!("expected Barista corpus, got {other:?}"),
    }
}

#[test]
fn test_coast_corpus_pv_is_coast_number() {
    let out = calculate_retirement_plan(&plan_from(base_plan("coast"))).unwrap();
    match &out.result.corpus.requirement {
        CorpusRequirement::Coast(c) => {
            assert_eq!(out.result.corpus.corpus_pv, c.coast_number);
            assert_eq!(c.years_to_coast, 15);
        }
        other => panic!("expected Coast corpus, got {other:?}"),
    }
}

#[test]
fn test_corpus_models_directly() {
    let fire = corpus::calculate_fire_corpus(
        dec!(1_200_000),
        Decimal::ZERO,
        dec!(0.04),
        Decimal::ZERO,
    )
    .unwrap();
    assert_eq!(fire.fi_number, dec!(30_000_000));

    let coast = corpus::calculate_coast_fire(dec!(30_000_000), 25, dec!(0.12)).unwrap();
    assert!((coast.coast_number - dec!(1_764_706)).abs() < dec!(1_000));

    let trad = corpus::calculate_traditional_corpus(dec!(100_000), 30, 25, dec!(0.06), dec!(0.08))
        .unwrap();
    assert!((trad.monthly_at_retirement - dec!(574_349)).abs() < dec!(1));
}

// ---------------------------------------------------------------------------
// Goals, wealth, gap
// ---------------------------------------------------------------------------

#[test]
fn test_goals_exclude_monthly_living() {
    let out = calculate_retirement_plan(&plan_from(base_plan("traditional"))).unwrap();
    let r = &out.result;
    assert_eq!(r.goals.len(), 2);
    let names: Vec<_> = r.goals.iter().map(|g| g.name.clone().unwrap()).collect();
    assert_eq!(names, vec!["Car".to_string(), "School fees".to_string()]);
    let sum: Decimal = r.goals.iter().map(|g| g.present_value()).sum();
    assert_eq!(sum, r.total_goals_pv);
}

#[test]
fn test_recurring_goal_window() {
    let out = calculate_retirement_plan(&plan_from(base_plan("traditional"))).unwrap();
    match &out.result.goals[1].valuation {
        planning::GoalValuation::Recurring(g) => {
            assert_eq!(g.cashflows.len(), 13);
            assert_eq!(g.cashflows.first().unwrap().year, 3);
            assert_eq!(g.cashflows.last().unwrap().year, 15);
        }
        other => panic!("expected recurring goal, got {other:?}"),
    }
}

#[test]
fn test_far_future_goal_does_not_fail_plan() {
    let mut plan = base_plan("traditional");
    plan["expenses"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "name": "Endowment", "type": "yearly", "amount": 300000, "end_year": 2725 }));
    let out = calculate_retirement_plan(&plan_from(plan)).unwrap();
    match &out.result.goals[2].valuation {
        planning::GoalValuation::Recurring(g) => {
            assert_eq!(g.cashflows.last().unwrap().year, 700);
            assert_eq!(g.cashflows.last().unwrap().present_value, Decimal::ZERO);
        }
        other => panic!("expected recurring goal, got {other:?}"),
    }
}

#[test]
fn test_household_past_default_life_expectancy() {
    let plan = plan_from(json!({
        "person_a": { "age": 86, "retirement_age": 60 },
        "current_year": 2025,
        "expenses": [{ "type": "monthly_living", "amount": 50000 }]
    }));
    let out = calculate_retirement_plan(&plan).unwrap();
    assert_eq!(out.result.timeline.current_age, 86);
    assert_eq!(out.result.timeline.years_to_retirement, 1);
    assert!(out.result.timeline.years_in_retirement >= 1);
    assert!(out.warnings.iter().any(|w| w.starts_with("Life expectancy 85")));
}

#[test]
fn test_illiquid_assets_not_projected() {
    let out = calculate_retirement_plan(&plan_from(base_plan("traditional"))).unwrap();
    let w = &out.result.wealth;
    assert_eq!(w.projected_assets.len(), 2);
    assert_eq!(w.projected_assets[0].return_rate, dec!(0.081));
    assert_eq!(w.total_projected_wealth, w.total_assets_fv + w.sip_fv);
}

#[test]
fn test_projection_schedule_closes_on_projected_wealth() {
    let out = calculate_retirement_plan(&plan_from(base_plan("fire"))).unwrap();
    let r = &out.result;
    assert_eq!(r.projection.len(), 16);
    assert_eq!(r.projection[0].calendar_year, 2025);
    assert_eq!(r.projection[0].target, Decimal::ZERO);
    let last = r.projection.last().unwrap();
    assert_eq!(last.total, r.wealth.total_projected_wealth);
    assert_eq!(last.age, 45);
}

#[test]
fn test_gap_thirty_vs_twenty_million() {
    let g = planning::calculate_gap_analysis(
        dec!(30_000_000),
        dec!(20_000_000),
        15,
        dec!(0.12),
        dec!(0.10),
    )
    .unwrap();
    assert_eq!(g.gap, dec!(10_000_000));
    assert!(g.has_shortfall);
    assert!((g.on_track_percentage - dec!(66.6667)).abs() < dec!(0.001));
    assert!(g.required_step_up_sip < g.required_sip);
}

// ---------------------------------------------------------------------------
// Output shape and validation
// ---------------------------------------------------------------------------

#[test]
fn test_output_json_shape() {
    let out = calculate_retirement_plan(&plan_from(base_plan("coast"))).unwrap();
    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["result"]["mode"], json!("coast"));
    assert_eq!(v["result"]["corpus"]["methodology"], json!("coast"));
    assert!(v["result"]["corpus"]["coast_number"].is_string());
    assert!(v["result"]["corpus"]["total_fv_required"].is_string());
    assert_eq!(v["result"]["goals"][0]["type"], json!("onetime"));
    assert!(v["methodology"].as_str().unwrap().starts_with("Coast FIRE"));
    assert_eq!(v["assumptions"]["inflation"], json!("0.06"));
}

#[test]
fn test_deterministic_result() {
    let plan = plan_from(base_plan("barista"));
    let a = calculate_retirement_plan(&plan).unwrap();
    let b = calculate_retirement_plan(&plan).unwrap();
    assert_eq!(a.result, b.result);
    assert_eq!(a.warnings, b.warnings);
}

#[test]
fn test_zero_swr_rejected_for_fire() {
    let mut plan = base_plan("fire");
    plan["assumptions"]["swr"] = json!(0);
    let err = calculate_retirement_plan(&plan_from(plan)).unwrap_err();
    assert!(matches!(err, CorpusError::InvalidInput { .. }), "{err}");
}

#[test]
fn test_zero_swr_ignored_outside_fire() {
    let mut plan = base_plan("traditional");
    plan["assumptions"]["swr"] = json!(0);
    assert!(calculate_retirement_plan(&plan_from(plan)).is_ok());
}

#[test]
fn test_full_retirement_before_fi_rejected_for_barista() {
    let mut plan = base_plan("barista");
    plan["assumptions"]["full_retirement_age"] = json!(40);
    assert!(calculate_retirement_plan(&plan_from(plan)).is_err());
}
