//! Property-based tests using proptest.
//!
//! Amounts and rates are generated as integers and scaled into `Decimal`
//! so every case is exactly representable.

use corpus_core::corpus::{calculate_fire_corpus, calculate_traditional_corpus};
use corpus_core::plan::{
    AmountMode, Asset, Assumptions, Expense, ExpenseKind, Person, RetirementMode,
    RetirementPlanInput,
};
use corpus_core::sip::{contribution_future_value, required_contribution};
use corpus_core::time_value::{future_value, present_value};
use corpus_core::calculate_retirement_plan;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn bp(basis_points: u32) -> Decimal {
    Decimal::new(basis_points as i64, 4)
}

fn rel_diff(a: Decimal, b: Decimal) -> Decimal {
    (a - b).abs() / b.abs().max(Decimal::ONE)
}

// --- TVM round trip ---

proptest! {
    #[test]
    fn pv_of_fv_recovers_principal(
        principal in 1_u32..50_000_000,
        rate in 0_u32..3_000,
        years in 0_u32..60,
    ) {
        let pv = Decimal::from(principal);
        let r = bp(rate);
        let n = Decimal::from(years);
        let back = present_value(future_value(pv, r, n).unwrap(), r, n).unwrap();
        prop_assert!(rel_diff(back, pv) < Decimal::new(1, 12), "{back} vs {pv}");
    }

    #[test]
    fn zero_years_is_identity(
        amount in 0_u32..100_000_000,
        rate in 0_u32..5_000,
    ) {
        let x = Decimal::from(amount);
        prop_assert_eq!(future_value(x, bp(rate), Decimal::ZERO).unwrap(), x);
        prop_assert_eq!(present_value(x, bp(rate), Decimal::ZERO).unwrap(), x);
    }
}

// --- SIP inverse and zero-rate linearity ---

proptest! {
    #[test]
    fn required_contribution_reaches_target(
        target in 10_000_u32..1_000_000_000,
        rate in 100_u32..3_000,
        years in 1_u32..40,
    ) {
        let t = Decimal::from(target);
        let r = bp(rate);
        let sol = required_contribution(t, Some(r), years);
        prop_assert!(!sol.linear_fallback);
        let fv = contribution_future_value(sol.monthly_amount, r, years).unwrap();
        prop_assert!(rel_diff(fv, t) < Decimal::new(1, 8), "{fv} vs {t}");
    }

    #[test]
    fn zero_rate_contributions_are_linear(
        paise in 0_i64..10_000_000,
        years in 0_u32..50,
    ) {
        let amount = Decimal::new(paise, 2);
        let fv = contribution_future_value(amount, Decimal::ZERO, years).unwrap();
        prop_assert_eq!(fv, amount * Decimal::from(12) * Decimal::from(years));
    }
}

// --- Monotonicity ---

proptest! {
    #[test]
    fn traditional_corpus_rises_with_inflation(
        monthly in 10_000_u32..500_000,
        inflation in 0_u32..1_000,
        bump in 1_u32..300,
        post in 200_u32..1_200,
        to_ret in 1_u32..35,
        in_ret in 1_u32..45,
    ) {
        let m = Decimal::from(monthly);
        let low =
            calculate_traditional_corpus(m, to_ret, in_ret, bp(inflation), bp(post)).unwrap();
        let high =
            calculate_traditional_corpus(m, to_ret, in_ret, bp(inflation + bump), bp(post))
                .unwrap();
        prop_assert!(high.corpus_at_retirement >= low.corpus_at_retirement);
    }

    #[test]
    fn fire_corpus_rises_with_inflation(
        monthly in 10_000_u32..500_000,
        income in 0_u32..3_000_000,
        inflation in 0_u32..1_000,
        bump in 1_u32..300,
        years in 1_u32..35,
    ) {
        let annual = Decimal::from(monthly) * Decimal::from(12);
        let at = |infl: u32| {
            let expenses = future_value(annual, bp(infl), Decimal::from(years)).unwrap();
            calculate_fire_corpus(expenses, Decimal::from(income), bp(400), bp(1_000))
                .unwrap()
                .fi_number
        };
        prop_assert!(at(inflation + bump) >= at(inflation));
    }

    #[test]
    fn fi_number_falls_as_swr_rises(
        expenses in 100_000_u32..10_000_000,
        swr in 100_u32..800,
        bump in 1_u32..200,
    ) {
        let e = Decimal::from(expenses);
        let low = calculate_fire_corpus(e, Decimal::ZERO, bp(swr), Decimal::ZERO).unwrap();
        let high = calculate_fire_corpus(e, Decimal::ZERO, bp(swr + bump), Decimal::ZERO).unwrap();
        prop_assert!(high.fi_number <= low.fi_number);
    }
}

// --- Whole-plan invariants ---

fn plan(
    mode: RetirementMode,
    age: u32,
    retirement_age: u32,
    monthly: u32,
    assets: u32,
    sip: u32,
) -> RetirementPlanInput {
    RetirementPlanInput {
        mode,
        person_a: Person { age, retirement_age },
        person_b: None,
        life_expectancy: 90,
        current_year: 2025,
        assumptions: Assumptions::default(),
        assets: vec![Asset {
            name: None,
            current_value: Decimal::from(assets),
            category: None,
            return_override: None,
            is_liquid: None,
        }],
        expenses: vec![Expense {
            name: None,
            kind: ExpenseKind::MonthlyLiving,
            amount: Decimal::from(monthly),
            amount_mode: AmountMode::Today,
            escalation: None,
            target_year: None,
            start_year: None,
            end_year: None,
        }],
        income_streams: vec![],
        existing_sip: Decimal::from(sip),
    }
}

proptest! {
    #[test]
    fn plan_gap_is_exclusive(
        mode_idx in 0_usize..5,
        age in 20_u32..70,
        extra in 0_u32..30,
        monthly in 0_u32..400_000,
        assets in 0_u32..100_000_000,
        sip in 0_u32..200_000,
    ) {
        let modes = [
            RetirementMode::Traditional,
            RetirementMode::Fire,
            RetirementMode::FatFire,
            RetirementMode::Coast,
            RetirementMode::Barista,
        ];
        let out = calculate_retirement_plan(
            &plan(modes[mode_idx], age, age + extra, monthly, assets, sip),
        )
        .unwrap();
        let r = out.result;
        prop_assert!(r.timeline.years_to_retirement >= 1);
        prop_assert!(r.timeline.years_in_retirement >= 1);
        prop_assert!(r.corpus.total_fv_required >= Decimal::ZERO);
        prop_assert_eq!(r.gap.has_shortfall, r.gap.gap > Decimal::ZERO);
        prop_assert!(r.gap.gap.is_zero() || r.gap.surplus.is_zero());
        prop_assert!(r.gap.on_track_percentage <= Decimal::from(100));
        prop_assert_eq!(
            r.projection.last().map(|y| y.total),
            Some(r.wealth.total_projected_wealth)
        );
    }
}
