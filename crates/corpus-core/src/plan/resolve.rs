use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::input::{ExpenseKind, IncomeKind, RetirementMode, RetirementPlanInput};
use crate::error::CorpusError;
use crate::time_value::check_rate;
use crate::types::{Money, Rate};
use crate::CorpusResult;

pub const DEFAULT_INFLATION: Rate = dec!(0.06);
pub const DEFAULT_PRE_RETIREMENT_RETURN: Rate = dec!(0.12);
pub const DEFAULT_POST_RETIREMENT_RETURN: Rate = dec!(0.08);
pub const DEFAULT_SWR: Rate = dec!(0.04);
pub const DEFAULT_BUFFER: Rate = dec!(0.10);
pub const DEFAULT_STEP_UP_SIP: Rate = dec!(0.10);
pub const DEFAULT_SALARY_GROWTH: Rate = dec!(0.08);
/// Return used for an asset with neither an override nor a category.
pub const DEFAULT_ASSET_RETURN: Rate = dec!(0.08);
/// Barista FIRE: years of part-time work when no full retirement age is given.
pub const DEFAULT_BARISTA_WORK_YEARS: u32 = 10;

/// Plan values after defaulting, clamping and validation. Corpus models and
/// the planning stages read only this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAssumptions {
    pub mode: RetirementMode,
    pub current_year: i32,
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    /// Floored at 1.
    pub years_to_retirement: u32,
    /// Floored at 1.
    pub years_in_retirement: u32,
    pub full_retirement_age: u32,
    pub inflation: Rate,
    pub pre_retirement_return: Rate,
    pub post_retirement_return: Rate,
    pub swr: Rate,
    pub buffer: Rate,
    pub step_up_sip: Rate,
    pub salary_growth: Rate,
    /// Today's monthly living expense.
    pub monthly_living: Money,
    /// Annual income from streams that have started by retirement age.
    pub post_fi_income: Money,
    /// Monthly part-time income (Barista phase 1).
    pub part_time_income: Money,
    /// Annual income from every non-part-time stream (Barista phase 2).
    pub other_income: Money,
    pub existing_sip: Money,
}

fn years_between(from: u32, to: u32) -> u32 {
    (i64::from(to) - i64::from(from)).max(1) as u32
}

/// Merge the plan's optional fields with engine defaults and validate the
/// result. Non-fatal observations are appended to `warnings`.
pub fn resolve(
    plan: &RetirementPlanInput,
    warnings: &mut Vec<String>,
) -> CorpusResult<ResolvedAssumptions> {
    let a = &plan.assumptions;

    let inflation = a.inflation.unwrap_or(DEFAULT_INFLATION);
    let pre_retirement_return = a.pre_retirement_return.unwrap_or(DEFAULT_PRE_RETIREMENT_RETURN);
    let post_retirement_return = a
        .post_retirement_return
        .unwrap_or(DEFAULT_POST_RETIREMENT_RETURN);
    let swr = a.swr.unwrap_or(DEFAULT_SWR);
    let buffer = a.buffer.unwrap_or(DEFAULT_BUFFER);
    let step_up_sip = a.step_up_sip.unwrap_or(DEFAULT_STEP_UP_SIP);
    let salary_growth = a.salary_growth.unwrap_or(DEFAULT_SALARY_GROWTH);

    check_rate(inflation, "assumptions.inflation")?;
    check_rate(pre_retirement_return, "assumptions.pre_retirement_return")?;
    check_rate(post_retirement_return, "assumptions.post_retirement_return")?;
    check_rate(step_up_sip, "assumptions.step_up_sip")?;
    check_rate(salary_growth, "assumptions.salary_growth")?;
    if buffer < Decimal::ZERO {
        return Err(CorpusError::invalid(
            "assumptions.buffer",
            "Buffer must be >= 0",
        ));
    }
    if plan.existing_sip < Decimal::ZERO {
        return Err(CorpusError::invalid(
            "existing_sip",
            "Existing contribution must be >= 0",
        ));
    }

    // --- Timeline ---
    let current_age = match &plan.person_b {
        Some(b) => plan.person_a.age.min(b.age),
        None => plan.person_a.age,
    };
    let household_retirement_age = match &plan.person_b {
        Some(b) => plan.person_a.retirement_age.min(b.retirement_age),
        None => plan.person_a.retirement_age,
    };
    let retirement_age = a
        .fi_age
        .filter(|age| *age > 0)
        .unwrap_or(household_retirement_age);

    let years_to_retirement = years_between(current_age, retirement_age);
    let years_in_retirement = years_between(retirement_age, plan.life_expectancy);
    let full_retirement_age = a
        .full_retirement_age
        .filter(|age| *age > 0)
        .unwrap_or(retirement_age + DEFAULT_BARISTA_WORK_YEARS);

    let horizon_start = retirement_age.max(current_age);
    if plan.life_expectancy <= horizon_start {
        warnings.push(format!(
            "Life expectancy {} is not after age {horizon_start}; \
             retirement horizon is clamped",
            plan.life_expectancy
        ));
    }
    if retirement_age <= current_age {
        warnings.push(format!(
            "Retirement age {retirement_age} is not after current age {current_age}; \
             using a 1-year accumulation horizon"
        ));
    }

    // --- Expenses ---
    for expense in &plan.expenses {
        if expense.amount < Decimal::ZERO {
            return Err(CorpusError::invalid(
                "expenses.amount",
                format!(
                    "Amount must be >= 0 ({})",
                    expense.name.as_deref().unwrap_or("unnamed expense")
                ),
            ));
        }
        if let Some(esc) = expense.escalation {
            check_rate(esc, "expenses.escalation")?;
        }
    }

    let mut living = plan
        .expenses
        .iter()
        .filter(|e| e.kind == ExpenseKind::MonthlyLiving);
    let monthly_living = living.next().map(|e| e.amount).unwrap_or(Decimal::ZERO);
    let extra_living = living.count();
    if extra_living > 0 {
        warnings.push(format!(
            "{extra_living} additional monthly_living expense(s) ignored; only the first is used"
        ));
    }

    // --- Income ---
    let mut post_fi_income = Decimal::ZERO;
    let mut other_income = Decimal::ZERO;
    let mut part_time_income: Option<Money> = None;

    for stream in &plan.income_streams {
        let annual = stream.amount * dec!(12);
        if stream.start_age <= retirement_age {
            post_fi_income += annual;
        } else if matches!(plan.mode, RetirementMode::Fire | RetirementMode::FatFire) {
            warnings.push(format!(
                "Income stream '{}' starts at age {}, after retirement age {}; \
                 it does not reduce the FI number",
                stream.name.as_deref().unwrap_or("unnamed"),
                stream.start_age,
                retirement_age
            ));
        }
        match stream.kind {
            IncomeKind::Parttime => {
                if part_time_income.is_none() {
                    part_time_income = Some(stream.amount);
                }
            }
            _ => other_income += annual,
        }
    }

    let resolved = ResolvedAssumptions {
        mode: plan.mode,
        current_year: plan.current_year,
        current_age,
        retirement_age,
        life_expectancy: plan.life_expectancy,
        years_to_retirement,
        years_in_retirement,
        full_retirement_age,
        inflation,
        pre_retirement_return,
        post_retirement_return,
        swr,
        buffer,
        step_up_sip,
        salary_growth,
        monthly_living,
        post_fi_income,
        part_time_income: part_time_income.unwrap_or(Decimal::ZERO),
        other_income,
        existing_sip: plan.existing_sip,
    };

    #[cfg(feature = "logging")]
    tracing::debug!(
        mode = ?resolved.mode,
        current_age,
        retirement_age,
        years_to_retirement,
        years_in_retirement,
        inflation = %inflation,
        pre_retirement_return = %pre_retirement_return,
        post_retirement_return = %post_retirement_return,
        "plan assumptions resolved"
    );

    Ok(resolved)
}
