use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::plan::{AmountMode, Expense, ExpenseKind, ResolvedAssumptions};
use crate::time_value::{future_value, present_value};
use crate::types::{Money, Rate};
use crate::CorpusResult;

/// One-time goals default to this many years out.
pub const DEFAULT_ONE_TIME_HORIZON: i32 = 10;
/// Recurring goals default to ending this many years out.
pub const DEFAULT_RECURRING_HORIZON: i32 = 20;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimeGoal {
    pub future_value: Money,
    pub present_value: Money,
    pub years_from_now: u32,
}

/// One year of a recurring goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalCashflow {
    pub year: u32,
    pub amount: Money,
    pub present_value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringGoal {
    pub total_future_value: Money,
    pub total_present_value: Money,
    pub cashflows: Vec<GoalCashflow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GoalValuation {
    #[serde(rename = "onetime")]
    OneTime(OneTimeGoal),
    #[serde(rename = "yearly")]
    Recurring(RecurringGoal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub valuation: GoalValuation,
}

impl GoalResult {
    pub fn present_value(&self) -> Money {
        match &self.valuation {
            GoalValuation::OneTime(g) => g.present_value,
            GoalValuation::Recurring(g) => g.total_present_value,
        }
    }
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

/// Discount to today. A discount factor beyond decimal range leaves a
/// present value indistinguishable from zero.
fn discounted(amount: Money, discount_rate: Rate, years: u32) -> CorpusResult<Money> {
    match present_value(amount, discount_rate, Decimal::from(years)) {
        Err(CorpusError::FinancialImpossibility(_)) => Ok(Decimal::ZERO),
        other => other,
    }
}

/// Inflate a today's-money amount to its target year, then discount it back.
pub fn calculate_one_time_goal(
    amount: Money,
    amount_mode: AmountMode,
    years_from_now: u32,
    inflation: Rate,
    discount_rate: Rate,
) -> CorpusResult<OneTimeGoal> {
    let years = Decimal::from(years_from_now);
    let fv = match amount_mode {
        AmountMode::Today => future_value(amount, inflation, years)?,
        AmountMode::Future => amount,
    };
    let pv = discounted(fv, discount_rate, years_from_now)?;
    Ok(OneTimeGoal {
        future_value: fv,
        present_value: pv,
        years_from_now,
    })
}

/// Expand a yearly goal over `start_year..=end_year` (offsets from now) and
/// discount each year's cashflow individually.
pub fn calculate_recurring_goal(
    annual_amount: Money,
    amount_mode: AmountMode,
    start_year: u32,
    end_year: u32,
    escalation: Rate,
    discount_rate: Rate,
) -> CorpusResult<RecurringGoal> {
    let mut total_future_value = Decimal::ZERO;
    let mut total_present_value = Decimal::ZERO;
    let mut cashflows = Vec::with_capacity((end_year.saturating_sub(start_year) + 1) as usize);

    for year in start_year..=end_year {
        let growth_years = match amount_mode {
            AmountMode::Today => year,
            // already stated at start-year prices
            AmountMode::Future => year - start_year,
        };
        let amount = future_value(annual_amount, escalation, Decimal::from(growth_years))?;
        let pv = discounted(amount, discount_rate, year)?;

        total_future_value += amount;
        total_present_value += pv;
        cashflows.push(GoalCashflow {
            year,
            amount,
            present_value: pv,
        });
    }

    Ok(RecurringGoal {
        total_future_value,
        total_present_value,
        cashflows,
    })
}

fn offset(year: i32, current_year: i32) -> i64 {
    i64::from(year) - i64::from(current_year)
}

/// Value every goal except monthly living, which the corpus model covers.
pub fn aggregate_goals(
    expenses: &[Expense],
    resolved: &ResolvedAssumptions,
) -> CorpusResult<Vec<GoalResult>> {
    let cy = resolved.current_year;
    let mut goals = Vec::new();

    for expense in expenses {
        let valuation = match expense.kind {
            ExpenseKind::MonthlyLiving => continue,
            ExpenseKind::OneTime => {
                let target = expense.target_year.unwrap_or(cy + DEFAULT_ONE_TIME_HORIZON);
                let years = offset(target, cy).max(1) as u32;
                GoalValuation::OneTime(calculate_one_time_goal(
                    expense.amount,
                    expense.amount_mode,
                    years,
                    resolved.inflation,
                    resolved.pre_retirement_return,
                )?)
            }
            ExpenseKind::Yearly => {
                let start = offset(expense.start_year.unwrap_or(cy), cy).max(0);
                let end = offset(
                    expense.end_year.unwrap_or(cy + DEFAULT_RECURRING_HORIZON),
                    cy,
                )
                .max(start + 1);
                GoalValuation::Recurring(calculate_recurring_goal(
                    expense.amount,
                    expense.amount_mode,
                    start as u32,
                    end as u32,
                    expense.escalation.unwrap_or(resolved.inflation),
                    resolved.pre_retirement_return,
                )?)
            }
        };
        goals.push(GoalResult {
            name: expense.name.clone(),
            valuation,
        });
    }

    Ok(goals)
}
