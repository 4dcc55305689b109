use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::{
    check_rate, div, future_value, growth_factor, monthly_rate, mul, MONTHS_PER_YEAR,
};
use crate::types::{Money, Rate};
use crate::CorpusResult;

/// Annual return assumed when a required-contribution solve is given no rate.
pub const DEFAULT_SIP_RETURN: Rate = dec!(0.12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monthly contribution that reaches a target future value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSolution {
    pub monthly_amount: Money,
    /// True when the annuity inverse could not be evaluated and the amount
    /// is the plain `target / months` split instead.
    pub linear_fallback: bool,
}

impl ContributionSolution {
    fn none() -> Self {
        ContributionSolution {
            monthly_amount: Decimal::ZERO,
            linear_fallback: false,
        }
    }
}

fn months_in(years: u32) -> Decimal {
    Decimal::from(years) * Decimal::from(MONTHS_PER_YEAR)
}

// ---------------------------------------------------------------------------
// Level contributions
// ---------------------------------------------------------------------------

/// Future value of a level monthly contribution stream:
/// FV = PMT * ((1 + m)^n - 1) / m, with m the monthly equivalent of `annual_rate`.
pub fn contribution_future_value(
    amount: Money,
    annual_rate: Rate,
    years: u32,
) -> CorpusResult<Money> {
    if years == 0 {
        return Ok(Decimal::ZERO);
    }
    let m = monthly_rate(annual_rate)?;
    let months = months_in(years);
    if m.is_zero() {
        return mul(amount, months, "contribution future value");
    }
    let accumulation = growth_factor(m, months)? - Decimal::ONE;
    div(
        mul(amount, accumulation, "contribution future value")?,
        m,
        "contribution future value",
    )
}

/// Monthly contribution needed to accumulate `target_fv` in `years`:
/// PMT = FV * m / ((1 + m)^n - 1)
///
/// A missing rate means [`DEFAULT_SIP_RETURN`]. When the closed form cannot be
/// evaluated the result degrades to `target_fv / months` and is flagged.
pub fn required_contribution(
    target_fv: Money,
    annual_rate: Option<Rate>,
    years: u32,
) -> ContributionSolution {
    if target_fv <= Decimal::ZERO || years == 0 {
        return ContributionSolution::none();
    }
    let rate = annual_rate.unwrap_or(DEFAULT_SIP_RETURN);
    let months = months_in(years);
    let linear = |linear_fallback| ContributionSolution {
        monthly_amount: target_fv / months,
        linear_fallback,
    };

    let m = match monthly_rate(rate) {
        Ok(m) if m.is_zero() => return linear(false),
        Ok(m) => m,
        Err(_) => return linear(true),
    };

    let solved = growth_factor(m, months)
        .ok()
        .map(|factor| factor - Decimal::ONE)
        .filter(|accumulation| !accumulation.is_zero())
        .and_then(|accumulation| target_fv.checked_mul(m)?.checked_div(accumulation))
        .filter(|pmt| *pmt > Decimal::ZERO);

    match solved {
        Some(monthly_amount) => ContributionSolution {
            monthly_amount,
            linear_fallback: false,
        },
        None => linear(true),
    }
}

/// Present value of a level monthly withdrawal stream:
/// PV = PMT * (1 - (1 + m)^-n) / m
pub fn annuity_present_value(amount: Money, annual_rate: Rate, years: u32) -> CorpusResult<Money> {
    if years == 0 {
        return Ok(Decimal::ZERO);
    }
    let m = monthly_rate(annual_rate)?;
    let months = months_in(years);
    if m.is_zero() {
        return mul(amount, months, "annuity present value");
    }
    let discount = growth_factor(m, -months)?;
    div(
        mul(amount, Decimal::ONE - discount, "annuity present value")?,
        m,
        "annuity present value",
    )
}

// ---------------------------------------------------------------------------
// Escalating (step-up) contributions
// ---------------------------------------------------------------------------

/// Future value of a monthly contribution raised by `step_up_rate` after every
/// year. Each year's twelve payments are accumulated to year end, then
/// compounded over the years that remain.
pub fn escalating_contribution_future_value(
    initial_amount: Money,
    annual_rate: Rate,
    step_up_rate: Rate,
    years: u32,
) -> CorpusResult<Money> {
    if years == 0 {
        return Ok(Decimal::ZERO);
    }
    check_rate(step_up_rate, "step_up_rate")?;

    let mut total = Decimal::ZERO;
    let mut current = initial_amount;
    let step = Decimal::ONE + step_up_rate;

    for year in 0..years {
        let years_remaining = years - year - 1;
        let year_fv = contribution_future_value(current, annual_rate, 1)?;
        total += future_value(year_fv, annual_rate, Decimal::from(years_remaining))?;
        current = mul(current, step, "step-up contribution")?;
    }

    Ok(total)
}
