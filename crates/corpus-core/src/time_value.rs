use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CorpusError;
use crate::types::{Money, Rate, Years};
use crate::CorpusResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Reject rates at or below -100%, where (1 + r) stops being a growth factor.
pub(crate) fn check_rate(rate: Rate, field: &str) -> CorpusResult<()> {
    if rate <= dec!(-1) {
        return Err(CorpusError::invalid(
            field,
            "Rate must be greater than -100%",
        ));
    }
    Ok(())
}

/// (1 + r)^n. Whole-number exponents are multiplied out exactly; fractional
/// exponents go through `powd`.
pub(crate) fn growth_factor(rate: Rate, years: Years) -> CorpusResult<Decimal> {
    let base = Decimal::ONE + rate;
    let exponent = years.normalize();
    let factor = if exponent.scale() == 0 {
        exponent.to_i64().and_then(|n| base.checked_powi(n))
    } else {
        base.checked_powd(exponent)
    };
    factor.ok_or_else(|| {
        CorpusError::FinancialImpossibility(format!(
            "growth factor (1 + {rate})^{years} is not representable"
        ))
    })
}

pub(crate) fn mul(a: Decimal, b: Decimal, context: &str) -> CorpusResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| {
        CorpusError::FinancialImpossibility(format!("{context} overflowed decimal range"))
    })
}

pub(crate) fn div(a: Decimal, b: Decimal, context: &str) -> CorpusResult<Decimal> {
    if b.is_zero() {
        return Err(CorpusError::DivisionByZero {
            context: context.into(),
        });
    }
    a.checked_div(b).ok_or_else(|| {
        CorpusError::FinancialImpossibility(format!("{context} overflowed decimal range"))
    })
}

/// Future Value: FV = PV * (1 + r)^n
///
/// Non-positive horizons return `present_value` unchanged; there is no
/// backward extrapolation.
pub fn future_value(present_value: Money, rate: Rate, years: Years) -> CorpusResult<Money> {
    if years <= Decimal::ZERO {
        return Ok(present_value);
    }
    check_rate(rate, "rate")?;
    let factor = growth_factor(rate, years)?;
    mul(present_value, factor, "future value")
}

/// Present Value: PV = FV / (1 + r)^n
pub fn present_value(future_value: Money, rate: Rate, years: Years) -> CorpusResult<Money> {
    if years <= Decimal::ZERO {
        return Ok(future_value);
    }
    check_rate(rate, "rate")?;
    let factor = growth_factor(rate, years)?;
    div(future_value, factor, "present value discount factor")
}

/// Real return via the Fisher relation: (1 + nominal) / (1 + inflation) - 1
pub fn real_return(nominal: Rate, inflation: Rate) -> CorpusResult<Rate> {
    check_rate(inflation, "inflation")?;
    let ratio = div(
        Decimal::ONE + nominal,
        Decimal::ONE + inflation,
        "real return",
    )?;
    Ok(ratio - Decimal::ONE)
}

/// Effective periodic rate equivalent to an annual rate:
/// (1 + annual)^(1 / periods) - 1
pub fn periodic_rate(annual_rate: Rate, periods_per_year: u32) -> CorpusResult<Rate> {
    if periods_per_year == 0 {
        return Err(CorpusError::invalid(
            "periods_per_year",
            "Must be at least one period per year",
        ));
    }
    check_rate(annual_rate, "annual_rate")?;
    if periods_per_year == 1 || annual_rate.is_zero() {
        return Ok(annual_rate);
    }
    let exponent = Decimal::ONE / Decimal::from(periods_per_year);
    Ok(growth_factor(annual_rate, exponent)? - Decimal::ONE)
}

/// Monthly equivalent of an annual rate.
pub fn monthly_rate(annual_rate: Rate) -> CorpusResult<Rate> {
    periodic_rate(annual_rate, MONTHS_PER_YEAR)
}
