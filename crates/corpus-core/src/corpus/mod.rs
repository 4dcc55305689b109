pub mod barista;
pub mod coast;
pub mod fire;
pub mod traditional;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::plan::{ResolvedAssumptions, RetirementMode};
use crate::time_value::{div, future_value, growth_factor, mul, present_value};
use crate::types::{Money, Rate};
use crate::CorpusResult;

pub use barista::{calculate_barista_fire, BaristaCorpus, BaristaInput};
pub use coast::{calculate_coast_fire, CoastCorpus};
pub use fire::{calculate_fire_corpus, FireCorpus};
pub use traditional::{calculate_traditional_corpus, TraditionalCorpus};

/// Below this magnitude a real return is treated as zero and withdrawal
/// streams are valued as a plain sum.
pub const NEAR_ZERO_REAL_RETURN: Rate = dec!(0.0001);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Mode-specific corpus figures, tagged by the model that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "methodology", rename_all = "snake_case")]
pub enum CorpusRequirement {
    Traditional(TraditionalCorpus),
    /// FIRE and Fat FIRE.
    Fire(FireCorpus),
    Coast(CoastCorpus),
    Barista(BaristaCorpus),
}

impl CorpusRequirement {
    /// Corpus at the reference age (retirement, or FI age for Barista).
    pub fn base_corpus(&self) -> Money {
        match self {
            CorpusRequirement::Traditional(t) => t.corpus_at_retirement,
            CorpusRequirement::Fire(f) => f.fi_number_buffered,
            CorpusRequirement::Coast(c) => c.target_corpus_at_retirement,
            CorpusRequirement::Barista(b) => b.corpus_at_fi,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CorpusRequirement::Traditional(_) => {
                "Traditional retirement corpus (inflation-adjusted annuity at real post-retirement return)"
            }
            CorpusRequirement::Fire(_) => "FIRE corpus (net annual expenses / safe withdrawal rate)",
            CorpusRequirement::Coast(_) => {
                "Coast FIRE (present value of annuity target at pre-retirement return)"
            }
            CorpusRequirement::Barista(_) => {
                "Barista FIRE (two-phase withdrawal present value at FI age)"
            }
        }
    }
}

/// Corpus requirement plus the figures every mode populates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusOutput {
    #[serde(flatten)]
    pub requirement: CorpusRequirement,
    /// Today's value of the mode's corpus.
    pub corpus_pv: Money,
    /// (corpus_pv + goals PV) grown by the buffer.
    pub total_pv_required: Money,
    /// total_pv_required compounded to retirement.
    pub total_fv_required: Money,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub(crate) fn is_near_zero(real_return: Rate) -> bool {
    real_return.abs() < NEAR_ZERO_REAL_RETURN
}

/// Present value of `years` level annual withdrawals:
/// annual * (1 - (1 + r)^-n) / r, or annual * n when r is near zero.
pub(crate) fn withdrawal_present_value(
    annual: Money,
    real_return: Rate,
    years: u32,
) -> CorpusResult<Money> {
    let n = Decimal::from(years);
    if years == 0 {
        return Ok(Decimal::ZERO);
    }
    if is_near_zero(real_return) {
        #[cfg(feature = "logging")]
        tracing::debug!(
            real_return = %real_return,
            years,
            "near-zero real return, linear withdrawal value"
        );
        return mul(annual, n, "withdrawal present value");
    }
    let discount = div(
        Decimal::ONE,
        growth_factor(real_return, n)?,
        "withdrawal discount factor",
    )?;
    div(
        mul(annual, Decimal::ONE - discount, "withdrawal present value")?,
        real_return,
        "withdrawal present value",
    )
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run the corpus model selected by `resolved.mode`.
pub fn compute_corpus(
    resolved: &ResolvedAssumptions,
    warnings: &mut Vec<String>,
) -> CorpusResult<CorpusRequirement> {
    let traditional = || {
        calculate_traditional_corpus(
            resolved.monthly_living,
            resolved.years_to_retirement,
            resolved.years_in_retirement,
            resolved.inflation,
            resolved.post_retirement_return,
        )
    };

    let requirement = match resolved.mode {
        RetirementMode::Traditional => {
            let t = traditional()?;
            if is_near_zero(t.real_return) {
                warnings.push(near_zero_warning("post-retirement", t.real_return));
            }
            CorpusRequirement::Traditional(t)
        }
        RetirementMode::Fire | RetirementMode::FatFire => {
            let annual_expenses = future_value(
                resolved.monthly_living * dec!(12),
                resolved.inflation,
                Decimal::from(resolved.years_to_retirement),
            )?;
            CorpusRequirement::Fire(calculate_fire_corpus(
                annual_expenses,
                resolved.post_fi_income,
                resolved.swr,
                resolved.buffer,
            )?)
        }
        RetirementMode::Coast => {
            let t = traditional()?;
            if is_near_zero(t.real_return) {
                warnings.push(near_zero_warning("post-retirement", t.real_return));
            }
            CorpusRequirement::Coast(calculate_coast_fire(
                t.corpus_at_retirement,
                resolved.years_to_retirement,
                resolved.pre_retirement_return,
            )?)
        }
        RetirementMode::Barista => {
            let b = calculate_barista_fire(&BaristaInput {
                monthly_expense: resolved.monthly_living,
                part_time_income: resolved.part_time_income,
                other_income: resolved.other_income,
                fi_age: resolved.retirement_age,
                full_retirement_age: resolved.full_retirement_age,
                life_expectancy: resolved.life_expectancy,
                inflation: resolved.inflation,
                pre_retirement_return: resolved.pre_retirement_return,
                post_retirement_return: resolved.post_retirement_return,
            })?;
            if is_near_zero(b.real_return_pre) {
                warnings.push(near_zero_warning("phase 1", b.real_return_pre));
            }
            if is_near_zero(b.real_return_post) {
                warnings.push(near_zero_warning("phase 2", b.real_return_post));
            }
            if b.years_in_phase2 == 0 {
                warnings.push(format!(
                    "Full retirement age {} is at or beyond life expectancy {}; phase 2 is empty",
                    resolved.full_retirement_age, resolved.life_expectancy
                ));
            }
            CorpusRequirement::Barista(b)
        }
    };

    Ok(requirement)
}

fn near_zero_warning(segment: &str, real_return: Rate) -> String {
    format!(
        "Real {segment} return {real_return} is near zero; withdrawals valued as a simple sum"
    )
}

/// Today's value of the mode's corpus. Coast already is one; every other
/// mode is discounted from its reference age at the pre-retirement return.
pub fn corpus_present_value(
    requirement: &CorpusRequirement,
    resolved: &ResolvedAssumptions,
) -> CorpusResult<Money> {
    match requirement {
        CorpusRequirement::Coast(c) => Ok(c.coast_number),
        other => present_value(
            other.base_corpus(),
            resolved.pre_retirement_return,
            Decimal::from(resolved.years_to_retirement),
        ),
    }
}
