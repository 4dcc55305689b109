use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::withdrawal_present_value;
use crate::error::CorpusError;
use crate::time_value::{future_value, present_value, real_return};
use crate::types::{Money, Rate};
use crate::CorpusResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaristaInput {
    /// Today's monthly living expense.
    pub monthly_expense: Money,
    /// Monthly part-time income during phase 1.
    pub part_time_income: Money,
    /// Annual income from pensions, rent and the like during phase 2.
    pub other_income: Money,
    pub fi_age: u32,
    pub full_retirement_age: u32,
    pub life_expectancy: u32,
    pub inflation: Rate,
    pub pre_retirement_return: Rate,
    pub post_retirement_return: Rate,
}

/// Two-phase corpus: semi-retirement on part-time income, then full
/// retirement on other income only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaristaCorpus {
    pub years_in_phase1: u32,
    pub years_in_phase2: u32,
    pub annual_phase1: Money,
    pub annual_phase2: Money,
    pub real_return_pre: Rate,
    pub real_return_post: Rate,
    pub pv_phase1: Money,
    pub pv_phase2_at_full_retirement: Money,
    pub pv_phase2_at_fi: Money,
    pub corpus_at_fi: Money,
}

pub fn calculate_barista_fire(input: &BaristaInput) -> CorpusResult<BaristaCorpus> {
    if input.full_retirement_age < input.fi_age {
        return Err(CorpusError::invalid(
            "assumptions.full_retirement_age",
            format!(
                "Full retirement age {} is before FI age {}",
                input.full_retirement_age, input.fi_age
            ),
        ));
    }

    let years_in_phase1 = input.full_retirement_age - input.fi_age;
    let years_in_phase2 = input.life_expectancy.saturating_sub(input.full_retirement_age);

    // Phase 1 nets part-time income against today's expense.
    let annual_phase1 = ((input.monthly_expense - input.part_time_income) * dec!(12))
        .max(Decimal::ZERO);

    // Phase 2 expense is inflated through phase 1.
    let inflated_expense = future_value(
        input.monthly_expense,
        input.inflation,
        Decimal::from(years_in_phase1),
    )?;
    let annual_phase2 =
        ((inflated_expense - input.other_income / dec!(12)) * dec!(12)).max(Decimal::ZERO);

    let real_return_pre = real_return(input.pre_retirement_return, input.inflation)?;
    let pv_phase1 = withdrawal_present_value(annual_phase1, real_return_pre, years_in_phase1)?;

    let real_return_post = real_return(input.post_retirement_return, input.inflation)?;
    let pv_phase2_at_full_retirement =
        withdrawal_present_value(annual_phase2, real_return_post, years_in_phase2)?;
    let pv_phase2_at_fi = present_value(
        pv_phase2_at_full_retirement,
        input.pre_retirement_return,
        Decimal::from(years_in_phase1),
    )?;

    Ok(BaristaCorpus {
        years_in_phase1,
        years_in_phase2,
        annual_phase1,
        annual_phase2,
        real_return_pre,
        real_return_post,
        pv_phase1,
        pv_phase2_at_full_retirement,
        pv_phase2_at_fi,
        corpus_at_fi: pv_phase1 + pv_phase2_at_fi,
    })
}
