use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::withdrawal_present_value;
use crate::time_value::{future_value, real_return};
use crate::types::{Money, Rate};
use crate::CorpusResult;

/// Annuity view of retirement: the corpus that funds inflation-linked
/// withdrawals from retirement to life expectancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraditionalCorpus {
    pub monthly_at_retirement: Money,
    pub annual_at_retirement: Money,
    /// Fisher real post-retirement return.
    pub real_return: Rate,
    pub corpus_at_retirement: Money,
}

pub fn calculate_traditional_corpus(
    monthly_expense: Money,
    years_to_retirement: u32,
    years_in_retirement: u32,
    inflation: Rate,
    post_retirement_return: Rate,
) -> CorpusResult<TraditionalCorpus> {
    let monthly_at_retirement = future_value(
        monthly_expense,
        inflation,
        Decimal::from(years_to_retirement),
    )?;
    let annual_at_retirement = monthly_at_retirement * dec!(12);
    let real = real_return(post_retirement_return, inflation)?;
    let corpus_at_retirement =
        withdrawal_present_value(annual_at_retirement, real, years_in_retirement)?;

    Ok(TraditionalCorpus {
        monthly_at_retirement,
        annual_at_retirement,
        real_return: real,
        corpus_at_retirement,
    })
}
