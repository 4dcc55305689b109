use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::time_value::{div, mul};
use crate::types::{Money, Rate};
use crate::CorpusResult;

/// Safe-withdrawal-rate view: FI number = net annual expenses / SWR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireCorpus {
    pub annual_expenses: Money,
    pub annual_income: Money,
    pub net_annual_expenses: Money,
    pub swr: Rate,
    pub fi_number: Money,
    pub fi_number_buffered: Money,
}

/// `annual_expenses` is already at retirement-year prices. Fat FIRE uses
/// the same calculation.
pub fn calculate_fire_corpus(
    annual_expenses: Money,
    annual_income: Money,
    swr: Rate,
    buffer: Rate,
) -> CorpusResult<FireCorpus> {
    if swr <= Decimal::ZERO {
        return Err(CorpusError::invalid(
            "assumptions.swr",
            "Safe withdrawal rate must be positive",
        ));
    }
    if buffer < Decimal::ZERO {
        return Err(CorpusError::invalid(
            "assumptions.buffer",
            "Buffer must be >= 0",
        ));
    }

    let net_annual_expenses = (annual_expenses - annual_income).max(Decimal::ZERO);
    let fi_number = div(net_annual_expenses, swr, "FI number")?;
    let fi_number_buffered = mul(fi_number, Decimal::ONE + buffer, "buffered FI number")?;

    Ok(FireCorpus {
        annual_expenses,
        annual_income,
        net_annual_expenses,
        swr,
        fi_number,
        fi_number_buffered,
    })
}
