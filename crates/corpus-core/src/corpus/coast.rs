use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::present_value;
use crate::types::{Money, Rate};
use crate::CorpusResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoastCorpus {
    pub target_corpus_at_retirement: Money,
    /// Amount that compounds to the target with no further contributions.
    pub coast_number: Money,
    pub years_to_coast: u32,
    pub expected_return: Rate,
}

pub fn calculate_coast_fire(
    target_corpus: Money,
    years_to_retirement: u32,
    expected_return: Rate,
) -> CorpusResult<CoastCorpus> {
    let coast_number = present_value(
        target_corpus,
        expected_return,
        Decimal::from(years_to_retirement),
    )?;
    Ok(CoastCorpus {
        target_corpus_at_retirement: target_corpus,
        coast_number,
        years_to_coast: years_to_retirement,
        expected_return,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::future_value;
    use rust_decimal_macros::dec;

    #[test]
    fn test_coast_number_basic() {
        // 3 Cr target, 25 years at 12%
        let c = calculate_coast_fire(dec!(30_000_000), 25, dec!(0.12)).unwrap();
        assert!(
            (c.coast_number - dec!(1_764_706)).abs() < dec!(1_000),
            "coast={}",
            c.coast_number
        );
        assert_eq!(c.years_to_coast, 25);
    }

    #[test]
    fn test_coast_number_compounds_to_target() {
        let c = calculate_coast_fire(dec!(10_000_000), 15, dec!(0.10)).unwrap();
        let grown = future_value(c.coast_number, dec!(0.10), dec!(15)).unwrap();
        assert!((grown - dec!(10_000_000)).abs() < dec!(0.01));
    }
}
