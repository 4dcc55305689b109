use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sip::{escalating_contribution_future_value, required_contribution};
use crate::time_value::div;
use crate::types::{Money, Percent, Rate};
use crate::CorpusResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub required_corpus: Money,
    pub projected_wealth: Money,
    pub gap: Money,
    pub surplus: Money,
    pub has_shortfall: bool,
    /// Level monthly SIP that closes the gap.
    pub required_sip: Money,
    /// True when `required_sip` is the plain `gap / months` split.
    pub required_sip_linear_fallback: bool,
    /// Starting monthly SIP that closes the gap when raised every year.
    pub required_step_up_sip: Money,
    pub on_track_percentage: Percent,
}

/// Compare the required corpus against projected wealth and size the
/// contribution that closes any shortfall.
pub fn calculate_gap_analysis(
    required_corpus: Money,
    projected_wealth: Money,
    years_to_target: u32,
    pre_target_return: Rate,
    step_up_rate: Rate,
) -> CorpusResult<GapAnalysis> {
    let years = years_to_target.max(1);
    let difference = required_corpus - projected_wealth;
    let has_shortfall = difference > Decimal::ZERO;

    let (gap, surplus) = if has_shortfall {
        (difference, Decimal::ZERO)
    } else {
        (Decimal::ZERO, projected_wealth - required_corpus)
    };

    let (required_sip, required_sip_linear_fallback, required_step_up_sip) = if has_shortfall {
        let level = required_contribution(gap, Some(pre_target_return), years);
        let per_unit = escalating_contribution_future_value(
            Decimal::ONE,
            pre_target_return,
            step_up_rate,
            years,
        )?;
        let step_up = div(gap, per_unit, "step-up SIP")?;
        (level.monthly_amount, level.linear_fallback, step_up)
    } else {
        (Decimal::ZERO, false, Decimal::ZERO)
    };

    let on_track_percentage = if required_corpus > Decimal::ZERO {
        (div(projected_wealth, required_corpus, "on-track ratio")? * dec!(100)).min(dec!(100))
    } else {
        dec!(100)
    };

    #[cfg(feature = "logging")]
    tracing::debug!(
        required_corpus = %required_corpus,
        projected_wealth = %projected_wealth,
        gap = %gap,
        years,
        pre_target_return = %pre_target_return,
        required_sip = %required_sip,
        "gap analysis"
    );

    Ok(GapAnalysis {
        required_corpus,
        projected_wealth,
        gap,
        surplus,
        has_shortfall,
        required_sip,
        required_sip_linear_fallback,
        required_step_up_sip,
        on_track_percentage,
    })
}
