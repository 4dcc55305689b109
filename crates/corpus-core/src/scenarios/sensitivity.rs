use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::CorpusError;
use crate::plan::{Assumptions, RetirementPlanInput};
use crate::planning::engine::evaluate_plan;
use crate::types::*;
use crate::CorpusResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Plan assumption that a sensitivity run varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityParameter {
    Inflation,
    PreRetirementReturn,
    PostRetirementReturn,
    Swr,
    Buffer,
    StepUpSip,
    /// Echoed in the resolved assumptions but read by no corpus model, so every
    /// point of a sweep is identical. The run carries a warning saying so.
    SalaryGrowth,
    FiAge,
    FullRetirementAge,
}

impl SensitivityParameter {
    pub const ALL: [SensitivityParameter; 9] = [
        SensitivityParameter::Inflation,
        SensitivityParameter::PreRetirementReturn,
        SensitivityParameter::PostRetirementReturn,
        SensitivityParameter::Swr,
        SensitivityParameter::Buffer,
        SensitivityParameter::StepUpSip,
        SensitivityParameter::SalaryGrowth,
        SensitivityParameter::FiAge,
        SensitivityParameter::FullRetirementAge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SensitivityParameter::Inflation => "inflation",
            SensitivityParameter::PreRetirementReturn => "pre_retirement_return",
            SensitivityParameter::PostRetirementReturn => "post_retirement_return",
            SensitivityParameter::Swr => "swr",
            SensitivityParameter::Buffer => "buffer",
            SensitivityParameter::StepUpSip => "step_up_sip",
            SensitivityParameter::SalaryGrowth => "salary_growth",
            SensitivityParameter::FiAge => "fi_age",
            SensitivityParameter::FullRetirementAge => "full_retirement_age",
        }
    }

    /// Preset what-if ranges. Parameters without a preset return an empty list.
    pub fn default_values(self) -> Vec<Decimal> {
        match self {
            SensitivityParameter::PreRetirementReturn => vec![
                dec!(0.08),
                dec!(0.09),
                dec!(0.10),
                dec!(0.11),
                dec!(0.12),
                dec!(0.13),
                dec!(0.14),
            ],
            SensitivityParameter::PostRetirementReturn => vec![
                dec!(0.05),
                dec!(0.06),
                dec!(0.07),
                dec!(0.08),
                dec!(0.09),
                dec!(0.10),
            ],
            SensitivityParameter::Inflation => {
                vec![dec!(0.04), dec!(0.05), dec!(0.06), dec!(0.07), dec!(0.08)]
            }
            SensitivityParameter::Swr => vec![
                dec!(0.025),
                dec!(0.03),
                dec!(0.035),
                dec!(0.04),
                dec!(0.045),
                dec!(0.05),
            ],
            _ => Vec::new(),
        }
    }

    fn whole_age(self, value: Decimal) -> CorpusResult<u32> {
        value
            .to_u32()
            .filter(|_| value.fract().is_zero() && value >= Decimal::ZERO)
            .ok_or_else(|| {
                CorpusError::invalid(self.as_str(), format!("{value} is not a whole age"))
            })
    }

    fn apply(self, assumptions: &mut Assumptions, value: Decimal) -> CorpusResult<()> {
        match self {
            SensitivityParameter::Inflation => assumptions.inflation = Some(value),
            SensitivityParameter::PreRetirementReturn => {
                assumptions.pre_retirement_return = Some(value)
            }
            SensitivityParameter::PostRetirementReturn => {
                assumptions.post_retirement_return = Some(value)
            }
            SensitivityParameter::Swr => assumptions.swr = Some(value),
            SensitivityParameter::Buffer => assumptions.buffer = Some(value),
            SensitivityParameter::StepUpSip => assumptions.step_up_sip = Some(value),
            SensitivityParameter::SalaryGrowth => assumptions.salary_growth = Some(value),
            SensitivityParameter::FiAge => assumptions.fi_age = Some(self.whole_age(value)?),
            SensitivityParameter::FullRetirementAge => {
                assumptions.full_retirement_age = Some(self.whole_age(value)?)
            }
        }
        Ok(())
    }
}

impl fmt::Display for SensitivityParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensitivityParameter {
    type Err = CorpusError;

    /// Accepts snake_case names and their camelCase spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .flat_map(|c| {
                if c.is_ascii_uppercase() {
                    vec!['_', c.to_ascii_lowercase()]
                } else {
                    vec![c]
                }
            })
            .collect();
        let normalized = match normalized.as_str() {
            "step_up_s_i_p" => "step_up_sip".to_string(),
            other => other.trim_start_matches('_').replace('-', "_"),
        };
        SensitivityParameter::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                CorpusError::invalid("parameter", format!("Unknown sensitivity parameter '{s}'"))
            })
    }
}

/// Headline figures for one sample value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: Decimal,
    pub required_corpus: Money,
    pub projected_wealth: Money,
    pub gap: Money,
    pub required_sip: Money,
    pub on_track_percentage: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub parameter: SensitivityParameter,
    pub results: Vec<SensitivityPoint>,
}

// ---------------------------------------------------------------------------
// Sweeps
// ---------------------------------------------------------------------------

/// Expand `min..=max` by `step`, appending `max` when the step overshoots it.
pub fn sweep_values(var: &SensitivityVariable) -> CorpusResult<Vec<Decimal>> {
    if var.step <= Decimal::ZERO {
        return Err(CorpusError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(CorpusError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        values.push(current);
        current += var.step;
    }
    if let Some(&last) = values.last() {
        if last < var.max {
            values.push(var.max);
        }
    }

    Ok(values)
}

/// Re-run the plan once per value with only `parameter` overridden.
/// Results keep the order of `values`.
pub fn run_sensitivity_analysis(
    input: &RetirementPlanInput,
    parameter: SensitivityParameter,
    values: &[Decimal],
) -> CorpusResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if values.is_empty() {
        return Err(CorpusError::InsufficientData(format!(
            "No values supplied for sensitivity on {parameter}"
        )));
    }

    if parameter == SensitivityParameter::SalaryGrowth {
        warnings.push(
            "salary_growth is not used by any corpus model; all points are identical".into(),
        );
    }

    let mut results = Vec::with_capacity(values.len());
    for &value in values {
        let mut plan = input.clone();
        parameter.apply(&mut plan.assumptions, value)?;

        let mut run_warnings = Vec::new();
        let (_, output) = evaluate_plan(&plan, &mut run_warnings)?;
        warnings.extend(
            run_warnings
                .into_iter()
                .map(|w| format!("{parameter}={value}: {w}")),
        );

        results.push(SensitivityPoint {
            value,
            required_corpus: output.corpus.total_fv_required,
            projected_wealth: output.wealth.total_projected_wealth,
            gap: output.gap.gap,
            required_sip: output.gap.required_sip,
            on_track_percentage: output.gap.on_track_percentage,
        });
    }

    #[cfg(feature = "logging")]
    tracing::debug!(parameter = %parameter, points = results.len(), "sensitivity sweep complete");

    let output = SensitivityOutput { parameter, results };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "One-way sensitivity (full plan re-evaluated per value)",
        &serde_json::json!({
            "parameter": parameter.as_str(),
            "values": values,
            "mode": input.mode,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{AmountMode, Expense, ExpenseKind, Person, RetirementMode};

    fn default_input() -> RetirementPlanInput {
        RetirementPlanInput {
            mode: RetirementMode::Fire,
            person_a: Person {
                age: 30,
                retirement_age: 45,
            },
            person_b: None,
            life_expectancy: 85,
            current_year: 2025,
            assumptions: Assumptions::default(),
            assets: vec![],
            expenses: vec![Expense {
                name: None,
                kind: ExpenseKind::MonthlyLiving,
                amount: dec!(60_000),
                amount_mode: AmountMode::Today,
                escalation: None,
                target_year: None,
                start_year: None,
                end_year: None,
            }],
            income_streams: vec![],
            existing_sip: dec!(20_000),
        }
    }

    #[test]
    fn test_sweep_values_inclusive() {
        let var = SensitivityVariable {
            name: "swr".into(),
            min: dec!(0.03),
            max: dec!(0.05),
            step: dec!(0.01),
        };
        assert_eq!(
            sweep_values(&var).unwrap(),
            vec![dec!(0.03), dec!(0.04), dec!(0.05)]
        );
    }

    #[test]
    fn test_sweep_values_appends_max() {
        let var = SensitivityVariable {
            name: "inflation".into(),
            min: dec!(0.04),
            max: dec!(0.09),
            step: dec!(0.02),
        };
        assert_eq!(
            sweep_values(&var).unwrap(),
            vec![dec!(0.04), dec!(0.06), dec!(0.08), dec!(0.09)]
        );
    }

    #[test]
    fn test_sweep_values_rejects_bad_ranges() {
        let mut var = SensitivityVariable {
            name: "x".into(),
            min: dec!(0.1),
            max: dec!(0.2),
            step: Decimal::ZERO,
        };
        assert!(sweep_values(&var).is_err());
        var.step = dec!(0.01);
        var.min = dec!(0.3);
        assert!(sweep_values(&var).is_err());
    }

    #[test]
    fn test_default_ranges() {
        assert_eq!(SensitivityParameter::PreRetirementReturn.default_values().len(), 7);
        assert_eq!(SensitivityParameter::PostRetirementReturn.default_values().len(), 6);
        assert_eq!(SensitivityParameter::Inflation.default_values().len(), 5);
        assert_eq!(SensitivityParameter::Swr.default_values().len(), 6);
        assert!(SensitivityParameter::Buffer.default_values().is_empty());
    }

    #[test]
    fn test_parameter_parsing() {
        assert_eq!(
            "pre_retirement_return".parse::<SensitivityParameter>().unwrap(),
            SensitivityParameter::PreRetirementReturn
        );
        assert_eq!(
            "preRetirementReturn".parse::<SensitivityParameter>().unwrap(),
            SensitivityParameter::PreRetirementReturn
        );
        assert_eq!(
            "stepUpSIP".parse::<SensitivityParameter>().unwrap(),
            SensitivityParameter::StepUpSip
        );
        assert!("volatility".parse::<SensitivityParameter>().is_err());
    }

    #[test]
    fn test_one_result_per_value_in_order() {
        let values = SensitivityParameter::Swr.default_values();
        let out = run_sensitivity_analysis(&default_input(), SensitivityParameter::Swr, &values)
            .unwrap();
        assert_eq!(out.result.results.len(), values.len());
        for (point, value) in out.result.results.iter().zip(&values) {
            assert_eq!(point.value, *value);
        }
        // higher swr, smaller corpus
        let first = &out.result.results[0];
        let last = out.result.results.last().unwrap();
        assert!(last.required_corpus < first.required_corpus);
    }

    #[test]
    fn test_age_parameter_must_be_whole() {
        let input = default_input();
        assert!(
            run_sensitivity_analysis(&input, SensitivityParameter::FiAge, &[dec!(45.5)]).is_err()
        );
        assert!(
            run_sensitivity_analysis(&input, SensitivityParameter::FiAge, &[dec!(-40)]).is_err()
        );
        let out =
            run_sensitivity_analysis(&input, SensitivityParameter::FiAge, &[dec!(40), dec!(50)])
                .unwrap();
        assert_eq!(out.result.results.len(), 2);
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(matches!(
            run_sensitivity_analysis(&default_input(), SensitivityParameter::Inflation, &[]),
            Err(CorpusError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_salary_growth_sweep_is_flat_and_warned() {
        let out = run_sensitivity_analysis(
            &default_input(),
            SensitivityParameter::SalaryGrowth,
            &[dec!(0.05), dec!(0.10)],
        )
        .unwrap();
        let results = &out.result.results;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].required_corpus, results[1].required_corpus);
        assert_eq!(results[0].required_sip, results[1].required_sip);
        assert!(out.warnings[0].starts_with("salary_growth is not used"));
    }

    #[test]
    fn test_invalid_value_propagates() {
        assert!(run_sensitivity_analysis(
            &default_input(),
            SensitivityParameter::Swr,
            &[dec!(0.04), Decimal::ZERO]
        )
        .is_err());
    }
}
