use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::gap::{calculate_gap_analysis, GapAnalysis};
use super::goals::{aggregate_goals, GoalResult};
use super::wealth::{project_wealth, projection_schedule, ProjectionYear, WealthProjection};
use crate::corpus::{compute_corpus, corpus_present_value, CorpusOutput};
use crate::plan::{resolve, ResolvedAssumptions, RetirementMode, RetirementPlanInput};
use crate::time_value::{future_value, mul};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::CorpusResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub years_to_retirement: u32,
    pub years_in_retirement: u32,
}

/// Top-level output from `calculate_retirement_plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlanOutput {
    pub mode: RetirementMode,
    pub timeline: Timeline,
    pub corpus: CorpusOutput,
    pub goals: Vec<GoalResult>,
    pub total_goals_pv: Money,
    pub wealth: WealthProjection,
    pub projection: Vec<ProjectionYear>,
    pub gap: GapAnalysis,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Size the corpus for the plan's mode, add its goals, project current
/// wealth and report the gap.
pub fn calculate_retirement_plan(
    input: &RetirementPlanInput,
) -> CorpusResult<ComputationOutput<RetirementPlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (resolved, output) = evaluate_plan(input, &mut warnings)?;
    let methodology = output.corpus.requirement.description();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &resolved,
        warnings,
        elapsed,
        output,
    ))
}

/// The pipeline without the envelope. Sensitivity sweeps call this directly.
pub(crate) fn evaluate_plan(
    input: &RetirementPlanInput,
    warnings: &mut Vec<String>,
) -> CorpusResult<(ResolvedAssumptions, RetirementPlanOutput)> {
    #[cfg(feature = "logging")]
    tracing::debug!(
        mode = ?input.mode,
        assets = input.assets.len(),
        expenses = input.expenses.len(),
        income_streams = input.income_streams.len(),
        "calculating retirement plan"
    );

    let resolved = resolve(input, warnings)?;
    let years = Decimal::from(resolved.years_to_retirement);

    // --- Corpus ---
    let requirement = compute_corpus(&resolved, warnings)?;
    let corpus_pv = corpus_present_value(&requirement, &resolved)?;

    // --- Goals ---
    let goals = aggregate_goals(&input.expenses, &resolved)?;
    let total_goals_pv: Money = goals.iter().map(GoalResult::present_value).sum();

    // Buffer is applied to the combined PV, on top of any FIRE buffer.
    let total_pv_required = mul(
        corpus_pv + total_goals_pv,
        Decimal::ONE + resolved.buffer,
        "buffered PV requirement",
    )?;
    let total_fv_required =
        future_value(total_pv_required, resolved.pre_retirement_return, years)?;

    // --- Wealth ---
    let wealth = project_wealth(
        &input.assets,
        resolved.existing_sip,
        resolved.years_to_retirement,
        resolved.pre_retirement_return,
    )?;
    let projection = projection_schedule(&input.assets, &resolved, total_fv_required)?;

    // --- Gap ---
    let gap = calculate_gap_analysis(
        total_fv_required,
        wealth.total_projected_wealth,
        resolved.years_to_retirement,
        resolved.pre_retirement_return,
        resolved.step_up_sip,
    )?;
    if gap.required_sip_linear_fallback {
        #[cfg(feature = "logging")]
        tracing::debug!(gap = %gap.gap, "required SIP fell back to linear split");
        warnings.push(format!(
            "Required SIP could not be solved at {} return; using gap / months",
            resolved.pre_retirement_return
        ));
    }

    let output = RetirementPlanOutput {
        mode: resolved.mode,
        timeline: Timeline {
            current_age: resolved.current_age,
            retirement_age: resolved.retirement_age,
            life_expectancy: resolved.life_expectancy,
            years_to_retirement: resolved.years_to_retirement,
            years_in_retirement: resolved.years_in_retirement,
        },
        corpus: CorpusOutput {
            requirement,
            corpus_pv,
            total_pv_required,
            total_fv_required,
        },
        goals,
        total_goals_pv,
        wealth,
        projection,
        gap,
    };

    Ok((resolved, output))
}
