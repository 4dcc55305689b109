use clap::Args;
use serde_json::Value;

use corpus_core::plan::RetirementPlanInput;
use corpus_core::planning::engine;

use crate::input;

/// Arguments for a full retirement plan
#[derive(Args)]
pub struct PlanArgs {
    /// Path to a JSON or YAML plan file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan: RetirementPlanInput = input::read_plan(args.input.as_deref(), "plan")?;
    let result = engine::calculate_retirement_plan(&plan)?;
    Ok(serde_json::to_value(result)?)
}
