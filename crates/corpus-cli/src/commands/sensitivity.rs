use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use corpus_core::plan::RetirementPlanInput;
use corpus_core::scenarios::sensitivity::{self, SensitivityParameter};
use corpus_core::SensitivityVariable;

use crate::input;

/// Arguments for one-way sensitivity analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SensitivityArgs {
    /// Path to a JSON or YAML plan file
    #[arg(long)]
    pub input: Option<String>,

    /// Assumption to vary (e.g. inflation, pre_retirement_return, swr, fi_age)
    #[arg(long)]
    pub parameter: String,

    /// Comma-separated values (e.g. "0.05,0.06,0.07")
    #[arg(long, conflicts_with = "range")]
    pub values: Option<String>,

    /// Inclusive range in format min:max:step (e.g. "0.03:0.05:0.005")
    #[arg(long)]
    pub range: Option<String>,
}

fn parse_values(list: &str) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Decimal>()
                .map_err(|e| format!("Invalid value '{s}': {e}").into())
        })
        .collect()
}

fn parse_range(
    parameter: SensitivityParameter,
    range: &str,
) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = range.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Range must be min:max:step, got '{range}'").into());
    }
    let var = SensitivityVariable {
        name: parameter.to_string(),
        min: parts[0].trim().parse()?,
        max: parts[1].trim().parse()?,
        step: parts[2].trim().parse()?,
    };
    Ok(sensitivity::sweep_values(&var)?)
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let parameter: SensitivityParameter = args.parameter.parse()?;
    let values = match (&args.values, &args.range) {
        (Some(list), _) => parse_values(list)?,
        (None, Some(range)) => parse_range(parameter, range)?,
        (None, None) => parameter.default_values(),
    };
    if values.is_empty() {
        return Err(format!(
            "No preset range for '{parameter}'; pass --values or --range"
        )
        .into());
    }

    let plan: RetirementPlanInput = input::read_plan(args.input.as_deref(), "sensitivity")?;
    let result = sensitivity::run_sensitivity_analysis(&plan, parameter, &values)?;
    Ok(serde_json::to_value(result)?)
}
