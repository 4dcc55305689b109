use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use corpus_core::sip;
use corpus_core::time_value;

/// Arguments for a lump-sum future value
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FvArgs {
    /// Amount today
    #[arg(long)]
    pub amount: Decimal,

    /// Annual rate (e.g. 0.10 for 10%)
    #[arg(long)]
    pub rate: Decimal,

    /// Years (fractions allowed)
    #[arg(long)]
    pub years: Decimal,
}

/// Arguments for a lump-sum present value
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PvArgs {
    /// Amount at the future date
    #[arg(long)]
    pub amount: Decimal,

    /// Annual discount rate
    #[arg(long)]
    pub rate: Decimal,

    /// Years (fractions allowed)
    #[arg(long)]
    pub years: Decimal,
}

/// Arguments for the monthly SIP needed to reach a target
#[derive(Args)]
pub struct SipArgs {
    /// Target future value
    #[arg(long)]
    pub target: Decimal,

    /// Expected annual return (defaults to 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Years of contributions
    #[arg(long)]
    pub years: u32,

    /// Annual step-up; also reports the starting SIP for a stepped plan
    #[arg(long)]
    pub step_up: Option<Decimal>,
}

pub fn run_fv(args: FvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fv = time_value::future_value(args.amount, args.rate, args.years)?;
    Ok(json!({
        "result": { "future_value": fv },
        "methodology": "FV = PV * (1 + r)^n",
    }))
}

pub fn run_pv(args: PvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pv = time_value::present_value(args.amount, args.rate, args.years)?;
    Ok(json!({
        "result": { "present_value": pv },
        "methodology": "PV = FV / (1 + r)^n",
    }))
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let solution = sip::required_contribution(args.target, args.rate, args.years);
    let rate = args.rate.unwrap_or(sip::DEFAULT_SIP_RETURN);

    let mut result = json!({
        "monthly_sip": solution.monthly_amount,
        "linear_fallback": solution.linear_fallback,
        "annual_rate": rate,
        "years": args.years,
    });

    if let Some(step_up) = args.step_up {
        let per_unit =
            sip::escalating_contribution_future_value(Decimal::ONE, rate, step_up, args.years)?;
        if !per_unit.is_zero() && args.target > Decimal::ZERO {
            result["starting_step_up_sip"] = json!(args.target / per_unit);
            result["step_up"] = json!(step_up);
        }
    }

    let mut warnings = Vec::new();
    if solution.linear_fallback {
        warnings.push("Annuity inverse could not be solved; used target / months".to_string());
    }

    Ok(json!({
        "result": result,
        "methodology": "PMT = FV * m / ((1 + m)^n - 1), m = monthly equivalent rate",
        "warnings": warnings,
    }))
}
