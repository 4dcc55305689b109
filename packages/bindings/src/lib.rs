use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use corpus_core::plan::RetirementPlanInput;
use corpus_core::scenarios::sensitivity::{self, SensitivityParameter};
use corpus_core::{sip, time_value};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| to_napi_error(format!("Invalid {field} '{raw}': {e}")))
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_retirement_plan(input_json: String) -> NapiResult<String> {
    let input: RetirementPlanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = corpus_core::calculate_retirement_plan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `values_json` is a JSON array of decimals; an empty array uses the
/// parameter's preset sweep.
#[napi]
pub fn run_sensitivity_analysis(
    input_json: String,
    parameter: String,
    values_json: String,
) -> NapiResult<String> {
    let input: RetirementPlanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let parameter: SensitivityParameter = parameter.parse().map_err(to_napi_error)?;
    let mut values: Vec<Decimal> = serde_json::from_str(&values_json).map_err(to_napi_error)?;
    if values.is_empty() {
        values = parameter.default_values();
    }
    let output = sensitivity::run_sensitivity_analysis(&input, parameter, &values)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Time value
// ---------------------------------------------------------------------------

#[napi]
pub fn future_value(amount: String, rate: String, years: String) -> NapiResult<String> {
    let fv = time_value::future_value(
        parse_decimal("amount", &amount)?,
        parse_decimal("rate", &rate)?,
        parse_decimal("years", &years)?,
    )
    .map_err(to_napi_error)?;
    Ok(fv.to_string())
}

#[napi]
pub fn present_value(amount: String, rate: String, years: String) -> NapiResult<String> {
    let pv = time_value::present_value(
        parse_decimal("amount", &amount)?,
        parse_decimal("rate", &rate)?,
        parse_decimal("years", &years)?,
    )
    .map_err(to_napi_error)?;
    Ok(pv.to_string())
}

/// Monthly SIP for `target` over `years`; `rate` may be empty for the
/// default SIP return.
#[napi]
pub fn required_contribution(target: String, rate: String, years: u32) -> NapiResult<String> {
    let rate = if rate.trim().is_empty() {
        None
    } else {
        Some(parse_decimal("rate", &rate)?)
    };
    let solution = sip::required_contribution(parse_decimal("target", &target)?, rate, years);
    serde_json::to_string(&solution).map_err(to_napi_error)
}
