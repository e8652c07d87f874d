use napi::Result as NapiResult;
use napi_derive::napi;

use finance_advisor_core::analysis::{self, AnalysisInput};
use finance_advisor_core::format::{format_currency, format_percentage, MoneyFormat};
use finance_advisor_core::FinancialProfile;
use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_records(input_json: &str) -> NapiResult<AnalysisInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn parse_profile(profile_json: &str) -> NapiResult<FinancialProfile> {
    serde_json::from_str(profile_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Records -> derived values
// ---------------------------------------------------------------------------

#[napi]
pub fn summarize(input_json: String) -> NapiResult<String> {
    let input = parse_records(&input_json)?;
    serde_json::to_string(&input.summary()).map_err(to_napi_error)
}

#[napi]
pub fn build_profile(input_json: String) -> NapiResult<String> {
    let input = parse_records(&input_json)?;
    serde_json::to_string(&input.profile()).map_err(to_napi_error)
}

#[napi]
pub fn analyze(input_json: String) -> NapiResult<String> {
    let input = parse_records(&input_json)?;
    let output = analysis::analyze(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Profile -> advice
// ---------------------------------------------------------------------------

/// `format_json` is an optional `{"currency": "PEN", "locale": "es-pe"}`.
#[napi]
pub fn generate_recommendations(
    profile_json: String,
    format_json: Option<String>,
) -> NapiResult<String> {
    let profile = parse_profile(&profile_json)?;
    let fmt: MoneyFormat = match format_json {
        Some(f) => serde_json::from_str(&f).map_err(to_napi_error)?,
        None => MoneyFormat::default(),
    };
    let recs = finance_advisor_core::generate_recommendations_with(&profile, &fmt);
    serde_json::to_string(&recs).map_err(to_napi_error)
}

#[napi]
pub fn compute_allocation(profile_json: String) -> NapiResult<String> {
    let profile = parse_profile(&profile_json)?;
    let plan = finance_advisor_core::compute_allocation(&profile);
    serde_json::to_string(&plan).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_money(amount: String, format_json: Option<String>) -> NapiResult<String> {
    let value: Decimal = amount.parse().map_err(to_napi_error)?;
    let fmt: MoneyFormat = match format_json {
        Some(f) => serde_json::from_str(&f).map_err(to_napi_error)?,
        None => MoneyFormat::default(),
    };
    Ok(format_currency(value, &fmt))
}

#[napi]
pub fn format_percent(value: String) -> NapiResult<String> {
    let value: Decimal = value.parse().map_err(to_napi_error)?;
    Ok(format_percentage(value))
}
