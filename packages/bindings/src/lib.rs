use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Interest
// ---------------------------------------------------------------------------

#[napi]
pub fn simple_interest(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::interest::simple::SimpleInterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::interest::simple::calculate_simple_interest(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compound_interest(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::interest::compound::CompoundInterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::interest::compound::calculate_compound_interest(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes the compound-interest input shape; `periods_per_year` is ignored.
#[napi]
pub fn continuous_compound_amount(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::interest::compound::CompoundInterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let amount = fincalc_core::interest::compound::continuous_compound_amount(
        input.principal,
        input.annual_rate,
        input.years,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "amount": amount })).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn emi(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::loans::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::loans::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investments
// ---------------------------------------------------------------------------

#[napi]
pub fn sip(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::investments::sip::SipInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::investments::sip::calculate_sip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lumpsum(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::investments::lumpsum::LumpsumInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::investments::lumpsum::calculate_lumpsum(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn fixed_deposit(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::investments::deposits::FixedDepositInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::investments::deposits::calculate_fixed_deposit(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn recurring_deposit(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::investments::deposits::RecurringDepositInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::investments::deposits::calculate_recurring_deposit(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[napi]
pub fn inflation_impact(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::planning::inflation::InflationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::planning::inflation::calculate_inflation_impact(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn retirement_target(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::planning::retirement::RetirementTargetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::planning::retirement::plan_retirement_target(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn income_tax(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::tax::income_tax::IncomeTaxInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::tax::income_tax::calculate_income_tax(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

#[napi]
pub fn convert_currency(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::currency::conversion::ConversionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::currency::conversion::convert_currency(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn convert_many(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::currency::conversion::MultiConversionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::currency::conversion::convert_many(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
