use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{scale, sinking_fund_payment};
use crate::types::{
    monthly_rate, whole_months, with_metadata, ComputationOutput, Money, Percent, Years,
};
use crate::CalcResult;

/// Expected annual return assumed when the caller leaves it blank.
pub const DEFAULT_EXPECTED_RETURN: Percent = dec!(12);

/// Input for the retirement target planner.
///
/// Fields are optional so that a half-filled form deserialises and is then
/// rejected with a field-specific message instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetirementTargetInput {
    /// Corpus needed at retirement.
    pub target_corpus: Option<Money>,
    pub years_to_retirement: Option<Years>,
    /// Expected annual return in percent; defaults to 12.
    #[serde(default)]
    pub expected_return: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementTargetOutput {
    /// Monthly SIP at the start of each month that grows to the target.
    pub required_monthly_sip: Money,
    /// Same target with deposits at the end of each month.
    pub required_monthly_sip_end_of_month: Money,
    pub months: u32,
    pub total_invested: Money,
    pub expected_gain: Money,
}

fn required(field: &str, value: Option<Decimal>) -> CalcResult<Decimal> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(v),
        _ => Err(CalcError::invalid(
            field,
            "Please fill all fields with positive values",
        )),
    }
}

/// Monthly SIP needed to reach a target corpus.
///
/// Inverse of the SIP maturity formula: SIP = FV * r / (((1+r)^m - 1) * (1+r)),
/// so the SIP calculator fed this amount lands back on the target.
pub fn plan_retirement_target(
    input: &RetirementTargetInput,
) -> CalcResult<ComputationOutput<RetirementTargetOutput>> {
    let start = Instant::now();

    // --- Validation ---
    let target = required("target_corpus", input.target_corpus)?;
    let years = required("years_to_retirement", input.years_to_retirement)?;
    let expected_return = required(
        "expected_return",
        Some(input.expected_return.unwrap_or(DEFAULT_EXPECTED_RETURN)),
    )?;
    let months = whole_months("years_to_retirement", years)?;

    let r = monthly_rate(expected_return);
    let sip = sinking_fund_payment(target, r, months, true)?;
    let sip_end_of_month = sinking_fund_payment(target, r, months, false)?;
    let total_invested = scale(sip, Decimal::from(months), "retirement total invested")?;

    log::debug!(
        "retirement target: FV={} N={} R={} -> sip={}",
        target,
        years,
        expected_return,
        sip
    );

    let output = RetirementTargetOutput {
        required_monthly_sip: sip,
        required_monthly_sip_end_of_month: sip_end_of_month,
        months,
        total_invested,
        expected_gain: target - total_invested,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Retirement Target (required monthly SIP, annuity due)",
        &serde_json::json!({
            "target_corpus": target.to_string(),
            "years_to_retirement": years.to_string(),
            "expected_return_pct": expected_return.to_string(),
            "expected_return_defaulted": input.expected_return.is_none(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}
