use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{growth_power, scale};
use crate::types::{
    percent_to_rate, require_non_negative, require_positive, require_years, with_metadata,
    ComputationOutput, Money, Percent, Years,
};
use crate::CalcResult;

fn default_periods_per_year() -> u32 {
    1
}

/// A single upfront investment left to compound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpsumInput {
    pub investment: Money,
    pub expected_return: Percent,
    pub years: Years,
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpsumOutput {
    pub invested: Money,
    pub maturity_value: Money,
    pub gain: Money,
}

/// Lumpsum growth: M = P * (1 + R/100/n)^(n*T).
pub fn calculate_lumpsum(input: &LumpsumInput) -> CalcResult<ComputationOutput<LumpsumOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("investment", input.investment)?;
    require_non_negative("expected_return", input.expected_return)?;
    require_years("years", input.years)?;
    if input.periods_per_year == 0 {
        return Err(CalcError::invalid(
            "periods_per_year",
            "compounding frequency must be at least 1",
        ));
    }

    if input.expected_return.is_zero() {
        warnings.push("Zero expected return: maturity equals amount invested".into());
    }

    let n = Decimal::from(input.periods_per_year);
    let factor = growth_power(
        Decimal::ONE + percent_to_rate(input.expected_return) / n,
        n * input.years,
    )?;
    let maturity_value = scale(input.investment, factor, "lumpsum maturity")?;

    let output = LumpsumOutput {
        invested: input.investment,
        maturity_value,
        gain: maturity_value - input.investment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lumpsum Investment (compound growth)",
        &serde_json::json!({
            "investment": input.investment.to_string(),
            "expected_return_pct": input.expected_return.to_string(),
            "years": input.years.to_string(),
            "periods_per_year": input.periods_per_year,
        }),
        warnings,
        elapsed,
        output,
    ))
}
