use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{growth_power, ratio, scale};
use crate::types::{
    percent_to_rate, require_non_negative, require_positive, require_years, with_metadata,
    ComputationOutput, Money, Percent, Years,
};
use crate::CalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationInput {
    /// What the basket costs today.
    pub current_amount: Money,
    pub inflation_rate: Percent,
    pub years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationOutput {
    /// Nominal cost of today's basket after `years`: P * (1 + R/100)^N.
    pub future_value: Money,
    /// future_value - current_amount.
    pub cost_increase: Money,
    /// Today's money expressed in today's terms after `years`: P / (1 + R/100)^N.
    pub purchasing_power: Money,
}

/// Inflation impact on a fixed basket of goods.
///
/// The headline figure is the nominal future cost, not a present value.
/// Purchasing power is reported alongside for callers that want the other
/// reading.
pub fn calculate_inflation_impact(
    input: &InflationInput,
) -> CalcResult<ComputationOutput<InflationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("current_amount", input.current_amount)?;
    require_non_negative("inflation_rate", input.inflation_rate)?;
    require_years("years", input.years)?;

    if input.inflation_rate.is_zero() {
        warnings.push("Zero inflation: future cost equals today's cost".into());
    }

    let factor = growth_power(
        Decimal::ONE + percent_to_rate(input.inflation_rate),
        input.years,
    )?;
    let future_value = scale(input.current_amount, factor, "inflated cost")?;

    let output = InflationOutput {
        future_value,
        cost_increase: future_value - input.current_amount,
        purchasing_power: ratio(input.current_amount, factor, "purchasing power")?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Inflation Impact (nominal future cost)",
        &serde_json::json!({
            "current_amount": input.current_amount.to_string(),
            "inflation_rate_pct": input.inflation_rate.to_string(),
            "years": input.years.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
