use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::CalcResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates as the user types them: percentages (12 = 12%). Divide before use.
pub type Percent = Decimal;

/// Rates expressed as decimals (0.01 = 1%), used only inside formulas.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Longest horizon any calculator accepts.
pub const MAX_YEARS: u32 = 100;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Conversions and validation shared by the calculators
// ---------------------------------------------------------------------------

/// 12 (percent) -> 0.12
pub fn percent_to_rate(pct: Percent) -> Rate {
    pct / dec!(100)
}

/// Annual percentage -> monthly decimal rate (12 -> 0.01).
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / dec!(1200)
}

pub(crate) fn require_positive(field: &str, value: Decimal) -> CalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(CalcError::invalid(field, format!("{field} must be > 0")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> CalcResult<()> {
    if value < Decimal::ZERO {
        return Err(CalcError::invalid(field, format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Validate a horizon in years: positive and no longer than `MAX_YEARS`.
pub(crate) fn require_years(field: &str, years: Years) -> CalcResult<()> {
    require_positive(field, years)?;
    if years > Decimal::from(MAX_YEARS) {
        return Err(CalcError::invalid(
            field,
            format!("{field} must not exceed {MAX_YEARS} years"),
        ));
    }
    Ok(())
}

/// Convert a tenure in years to a whole number of months.
///
/// Monthly formulas (EMI, SIP, RD, retirement) step once per month, so
/// `years * 12` must come out whole: 1.5 years is fine, 1.05 is not.
pub(crate) fn whole_months(field: &str, years: Years) -> CalcResult<u32> {
    require_years(field, years)?;
    let months = years * dec!(12);
    if !months.fract().is_zero() {
        return Err(CalcError::invalid(
            field,
            format!("{field} must be a whole number of months, got {months} months"),
        ));
    }
    months
        .to_u32()
        .ok_or_else(|| CalcError::invalid(field, "month count out of range"))
}
