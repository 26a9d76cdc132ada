use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{growth_factor, growth_power, scale};
use crate::types::{
    percent_to_rate, require_positive, require_years, with_metadata, ComputationOutput, Money,
    Percent, Years,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Compounding frequency
// ---------------------------------------------------------------------------

/// Named compounding conventions. `Custom(n)` covers anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
    Custom(u32),
}

impl CompoundingFrequency {
    /// Compounding periods per year (`n`).
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Custom(n) => n,
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundingFrequency::Annually => write!(f, "annually"),
            CompoundingFrequency::SemiAnnually => write!(f, "semi-annually"),
            CompoundingFrequency::Quarterly => write!(f, "quarterly"),
            CompoundingFrequency::Monthly => write!(f, "monthly"),
            CompoundingFrequency::Daily => write!(f, "daily"),
            CompoundingFrequency::Custom(n) => write!(f, "{n}x per year"),
        }
    }
}

impl FromStr for CompoundingFrequency {
    type Err = CalcError;

    /// Accepts a name ("monthly", "semi-annually", ...) or a positive integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let freq = match s.trim().to_lowercase().as_str() {
            "annual" | "annually" | "yearly" => CompoundingFrequency::Annually,
            "semi-annual" | "semi-annually" | "semiannually" | "half-yearly" => {
                CompoundingFrequency::SemiAnnually
            }
            "quarterly" => CompoundingFrequency::Quarterly,
            "monthly" => CompoundingFrequency::Monthly,
            "daily" => CompoundingFrequency::Daily,
            other => match other.parse::<u32>() {
                Ok(1) => CompoundingFrequency::Annually,
                Ok(2) => CompoundingFrequency::SemiAnnually,
                Ok(4) => CompoundingFrequency::Quarterly,
                Ok(12) => CompoundingFrequency::Monthly,
                Ok(365) => CompoundingFrequency::Daily,
                Ok(n) if n > 0 => CompoundingFrequency::Custom(n),
                _ => {
                    return Err(CalcError::invalid(
                        "compounding_frequency",
                        format!(
                            "Unknown frequency '{s}'. Use: annually, semi-annually, quarterly, \
                             monthly, daily, or a positive integer"
                        ),
                    ))
                }
            },
        };
        Ok(freq)
    }
}

fn default_periods_per_year() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Compound interest
// ---------------------------------------------------------------------------

/// Input for a compound-interest calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Money,
    /// Annual nominal rate in percent.
    pub annual_rate: Percent,
    pub years: Years,
    /// Compounding periods per year (`n`). Defaults to 1.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestOutput {
    pub amount: Money,
    pub interest: Money,
    /// (1 + R/100/n)^n - 1, in percent.
    pub effective_annual_rate: Percent,
}

/// Compound interest: A = P * (1 + (R/100)/n)^(n*T), I = A - P.
pub fn calculate_compound_interest(
    input: &CompoundInterestInput,
) -> CalcResult<ComputationOutput<CompoundInterestOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("principal", input.principal)?;
    require_positive("annual_rate", input.annual_rate)?;
    require_years("years", input.years)?;
    if input.periods_per_year == 0 {
        return Err(CalcError::invalid(
            "periods_per_year",
            "compounding frequency must be at least 1",
        ));
    }

    let n = Decimal::from(input.periods_per_year);
    let periodic_rate = percent_to_rate(input.annual_rate) / n;
    let exponent = n * input.years;
    if !exponent.fract().is_zero() {
        warnings.push(format!(
            "{exponent} compounding periods is not whole; partial period compounded via exp/ln"
        ));
    }

    let factor = growth_power(Decimal::ONE + periodic_rate, exponent)?;
    let amount = scale(input.principal, factor, "compound amount")?;
    let annual_factor = growth_factor(periodic_rate, u64::from(input.periods_per_year))?;
    let effective_annual_rate = scale(
        annual_factor - Decimal::ONE,
        Decimal::ONE_HUNDRED,
        "effective annual rate",
    )?;

    log::debug!(
        "compound interest: P={} R={} T={} n={} -> A={}",
        input.principal,
        input.annual_rate,
        input.years,
        input.periods_per_year,
        amount
    );

    let output = CompoundInterestOutput {
        amount,
        interest: amount - input.principal,
        effective_annual_rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound Interest (P x (1 + R/n)^(nT))",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "years": input.years.to_string(),
            "periods_per_year": input.periods_per_year,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Limit of the compound amount as the frequency grows without bound:
/// P * e^(R*T/100).
pub fn continuous_compound_amount(
    principal: Money,
    annual_rate: Percent,
    years: Years,
) -> CalcResult<Money> {
    require_positive("principal", principal)?;
    require_positive("annual_rate", annual_rate)?;
    require_years("years", years)?;

    let factor = scale(percent_to_rate(annual_rate), years, "continuous compounding")?
        .checked_exp()
        .ok_or_else(|| CalcError::Overflow {
            context: "continuous compounding".into(),
        })?;
    scale(principal, factor, "continuous compound amount")
}
