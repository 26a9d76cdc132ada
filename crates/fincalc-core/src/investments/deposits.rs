use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{annuity_due_fv_factor, growth_power, scale};
use crate::types::{
    monthly_rate, percent_to_rate, require_non_negative, require_positive, require_years,
    whole_months, with_metadata, ComputationOutput, Money, Percent, Years,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Fixed deposit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDepositInput {
    pub deposit: Money,
    pub annual_rate: Percent,
    pub years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDepositOutput {
    pub maturity_value: Money,
    pub interest: Money,
}

/// Fixed deposit with annual compounding: M = P * (1 + R/100)^T.
pub fn calculate_fixed_deposit(
    input: &FixedDepositInput,
) -> CalcResult<ComputationOutput<FixedDepositOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("deposit", input.deposit)?;
    require_non_negative("annual_rate", input.annual_rate)?;
    require_years("years", input.years)?;

    if input.annual_rate.is_zero() {
        warnings.push("Zero interest rate: deposit earns nothing".into());
    }

    let factor = growth_power(
        Decimal::ONE + percent_to_rate(input.annual_rate),
        input.years,
    )?;
    let maturity_value = scale(input.deposit, factor, "FD maturity")?;

    let output = FixedDepositOutput {
        maturity_value,
        interest: maturity_value - input.deposit,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed Deposit (annual compounding)",
        &serde_json::json!({
            "deposit": input.deposit.to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "years": input.years.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Recurring deposit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDepositInput {
    pub monthly_deposit: Money,
    pub annual_rate: Percent,
    pub years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDepositOutput {
    pub invested: Money,
    pub maturity_value: Money,
    pub interest: Money,
    pub months: u32,
}

/// Recurring deposit: M = P * ((1+r)^n - 1)/r * (1+r), r = R/1200, n = 12T.
pub fn calculate_recurring_deposit(
    input: &RecurringDepositInput,
) -> CalcResult<ComputationOutput<RecurringDepositOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("monthly_deposit", input.monthly_deposit)?;
    require_non_negative("annual_rate", input.annual_rate)?;
    let months = whole_months("years", input.years)?;

    let r = monthly_rate(input.annual_rate);
    if r.is_zero() {
        warnings.push("Zero interest rate: maturity equals total deposited".into());
    }

    let factor = annuity_due_fv_factor(r, months)?;
    let maturity_value = scale(input.monthly_deposit, factor, "RD maturity")?;
    let invested = scale(input.monthly_deposit, Decimal::from(months), "RD invested")?;

    let output = RecurringDepositOutput {
        invested,
        maturity_value,
        interest: maturity_value - invested,
        months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Recurring Deposit (monthly deposits, monthly compounding)",
        &serde_json::json!({
            "monthly_deposit": input.monthly_deposit.to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "years": input.years.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fd_matches_annual_compound() {
        let out = calculate_fixed_deposit(&FixedDepositInput {
            deposit: dec!(100000),
            annual_rate: dec!(7),
            years: dec!(2),
        })
        .unwrap();
        assert_eq!(
            out.result,
            FixedDepositOutput {
                maturity_value: dec!(114490),
                interest: dec!(14490),
            }
        );
    }

    #[test]
    fn test_fd_zero_rate() {
        let out = calculate_fixed_deposit(&FixedDepositInput {
            deposit: dec!(100000),
            annual_rate: Decimal::ZERO,
            years: dec!(3),
        })
        .unwrap();
        assert_eq!(out.result.interest, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_rd_half_year() {
        // 1000 * ((1.01^6 - 1) / 0.01) * 1.01 = 6213.5352107...
        let out = calculate_recurring_deposit(&RecurringDepositInput {
            monthly_deposit: dec!(1000),
            annual_rate: dec!(12),
            years: dec!(0.5),
        })
        .unwrap()
        .result;
        assert_eq!(out.months, 6);
        assert!((out.maturity_value - dec!(6213.5352107)).abs() < dec!(0.000001));
        assert_eq!(out.invested, dec!(6000));
    }

    #[test]
    fn test_rd_invested_and_interest_identity() {
        let out = calculate_recurring_deposit(&RecurringDepositInput {
            monthly_deposit: dec!(2500),
            annual_rate: dec!(6.5),
            years: dec!(3),
        })
        .unwrap()
        .result;
        assert_eq!(out.invested, dec!(90000));
        assert_eq!(out.maturity_value - out.invested, out.interest);
        assert!(out.interest > Decimal::ZERO);
    }

    #[test]
    fn test_rd_zero_rate() {
        let out = calculate_recurring_deposit(&RecurringDepositInput {
            monthly_deposit: dec!(2500),
            annual_rate: Decimal::ZERO,
            years: dec!(1),
        })
        .unwrap()
        .result;
        assert_eq!(out.maturity_value, dec!(30000));
        assert_eq!(out.interest, Decimal::ZERO);
    }

    #[test]
    fn test_huge_deposits_are_overflow_not_panic() {
        let fd = calculate_fixed_deposit(&FixedDepositInput {
            deposit: Decimal::MAX,
            annual_rate: dec!(10),
            years: dec!(1),
        });
        assert!(matches!(fd, Err(CalcError::Overflow { .. })));

        let rd = calculate_recurring_deposit(&RecurringDepositInput {
            monthly_deposit: Decimal::MAX,
            annual_rate: dec!(10),
            years: dec!(1),
        });
        assert!(matches!(rd, Err(CalcError::Overflow { .. })));
    }
}
