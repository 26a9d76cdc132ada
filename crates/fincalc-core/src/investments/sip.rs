use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{annuity_due_fv_factor, scale};
use crate::types::{
    monthly_rate, require_non_negative, require_positive, whole_months, with_metadata,
    ComputationOutput, Money, Percent, Rate, Years,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a systematic (monthly) investment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    /// Amount invested at the start of every month.
    pub monthly_investment: Money,
    /// Expected annual return in percent.
    pub expected_return: Percent,
    pub years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    pub invested: Money,
    pub maturity_value: Money,
    pub gain: Money,
    pub months: u32,
    pub year_by_year: Vec<SipYear>,
}

/// Position at the end of each full year of contributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipYear {
    pub year: u32,
    pub invested_to_date: Money,
    pub value_at_year_end: Money,
    pub gain_to_date: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// SIP maturity, annuity due: M = P * ((1+r)^n - 1) / r * (1+r).
pub fn calculate_sip(input: &SipInput) -> CalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("monthly_investment", input.monthly_investment)?;
    require_non_negative("expected_return", input.expected_return)?;
    let months = whole_months("years", input.years)?;

    let r = monthly_rate(input.expected_return);
    if r.is_zero() {
        warnings.push("Zero expected return: maturity equals amount invested".into());
    }

    let maturity_value = value_after(input.monthly_investment, r, months)?;
    let invested = scale(input.monthly_investment, Decimal::from(months), "SIP invested")?;

    let mut year_by_year = Vec::new();
    for year in 1..=(months / 12) {
        let m = year * 12;
        let value = value_after(input.monthly_investment, r, m)?;
        let paid = scale(input.monthly_investment, Decimal::from(m), "SIP invested")?;
        year_by_year.push(SipYear {
            year,
            invested_to_date: paid,
            value_at_year_end: value,
            gain_to_date: value - paid,
        });
    }

    log::debug!(
        "sip: P={} R={} n={} -> maturity={}",
        input.monthly_investment,
        input.expected_return,
        months,
        maturity_value
    );

    let output = SipOutput {
        invested,
        maturity_value,
        gain: maturity_value - invested,
        months,
        year_by_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Systematic Investment Plan (annuity due, monthly compounding)",
        &serde_json::json!({
            "monthly_investment": input.monthly_investment.to_string(),
            "expected_return_pct": input.expected_return.to_string(),
            "years": input.years.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn value_after(monthly: Money, r: Rate, months: u32) -> CalcResult<Money> {
    let factor = annuity_due_fv_factor(r, months)?;
    scale(monthly, factor, "SIP maturity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use rust_decimal_macros::dec;

    fn assert_approx(actual: Decimal, expected: Decimal, tolerance: Decimal, label: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tolerance,
            "{label}: expected ~{expected}, got {actual} (diff={diff}, tol={tolerance})"
        );
    }

    fn input(p: Decimal, r: Decimal, t: Decimal) -> SipInput {
        SipInput {
            monthly_investment: p,
            expected_return: r,
            years: t,
        }
    }

    #[test]
    fn test_sip_ten_years_twelve_percent() {
        let out = calculate_sip(&input(dec!(5000), dec!(12), dec!(10)))
            .unwrap()
            .result;
        assert_eq!(out.months, 120);
        assert_eq!(out.invested, dec!(600000));
        assert_eq!(out.maturity_value - out.invested, out.gain);
        assert!(out.maturity_value > out.invested);
        assert_approx(out.maturity_value, dec!(1161695.38), dec!(0.01), "maturity");
    }

    #[test]
    fn test_zero_return_is_sum_of_contributions() {
        let out = calculate_sip(&input(dec!(5000), Decimal::ZERO, dec!(2))).unwrap();
        assert_eq!(out.result.maturity_value, dec!(120000));
        assert_eq!(out.result.gain, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_year_by_year_ends_at_maturity() {
        let out = calculate_sip(&input(dec!(1000), dec!(10), dec!(5)))
            .unwrap()
            .result;
        assert_eq!(out.year_by_year.len(), 5);
        let last = out.year_by_year.last().unwrap();
        assert_eq!(last.value_at_year_end, out.maturity_value);
        assert_eq!(last.invested_to_date, out.invested);
        for pair in out.year_by_year.windows(2) {
            assert!(pair[1].value_at_year_end > pair[0].value_at_year_end);
        }
    }

    #[test]
    fn test_partial_year_has_no_year_rows() {
        let out = calculate_sip(&input(dec!(1000), dec!(10), dec!(0.5)))
            .unwrap()
            .result;
        assert_eq!(out.months, 6);
        assert!(out.year_by_year.is_empty());
    }

    #[test]
    fn test_rejects_missing_contribution() {
        assert!(calculate_sip(&input(Decimal::ZERO, dec!(12), dec!(10))).is_err());
        assert!(calculate_sip(&input(dec!(100), dec!(-2), dec!(10))).is_err());
    }

    #[test]
    fn test_huge_contribution_is_overflow_not_panic() {
        let err = calculate_sip(&SipInput {
            monthly_investment: Decimal::MAX,
            expected_return: dec!(12),
            years: dec!(1),
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }
}
