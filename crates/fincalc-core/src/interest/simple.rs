use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{accumulate, scale};
use crate::types::{
    percent_to_rate, require_positive, require_years, with_metadata, ComputationOutput, Money,
    Percent, Years,
};
use crate::CalcResult;

/// Input for a simple-interest calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub principal: Money,
    /// Annual rate in percent (8 = 8%).
    pub annual_rate: Percent,
    pub years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestOutput {
    pub interest: Money,
    pub total_amount: Money,
}

/// Simple interest: I = P * R * T / 100, total = P + I.
pub fn calculate_simple_interest(
    input: &SimpleInterestInput,
) -> CalcResult<ComputationOutput<SimpleInterestOutput>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_positive("annual_rate", input.annual_rate)?;
    require_years("years", input.years)?;

    let per_year = scale(
        input.principal,
        percent_to_rate(input.annual_rate),
        "simple interest",
    )?;
    let interest = scale(per_year, input.years, "simple interest")?;
    let output = SimpleInterestOutput {
        interest,
        total_amount: accumulate(input.principal, interest, "simple interest total")?,
    };
    log::debug!(
        "simple interest: P={} R={} T={} -> I={}",
        input.principal,
        input.annual_rate,
        input.years,
        interest
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple Interest (P x R x T / 100)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "years": input.years.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn input(p: Decimal, r: Decimal, t: Decimal) -> SimpleInterestInput {
        SimpleInterestInput {
            principal: p,
            annual_rate: r,
            years: t,
        }
    }

    #[test]
    fn test_basic_simple_interest() {
        let out = calculate_simple_interest(&input(dec!(10000), dec!(8), dec!(3))).unwrap();
        assert_eq!(
            out.result,
            SimpleInterestOutput {
                interest: dec!(2400),
                total_amount: dec!(12400),
            }
        );
    }

    #[test]
    fn test_total_is_principal_plus_interest() {
        for (p, r, t) in [
            (dec!(1), dec!(0.5), dec!(0.25)),
            (dec!(250000), dec!(7.25), dec!(4.5)),
            (dec!(99.99), dec!(18), dec!(30)),
        ] {
            let out = calculate_simple_interest(&input(p, r, t)).unwrap().result;
            assert_eq!(out.total_amount, p + p * r * t / dec!(100));
            assert!(out.total_amount > p);
        }
    }

    #[test]
    fn test_fractional_years() {
        let out = calculate_simple_interest(&input(dec!(1000), dec!(10), dec!(0.5))).unwrap();
        assert_eq!(out.result.interest, dec!(50));
    }

    #[test]
    fn test_rejects_zero_and_negative_inputs() {
        let cases = [
            (Decimal::ZERO, dec!(8), dec!(1), "principal"),
            (dec!(100), Decimal::ZERO, dec!(1), "annual_rate"),
            (dec!(100), dec!(8), dec!(-1), "years"),
            (dec!(-100), dec!(8), dec!(1), "principal"),
        ];
        for (p, r, t, expected_field) in cases {
            match calculate_simple_interest(&input(p, r, t)) {
                Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected InvalidInput for {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_huge_principal_is_overflow_not_panic() {
        let err = calculate_simple_interest(&input(
            dec!(1_000_000_000_000_000_000_000_000_000),
            dec!(1000),
            dec!(100),
        ))
        .unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }
}
