//! Growth and annuity factors shared by the calculators.
//!
//! Every annuity-style helper carries its own zero-rate branch so that a
//! 0% rate produces the zero-growth closed form instead of dividing by zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::CalcError;
use crate::types::{Money, Rate};
use crate::CalcResult;

fn overflow(context: &str) -> CalcError {
    CalcError::Overflow {
        context: context.to_string(),
    }
}

/// base^n by repeated squaring: O(log n) multiplications, so a daily or
/// custom frequency over a long horizon stays cheap. The square is only
/// taken while exponent bits remain, so it never overflows ahead of the
/// result for a base >= 1.
fn integer_power(base: Decimal, mut n: u64) -> CalcResult<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    while n > 0 {
        if n & 1 == 1 {
            result = result
                .checked_mul(square)
                .ok_or_else(|| overflow("growth factor"))?;
        }
        n >>= 1;
        if n > 0 {
            square = square
                .checked_mul(square)
                .ok_or_else(|| overflow("growth factor"))?;
        }
    }
    Ok(result)
}

/// Compute (1 + r)^n with exact integer powers (avoids Decimal::powd drift).
pub fn growth_factor(rate: Rate, n: u64) -> CalcResult<Decimal> {
    integer_power(accumulate(Decimal::ONE, rate, "growth factor")?, n)
}

/// base^exponent. Whole exponents go through `growth_factor`; fractional
/// ones through exp(exponent * ln(base)).
pub fn growth_power(base: Decimal, exponent: Decimal) -> CalcResult<Decimal> {
    if exponent >= Decimal::ZERO && exponent.fract().is_zero() {
        let n = exponent
            .to_u64()
            .ok_or_else(|| overflow("growth exponent"))?;
        return integer_power(base, n);
    }
    base.checked_powd(exponent)
        .ok_or_else(|| overflow("fractional growth power"))
}

/// amount * factor, refusing to overflow.
pub fn scale(amount: Money, factor: Decimal, context: &str) -> CalcResult<Money> {
    amount.checked_mul(factor).ok_or_else(|| overflow(context))
}

/// total + amount, refusing to overflow.
pub fn accumulate(total: Money, amount: Money, context: &str) -> CalcResult<Money> {
    total.checked_add(amount).ok_or_else(|| overflow(context))
}

/// numerator / denominator. A zero denominator is `DivisionByZero`, a
/// quotient too large to represent is `Overflow`.
pub fn ratio(numerator: Decimal, denominator: Decimal, context: &str) -> CalcResult<Decimal> {
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow(context))
}

/// Future value of 1 paid at the start of each of `n` periods:
/// ((1+r)^n - 1) / r * (1+r). Zero rate: n.
pub fn annuity_due_fv_factor(rate: Rate, n: u32) -> CalcResult<Decimal> {
    if rate.is_zero() {
        return Ok(Decimal::from(n));
    }
    let compound = growth_factor(rate, u64::from(n))?;
    let ordinary = ratio(compound - Decimal::ONE, rate, "annuity-due factor")?;
    scale(ordinary, Decimal::ONE + rate, "annuity-due factor")
}

/// Level payment that amortises `principal` over `n` periods:
/// P * r * (1+r)^n / ((1+r)^n - 1). Zero rate: P / n.
pub fn amortizing_payment(principal: Money, rate: Rate, n: u32) -> CalcResult<Money> {
    if n == 0 {
        return Err(CalcError::DivisionByZero {
            context: "payment over zero periods".into(),
        });
    }
    if rate.is_zero() {
        return Ok(principal / Decimal::from(n));
    }
    let compound = growth_factor(rate, u64::from(n))?;
    let denom = compound - Decimal::ONE;
    if denom.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "amortizing payment annuity factor".into(),
        });
    }
    let interest = scale(principal, rate, "amortizing payment")?;
    let numerator = scale(interest, compound, "amortizing payment")?;
    ratio(numerator, denom, "amortizing payment")
}

/// Payment per period needed to accumulate `target` after `n` periods.
/// `due` selects start-of-period deposits (annuity due). Zero rate: FV / n.
pub fn sinking_fund_payment(target: Money, rate: Rate, n: u32, due: bool) -> CalcResult<Money> {
    if n == 0 {
        return Err(CalcError::DivisionByZero {
            context: "sinking fund over zero periods".into(),
        });
    }
    if rate.is_zero() {
        return Ok(target / Decimal::from(n));
    }
    let compound = growth_factor(rate, u64::from(n))?;
    let mut denom = compound - Decimal::ONE;
    if due {
        denom = scale(denom, Decimal::ONE + rate, "sinking fund annuity factor")?;
    }
    if denom.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "sinking fund annuity factor".into(),
        });
    }
    let numerator = scale(target, rate, "sinking fund payment")?;
    ratio(numerator, denom, "sinking fund payment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_approx(actual: Decimal, expected: Decimal, tolerance: Decimal, label: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tolerance,
            "{label}: expected ~{expected}, got {actual} (diff={diff}, tol={tolerance})"
        );
    }

    #[test]
    fn test_growth_factor_basic() {
        assert_eq!(growth_factor(dec!(0.10), 2).unwrap(), dec!(1.21));
        assert_eq!(growth_factor(dec!(0.10), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_growth_factor_overflow_is_an_error() {
        let err = growth_factor(dec!(10), 100).unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }

    #[test]
    fn test_growth_factor_large_exponent() {
        // 1.01^1000 = 20959.1556378136...
        assert_approx(
            growth_factor(dec!(0.01), 1000).unwrap(),
            dec!(20959.1556378137),
            dec!(0.000001),
            "1.01^1000",
        );
        // Exponent bits are walked, not counted one by one.
        assert_eq!(growth_factor(Decimal::ZERO, u64::MAX).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_ratio_guards() {
        assert_eq!(ratio(dec!(10), dec!(4), "ratio").unwrap(), dec!(2.5));
        assert!(matches!(
            ratio(dec!(1), Decimal::ZERO, "ratio"),
            Err(CalcError::DivisionByZero { .. })
        ));
        assert!(matches!(
            ratio(Decimal::MAX, dec!(0.5), "ratio"),
            Err(CalcError::Overflow { .. })
        ));
        assert!(matches!(
            accumulate(Decimal::MAX, Decimal::ONE, "sum"),
            Err(CalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_amortizing_payment_overflow_is_an_error() {
        let err = amortizing_payment(Decimal::MAX, dec!(2), 12).unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }

    #[test]
    fn test_growth_power_fractional() {
        // 1.21^0.5 = 1.1
        assert_approx(
            growth_power(dec!(1.21), dec!(0.5)).unwrap(),
            dec!(1.1),
            dec!(0.00001),
            "sqrt",
        );
        assert_eq!(growth_power(dec!(1.1), dec!(3)).unwrap(), dec!(1.331));
    }

    #[test]
    fn test_annuity_due_factor_zero_rate() {
        assert_eq!(annuity_due_fv_factor(Decimal::ZERO, 24).unwrap(), dec!(24));
    }

    #[test]
    fn test_annuity_due_factor_one_period() {
        // One deposit at the start of the period earns one period of interest.
        assert_eq!(annuity_due_fv_factor(dec!(0.01), 1).unwrap(), dec!(1.01));
    }

    #[test]
    fn test_amortizing_payment_zero_rate() {
        assert_eq!(
            amortizing_payment(dec!(12000), Decimal::ZERO, 12).unwrap(),
            dec!(1000)
        );
    }

    #[test]
    fn test_amortizing_payment_zero_periods() {
        assert!(matches!(
            amortizing_payment(dec!(100), dec!(0.01), 0),
            Err(CalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_sinking_fund_due_vs_ordinary() {
        let ordinary = sinking_fund_payment(dec!(100000), dec!(0.01), 12, false).unwrap();
        let due = sinking_fund_payment(dec!(100000), dec!(0.01), 12, true).unwrap();
        // Start-of-month deposits earn an extra month, so they can be smaller.
        assert!(due < ordinary);
        assert_approx(due * dec!(1.01), ordinary, dec!(0.0000001), "due*(1+r)");
    }
}
