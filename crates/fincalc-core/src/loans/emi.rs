use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{accumulate, amortizing_payment, scale};
use crate::types::{
    monthly_rate, require_non_negative, require_positive, whole_months, with_metadata,
    ComputationOutput, Money, Percent, Years,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for an equated-monthly-installment (loan payment) calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent. 0 is a valid interest-free loan.
    pub annual_rate: Percent,
    /// Loan tenure in years; `years * 12` must be a whole number of months.
    pub tenure_years: Years,
    /// Include a month-by-month amortization schedule in the output.
    #[serde(default)]
    pub include_schedule: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub emi: Money,
    pub months: u32,
    pub total_amount: Money,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub schedule: Vec<AmortizationRow>,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub emi: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// EMI = P * r * (1+r)^m / ((1+r)^m - 1) with r = R/1200 and m = 12T.
///
/// An interest-free loan (R = 0) pays P / m every month.
pub fn calculate_emi(input: &EmiInput) -> CalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    require_positive("principal", input.principal)?;
    require_non_negative("annual_rate", input.annual_rate)?;
    let months = whole_months("tenure_years", input.tenure_years)?;

    let r = monthly_rate(input.annual_rate);
    if r.is_zero() {
        log::warn!("EMI requested at 0% interest; using straight-line repayment");
        warnings.push("Zero interest rate: EMI is principal / months with no interest".into());
    }

    let emi = amortizing_payment(input.principal, r, months)?;
    let total_amount = scale(emi, Decimal::from(months), "EMI total")?;
    let total_interest = total_amount - input.principal;

    let schedule = if input.include_schedule {
        build_schedule(input.principal, r, emi, months)?
    } else {
        Vec::new()
    };

    log::debug!(
        "emi: P={} R={} m={} -> emi={}",
        input.principal,
        input.annual_rate,
        months,
        emi
    );

    let output = EmiOutput {
        emi,
        months,
        total_amount,
        total_interest,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equated Monthly Installment (reducing balance)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "tenure_years": input.tenure_years.to_string(),
            "monthly_rate": r.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Reducing-balance schedule. The last row pays off whatever balance is
/// left so the loan closes at exactly zero.
fn build_schedule(
    principal: Money,
    r: Decimal,
    emi: Money,
    months: u32,
) -> CalcResult<Vec<AmortizationRow>> {
    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = principal;

    for month in 1..=months {
        let opening = balance;
        let interest = scale(opening, r, "schedule interest")?;
        let (payment, principal_part) = if month == months {
            (accumulate(opening, interest, "final payment")?, opening)
        } else {
            (emi, emi - interest)
        };
        balance = opening - principal_part;

        rows.push(AmortizationRow {
            month,
            opening_balance: opening,
            emi: payment,
            interest,
            principal: principal_part,
            closing_balance: balance,
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
