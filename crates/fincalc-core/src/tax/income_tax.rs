use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::tax::deductions::{apply_deductions, AppliedDeduction, DeductionClaim};
use crate::tax::slabs::{apply_slabs, SlabTax, TaxRegime};
use crate::time_value::{accumulate, ratio, scale};
use crate::types::{
    percent_to_rate, require_positive, with_metadata, ComputationOutput, Money, Percent,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for an annual income-tax estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    pub annual_income: Money,
    #[serde(default)]
    pub deductions: Vec<DeductionClaim>,
    /// Slabs, cess and deduction caps. Defaults to the India old regime.
    #[serde(default)]
    pub regime: Option<TaxRegime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxOutput {
    pub regime: String,
    pub taxable_income: Money,
    pub total_deduction: Money,
    pub tax_before_cess: Money,
    pub cess: Money,
    /// Final liability: tax_before_cess + cess.
    pub tax: Money,
    /// tax / annual_income, in percent.
    pub effective_rate: Percent,
    pub deductions_applied: Vec<AppliedDeduction>,
    pub slab_breakdown: Vec<SlabTax>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Slab-based income tax with capped deductions and a cess on top.
///
/// 1. Clamp each deduction category to its cap and total them.
/// 2. taxable = max(0, income - deductions).
/// 3. Walk the progressive slabs.
/// 4. cess = tax * cess_rate; final = tax + cess.
pub fn calculate_income_tax(
    input: &IncomeTaxInput,
) -> CalcResult<ComputationOutput<IncomeTaxOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("annual_income", input.annual_income)?;
    let default_regime;
    let regime = match &input.regime {
        Some(regime) => regime,
        None => {
            default_regime = TaxRegime::default();
            &default_regime
        }
    };
    regime.validate()?;

    let (total_deduction, deductions_applied) =
        apply_deductions(&input.deductions, &regime.deductions, &mut warnings)?;

    let taxable_income = (input.annual_income - total_deduction).max(Decimal::ZERO);
    if taxable_income.is_zero() {
        warnings.push("Deductions exceed income: nothing left to tax".into());
    }

    let (tax_before_cess, slab_breakdown) = apply_slabs(taxable_income, &regime.slabs)?;
    let cess = scale(tax_before_cess, percent_to_rate(regime.cess_rate), "cess")?;
    let tax = accumulate(tax_before_cess, cess, "tax with cess")?;
    let effective_rate = scale(
        ratio(tax, input.annual_income, "effective rate")?,
        Decimal::ONE_HUNDRED,
        "effective rate",
    )?;

    log::debug!(
        "income tax ({}): income={} deductions={} taxable={} tax={}",
        regime.name,
        input.annual_income,
        total_deduction,
        taxable_income,
        tax
    );

    let output = IncomeTaxOutput {
        regime: regime.name.clone(),
        taxable_income,
        total_deduction,
        tax_before_cess,
        cess,
        tax,
        effective_rate,
        deductions_applied,
        slab_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Progressive Slab Income Tax with Capped Deductions and Cess",
        &serde_json::json!({
            "annual_income": input.annual_income.to_string(),
            "regime": regime.name,
            "slab_count": regime.slabs.len(),
            "cess_rate_pct": regime.cess_rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
