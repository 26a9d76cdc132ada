//! Progressive tax brackets as data.
//!
//! A regime is an ordered list of slabs, each taxing only the slice of
//! income between the previous slab's upper bound and its own.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::tax::deductions::DeductionCategory;
use crate::time_value::{accumulate, scale};
use crate::types::{percent_to_rate, Money, Percent};
use crate::CalcResult;

/// One bracket. `up_to: None` marks the open-ended top slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub up_to: Option<Money>,
    pub rate: Percent,
}

/// Tax attributed to one bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabTax {
    pub from: Money,
    pub up_to: Option<Money>,
    pub rate: Percent,
    pub taxable_in_band: Money,
    pub tax: Money,
}

/// A complete tax regime: brackets, cess and the deductions it allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRegime {
    pub name: String,
    pub slabs: Vec<TaxSlab>,
    /// Levy on computed tax, in percent.
    #[serde(default)]
    pub cess_rate: Percent,
    #[serde(default)]
    pub deductions: Vec<DeductionCategory>,
}

impl TaxRegime {
    /// India, old regime: 0 / 5 / 20 / 30% slabs, 4% health and education cess.
    pub fn india_old_regime() -> Self {
        TaxRegime {
            name: "India old regime".into(),
            slabs: vec![
                TaxSlab {
                    up_to: Some(dec!(250000)),
                    rate: Decimal::ZERO,
                },
                TaxSlab {
                    up_to: Some(dec!(500000)),
                    rate: dec!(5),
                },
                TaxSlab {
                    up_to: Some(dec!(1000000)),
                    rate: dec!(20),
                },
                TaxSlab {
                    up_to: None,
                    rate: dec!(30),
                },
            ],
            cess_rate: dec!(4),
            deductions: vec![
                DeductionCategory::capped(
                    "80C",
                    "Investments (PPF, ELSS, life insurance)",
                    dec!(150000),
                ),
                DeductionCategory::capped("80D", "Medical insurance premium", dec!(50000)),
                DeductionCategory::uncapped("80E", "Interest on education loan"),
                DeductionCategory::capped("80TTA", "Savings account interest", dec!(10000)),
                DeductionCategory::uncapped("80G", "Charitable donations"),
            ],
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        validate_slabs(&self.slabs)?;
        if self.cess_rate < Decimal::ZERO || self.cess_rate > Decimal::ONE_HUNDRED {
            return Err(CalcError::invalid(
                "regime.cess_rate",
                "cess rate must be between 0 and 100 percent",
            ));
        }
        for category in &self.deductions {
            if matches!(category.cap, Some(cap) if cap < Decimal::ZERO) {
                return Err(CalcError::invalid(
                    "regime.deductions",
                    format!("cap for {} must not be negative", category.code),
                ));
            }
        }
        Ok(())
    }
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self::india_old_regime()
    }
}

/// Check ordering and bounds of a slab table.
pub fn validate_slabs(slabs: &[TaxSlab]) -> CalcResult<()> {
    if slabs.is_empty() {
        return Err(CalcError::invalid("regime.slabs", "at least one slab is required"));
    }

    let mut previous = Decimal::ZERO;
    for (i, slab) in slabs.iter().enumerate() {
        if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE_HUNDRED {
            return Err(CalcError::invalid(
                "regime.slabs",
                format!("slab {i}: rate {} is outside 0..=100", slab.rate),
            ));
        }
        let is_last = i == slabs.len() - 1;
        match slab.up_to {
            Some(bound) if is_last => {
                return Err(CalcError::invalid(
                    "regime.slabs",
                    format!("last slab must be open-ended, found upper bound {bound}"),
                ))
            }
            Some(bound) if bound <= previous => {
                return Err(CalcError::invalid(
                    "regime.slabs",
                    format!("slab {i}: upper bound {bound} must exceed {previous}"),
                ))
            }
            Some(bound) => previous = bound,
            None if !is_last => {
                return Err(CalcError::invalid(
                    "regime.slabs",
                    format!("slab {i}: only the last slab may be open-ended"),
                ))
            }
            None => {}
        }
    }
    Ok(())
}

/// Walk the brackets and tax each slice of `income` at its own rate.
/// Assumes `validate_slabs` has passed.
pub fn apply_slabs(income: Money, slabs: &[TaxSlab]) -> CalcResult<(Money, Vec<SlabTax>)> {
    let mut total = Decimal::ZERO;
    let mut breakdown = Vec::with_capacity(slabs.len());
    let mut lower = Decimal::ZERO;

    for slab in slabs {
        let upper = slab.up_to.map_or(income, |bound| bound.min(income));
        let in_band = (upper - lower).max(Decimal::ZERO);
        let tax = scale(in_band, percent_to_rate(slab.rate), "slab tax")?;
        total = accumulate(total, tax, "slab tax total")?;

        breakdown.push(SlabTax {
            from: lower,
            up_to: slab.up_to,
            rate: slab.rate,
            taxable_in_band: in_band,
            tax,
        });

        match slab.up_to {
            Some(bound) => lower = bound,
            None => break,
        }
    }

    Ok((total, breakdown))
}
