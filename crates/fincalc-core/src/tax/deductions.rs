use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::time_value::accumulate;
use crate::types::Money;
use crate::CalcResult;

/// A deduction section and its statutory cap (`None` = uncapped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionCategory {
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub cap: Option<Money>,
}

impl DeductionCategory {
    pub fn capped(code: &str, description: &str, cap: Money) -> Self {
        DeductionCategory {
            code: code.to_string(),
            description: description.to_string(),
            cap: Some(cap),
        }
    }

    pub fn uncapped(code: &str, description: &str) -> Self {
        DeductionCategory {
            code: code.to_string(),
            description: description.to_string(),
            cap: None,
        }
    }

    /// min(amount, cap)
    pub fn clamp(&self, amount: Money) -> Money {
        match self.cap {
            Some(cap) => amount.min(cap),
            None => amount,
        }
    }

    fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

/// An amount the user entered against a deduction section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionClaim {
    pub code: String,
    pub amount: Money,
}

impl DeductionClaim {
    /// Build a claim already clamped to the category cap, the way a form
    /// field refuses to hold more than the section allows.
    pub fn clamped(category: &DeductionCategory, amount: Money) -> Self {
        DeductionClaim {
            code: category.code.clone(),
            amount: category.clamp(amount),
        }
    }
}

/// What was allowed for one category after capping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDeduction {
    pub code: String,
    pub claimed: Money,
    pub allowed: Money,
    pub cap: Option<Money>,
}

/// Sum claims per category, clamp each category to its cap and total them.
///
/// Returns the total, one entry per category that had a claim (in the
/// regime's category order), and pushes a warning for every clamp.
pub fn apply_deductions(
    claims: &[DeductionClaim],
    categories: &[DeductionCategory],
    warnings: &mut Vec<String>,
) -> CalcResult<(Money, Vec<AppliedDeduction>)> {
    let mut claimed = vec![Decimal::ZERO; categories.len()];
    let mut seen = vec![false; categories.len()];

    for claim in claims {
        if claim.amount < Decimal::ZERO {
            return Err(CalcError::invalid(
                "deductions",
                format!("amount for {} must not be negative", claim.code),
            ));
        }
        let idx = categories
            .iter()
            .position(|c| c.matches(&claim.code))
            .ok_or_else(|| {
                let known: Vec<&str> = categories.iter().map(|c| c.code.as_str()).collect();
                CalcError::invalid(
                    "deductions",
                    format!(
                        "unknown deduction '{}'; this regime allows: {}",
                        claim.code,
                        known.join(", ")
                    ),
                )
            })?;
        claimed[idx] = accumulate(claimed[idx], claim.amount, "deduction claims")?;
        seen[idx] = true;
    }

    let mut total = Decimal::ZERO;
    let mut applied = Vec::new();
    for (i, category) in categories.iter().enumerate() {
        if !seen[i] {
            continue;
        }
        let allowed = category.clamp(claimed[i]);
        if allowed < claimed[i] {
            log::warn!(
                "deduction {} capped: claimed {}, allowed {}",
                category.code,
                claimed[i],
                allowed
            );
            warnings.push(format!(
                "{} claim of {} capped at {}",
                category.code, claimed[i], allowed
            ));
        }
        total = accumulate(total, allowed, "total deduction")?;
        applied.push(AppliedDeduction {
            code: category.code.clone(),
            claimed: claimed[i],
            allowed,
            cap: category.cap,
        });
    }

    Ok((total, applied))
}
