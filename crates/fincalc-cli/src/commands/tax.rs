use clap::Args;
use rust_decimal::Decimal;

use fincalc_core::tax::deductions::DeductionClaim;
use fincalc_core::tax::income_tax::{self, IncomeTaxInput};
use fincalc_core::tax::slabs::TaxRegime;

use super::{load_input, missing, CommandResult};
use crate::input;

/// Arguments for the slab-based income tax estimate
#[derive(Args)]
pub struct TaxArgs {
    /// Gross annual income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Deduction claim as CODE=AMOUNT (repeatable, e.g. --deduction 80C=150000)
    #[arg(long = "deduction", value_parser = parse_claim)]
    pub deductions: Vec<DeductionClaim>,

    /// JSON/YAML file with a custom regime (slabs, cess_rate, deductions)
    #[arg(long)]
    pub regime: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_claim(s: &str) -> Result<DeductionClaim, String> {
    let (code, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected CODE=AMOUNT, got '{s}'"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("Invalid amount in '{s}': {e}"))?;
    Ok(DeductionClaim {
        code: code.trim().to_string(),
        amount,
    })
}

pub fn run_tax(args: TaxArgs) -> CommandResult {
    let any = args.income.is_some() || !args.deductions.is_empty();
    let mut tax_input: IncomeTaxInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(IncomeTaxInput {
                annual_income: args.income.ok_or_else(|| missing("income"))?,
                deductions: args.deductions.clone(),
                regime: None,
            })
        },
        "income tax",
    )?;
    if let Some(ref path) = args.regime {
        let regime: TaxRegime = input::file::read_input(path)?;
        tax_input.regime = Some(regime);
    }
    let result = income_tax::calculate_income_tax(&tax_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_claim() {
        let claim = parse_claim("80C=150000").unwrap();
        assert_eq!(claim.code, "80C");
        assert_eq!(claim.amount, dec!(150000));
        assert_eq!(parse_claim(" 80d = 25000.50 ").unwrap().amount, dec!(25000.50));
    }

    #[test]
    fn test_parse_claim_errors() {
        assert!(parse_claim("80C").is_err());
        assert!(parse_claim("80C=lots").is_err());
    }
}
