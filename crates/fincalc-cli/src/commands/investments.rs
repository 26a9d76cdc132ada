use clap::Args;
use rust_decimal::Decimal;

use fincalc_core::interest::compound::CompoundingFrequency;
use fincalc_core::investments::deposits::{self, FixedDepositInput, RecurringDepositInput};
use fincalc_core::investments::lumpsum::{self, LumpsumInput};
use fincalc_core::investments::sip::{self, SipInput};

use super::{load_input, missing, CommandResult};

/// Arguments for a monthly SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Amount invested at the start of each month
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a one-time (lumpsum) investment
#[derive(Args)]
pub struct LumpsumArgs {
    /// Amount invested up front
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Compounding frequency: annually, semi-annually, quarterly, monthly, daily, or an integer
    #[arg(long, default_value = "annually")]
    pub frequency: CompoundingFrequency,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a fixed deposit
#[derive(Args)]
pub struct FdArgs {
    /// Amount deposited
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a recurring deposit
#[derive(Args)]
pub struct RdArgs {
    /// Amount deposited every month
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years (whole number of months)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> CommandResult {
    let any = args.monthly.is_some() || args.rate.is_some() || args.years.is_some();
    let sip_input: SipInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(SipInput {
                monthly_investment: args.monthly.ok_or_else(|| missing("monthly"))?,
                expected_return: args.rate.ok_or_else(|| missing("rate"))?,
                years: args.years.ok_or_else(|| missing("years"))?,
            })
        },
        "SIP",
    )?;
    let result = sip::calculate_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_lumpsum(args: LumpsumArgs) -> CommandResult {
    let any = args.amount.is_some() || args.rate.is_some() || args.years.is_some();
    let ls_input: LumpsumInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(LumpsumInput {
                investment: args.amount.ok_or_else(|| missing("amount"))?,
                expected_return: args.rate.ok_or_else(|| missing("rate"))?,
                years: args.years.ok_or_else(|| missing("years"))?,
                periods_per_year: args.frequency.periods_per_year(),
            })
        },
        "lumpsum",
    )?;
    let result = lumpsum::calculate_lumpsum(&ls_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fd(args: FdArgs) -> CommandResult {
    let any = args.deposit.is_some() || args.rate.is_some() || args.years.is_some();
    let fd_input: FixedDepositInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(FixedDepositInput {
                deposit: args.deposit.ok_or_else(|| missing("deposit"))?,
                annual_rate: args.rate.ok_or_else(|| missing("rate"))?,
                years: args.years.ok_or_else(|| missing("years"))?,
            })
        },
        "fixed deposit",
    )?;
    let result = deposits::calculate_fixed_deposit(&fd_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rd(args: RdArgs) -> CommandResult {
    let any = args.monthly.is_some() || args.rate.is_some() || args.years.is_some();
    let rd_input: RecurringDepositInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(RecurringDepositInput {
                monthly_deposit: args.monthly.ok_or_else(|| missing("monthly"))?,
                annual_rate: args.rate.ok_or_else(|| missing("rate"))?,
                years: args.years.ok_or_else(|| missing("years"))?,
            })
        },
        "recurring deposit",
    )?;
    let result = deposits::calculate_recurring_deposit(&rd_input)?;
    Ok(serde_json::to_value(result)?)
}
