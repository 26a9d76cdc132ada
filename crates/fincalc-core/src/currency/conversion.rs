//! Currency conversion against a rate snapshot supplied by the caller.
//!
//! Fetching the snapshot is the embedder's job; nothing here does I/O.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{ratio, scale};
use crate::types::{require_positive, with_metadata, ComputationOutput, Money};
use crate::CalcResult;

/// Snapshots older than this (relative to the conversion date) get a warning.
pub const STALE_AFTER_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Rate table
// ---------------------------------------------------------------------------

/// Units of each currency per one unit of `base`, e.g. base USD with
/// `INR -> 83.2`, `EUR -> 0.92`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, Decimal>,
    /// Date the snapshot was published, if known.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl RateTable {
    pub fn new(base: &str) -> Self {
        RateTable {
            base: normalize(base),
            rates: BTreeMap::new(),
            as_of: None,
        }
    }

    pub fn with_rate(mut self, code: &str, rate: Decimal) -> Self {
        self.rates.insert(normalize(code), rate);
        self
    }

    /// Rate for `code`, case-insensitive.
    ///
    /// The base currency is 1 by definition when the table leaves it out;
    /// any other gap is an error rather than a silent 1.0.
    pub fn rate(&self, code: &str) -> CalcResult<Decimal> {
        let code = normalize(code);
        let rate = match self
            .rates
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(&code))
        {
            Some((_, rate)) => *rate,
            None if code == normalize(&self.base) => Decimal::ONE,
            None => return Err(CalcError::MissingRate { currency: code }),
        };
        if rate <= Decimal::ZERO {
            return Err(CalcError::invalid(
                "rates",
                format!("rate for {code} must be positive, got {rate}"),
            ));
        }
        Ok(rate)
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Units of `to` per one unit of `from`: rates[to] / rates[from].
pub fn cross_rate(table: &RateTable, from: &str, to: &str) -> CalcResult<Decimal> {
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;
    ratio(to_rate, from_rate, "cross rate")
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionInput {
    pub amount: Money,
    pub from: String,
    pub to: String,
    pub rates: RateTable,
    /// Date of the conversion, used only to flag stale snapshots.
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub from: String,
    pub to: String,
    pub amount: Money,
    pub amount_in_base: Money,
    pub converted: Money,
    /// Units of `to` per one `from`.
    pub rate: Decimal,
}

/// amount_in_base = amount / rates[from]; converted = amount_in_base * rates[to].
pub fn convert_currency(
    input: &ConversionInput,
) -> CalcResult<ComputationOutput<ConversionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = convert_one(&input.rates, input.amount, &input.from, &input.to)?;
    check_staleness(&input.rates, input.on, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Currency Conversion via Base-Currency Cross Rate",
        &serde_json::json!({
            "base": input.rates.base,
            "as_of": input.rates.as_of,
            "from": output.from,
            "to": output.to,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Input for converting one amount into several currencies at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiConversionInput {
    pub amount: Money,
    pub from: String,
    pub targets: Vec<String>,
    pub rates: RateTable,
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiConversionOutput {
    pub conversions: Vec<ConversionOutput>,
}

/// Convert `amount` into every target currency. Fails on the first target
/// the table cannot price.
pub fn convert_many(
    input: &MultiConversionInput,
) -> CalcResult<ComputationOutput<MultiConversionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.targets.is_empty() {
        return Err(CalcError::invalid("targets", "at least one target currency is required"));
    }

    let conversions = input
        .targets
        .iter()
        .map(|to| convert_one(&input.rates, input.amount, &input.from, to))
        .collect::<CalcResult<Vec<_>>>()?;
    check_staleness(&input.rates, input.on, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Currency Conversion via Base-Currency Cross Rate",
        &serde_json::json!({
            "base": input.rates.base,
            "as_of": input.rates.as_of,
            "from": normalize(&input.from),
            "targets": input.targets.len(),
        }),
        warnings,
        elapsed,
        MultiConversionOutput { conversions },
    ))
}

fn convert_one(table: &RateTable, amount: Money, from: &str, to: &str) -> CalcResult<ConversionOutput> {
    require_positive("amount", amount)?;
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;

    let amount_in_base = ratio(amount, from_rate, "amount in base currency")?;
    let converted = scale(amount_in_base, to_rate, "currency conversion")?;
    let rate = ratio(to_rate, from_rate, "cross rate")?;

    log::debug!(
        "convert {} {} -> {} {} (base {})",
        amount,
        normalize(from),
        converted,
        normalize(to),
        table.base
    );

    Ok(ConversionOutput {
        from: normalize(from),
        to: normalize(to),
        amount,
        amount_in_base,
        converted,
        rate,
    })
}

fn check_staleness(table: &RateTable, on: Option<NaiveDate>, warnings: &mut Vec<String>) {
    if let (Some(as_of), Some(on)) = (table.as_of, on) {
        let age = (on - as_of).num_days();
        if age > STALE_AFTER_DAYS {
            log::warn!("exchange rates are {age} days old");
            warnings.push(format!(
                "Exchange rates dated {as_of} are {age} days old"
            ));
        } else if age < 0 {
            warnings.push(format!("Exchange rates dated {as_of} are after {on}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd_table() -> RateTable {
        RateTable::new("usd")
            .with_rate("INR", dec!(83.25))
            .with_rate("EUR", dec!(0.92))
            .with_rate("JPY", dec!(151.7))
    }

    fn input(amount: Decimal, from: &str, to: &str) -> ConversionInput {
        ConversionInput {
            amount,
            from: from.into(),
            to: to.into(),
            rates: usd_table(),
            on: None,
        }
    }

    #[test]
    fn test_base_to_quote() {
        let out = convert_currency(&input(dec!(10), "USD", "INR")).unwrap().result;
        assert_eq!(out.converted, dec!(832.5));
        assert_eq!(out.amount_in_base, dec!(10));
    }

    #[test]
    fn test_cross_via_base() {
        // 92 EUR = 100 USD = 8325 INR
        let out = convert_currency(&input(dec!(92), "eur", "inr")).unwrap().result;
        assert_eq!(out.from, "EUR");
        assert!((out.converted - dec!(8325)).abs() < dec!(0.0000001));
        assert!((out.rate - dec!(83.25) / dec!(0.92)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_round_trip_returns_original_amount() {
        let x = dec!(1234.56);
        let there = convert_currency(&input(x, "EUR", "JPY")).unwrap().result;
        let back = convert_currency(&input(there.converted, "JPY", "EUR"))
            .unwrap()
            .result;
        assert!((back.converted - x).abs() < dec!(0.0000001), "{}", back.converted);
    }

    #[test]
    fn test_missing_currency_is_not_one() {
        let err = convert_currency(&input(dec!(10), "USD", "GBP")).unwrap_err();
        assert!(matches!(err, CalcError::MissingRate { ref currency } if currency == "GBP"));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut inp = input(dec!(10), "USD", "XXX");
        inp.rates = inp.rates.with_rate("XXX", Decimal::ZERO);
        assert!(matches!(
            convert_currency(&inp),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_explicit_base_rate_in_table() {
        let table = usd_table().with_rate("USD", Decimal::ONE);
        assert_eq!(cross_rate(&table, "USD", "EUR").unwrap(), dec!(0.92));
    }

    #[test]
    fn test_stale_snapshot_warns() {
        let mut inp = input(dec!(10), "USD", "EUR");
        inp.rates.as_of = NaiveDate::from_ymd_opt(2024, 1, 1);
        inp.on = NaiveDate::from_ymd_opt(2024, 1, 20);
        let out = convert_currency(&inp).unwrap();
        assert_eq!(out.warnings.len(), 1);

        inp.on = NaiveDate::from_ymd_opt(2024, 1, 3);
        assert!(convert_currency(&inp).unwrap().warnings.is_empty());
    }

    #[test]
    fn test_convert_many() {
        let out = convert_many(&MultiConversionInput {
            amount: dec!(100),
            from: "USD".into(),
            targets: vec!["EUR".into(), "INR".into()],
            rates: usd_table(),
            on: None,
        })
        .unwrap()
        .result;
        assert_eq!(out.conversions.len(), 2);
        assert_eq!(out.conversions[0].converted, dec!(92));
        assert_eq!(out.conversions[1].converted, dec!(8325));
    }

    #[test]
    fn test_rate_table_from_json() {
        let table: RateTable = serde_json::from_str(
            r#"{ "base": "USD", "as_of": "2024-05-01", "rates": { "INR": "83.25" } }"#,
        )
        .unwrap();
        assert_eq!(table.rate("inr").unwrap(), dec!(83.25));
        assert_eq!(table.as_of, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_tiny_source_rate_is_overflow_not_panic() {
        let table = usd_table().with_rate("XXX", dec!(0.0000001));
        let err = convert_currency(&ConversionInput {
            amount: dec!(1_000_000_000_000_000_000_000_000_000),
            from: "XXX".into(),
            to: "USD".into(),
            rates: table.clone(),
            on: None,
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));

        let table = table.with_rate("YYY", Decimal::MAX);
        assert!(matches!(
            cross_rate(&table, "XXX", "YYY"),
            Err(CalcError::Overflow { .. })
        ));
    }
}
