use fincalc_core::currency::conversion::{
    convert_currency, convert_many, cross_rate, ConversionInput, MultiConversionInput, RateTable,
};
use fincalc_core::tax::income_tax::{calculate_income_tax, IncomeTaxInput};
use fincalc_core::CalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Income tax
// ===========================================================================

#[test]
fn test_income_tax_from_json_with_mixed_case_codes() {
    let json = r#"{
        "annual_income": "800000",
        "deductions": [
            { "code": "80c", "amount": "50000" },
            { "code": "80D", "amount": "60000" }
        ]
    }"#;
    let input: IncomeTaxInput = serde_json::from_str(json).unwrap();
    let out = calculate_income_tax(&input).unwrap();
    let tax = &out.result;

    // 80D is capped at 50000, so 100000 is deducted in total.
    assert_eq!(tax.total_deduction, dec!(100000));
    assert_eq!(tax.taxable_income, dec!(700000));
    // 5% of 250000 + 20% of 200000
    assert_eq!(tax.tax_before_cess, dec!(52500));
    assert_eq!(tax.cess, dec!(2100));
    assert_eq!(tax.tax, dec!(54600));
    assert_eq!(out.warnings.len(), 1);

    let banded: Decimal = tax.slab_breakdown.iter().map(|s| s.tax).sum();
    assert_eq!(banded, tax.tax_before_cess);
}

#[test]
fn test_custom_regime_from_json() {
    let json = r#"{
        "annual_income": "100000",
        "regime": {
            "name": "Two band",
            "slabs": [
                { "up_to": "50000", "rate": "0" },
                { "up_to": null, "rate": "10" }
            ],
            "cess_rate": "2"
        }
    }"#;
    let input: IncomeTaxInput = serde_json::from_str(json).unwrap();
    let out = calculate_income_tax(&input).unwrap();

    assert_eq!(out.result.regime, "Two band");
    assert_eq!(out.result.tax_before_cess, dec!(5000));
    assert_eq!(out.result.cess, dec!(100));
    assert_eq!(out.result.tax, dec!(5100));
}

#[test]
fn test_regime_with_unordered_slabs_is_rejected() {
    let json = r#"{
        "annual_income": "100000",
        "regime": {
            "name": "Broken",
            "slabs": [
                { "up_to": "50000", "rate": "5" },
                { "up_to": "40000", "rate": "10" },
                { "up_to": null, "rate": "20" }
            ]
        }
    }"#;
    let input: IncomeTaxInput = serde_json::from_str(json).unwrap();
    let err = calculate_income_tax(&input).unwrap_err();

    assert!(matches!(err, CalcError::InvalidInput { .. }));
}

// ===========================================================================
// Currency
// ===========================================================================

fn snapshot() -> RateTable {
    serde_json::from_str(
        r#"{
            "base": "USD",
            "rates": { "INR": "83", "EUR": "0.92" },
            "as_of": "2024-01-01"
        }"#,
    )
    .unwrap()
}

#[test]
fn test_cross_currency_conversion_goes_through_base() {
    let input = ConversionInput {
        amount: dec!(100),
        from: "eur".into(),
        to: "INR".into(),
        rates: snapshot(),
        on: None,
    };
    let out = convert_currency(&input).unwrap();

    assert_eq!(out.result.from, "EUR");
    assert_eq!(out.result.to, "INR");
    // 100 / 0.92 * 83
    assert!((out.result.converted - dec!(9021.7391304)).abs() < dec!(0.0001));
    assert_eq!(out.result.rate, cross_rate(&snapshot(), "EUR", "INR").unwrap());
    assert!(out.warnings.is_empty());
}

#[test]
fn test_old_snapshot_is_flagged() {
    let input = ConversionInput {
        amount: dec!(10),
        from: "USD".into(),
        to: "INR".into(),
        rates: snapshot(),
        on: chrono::NaiveDate::from_ymd_opt(2024, 1, 9),
    };
    let out = convert_currency(&input).unwrap();

    assert_eq!(out.result.converted, dec!(830));
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_convert_many_includes_base_currency() {
    let input = MultiConversionInput {
        amount: dec!(100),
        from: "USD".into(),
        targets: vec!["INR".into(), "EUR".into(), "usd".into()],
        rates: snapshot(),
        on: None,
    };
    let out = convert_many(&input).unwrap();
    let converted: Vec<Decimal> = out
        .result
        .conversions
        .iter()
        .map(|c| c.converted)
        .collect();

    assert_eq!(converted, vec![dec!(8300), dec!(92), dec!(100)]);
}

#[test]
fn test_unknown_currency_is_missing_rate() {
    let input = ConversionInput {
        amount: dec!(100),
        from: "USD".into(),
        to: "GBP".into(),
        rates: snapshot(),
        on: None,
    };
    match convert_currency(&input) {
        Err(CalcError::MissingRate { currency }) => assert_eq!(currency, "GBP"),
        other => panic!("expected MissingRate, got {other:?}"),
    }
}
