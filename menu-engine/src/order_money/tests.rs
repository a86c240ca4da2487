use super::*;

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    assert_ne!(a + b, 0.3);

    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_non_finite_defaults_to_zero() {
    assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
}

#[test]
fn test_rounding_half_up() {
    assert_eq!(round_money(Decimal::new(5, 3)), Decimal::new(1, 2)); // 0.005 -> 0.01
    assert_eq!(round_money(Decimal::new(4, 3)), Decimal::ZERO); // 0.004 -> 0.00
}

#[test]
fn test_unit_price_base_only() {
    let price = unit_price(Some(100.0), None, &[]).unwrap();
    assert_eq!(to_f64(price), 100.0);
}

#[test]
fn test_unit_price_size_overrides_base() {
    let large = PricedOption::new("Large", 350.0);
    let price = unit_price(Some(250.0), Some(&large), &[]).unwrap();
    assert_eq!(to_f64(price), 350.0);
}

#[test]
fn test_unit_price_with_addons() {
    let addons = vec![
        PricedOption::new("Extra Cheese", 30.0),
        PricedOption::new("Jalapeno", 19.99),
    ];
    let price = unit_price(Some(100.0), None, &addons).unwrap();
    assert_eq!(to_f64(price), 149.99);
}

#[test]
fn test_unit_price_without_any_price() {
    assert!(unit_price(None, None, &[]).is_none());
    let addons = vec![PricedOption::new("Extra Cheese", 30.0)];
    assert!(unit_price(None, None, &addons).is_none());
}

#[test]
fn test_line_total() {
    assert_eq!(to_f64(line_total(10.99, 3)), 32.97);
    assert_eq!(to_f64(line_total(0.1, 3)), 0.3);
}

#[test]
fn test_order_amounts_five_percent() {
    let amounts = order_amounts(Decimal::from(200), DEFAULT_TAX_RATE_PERCENT);
    assert_eq!(to_f64(amounts.subtotal), 200.0);
    assert_eq!(to_f64(amounts.tax), 10.0);
    assert_eq!(to_f64(amounts.total), 210.0);
}

#[test]
fn test_order_amounts_fractional_tax() {
    let amounts = order_amounts(Decimal::from(430), DEFAULT_TAX_RATE_PERCENT);
    assert_eq!(to_f64(amounts.tax), 21.5);
    assert_eq!(to_f64(amounts.total), 451.5);

    // 5% of 0.30 = 0.015 -> rounds half up to 0.02
    let amounts = order_amounts(to_decimal(0.3), DEFAULT_TAX_RATE_PERCENT);
    assert_eq!(to_f64(amounts.tax), 0.02);
    assert_eq!(to_f64(amounts.total), 0.32);
}

#[test]
fn test_order_amounts_zero_rate() {
    let amounts = order_amounts(Decimal::from(99), Decimal::ZERO);
    assert_eq!(amounts.tax, Decimal::ZERO);
    assert_eq!(amounts.total, amounts.subtotal);
}

#[test]
fn test_money_eq() {
    assert!(money_eq(100.0, 100.0));
    assert!(money_eq(100.004, 100.006));
    assert!(!money_eq(100.0, 100.02));
}
