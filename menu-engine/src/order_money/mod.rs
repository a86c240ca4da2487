//! Money calculation utilities using rust_decimal for precision
//!
//! Prices travel as `f64` on the wire and in the cart; every sum, product
//! and tax computation goes through `Decimal` and is rounded back to two
//! decimal places (half away from zero) before it is stored.

use rust_decimal::prelude::*;
use shared::PricedOption;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Default tax rate in percent
pub const DEFAULT_TAX_RATE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Convert f64 to Decimal for calculation
///
/// Input values are validated at the feed boundary. If NaN/Infinity still
/// reaches here, logs an error and returns ZERO.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal out of f64 range, defaulting to zero");
        0.0
    })
}

/// Per-unit price of a selection: chosen size price (or base price) plus add-ons
///
/// Returns `None` when there is neither a size nor a base price.
pub fn unit_price(
    base_price: Option<f64>,
    size: Option<&PricedOption>,
    addons: &[PricedOption],
) -> Option<Decimal> {
    let base = size.map(|s| s.price).or(base_price)?;
    let addons_total: Decimal = addons.iter().map(|a| to_decimal(a.price)).sum();
    Some(round_money(to_decimal(base) + addons_total))
}

/// Line total: unit price × quantity
pub fn line_total(item_total: f64, quantity: i32) -> Decimal {
    round_money(to_decimal(item_total) * Decimal::from(quantity))
}

/// Subtotal, tax and total of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAmounts {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute tax-exclusive order amounts
///
/// Formula: tax = subtotal × rate / 100; total = subtotal + tax
pub fn order_amounts(subtotal: Decimal, tax_rate_percent: Decimal) -> OrderAmounts {
    let subtotal = round_money(subtotal);
    let tax = round_money(subtotal * tax_rate_percent / Decimal::ONE_HUNDRED);
    OrderAmounts {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests;
