//! Money utilities using rust_decimal for precision
//!
//! Prices arrive from the catalog as currency-formatted strings
//! (`"$12.99"`). They are parsed exactly once, here, at the boundary;
//! internal state only ever holds the normalized `f64`. All totals are
//! accumulated as `Decimal` and converted back to `f64` for storage.

use cart_types::{CartError, CartItem, CartResult};
use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price (1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Currency symbols stripped before parsing
const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Derived cart totals
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of unit_price × quantity across all lines
    pub total: f64,
    /// Sum of quantities across all lines
    pub item_count: i32,
}

/// Parse a currency-formatted price string into a normalized price
///
/// Strips currency symbols, thousands separators, and whitespace, then
/// parses through `Decimal`. Rejects empty or garbled input, negative
/// values, and values above [`MAX_PRICE`].
pub fn parse_price(raw: &str) -> CartResult<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(CartError::InvalidPrice(raw.to_string()));
    }

    let value =
        Decimal::from_str(&cleaned).map_err(|_| CartError::InvalidPrice(raw.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        // Round-trip through f64 only for the error message
        return Err(CartError::NegativePrice(
            value.to_f64().unwrap_or(f64::NEG_INFINITY),
        ));
    }

    let price = to_f64(value);
    if price > MAX_PRICE {
        return Err(CartError::PriceTooLarge(price));
    }

    Ok(price)
}

/// Validate a candidate item before it touches cart state
///
/// Name must be non-empty after trimming; price must parse cleanly.
/// Returns the normalized unit price on success.
pub fn validate_item(name: &str, raw_price: &str) -> CartResult<f64> {
    if name.trim().is_empty() {
        return Err(CartError::MissingName);
    }
    parse_price(raw_price)
}

/// Convert f64 to Decimal for calculation
///
/// Prices are validated at the boundary, so non-finite input here means a
/// bug upstream; default to zero rather than corrupting totals.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Line total with precise arithmetic: unit_price × quantity
pub fn line_total(item: &CartItem) -> Decimal {
    (to_decimal(item.unit_price) * Decimal::from(item.quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Recalculate derived totals from the line list
///
/// Totals are always derived, never stored independently of the source
/// list; the store calls this after every mutation.
pub fn recalculate_totals(items: &[CartItem]) -> Totals {
    let mut total = Decimal::ZERO;
    let mut item_count: i32 = 0;

    for item in items {
        total += line_total(item);
        item_count += item.quantity;
    }

    Totals {
        total: to_f64(total.max(Decimal::ZERO)),
        item_count,
    }
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
