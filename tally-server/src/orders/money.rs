//! Money calculation utilities using rust_decimal for precision
//!
//! This module provides precise decimal arithmetic for monetary calculations.
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use crate::orders::traits::OrderError;
use rust_decimal::prelude::*;
use shared::order::{OrderItemInput, OrderSnapshot, PaymentStatus};

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub(crate) const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per item (1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed amount for overrides and custom shares (1,000,000)
const MAX_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate an OrderItemInput before processing
pub fn validate_item(item: &OrderItemInput) -> Result<(), OrderError> {
    if item.name.trim().is_empty() {
        return Err(OrderError::InvalidOperation(
            "item name must not be empty".to_string(),
        ));
    }

    // Price must be finite and non-negative
    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(OrderError::InvalidOperation(format!(
            "price must be non-negative, got {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(OrderError::InvalidOperation(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, item.price
        )));
    }

    // Quantity must be positive and within bounds
    validate_quantity(item.quantity)?;

    Ok(())
}

/// Validate an item quantity (positive, bounded)
pub fn validate_quantity(quantity: i32) -> Result<(), OrderError> {
    if quantity <= 0 {
        return Err(OrderError::InvalidOperation(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a manual total override (must be finite and positive)
pub fn validate_total_override(total: f64) -> Result<(), OrderError> {
    require_finite(total, "total override")?;
    if total <= 0.0 {
        return Err(OrderError::InvalidAmount);
    }
    if total > MAX_AMOUNT {
        return Err(OrderError::InvalidOperation(format!(
            "total override exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, total
        )));
    }
    Ok(())
}

/// Validate a custom share amount (must be finite and non-negative)
///
/// Zero is allowed: a participant can legitimately owe nothing.
pub fn validate_share_amount(amount: f64) -> Result<(), OrderError> {
    require_finite(amount, "share amount")?;
    if amount < 0.0 {
        return Err(OrderError::InvalidAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(OrderError::InvalidOperation(format!(
            "share amount exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Validate a currency conversion rate (opaque positive multiplier)
pub fn validate_rate(rate: f64) -> Result<(), OrderError> {
    require_finite(rate, "rate")?;
    if rate <= 0.0 {
        return Err(OrderError::InvalidOperation(format!(
            "rate must be positive, got {}",
            rate
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to 2 decimal places through Decimal
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Convert an amount into another currency using an opaque rate multiplier
///
/// The rate carries no currency identity; callers pass whatever factor the
/// display layer needs. Result is rounded to 2 decimal places.
pub fn convert(amount: f64, rate: f64) -> f64 {
    to_f64(to_decimal(amount) * to_decimal(rate))
}

/// Calculate an item line total with precise decimal arithmetic
///
/// Formula: price * quantity
pub fn calculate_line_total(price: f64, quantity: i32) -> Decimal {
    (to_decimal(price) * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Recalculate order totals from items and payments using precise decimal arithmetic
///
/// This function calculates all financial totals:
/// - items_subtotal: sum of line totals
/// - effective_total: manual override when set, otherwise items_subtotal
/// - collected_amount: sum of confirmed payment amounts
pub fn recalculate_totals(snapshot: &mut OrderSnapshot) {
    let mut subtotal = Decimal::ZERO;
    for item in &snapshot.items {
        subtotal += calculate_line_total(item.price, item.quantity);
    }

    let effective = match snapshot.total_override {
        Some(total) => to_decimal(total),
        None => subtotal,
    };

    let collected: Decimal = snapshot
        .payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Confirmed)
        .map(|p| to_decimal(p.amount_due))
        .sum();

    snapshot.items_subtotal = to_f64(subtotal);
    snapshot.effective_total = to_f64(effective);
    snapshot.collected_amount = to_f64(collected);
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
