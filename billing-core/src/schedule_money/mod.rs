//! Money calculation utilities using rust_decimal for precision
//!
//! All schedule arithmetic is done using `Decimal` internally, then converted
//! to `f64` for storage/serialization: amounts rounded to 2 decimal places,
//! percentages unrounded.

use crate::schedules::traits::ScheduleError;
use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed invoice or entry amount
const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), ScheduleError> {
    if !value.is_finite() {
        return Err(ScheduleError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a monetary amount (invoice total or entry amount)
pub fn validate_amount(value: f64, field_name: &str) -> Result<(), ScheduleError> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(ScheduleError::InvalidAmount(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(ScheduleError::InvalidAmount(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Validate a percentage in [0, 100]
pub fn validate_percentage(value: f64) -> Result<(), ScheduleError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ScheduleError::InvalidPercentage(format!(
            "percentage must be between 0 and 100, got {}",
            value
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated at the boundary. If NaN/Infinity
/// somehow reaches here, logs an error and returns ZERO.
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
        tracing::error!(value = %value, "Decimal not representable as f64, defaulting to zero");
        0.0
    })
}

/// Convert a percentage back to f64 without cent rounding
///
/// A percentage rounded to 2dp is off by up to 0.005 points, which is more
/// than a cent once the invoice passes 200.00.
#[inline]
pub fn percentage_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Percentage not representable as f64, defaulting to zero");
        0.0
    })
}

/// `amount` as a percentage of `invoice_amount` (0 when the invoice is 0)
pub fn percentage_of(amount: Decimal, invoice_amount: Decimal) -> Decimal {
    if invoice_amount > Decimal::ZERO {
        amount / invoice_amount * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Amount corresponding to `percentage` of `invoice_amount`
pub fn amount_for_percentage(invoice_amount: Decimal, percentage: Decimal) -> Decimal {
    invoice_amount * percentage / Decimal::ONE_HUNDRED
}

/// Whether two values differ by more than `tolerance`
#[inline]
pub fn differs(a: f64, b: f64, tolerance: Decimal) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() > tolerance
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    !differs(a, b, MONEY_TOLERANCE)
}

/// Sum entry amounts with precise arithmetic
pub fn sum_amounts<'a>(amounts: impl IntoIterator<Item = &'a f64>) -> Decimal {
    amounts.into_iter().map(|a| to_decimal(*a)).sum()
}
