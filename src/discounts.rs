//! Discount utilities
//!
//! Percentage arithmetic shared by the percentage-based promotion kinds.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Returns the percentage as a fraction (`0.15` for 15%).
pub fn fraction(percent: &Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    (*percent) * Decimal::ONE
}

/// Returns the percentage in points (`15` for 15%).
pub fn points(percent: &Percentage) -> Decimal {
    fraction(percent) * Decimal::ONE_HUNDRED
}

/// Whether a percentage lies in the half-open range (0%, 100%].
pub fn is_valid_rate(percent: &Percentage) -> bool {
    let fraction = fraction(percent);

    fraction > Decimal::ZERO && fraction <= Decimal::ONE
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// Rounds half away from zero to a whole minor unit.
///
/// # Errors
///
/// Returns an error if:
/// - The percentage calculation overflows or cannot be safely represented (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    fraction(percent)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
