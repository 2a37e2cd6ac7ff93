//! Prices

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::CartLineItem;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// A line total or the running sum does not fit in minor units.
    #[error("line totals overflow the minor unit range")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the undiscounted total price of a list of line items
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Overflow`]: A line total or the sum overflowed.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    items: &[CartLineItem<'a>],
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;
    let currency = first.unit_price().currency();

    let total_minor = items.iter().try_fold(0_i64, |acc, item| {
        let item_currency = item.unit_price().currency();

        if item_currency != currency {
            return Err(TotalPriceError::Money(MoneyError::CurrencyMismatch {
                expected: currency.iso_alpha_code,
                actual: item_currency.iso_alpha_code,
            }));
        }

        item.line_total_minor()
            .and_then(|line_total| acc.checked_add(line_total))
            .ok_or(TotalPriceError::Overflow)
    })?;

    Ok(Money::from_minor(total_minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_total_price() -> TestResult {
        let items = [
            CartLineItem::new(1, 2, Money::from_minor(100, USD)),
            CartLineItem::new(2, 1, Money::from_minor(200, USD)),
        ];

        assert_eq!(total_price(&items)?, Money::from_minor(400, USD));

        Ok(())
    }

    #[test]
    fn test_total_price_is_order_independent() -> TestResult {
        let forward = [
            CartLineItem::new(1, 3, Money::from_minor(199, GBP)),
            CartLineItem::new(2, 1, Money::from_minor(250, GBP)),
            CartLineItem::new(3, 7, Money::from_minor(1, GBP)),
        ];

        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(total_price(&forward)?, total_price(&reversed)?);
        assert_eq!(total_price(&forward)?, Money::from_minor(854, GBP));

        Ok(())
    }

    #[test]
    fn test_total_price_empty() {
        let items: [CartLineItem<'static>; 0] = [];

        assert!(matches!(total_price(&items), Err(TotalPriceError::NoItems)));
    }

    #[test]
    fn test_total_price_overflow() {
        let items = [CartLineItem::new(1, 2, Money::from_minor(i64::MAX, GBP))];

        assert!(matches!(total_price(&items), Err(TotalPriceError::Overflow)));
    }

    #[test]
    fn test_total_price_currency_mismatch() {
        let items = [
            CartLineItem::new(1, 1, Money::from_minor(100, GBP)),
            CartLineItem::new(2, 1, Money::from_minor(100, USD)),
        ];

        assert!(matches!(
            total_price(&items),
            Err(TotalPriceError::Money(MoneyError::CurrencyMismatch { .. }))
        ));
    }
}
