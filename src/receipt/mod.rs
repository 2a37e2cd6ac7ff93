//! Receipt
//!
//! The outcome of a discount-stacking calculation.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;

use crate::products::ProductId;

mod table;

pub use table::ReceiptError;

/// Pricing of a single cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBreakdown<'a> {
    /// Product on the line
    pub product: ProductId,

    /// Units on the line
    pub quantity: u32,

    /// Undiscounted unit price
    pub unit_price: Money<'a, Currency>,

    /// Undiscounted line total
    pub line_total: Money<'a, Currency>,

    /// Share of the percentage discount taken off this line
    pub discount: Money<'a, Currency>,
}

/// Subtotal, promotion amounts and payable total for a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCalculationResult<'a> {
    lines: SmallVec<[LineBreakdown<'a>; 10]>,
    subtotal: Money<'a, Currency>,
    discount_amount: Money<'a, Currency>,
    promo_code_amount: Money<'a, Currency>,
    coupon_amount: Money<'a, Currency>,
    total: Money<'a, Currency>,
    savings: Money<'a, Currency>,
    promo_code: Option<String>,
    coupon_code: Option<String>,
    currency: &'static Currency,
}

/// Amounts in minor units, as produced by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Amounts {
    pub(crate) subtotal: i64,
    pub(crate) discount: i64,
    pub(crate) promo_code: i64,
    pub(crate) coupon: i64,
    pub(crate) total: i64,
    pub(crate) savings: i64,
}

impl<'a> PriceCalculationResult<'a> {
    pub(crate) fn new(
        lines: SmallVec<[LineBreakdown<'a>; 10]>,
        amounts: Amounts,
        promo_code: Option<String>,
        coupon_code: Option<String>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            lines,
            subtotal: Money::from_minor(amounts.subtotal, currency),
            discount_amount: Money::from_minor(amounts.discount, currency),
            promo_code_amount: Money::from_minor(amounts.promo_code, currency),
            coupon_amount: Money::from_minor(amounts.coupon, currency),
            total: Money::from_minor(amounts.total, currency),
            savings: Money::from_minor(amounts.savings, currency),
            promo_code,
            coupon_code,
            currency,
        }
    }

    /// Per-line breakdown, in cart order.
    pub fn lines(&self) -> &[LineBreakdown<'a>] {
        &self.lines
    }

    /// Total cost before any promotion
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount taken off by the percentage discount
    pub fn discount_amount(&self) -> Money<'a, Currency> {
        self.discount_amount
    }

    /// Amount taken off by the promo code
    pub fn promo_code_amount(&self) -> Money<'a, Currency> {
        self.promo_code_amount
    }

    /// Amount taken off by the coupon
    pub fn coupon_amount(&self) -> Money<'a, Currency> {
        self.coupon_amount
    }

    /// Amount payable, never below zero
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Sum of all promotion amounts.
    ///
    /// Not clamped: a coupon larger than the cart makes this exceed the
    /// subtotal even though the total stops at zero. See [`Self::charged_savings`].
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// The difference between subtotal and total, i.e. what the customer
    /// actually did not pay.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn charged_savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Charged savings as a fraction of the subtotal; zero for an empty subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings_minor = self.charged_savings()?.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / subtotal_dec))
    }

    /// Code of the promo code that was applied, for passing on to order creation.
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Code of the coupon that was applied, for passing on to order creation.
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::discounts::points;

    use super::*;

    fn result(subtotal: i64, total: i64, savings: i64) -> PriceCalculationResult<'static> {
        PriceCalculationResult::new(
            smallvec![],
            Amounts {
                subtotal,
                coupon: savings,
                total,
                savings,
                ..Amounts::default()
            },
            None,
            Some("FLAT".to_string()),
            GBP,
        )
    }

    #[test]
    fn accessors_return_values_from_constructor() {
        let result = result(300, 250, 50);

        assert_eq!(result.subtotal(), Money::from_minor(300, GBP));
        assert_eq!(result.total(), Money::from_minor(250, GBP));
        assert_eq!(result.coupon_amount(), Money::from_minor(50, GBP));
        assert_eq!(result.discount_amount(), Money::from_minor(0, GBP));
        assert_eq!(result.coupon_code(), Some("FLAT"));
        assert_eq!(result.promo_code(), None);
        assert_eq!(result.currency(), GBP);
    }

    #[test]
    fn charged_savings_is_subtotal_minus_total() -> TestResult {
        let result = result(200, 0, 500);

        assert_eq!(result.savings(), Money::from_minor(500, GBP));
        assert_eq!(result.charged_savings()?, Money::from_minor(200, GBP));

        Ok(())
    }

    #[test]
    fn savings_percent_is_relative_to_subtotal() -> TestResult {
        let result = result(400, 300, 100);

        assert_eq!(points(&result.savings_percent()?), Decimal::from(25));

        Ok(())
    }

    #[test]
    fn savings_percent_of_empty_subtotal_is_zero() -> TestResult {
        let result = result(0, 0, 500);

        assert_eq!(points(&result.savings_percent()?), Decimal::ZERO);

        Ok(())
    }
}
