//! Fixed Coupon

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};

use crate::{products::ProductId, promotions::InvalidPromotionError};

/// A flat amount off the order.
///
/// The product list mirrors the backend coupon record. It is carried for
/// callers but never narrows the calculation: the whole amount comes off the
/// order total.
#[derive(Debug, Clone)]
pub struct FixedCoupon<'a> {
    code: String,
    amount: Money<'a, Currency>,
    products: FxHashSet<ProductId>,
}

impl<'a> FixedCoupon<'a> {
    /// Create a new coupon.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPromotionError::NegativeCouponAmount`] if `amount` is below zero.
    pub fn new(
        code: impl Into<String>,
        amount: Money<'a, Currency>,
    ) -> Result<Self, InvalidPromotionError> {
        let minor = amount.to_minor_units();

        if minor < 0 {
            return Err(InvalidPromotionError::NegativeCouponAmount(minor));
        }

        Ok(Self {
            code: code.into(),
            amount,
            products: FxHashSet::default(),
        })
    }

    /// Attach the backend's product list.
    #[must_use]
    pub fn with_products<I>(mut self, products: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<ProductId>,
    {
        self.products = products.into_iter().map(Into::into).collect();
        self
    }

    /// The code customers enter.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The amount taken off the order.
    pub fn amount(&self) -> &Money<'a, Currency> {
        &self.amount
    }

    /// The product list from the coupon record.
    pub fn products(&self) -> &FxHashSet<ProductId> {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn negative_amount_is_rejected() {
        let result = FixedCoupon::new("OOPS", Money::from_minor(-100, GBP));

        assert_eq!(
            result.err(),
            Some(InvalidPromotionError::NegativeCouponAmount(-100))
        );
    }

    #[test]
    fn zero_amount_is_accepted() -> TestResult {
        let coupon = FixedCoupon::new("NOTHING", Money::from_minor(0, GBP))?;

        assert_eq!(coupon.amount(), &Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn products_are_carried() -> TestResult {
        let coupon =
            FixedCoupon::new("TENOFF", Money::from_minor(1_000, GBP))?.with_products([3_u64, 4]);

        assert_eq!(coupon.code(), "TENOFF");
        assert!(coupon.products().contains(&ProductId::from(3)));

        Ok(())
    }
}
