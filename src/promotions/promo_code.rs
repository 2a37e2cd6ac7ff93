//! Promo Code
//!
//! A percentage off whatever remains after the product discount.
//!
//! The applicable-product list only feeds [`PercentagePromoCode::is_applicable`],
//! a pre-check callers run before offering the code. The stacking calculation
//! applies the rate cart-wide regardless of it.

use decimal_percentage::Percentage;
use rustc_hash::FxHashSet;

use crate::{
    cart::Cart,
    discounts::{DiscountError, percent_of_minor},
    products::ProductId,
    promotions::{InvalidPromotionError, PromotionKind, check_rate},
};

/// A percentage promo code.
#[derive(Debug, Clone)]
pub struct PercentagePromoCode {
    code: String,
    percentage: Percentage,
    applicable: FxHashSet<ProductId>,
}

impl PercentagePromoCode {
    /// Create a promo code that applies to any cart.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPromotionError::PercentageOutOfRange`] unless the
    /// percentage is in (0%, 100%].
    pub fn new(
        code: impl Into<String>,
        percentage: Percentage,
    ) -> Result<Self, InvalidPromotionError> {
        Ok(Self {
            code: code.into(),
            percentage: check_rate(percentage, PromotionKind::PromoCode)?,
            applicable: FxHashSet::default(),
        })
    }

    /// Restrict the pre-check to carts containing one of `products`.
    #[must_use]
    pub fn with_applicable_products<I>(mut self, products: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<ProductId>,
    {
        self.applicable = products.into_iter().map(Into::into).collect();
        self
    }

    /// The code customers enter.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the promo code percentage.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Products the code is restricted to; empty means unrestricted.
    pub fn applicable_products(&self) -> &FxHashSet<ProductId> {
        &self.applicable
    }

    /// Whether the code may be used with this cart.
    ///
    /// Unrestricted codes apply to any cart, including an empty one. Restricted
    /// codes need at least one line for a listed product.
    pub fn is_applicable(&self, cart: &Cart<'_>) -> bool {
        self.applicable.is_empty()
            || cart
                .iter()
                .any(|item| self.applicable.contains(item.product()))
    }

    /// The promo code amount on `remaining_minor`, the total after the product discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if the amount cannot be
    /// represented in minor units.
    pub fn amount_minor(&self, remaining_minor: i64) -> Result<i64, DiscountError> {
        percent_of_minor(&self.percentage, remaining_minor)
    }
}
