//! Percentage Discount
//!
//! A percentage off the lines of explicitly listed products.

use decimal_percentage::Percentage;
use rustc_hash::FxHashSet;

use crate::{
    discounts::{DiscountError, percent_of_minor},
    items::CartLineItem,
    products::ProductId,
    promotions::{InvalidPromotionError, PromotionKind, check_rate},
};

/// A percentage discount bound to a set of eligible products.
#[derive(Debug, Clone)]
pub struct PercentageDiscount {
    percentage: Percentage,
    eligible: FxHashSet<ProductId>,
}

impl PercentageDiscount {
    /// Create a new percentage discount.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPromotionError::PercentageOutOfRange`] unless the
    /// percentage is in (0%, 100%].
    pub fn new<I>(
        percentage: Percentage,
        eligible: impl IntoIterator<Item = I>,
    ) -> Result<Self, InvalidPromotionError>
    where
        I: Into<ProductId>,
    {
        Ok(Self {
            percentage: check_rate(percentage, PromotionKind::Discount)?,
            eligible: eligible.into_iter().map(Into::into).collect(),
        })
    }

    /// Return the discount percentage.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Return the eligible products.
    pub fn eligible_products(&self) -> &FxHashSet<ProductId> {
        &self.eligible
    }

    /// Whether lines for `product` are discounted.
    pub fn applies_to(&self, product: &ProductId) -> bool {
        self.eligible.contains(product)
    }

    /// The discount on a single line in minor units; zero for ineligible products.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if the line total or
    /// discount cannot be represented in minor units.
    pub fn line_discount_minor(&self, item: &CartLineItem<'_>) -> Result<i64, DiscountError> {
        if !self.applies_to(item.product()) {
            return Ok(0);
        }

        let line_total = item
            .line_total_minor()
            .ok_or(DiscountError::PercentConversion)?;

        percent_of_minor(&self.percentage, line_total)
    }
}
