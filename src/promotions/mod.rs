//! Promotions
//!
//! The three promotion kinds a cart can carry at once: a percentage discount
//! on specific products, a percentage promo code on the post-discount total,
//! and a fixed-amount coupon on the order.

use std::fmt;

use decimal_percentage::Percentage;
use thiserror::Error;

use crate::promotions::{
    coupon::FixedCoupon, percentage_discount::PercentageDiscount, promo_code::PercentagePromoCode,
};

pub mod coupon;
pub mod percentage_discount;
pub mod promo_code;

/// A promotion that cannot be applied as given.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidPromotionError {
    /// Percentage rates must be greater than 0% and at most 100%.
    #[error("{kind} percentage must be in (0, 100], got {points}%")]
    PercentageOutOfRange {
        /// Which promotion carried the rate.
        kind: PromotionKind,

        /// The rejected rate, in percentage points.
        points: String,
    },

    /// Coupon amounts cannot be negative.
    #[error("coupon amount cannot be negative, got {0} minor units")]
    NegativeCouponAmount(i64),

    /// At most one promotion of each kind may apply to a cart.
    #[error("a {0} is already present")]
    DuplicateKind(PromotionKind),
}

/// Promotion kind, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    /// Percentage discount on eligible products.
    Discount,

    /// Percentage promo code on the post-discount total.
    PromoCode,

    /// Fixed amount coupon on the order.
    Coupon,
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PromotionKind::Discount => "discount",
            PromotionKind::PromoCode => "promo code",
            PromotionKind::Coupon => "coupon",
        })
    }
}

/// Promotion enum
#[derive(Debug, Clone)]
pub enum Promotion<'a> {
    /// Percentage discount on eligible products
    Discount(PercentageDiscount),

    /// Percentage promo code on the post-discount total
    PromoCode(PercentagePromoCode),

    /// Fixed amount coupon
    Coupon(FixedCoupon<'a>),
}

impl Promotion<'_> {
    /// Return the promotion kind.
    pub fn kind(&self) -> PromotionKind {
        match self {
            Promotion::Discount(_) => PromotionKind::Discount,
            Promotion::PromoCode(_) => PromotionKind::PromoCode,
            Promotion::Coupon(_) => PromotionKind::Coupon,
        }
    }
}

/// The promotions applied to a single calculation: at most one of each kind.
#[derive(Debug, Clone, Default)]
pub struct Promotions<'a> {
    discount: Option<PercentageDiscount>,
    promo_code: Option<PercentagePromoCode>,
    coupon: Option<FixedCoupon<'a>>,
}

impl<'a> Promotions<'a> {
    /// No promotions.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the percentage discount, replacing any existing one.
    #[must_use]
    pub fn with_discount(mut self, discount: PercentageDiscount) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Set the promo code, replacing any existing one.
    #[must_use]
    pub fn with_promo_code(mut self, promo_code: PercentagePromoCode) -> Self {
        self.promo_code = Some(promo_code);
        self
    }

    /// Set the coupon, replacing any existing one.
    #[must_use]
    pub fn with_coupon(mut self, coupon: FixedCoupon<'a>) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Add a promotion to its slot.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPromotionError::DuplicateKind`] if a promotion of the
    /// same kind is already present.
    pub fn insert(&mut self, promotion: Promotion<'a>) -> Result<(), InvalidPromotionError> {
        let kind = promotion.kind();

        match promotion {
            Promotion::Discount(discount) => fill(&mut self.discount, discount, kind),
            Promotion::PromoCode(promo_code) => fill(&mut self.promo_code, promo_code, kind),
            Promotion::Coupon(coupon) => fill(&mut self.coupon, coupon, kind),
        }
    }

    /// Build a set from a list of promotions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPromotionError::DuplicateKind`] if two promotions share a kind.
    pub fn try_from_iter(
        promotions: impl IntoIterator<Item = Promotion<'a>>,
    ) -> Result<Self, InvalidPromotionError> {
        let mut set = Self::none();

        for promotion in promotions {
            set.insert(promotion)?;
        }

        Ok(set)
    }

    /// The percentage discount, if any.
    pub fn discount(&self) -> Option<&PercentageDiscount> {
        self.discount.as_ref()
    }

    /// The promo code, if any.
    pub fn promo_code(&self) -> Option<&PercentagePromoCode> {
        self.promo_code.as_ref()
    }

    /// The coupon, if any.
    pub fn coupon(&self) -> Option<&FixedCoupon<'a>> {
        self.coupon.as_ref()
    }

    /// Whether no promotion is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discount.is_none() && self.promo_code.is_none() && self.coupon.is_none()
    }
}

fn fill<T>(
    slot: &mut Option<T>,
    value: T,
    kind: PromotionKind,
) -> Result<(), InvalidPromotionError> {
    if slot.is_some() {
        return Err(InvalidPromotionError::DuplicateKind(kind));
    }

    *slot = Some(value);

    Ok(())
}

/// Reject a percentage outside (0, 100].
pub(crate) fn check_rate(
    percentage: Percentage,
    kind: PromotionKind,
) -> Result<Percentage, InvalidPromotionError> {
    if crate::discounts::is_valid_rate(&percentage) {
        Ok(percentage)
    } else {
        Err(InvalidPromotionError::PercentageOutOfRange {
            kind,
            points: crate::discounts::points(&percentage).normalize().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use super::*;

    fn discount() -> Result<PercentageDiscount, InvalidPromotionError> {
        PercentageDiscount::new(Percentage::from(0.15), [1_u64])
    }

    fn coupon() -> Result<FixedCoupon<'static>, InvalidPromotionError> {
        FixedCoupon::new("WELCOME5", Money::from_minor(500, GBP))
    }

    #[test]
    fn none_is_empty() {
        assert!(Promotions::none().is_empty());
    }

    #[test]
    fn insert_fills_each_slot_once() -> TestResult {
        let mut promotions = Promotions::none();

        promotions.insert(Promotion::Discount(discount()?))?;
        promotions.insert(Promotion::Coupon(coupon()?))?;

        assert!(promotions.discount().is_some());
        assert!(promotions.coupon().is_some());
        assert!(promotions.promo_code().is_none());
        assert!(!promotions.is_empty());

        Ok(())
    }

    #[test]
    fn insert_rejects_second_promotion_of_same_kind() -> TestResult {
        let result = Promotions::try_from_iter([
            Promotion::Coupon(coupon()?),
            Promotion::Coupon(coupon()?),
        ]);

        assert_eq!(
            result.err(),
            Some(InvalidPromotionError::DuplicateKind(PromotionKind::Coupon))
        );

        Ok(())
    }

    #[test]
    fn builder_replaces_existing_slot() -> TestResult {
        let promotions = Promotions::none()
            .with_discount(discount()?)
            .with_discount(PercentageDiscount::new(Percentage::from(0.5), [2_u64])?);

        let rate = promotions
            .discount()
            .map(|discount| crate::discounts::points(&discount.percentage()));

        assert_eq!(rate, Some(rust_decimal::Decimal::from(50)));

        Ok(())
    }

    #[test]
    fn kind_reports_variant() -> TestResult {
        assert_eq!(
            Promotion::Discount(discount()?).kind(),
            PromotionKind::Discount
        );
        assert_eq!(Promotion::Coupon(coupon()?).kind(), PromotionKind::Coupon);

        Ok(())
    }

    #[test]
    fn out_of_range_rate_reports_points() {
        let result = check_rate(Percentage::from(1.5), PromotionKind::PromoCode);

        assert_eq!(
            result.err(),
            Some(InvalidPromotionError::PercentageOutOfRange {
                kind: PromotionKind::PromoCode,
                points: "150".to_string(),
            })
        );
    }
}
