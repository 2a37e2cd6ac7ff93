//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, InvalidLineItemError},
    discounts::DiscountError,
    engine::{CalculationError, DiscountEngine},
    items::CartLineItem,
    pricing::TotalPriceError,
    products::{Product, ProductId},
    promotions::{
        InvalidPromotionError, Promotion, PromotionKind, Promotions, coupon::FixedCoupon,
        percentage_discount::PercentageDiscount, promo_code::PercentagePromoCode,
    },
    receipt::{LineBreakdown, PriceCalculationResult, ReceiptError},
};
