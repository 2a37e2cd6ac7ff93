//! Discount Engine
//!
//! Stacks the promotions of a cart in a fixed order:
//!
//! 1. the percentage discount, per eligible line;
//! 2. the promo code, on the subtotal less the discount;
//! 3. the coupon, as a flat amount.
//!
//! The total is floored at zero; savings are the unclamped sum of the three
//! promotion amounts.

use rusty_money::Money;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    cart::{Cart, InvalidLineItemError},
    discounts::DiscountError,
    pricing::TotalPriceError,
    promotions::{InvalidPromotionError, Promotions},
    receipt::{Amounts, LineBreakdown, PriceCalculationResult},
};

/// Errors raised while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    /// A promotion carried invalid data.
    #[error(transparent)]
    InvalidPromotion(#[from] InvalidPromotionError),

    /// A line item carried invalid data.
    #[error(transparent)]
    InvalidLineItem(#[from] InvalidLineItemError),

    /// The coupon is in a different currency to the cart (coupon, cart).
    #[error("coupon has currency {0}, but cart has currency {1}")]
    CouponCurrencyMismatch(&'static str, &'static str),

    /// An amount does not fit in minor units.
    #[error("amounts overflow the minor unit range")]
    Overflow,

    /// Wrapped discount calculation error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped total price error.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Discount stacking engine.
///
/// Stateless: every call prices an immutable snapshot of a cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountEngine;

impl DiscountEngine {
    /// Price `cart` with `promotions` applied.
    ///
    /// # Errors
    ///
    /// Returns a [`CalculationError`] if the coupon currency differs from the
    /// cart currency or any amount overflows.
    #[instrument(
        level = "debug",
        skip_all,
        fields(lines = cart.len(), currency = cart.currency().iso_alpha_code)
    )]
    pub fn calculate<'a>(
        cart: &Cart<'a>,
        promotions: &Promotions<'a>,
    ) -> Result<PriceCalculationResult<'a>, CalculationError> {
        let currency = cart.currency();
        let subtotal = cart.subtotal()?.to_minor_units();

        let mut lines = SmallVec::<[LineBreakdown<'a>; 10]>::with_capacity(cart.len());
        let mut discount = 0_i64;

        for item in cart.iter() {
            let line_total = item.line_total_minor().ok_or(CalculationError::Overflow)?;

            let line_discount = match promotions.discount() {
                Some(percentage_discount) => percentage_discount.line_discount_minor(item)?,
                None => 0,
            };

            discount = discount
                .checked_add(line_discount)
                .ok_or(CalculationError::Overflow)?;

            lines.push(LineBreakdown {
                product: item.product().clone(),
                quantity: item.quantity(),
                unit_price: *item.unit_price(),
                line_total: Money::from_minor(line_total, currency),
                discount: Money::from_minor(line_discount, currency),
            });
        }

        let promo_code = match promotions.promo_code() {
            Some(promo_code) => promo_code.amount_minor(subtotal - discount)?,
            None => 0,
        };

        let coupon = match promotions.coupon() {
            Some(coupon) => {
                let coupon_currency = coupon.amount().currency();

                if coupon_currency != currency {
                    return Err(CalculationError::CouponCurrencyMismatch(
                        coupon_currency.iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }

                coupon.amount().to_minor_units()
            }
            None => 0,
        };

        let savings = discount
            .checked_add(promo_code)
            .and_then(|sum| sum.checked_add(coupon))
            .ok_or(CalculationError::Overflow)?;

        let total = subtotal.saturating_sub(savings).max(0);

        debug!(subtotal, discount, promo_code, coupon, total, savings, "priced cart");

        Ok(PriceCalculationResult::new(
            lines,
            Amounts {
                subtotal,
                discount,
                promo_code,
                coupon,
                total,
                savings,
            },
            promotions.promo_code().map(|promo| promo.code().to_string()),
            promotions.coupon().map(|coupon| coupon.code().to_string()),
            currency,
        ))
    }
}
