//! Tally
//!
//! Tally prices shopping carts by stacking a product discount, a promo code and a coupon in a
//! fixed order, and renders the outcome as a receipt.

pub mod cart;
pub mod discounts;
pub mod engine;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
