//! Cart

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::CartLineItem,
    pricing::{TotalPriceError, total_price},
    products::ProductId,
};

/// A line item that cannot be priced.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidLineItemError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Quantity must be at least one.
    #[error("Item {0} ({1}) has a quantity of zero")]
    ZeroQuantity(usize, ProductId),

    /// Unit prices cannot be negative.
    #[error("Item {0} ({1}) has a negative unit price of {2} minor units")]
    NegativeUnitPrice(usize, ProductId, i64),

    /// Each product may only appear on one line.
    #[error("Item {0} repeats product {1}")]
    DuplicateProduct(usize, ProductId),
}

/// Cart
///
/// Line items in a single currency. Every item is validated as it enters the
/// cart, so a constructed cart always holds positive quantities, non-negative
/// prices and unique products.
#[derive(Debug)]
pub struct Cart<'a> {
    items: Vec<CartLineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidLineItemError`] found, in item order.
    pub fn with_items(
        items: impl IntoIterator<Item = CartLineItem<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, InvalidLineItemError> {
        let mut cart = Cart::new(currency);

        for item in items {
            cart.add_item(item)?;
        }

        Ok(cart)
    }

    /// Add a line item to the cart.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidLineItemError`] if the item's currency differs from
    /// the cart, its quantity is zero, its unit price is negative, or its
    /// product is already in the cart.
    pub fn add_item(&mut self, item: CartLineItem<'a>) -> Result<(), InvalidLineItemError> {
        let idx = self.items.len();
        let item_currency = item.unit_price().currency();

        if item_currency != self.currency {
            return Err(InvalidLineItemError::CurrencyMismatch(
                idx,
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if item.quantity() == 0 {
            return Err(InvalidLineItemError::ZeroQuantity(
                idx,
                item.product().clone(),
            ));
        }

        let unit_minor = item.unit_price().to_minor_units();

        if unit_minor < 0 {
            return Err(InvalidLineItemError::NegativeUnitPrice(
                idx,
                item.product().clone(),
                unit_minor,
            ));
        }

        if self.contains(item.product()) {
            return Err(InvalidLineItemError::DuplicateProduct(
                idx,
                item.product().clone(),
            ));
        }

        self.items.push(item);

        Ok(())
    }

    /// Calculate the undiscounted subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the sum overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Whether a line for `product` is in the cart.
    pub fn contains(&self, product: &ProductId) -> bool {
        self.items.iter().any(|item| item.product() == product)
    }

    /// Product ids present in the cart.
    pub fn product_ids(&self) -> FxHashSet<&ProductId> {
        self.items.iter().map(CartLineItem::product).collect()
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem<'a>> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn test_items<'a>() -> [CartLineItem<'a>; 3] {
        [
            CartLineItem::new(1, 1, Money::from_minor(100, GBP)),
            CartLineItem::new(2, 2, Money::from_minor(200, GBP)),
            CartLineItem::new(3, 1, Money::from_minor(300, GBP)),
        ]
    }

    #[test]
    fn new_with_currency() {
        let cart = Cart::new(GBP);

        assert_eq!(cart.currency, GBP);
        assert!(cart.is_empty());
    }

    #[test]
    fn with_items_currency_mismatch_errors() {
        let items = [
            CartLineItem::new(1, 1, Money::from_minor(100, GBP)),
            CartLineItem::new(2, 1, Money::from_minor(100, USD)),
        ];

        let result = Cart::with_items(items, GBP);

        assert_eq!(
            result.err(),
            Some(InvalidLineItemError::CurrencyMismatch(
                1,
                USD.iso_alpha_code,
                GBP.iso_alpha_code
            ))
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let items = [CartLineItem::new(7, 0, Money::from_minor(100, GBP))];

        let result = Cart::with_items(items, GBP);

        assert_eq!(
            result.err(),
            Some(InvalidLineItemError::ZeroQuantity(0, ProductId::from(7)))
        );
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let items = [CartLineItem::new(7, 1, Money::from_minor(-1, GBP))];

        let result = Cart::with_items(items, GBP);

        assert_eq!(
            result.err(),
            Some(InvalidLineItemError::NegativeUnitPrice(
                0,
                ProductId::from(7),
                -1
            ))
        );
    }

    #[test]
    fn duplicate_product_is_rejected() {
        let items = [
            CartLineItem::new(7, 1, Money::from_minor(100, GBP)),
            CartLineItem::new(7, 3, Money::from_minor(100, GBP)),
        ];

        let result = Cart::with_items(items, GBP);

        assert_eq!(
            result.err(),
            Some(InvalidLineItemError::DuplicateProduct(1, ProductId::from(7)))
        );
    }

    #[test]
    fn free_items_are_accepted() -> TestResult {
        let cart = Cart::with_items([CartLineItem::new(1, 1, Money::from_minor(0, GBP))], GBP)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.subtotal()?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn subtotal_with_items() -> TestResult {
        let cart = Cart::with_items(test_items(), GBP)?;

        assert_eq!(cart.subtotal()?, Money::from_minor(800, GBP));

        Ok(())
    }

    #[test]
    fn subtotal_with_no_items() -> TestResult {
        let cart = Cart::new(GBP);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn product_ids_and_contains() -> TestResult {
        let cart = Cart::with_items(test_items(), GBP)?;

        assert!(cart.contains(&ProductId::from(2)));
        assert!(!cart.contains(&ProductId::from(9)));
        assert_eq!(cart.product_ids().len(), 3);

        Ok(())
    }

    #[test]
    fn iter_returns_items_in_order() -> TestResult {
        let cart = Cart::with_items(test_items(), GBP)?;

        let quantities: Vec<u32> = cart.iter().map(CartLineItem::quantity).collect();

        assert_eq!(quantities, vec![1, 2, 1]);

        Ok(())
    }
}
