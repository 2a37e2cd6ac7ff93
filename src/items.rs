//! Items

use rusty_money::{Money, iso::Currency};

use crate::products::ProductId;

/// A single cart line awaiting price calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLineItem<'a> {
    product: ProductId,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> CartLineItem<'a> {
    /// Creates a new line item for `quantity` units of `product` at `unit_price` each.
    ///
    /// Quantity and price are checked when the item is added to a [`Cart`](crate::cart::Cart).
    pub fn new(
        product: impl Into<ProductId>,
        quantity: u32,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            product: product.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns the product of the line
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Returns the number of units on the line
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the undiscounted price of a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the undiscounted line total in minor units, or `None` on overflow.
    pub fn line_total_minor(&self) -> Option<i64> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
    }
}
