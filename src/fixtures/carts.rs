//! Cart Fixtures

use serde::Deserialize;

use crate::products::ProductId;

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in order
    pub items: Vec<CartLineFixture>,
}

/// A single cart line, priced from the product catalog
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product id, as listed in the products fixture
    pub product: ProductId,

    /// Units of the product
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}
