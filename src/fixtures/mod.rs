//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, InvalidLineItemError},
    fixtures::{carts::CartFixture, products::ProductsFixture, promotions::PromotionsFixture},
    items::CartLineItem,
    products::{Product, ProductId},
    promotions::{InvalidPromotionError, Promotion, Promotions},
};

pub mod carts;
pub mod products;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Cart line rejected
    #[error(transparent)]
    InvalidLineItem(#[from] InvalidLineItemError),

    /// Promotion rejected
    #[error(transparent)]
    InvalidPromotion(#[from] InvalidPromotionError),
}

/// Fixture
///
/// A named set of products, one cart and its promotions, loaded from YAML.
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog, keyed by product id
    products: FxHashMap<ProductId, Product<'a>>,

    /// Cart lines, priced from the catalog
    items: Vec<CartLineItem<'a>>,

    /// Promotions, in file order
    promotions: Vec<Promotion<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            items: Vec::new(),
            promotions: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        for (id, product_fixture) in fixture.products {
            let (_minor_units, currency) = products::parse_price(&product_fixture.price)?;

            match self.currency {
                Some(existing) if existing != currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => self.currency = Some(currency),
            }

            let product: Product<'a> = product_fixture.try_into()?;

            self.products.insert(id, product);
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced products don't exist.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = self.read("carts", name)?;

        for line in fixture.items {
            let product = self
                .products
                .get(&line.product)
                .ok_or_else(|| FixtureError::ProductNotFound(line.product.clone()))?;

            self.items
                .push(CartLineItem::new(line.product, line.quantity, product.price));
        }

        Ok(self)
    }

    /// Load promotions from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a promotion is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: PromotionsFixture = self.read("promotions", name)?;

        for promotion_fixture in fixture.promotions {
            self.promotions.push(promotion_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, cart, and promotions with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_cart(name)?
            .load_promotions(name)?;

        Ok(fixture)
    }

    /// Get a product by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &ProductId) -> Result<&Product<'a>, FixtureError> {
        self.products
            .get(id)
            .ok_or_else(|| FixtureError::ProductNotFound(id.clone()))
    }

    /// Get all cart lines
    pub fn items(&self) -> &[CartLineItem<'a>] {
        &self.items
    }

    /// Create a cart from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or a line is rejected by the cart.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency()?;

        Ok(Cart::with_items(self.items.iter().cloned(), currency)?)
    }

    /// Collect the loaded promotions into a calculation set
    ///
    /// # Errors
    ///
    /// Returns an error if two promotions share a kind.
    pub fn promotions(&self) -> Result<Promotions<'a>, FixtureError> {
        Ok(Promotions::try_from_iter(self.promotions.iter().cloned())?)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
        category: &str,
        name: &str,
    ) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
