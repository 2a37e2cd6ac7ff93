//! Promotion Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{
        FixtureError,
        products::{parse_percentage, parse_price},
    },
    products::ProductId,
    promotions::{
        Promotion, coupon::FixedCoupon, percentage_discount::PercentageDiscount,
        promo_code::PercentagePromoCode,
    },
};

/// Wrapper for promotions in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Promotions applied to the cart; at most one of each type
    pub promotions: Vec<PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Percentage discount on listed products
    Discount {
        /// Percentage (e.g., "15%" or "0.15")
        percentage: String,

        /// Eligible product ids
        products: Vec<ProductId>,
    },

    /// Percentage promo code on the post-discount total
    PromoCode {
        /// Code customers enter
        code: String,

        /// Percentage (e.g., "20%")
        percentage: String,

        /// Products the code is restricted to, if any
        #[serde(default)]
        products: Vec<ProductId>,
    },

    /// Fixed amount coupon
    Coupon {
        /// Code customers enter
        code: String,

        /// Amount (e.g., "5.00 GBP")
        amount: String,

        /// Products listed on the coupon record
        #[serde(default)]
        products: Vec<ProductId>,
    },
}

impl TryFrom<PromotionFixture> for Promotion<'_> {
    type Error = FixtureError;

    fn try_from(fixture: PromotionFixture) -> Result<Self, Self::Error> {
        match fixture {
            PromotionFixture::Discount {
                percentage,
                products,
            } => Ok(Promotion::Discount(PercentageDiscount::new(
                parse_percentage(&percentage)?,
                products,
            )?)),
            PromotionFixture::PromoCode {
                code,
                percentage,
                products,
            } => Ok(Promotion::PromoCode(
                PercentagePromoCode::new(code, parse_percentage(&percentage)?)?
                    .with_applicable_products(products),
            )),
            PromotionFixture::Coupon {
                code,
                amount,
                products,
            } => {
                let (minor_units, currency) = parse_price(&amount)?;

                Ok(Promotion::Coupon(
                    FixedCoupon::new(code, Money::from_minor(minor_units, currency))?
                        .with_products(products),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::promotions::{InvalidPromotionError, PromotionKind};

    use super::*;

    #[test]
    fn promotion_fixture_rejects_unknown_type() {
        let yaml = r"
type: buy_one_get_one
percentage: 50%
products: []
";
        let result: Result<PromotionFixture, _> = serde_norway::from_str(yaml);

        assert!(result.is_err());
    }

    #[test]
    fn discount_fixture_converts() -> TestResult {
        let yaml = r#"
type: discount
percentage: 15%
products: ["1", "2"]
"#;
        let fixture: PromotionFixture = serde_norway::from_str(yaml)?;

        match Promotion::try_from(fixture)? {
            Promotion::Discount(discount) => {
                assert!(discount.applies_to(&ProductId::from(2)));
                assert!(!discount.applies_to(&ProductId::from(3)));
            }
            other => panic!("expected a discount, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn coupon_fixture_converts_without_products() -> TestResult {
        let yaml = r"
type: coupon
code: WELCOME5
amount: 5.00 GBP
";
        let fixture: PromotionFixture = serde_norway::from_str(yaml)?;

        match Promotion::try_from(fixture)? {
            Promotion::Coupon(coupon) => {
                assert_eq!(coupon.code(), "WELCOME5");
                assert_eq!(coupon.amount(), &Money::from_minor(500, GBP));
                assert!(coupon.products().is_empty());
            }
            other => panic!("expected a coupon, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn promo_code_fixture_rejects_out_of_range_percentage() -> TestResult {
        let yaml = r"
type: promo_code
code: TOOMUCH
percentage: 120%
";
        let fixture: PromotionFixture = serde_norway::from_str(yaml)?;
        let result = Promotion::try_from(fixture);

        assert!(matches!(
            result,
            Err(FixtureError::InvalidPromotion(
                InvalidPromotionError::PercentageOutOfRange {
                    kind: PromotionKind::PromoCode,
                    ..
                }
            ))
        ));

        Ok(())
    }
}
