//! Tally CLI

use std::{io, process};

use tracing::{error, info, warn};

use tally::{engine::DiscountEngine, fixtures::Fixture};

use crate::config::CliConfig;

mod config;
mod observability;

/// Tally entry point
pub fn main() {
    // Load configuration from .env and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(e) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!(fixture = %config.fixture, "{e:#}");

        process::exit(1);
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let fixture = Fixture::from_set_in(&config.fixtures_dir, &config.fixture)?;

    let cart = fixture.cart()?;
    let promotions = fixture.promotions()?;

    info!(
        fixture = %config.fixture,
        lines = cart.len(),
        currency = cart.currency().iso_alpha_code,
        "loaded fixture"
    );

    if let Some(promo_code) = promotions.promo_code()
        && !promo_code.is_applicable(&cart)
    {
        warn!(
            code = promo_code.code(),
            "promo code lists none of the products in the cart"
        );
    }

    let result = DiscountEngine::calculate(&cart, &promotions)?;

    result.write_to(io::stdout().lock())?;

    Ok(())
}
