//! Seed command for local development.
//!
//! Inserts a small sample catalog and team page. Safe to run repeatedly;
//! it skips seeding when products already exist.

use rust_decimal::Decimal;

use cedar_market_core::Price;
use cedar_market_server::db::products::ProductRepository;
use cedar_market_server::db::team::TeamRepository;

use super::{CommandError, connect};

/// Seed the database with sample data.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let products = ProductRepository::new(&pool);
    let existing = products
        .list()
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;
    if !existing.is_empty() {
        tracing::info!("Catalog already has products, skipping seed");
        return Ok(());
    }

    let samples: [(&str, &str, Decimal, &str); 3] = [
        (
            "Cedar planter box",
            "Hand-built planter box in western red cedar.",
            Decimal::new(4900, 2),
            "garden",
        ),
        (
            "Cutting board",
            "End-grain walnut cutting board, food-safe oil finish.",
            Decimal::new(6500, 2),
            "kitchen",
        ),
        (
            "Coat rack",
            "Wall-mounted oak coat rack with five pegs.",
            Decimal::new(3200, 2),
            "home",
        ),
    ];

    for (name, description, price, category) in &samples {
        products
            .create(name, description, Price::new(*price), None, category, true)
            .await
            .map_err(|e| CommandError::Invalid(e.to_string()))?;
    }
    tracing::info!("Seeded {} products", samples.len());

    let team = TeamRepository::new(&pool);
    team.create("Rowan Ellis", "Founder", "Started the workshop in 2019.", None, 1)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;
    team.create("Sam Okafor", "Production lead", "Runs the shop floor.", None, 2)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;
    tracing::info!("Seeded team members");

    Ok(())
}
