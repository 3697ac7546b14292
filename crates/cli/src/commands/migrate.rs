//! Database migration command.
//!
//! Migrations are embedded in the server crate at compile time and applied
//! here, never on server startup.

use super::{CommandError, connect};

/// Run all pending database migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    cedar_market_server::MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
