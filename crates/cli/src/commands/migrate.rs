//! Database migration command.
//!
//! Runs the migrations embedded in the server crate. The server never runs
//! them automatically, so this is the one place the schema is applied.

use quickbite_server::db;

use super::CommandError;

/// Run database migrations.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
