//! Catalog store maintenance command handlers.

use clap::Subcommand;
use pricelist_catalog::{fallback_markup_rules, fallback_product_mapping, FALLBACK_TABLE_VERSION};

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Insert the default catalog; existing rows are kept
    Seed,
}

pub(crate) async fn run_db_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    pricelist_db::health_check(pool).await?;
    println!("database ok");
    Ok(())
}

pub(crate) async fn run_db_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = pricelist_db::run_migrations(pool).await?;
    println!("applied {applied} migrations");
    Ok(())
}

/// Seeds the store with the fallback catalog.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is written in that case.
pub(crate) async fn run_db_seed(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let summary = pricelist_db::seed_catalog(
        pool,
        &fallback_product_mapping(),
        &fallback_markup_rules(),
    )
    .await?;
    println!(
        "seeded {} categories and {} markup rules (catalog version {FALLBACK_TABLE_VERSION})",
        summary.categories_inserted, summary.markup_rules_inserted
    );
    Ok(())
}
