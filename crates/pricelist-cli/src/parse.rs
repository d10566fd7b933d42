//! `parse` command: decode a workbook from disk and print the pipeline
//! output as JSON.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use pricelist_catalog::{OfflineProvider, Pipeline};
use pricelist_core::{AppConfig, LookupProvider};
use serde::Serialize;

pub(crate) async fn run_parse(
    config: &AppConfig,
    file: &Path,
    normalized: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    let workbook = pricelist_parser::open_workbook_path(file)?;
    let pipeline = Pipeline::new(
        lookup_provider(config).await,
        Duration::from_secs(config.lookup_timeout_secs),
    );

    let output = if normalized {
        to_json(&pipeline.normalize(&workbook), pretty)?
    } else {
        to_json(&pipeline.process(&workbook).await, pretty)?
    };
    println!("{output}");
    Ok(())
}

/// The Postgres catalog when `DATABASE_URL` is set and reachable, else the
/// offline provider and its fallback tables.
async fn lookup_provider(config: &AppConfig) -> Arc<dyn LookupProvider> {
    if config.database_url.is_none() {
        return Arc::new(OfflineProvider);
    }
    match pricelist_db::connect_pool_from_config(config).await {
        Ok(pool) => Arc::new(pricelist_db::PgLookupProvider::new(pool)),
        Err(e) => {
            tracing::warn!(error = %e, "catalog store unreachable; using fallback catalog");
            Arc::new(OfflineProvider)
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
