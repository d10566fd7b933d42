//! The lookup capability the catalog store provides to the pipeline.

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{MarkupRule, ProductMappingTable};

/// Failure to fetch a lookup table from the backing store.
///
/// These never reach parsing code: the lookup cache logs them and falls back
/// to its static tables.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("lookup store unavailable: {0}")]
    Unavailable(String),

    #[error("lookup fetch for {table} timed out after {timeout_secs}s")]
    Timeout {
        table: &'static str,
        timeout_secs: u64,
    },
}

/// Source of the product-category mapping and markup rules.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Fetches every active product name → category mapping, in the store's
    /// stable order.
    async fn fetch_category_mapping(&self) -> Result<ProductMappingTable, ProviderError>;

    /// Fetches the ordered list of active markup rules.
    async fn fetch_markup_rules(&self) -> Result<Vec<MarkupRule>, ProviderError>;
}
