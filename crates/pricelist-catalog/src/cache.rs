//! Memoized lookup tables with fallback on provider failure.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pricelist_core::{LookupProvider, MarkupRule, ProductMappingTable, ProviderError};
use tokio::sync::RwLock;

use crate::fallback::{fallback_markup_rules, fallback_product_mapping, FALLBACK_TABLE_VERSION};

/// Caches the category mapping and markup rules fetched from a
/// [`LookupProvider`].
///
/// Each table is fetched on first use and kept until [`LookupCache::clear`].
/// A failed or timed-out fetch is logged and replaced by the fallback table,
/// which is then cached exactly like a fetched one. Two callers racing on an
/// empty slot may both fetch; the first stored snapshot wins and both
/// receive it.
pub struct LookupCache {
    provider: Arc<dyn LookupProvider>,
    timeout: Duration,
    mapping: RwLock<Option<Arc<ProductMappingTable>>>,
    rules: RwLock<Option<Arc<Vec<MarkupRule>>>>,
}

impl LookupCache {
    #[must_use]
    pub fn new(provider: Arc<dyn LookupProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            mapping: RwLock::new(None),
            rules: RwLock::new(None),
        }
    }

    pub async fn get_product_mapping(&self) -> Arc<ProductMappingTable> {
        get_or_populate(
            &self.mapping,
            "product_categories",
            self.timeout,
            self.provider.fetch_category_mapping(),
            fallback_product_mapping,
        )
        .await
    }

    pub async fn get_markup_rules(&self) -> Arc<Vec<MarkupRule>> {
        get_or_populate(
            &self.rules,
            "markup_rules",
            self.timeout,
            self.provider.fetch_markup_rules(),
            fallback_markup_rules,
        )
        .await
    }

    /// Drops both snapshots; the next getter call refetches. Callers that
    /// already hold a snapshot keep using it.
    pub async fn clear(&self) {
        *self.mapping.write().await = None;
        *self.rules.write().await = None;
        tracing::info!("lookup cache invalidated");
    }

    #[must_use]
    pub fn fallback_version(&self) -> &'static str {
        FALLBACK_TABLE_VERSION
    }
}

async fn get_or_populate<T, Fut>(
    slot: &RwLock<Option<Arc<T>>>,
    table: &'static str,
    timeout: Duration,
    fetch: Fut,
    fallback: fn() -> T,
) -> Arc<T>
where
    Fut: Future<Output = Result<T, ProviderError>>,
{
    if let Some(cached) = slot.read().await.as_ref() {
        return Arc::clone(cached);
    }

    let outcome = match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            table,
            timeout_secs: timeout.as_secs(),
        }),
    };

    let value = outcome.unwrap_or_else(|e| {
        tracing::warn!(
            table,
            error = %e,
            fallback_version = FALLBACK_TABLE_VERSION,
            "lookup fetch failed, using fallback table"
        );
        fallback()
    });

    let mut guard = slot.write().await;
    Arc::clone(guard.get_or_insert_with(|| Arc::new(value)))
}

/// Provider for running without a catalog store: every fetch fails, so the
/// cache serves the fallback tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

#[async_trait]
impl LookupProvider for OfflineProvider {
    async fn fetch_category_mapping(&self) -> Result<ProductMappingTable, ProviderError> {
        Err(ProviderError::Unavailable(
            "no catalog store configured".to_string(),
        ))
    }

    async fn fetch_markup_rules(&self) -> Result<Vec<MarkupRule>, ProviderError> {
        Err(ProviderError::Unavailable(
            "no catalog store configured".to_string(),
        ))
    }
}
