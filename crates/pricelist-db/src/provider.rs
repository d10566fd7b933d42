use async_trait::async_trait;
use pricelist_core::{LookupProvider, MarkupRule, ProductMappingTable, ProviderError};
use sqlx::PgPool;

use crate::catalog::{list_active_markup_rules, list_active_product_categories, mapping_table};
use crate::DbError;

/// [`LookupProvider`] backed by the Postgres catalog tables.
#[derive(Debug, Clone)]
pub struct PgLookupProvider {
    pool: PgPool,
}

impl PgLookupProvider {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(error: &DbError) -> ProviderError {
    ProviderError::Unavailable(error.to_string())
}

#[async_trait]
impl LookupProvider for PgLookupProvider {
    async fn fetch_category_mapping(&self) -> Result<ProductMappingTable, ProviderError> {
        let rows = list_active_product_categories(&self.pool)
            .await
            .map_err(|e| unavailable(&e))?;
        Ok(mapping_table(rows))
    }

    async fn fetch_markup_rules(&self) -> Result<Vec<MarkupRule>, ProviderError> {
        let rows = list_active_markup_rules(&self.pool)
            .await
            .map_err(|e| unavailable(&e))?;
        Ok(rows.into_iter().map(MarkupRule::from).collect())
    }
}
