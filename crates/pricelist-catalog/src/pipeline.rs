//! The price-list pipeline: workbook rows in, priced catalog variants out.

use std::sync::Arc;
use std::time::Duration;

use pricelist_core::{EnrichedVariant, LookupProvider, NormalizedProduct, Workbook};
use pricelist_parser::normalize_rows;

use crate::cache::LookupCache;
use crate::resolve::apply_business_rules;

/// Price-list processing entry point: row normalization followed by
/// category/markup expansion against the cached lookup tables.
///
/// Cheap to share behind an `Arc`; the only state is the lookup cache.
pub struct Pipeline {
    cache: LookupCache,
}

impl Pipeline {
    #[must_use]
    pub fn new(provider: Arc<dyn LookupProvider>, lookup_timeout: Duration) -> Self {
        Self {
            cache: LookupCache::new(provider, lookup_timeout),
        }
    }

    /// Turns every sheet of `workbook` into priced catalog variants.
    ///
    /// Never fails: unusable rows and unmapped products are dropped, and
    /// lookup failures fall back to the static tables.
    pub async fn process(&self, workbook: &Workbook) -> Vec<EnrichedVariant> {
        let products = self.normalize(workbook);
        let mapping = self.cache.get_product_mapping().await;
        let rules = self.cache.get_markup_rules().await;
        let variants = apply_business_rules(&products, &mapping, &rules);

        tracing::info!(
            sheets = workbook.sheets.len(),
            rows = workbook.row_count(),
            normalized = products.len(),
            variants = variants.len(),
            "price list processed"
        );
        variants
    }

    /// Row normalization only, without catalog enrichment.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn normalize(&self, workbook: &Workbook) -> Vec<NormalizedProduct> {
        normalize_rows(workbook)
    }

    pub async fn invalidate_lookup_cache(&self) {
        self.cache.clear().await;
    }
}
