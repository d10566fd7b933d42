//! Catalog enrichment: the lookup cache, category and markup resolution,
//! variant expansion, and the [`Pipeline`] that ties them to the parser.

pub mod cache;
pub mod fallback;
pub mod pipeline;
pub mod resolve;

pub use cache::{LookupCache, OfflineProvider};
pub use fallback::{fallback_markup_rules, fallback_product_mapping, FALLBACK_TABLE_VERSION};
pub use pipeline::Pipeline;
pub use resolve::{
    applicable_markups, apply_business_rules, base_name, expand, resolve_category,
    ALLOWED_REGIONS,
};
