pub mod app_config;
pub mod catalog;
pub mod config;
pub mod lookup;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use catalog::{MarkupRule, ProductMapping, ProductMappingTable};
pub use config::{load_app_config, load_app_config_from_env};
pub use lookup::{LookupProvider, ProviderError};
pub use products::{
    EnrichedVariant, NormalizedProduct, ProductKind, RawRow, Sheet, VariantDetail, Workbook,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
