//! String heuristics that turn hand-typed price-list cells into
//! [`pricelist_core::NormalizedProduct`] records.

pub mod corrugated;
pub mod error;
pub mod names;
pub mod prices;
pub mod rows;
pub mod workbook;

pub use corrugated::{
    classify, infer_thickness_coating, is_corrugated, parse_corrugated_price_cell, Coating,
    CorrugatedPrice, NameClass, ThicknessCoating, THICKNESS_TABLE,
};
pub use error::WorkbookError;
pub use names::{extract_individual_products, split_names};
pub use prices::{split_prices, PriceToken};
pub use rows::{normalize_row, normalize_rows, SkipReason};
pub use workbook::{decode_workbook, is_supported_workbook_name, open_workbook_path};
