use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One spreadsheet line as decoded from a workbook sheet.
///
/// Only the first three cells carry meaning: product name, unit, price.
/// Rows with fewer cells are skipped by the row normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub cells: Vec<String>,
}

impl RawRow {
    #[must_use]
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named worksheet and its rows, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<RawRow>,
}

/// Every sheet of an uploaded price list. Sheet order is preserved and is
/// the order in which rows are processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Appends a sheet built from raw cell rows.
    pub fn push_sheet<I>(&mut self, name: impl Into<String>, rows: I)
    where
        I: IntoIterator<Item = RawRow>,
    {
        self.sheets.push(Sheet {
            name: name.into(),
            rows: rows.into_iter().collect(),
        });
    }

    /// Total number of rows across all sheets.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

/// Which processing path a normalized product follows.
///
/// Corrugated sheet products carry the thickness and coating inferred from
/// their price token. Standard products get expanded by markup rules
/// instead; a coating inferred from a branded token restricts those rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "product_type", rename_all = "snake_case")]
pub enum ProductKind {
    Standard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coating: Option<String>,
    },
    Corrugated { thickness: String, coating: String },
}

impl ProductKind {
    /// Standard kind with no coating restriction.
    #[must_use]
    pub const fn standard() -> Self {
        Self::Standard { coating: None }
    }
}

/// A single product recovered from one (name, price) alignment of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// The full name cell the product was split out of.
    pub original_name: String,
    /// The individual product name; never empty.
    pub parsed_name: String,
    pub unit: String,
    /// Leading digits of the price token.
    pub price: u64,
    /// Lower-cased letter suffix of the price token, e.g. `"гл"` or `"sf"`.
    pub brand: Option<String>,
    pub sheet: String,
    #[serde(flatten)]
    pub kind: ProductKind,
}

impl NormalizedProduct {
    #[must_use]
    pub fn is_corrugated(&self) -> bool {
        matches!(self.kind, ProductKind::Corrugated { .. })
    }

    #[must_use]
    pub fn thickness(&self) -> Option<&str> {
        match &self.kind {
            ProductKind::Corrugated { thickness, .. } => Some(thickness),
            ProductKind::Standard { .. } => None,
        }
    }

    #[must_use]
    pub fn coating(&self) -> Option<&str> {
        match &self.kind {
            ProductKind::Corrugated { coating, .. } => Some(coating),
            ProductKind::Standard { coating } => coating.as_deref(),
        }
    }
}

/// Variant-specific attributes of an [`EnrichedVariant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "product_type", rename_all = "snake_case")]
pub enum VariantDetail {
    /// Priced as listed, no markup.
    Corrugated { thickness: String, coating: String },
    /// One markup rule applied: the color/coating/region the rule describes.
    Standard {
        color: String,
        coating: String,
        region: String,
        unit_markup: Decimal,
    },
}

/// Terminal output record: a normalized product joined with its category
/// and priced for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedVariant {
    pub original_name: String,
    pub parsed_name: String,
    pub category_id: String,
    /// Unit from the category mapping.
    pub unit: String,
    /// Unit cell of the source row.
    pub source_unit: String,
    pub base_price: u64,
    pub final_price: Decimal,
    pub markup: Decimal,
    pub brand: Option<String>,
    pub sheet: String,
    #[serde(flatten)]
    pub detail: VariantDetail,
}

impl EnrichedVariant {
    #[must_use]
    pub fn product_type(&self) -> &'static str {
        match self.detail {
            VariantDetail::Corrugated { .. } => "corrugated",
            VariantDetail::Standard { .. } => "standard",
        }
    }
}
