//! Database operations for the `product_categories` and `markup_rules` tables.

use chrono::{DateTime, Utc};
use pricelist_core::{MarkupRule, ProductMapping, ProductMappingTable};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `product_categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductCategoryRow {
    pub id: i64,
    pub product_name: String,
    pub category_id: String,
    pub unit: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `markup_rules` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MarkupRuleRow {
    pub id: i64,
    pub color: String,
    pub coating: String,
    pub region: String,
    pub markup: Decimal,
    pub unit_markup: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MarkupRuleRow> for MarkupRule {
    fn from(row: MarkupRuleRow) -> Self {
        Self {
            color: row.color,
            coating: row.coating,
            region: row.region,
            markup: row.markup,
            unit_markup: row.unit_markup,
        }
    }
}

/// Builds a mapping table keyed by product name, in row order.
#[must_use]
pub fn mapping_table(rows: Vec<ProductCategoryRow>) -> ProductMappingTable {
    rows.into_iter()
        .map(|row| {
            (
                row.product_name,
                ProductMapping::new(row.category_id, row.unit),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all active product categories, ordered by product name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_product_categories(
    pool: &PgPool,
) -> Result<Vec<ProductCategoryRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductCategoryRow>(
        "SELECT id, product_name, category_id, unit, is_active, created_at, updated_at \
         FROM product_categories \
         WHERE is_active = true \
         ORDER BY product_name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns all active markup rules in a stable order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_markup_rules(pool: &PgPool) -> Result<Vec<MarkupRuleRow>, DbError> {
    let rows = sqlx::query_as::<_, MarkupRuleRow>(
        "SELECT id, color, coating, region, markup, unit_markup, is_active, created_at, updated_at \
         FROM markup_rules \
         WHERE is_active = true \
         ORDER BY color, coating, region, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
