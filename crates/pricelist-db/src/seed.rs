use pricelist_core::{MarkupRule, ProductMappingTable};
use sqlx::PgPool;

use crate::DbError;

/// Rows actually written by [`seed_catalog`]; existing rows are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_inserted: u64,
    pub markup_rules_inserted: u64,
}

/// Insert the given categories and markup rules, leaving existing rows
/// untouched.
///
/// All inserts run inside a single transaction; if any operation fails the
/// entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_catalog(
    pool: &PgPool,
    mapping: &ProductMappingTable,
    rules: &[MarkupRule],
) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for (product_name, entry) in mapping.iter() {
        let result = sqlx::query(
            "INSERT INTO product_categories (product_name, category_id, unit) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (product_name) DO NOTHING",
        )
        .bind(product_name)
        .bind(&entry.category_id)
        .bind(&entry.unit)
        .execute(&mut *tx)
        .await?;
        summary.categories_inserted += result.rows_affected();
    }

    for rule in rules {
        let result = sqlx::query(
            "INSERT INTO markup_rules (color, coating, region, markup, unit_markup) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (color, coating, region) DO NOTHING",
        )
        .bind(&rule.color)
        .bind(&rule.coating)
        .bind(&rule.region)
        .bind(rule.markup)
        .bind(rule.unit_markup)
        .execute(&mut *tx)
        .await?;
        summary.markup_rules_inserted += result.rows_affected();
    }

    tx.commit().await?;
    tracing::info!(
        categories = summary.categories_inserted,
        markup_rules = summary.markup_rules_inserted,
        "catalog seeded"
    );
    Ok(summary)
}
