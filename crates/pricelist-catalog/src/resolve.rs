//! Category resolution, markup selection and variant expansion.

use std::sync::LazyLock;

use pricelist_core::{
    EnrichedVariant, MarkupRule, NormalizedProduct, ProductKind, ProductMapping,
    ProductMappingTable, VariantDetail,
};
use regex::Regex;
use rust_decimal::Decimal;

/// Regions whose markup rules apply to this price list.
pub const ALLOWED_REGIONS: [&str; 2] = ["all", "spb_nn_kirov_penza"];

static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Product name without parenthesized groups, whitespace collapsed.
#[must_use]
pub fn base_name(name: &str) -> String {
    let stripped = PAREN_GROUP.replace_all(name, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Finds the category of `parsed_name`.
///
/// Exact match on the base name first, then the first key in table order
/// that contains the base name or is contained in it.
#[must_use]
pub fn resolve_category<'a>(
    table: &'a ProductMappingTable,
    parsed_name: &str,
) -> Option<&'a ProductMapping> {
    let base = base_name(parsed_name);
    if let Some(mapping) = table.get(&base) {
        return Some(mapping);
    }
    table
        .iter()
        .find(|(key, _)| base.contains(key) || key.contains(base.as_str()))
        .map(|(_, mapping)| mapping)
}

/// Markup rules valid for an allowed region and, when `coating` is given,
/// whose coating is part of it. Rule order is kept.
#[must_use]
pub fn applicable_markups<'a>(rules: &'a [MarkupRule], coating: Option<&str>) -> Vec<&'a MarkupRule> {
    rules
        .iter()
        .filter(|rule| ALLOWED_REGIONS.contains(&rule.region.as_str()))
        .filter(|rule| coating.is_none_or(|c| c.contains(rule.coating.as_str())))
        .collect()
}

/// Prices one normalized product.
///
/// Corrugated products yield exactly one unmarked variant. Standard products
/// yield one variant per applicable markup rule, filtered by their coating
/// when they carry one. A product without a category
/// yields nothing.
#[must_use]
pub fn expand(
    product: &NormalizedProduct,
    table: &ProductMappingTable,
    rules: &[MarkupRule],
) -> Vec<EnrichedVariant> {
    let Some(mapping) = resolve_category(table, &product.parsed_name) else {
        tracing::debug!(parsed_name = %product.parsed_name, "no category, product dropped");
        return Vec::new();
    };

    let base_price = Decimal::from(product.price);
    let variant = |markup: Decimal, detail: VariantDetail| EnrichedVariant {
        original_name: product.original_name.clone(),
        parsed_name: product.parsed_name.clone(),
        category_id: mapping.category_id.clone(),
        unit: mapping.unit.clone(),
        source_unit: product.unit.clone(),
        base_price: product.price,
        final_price: base_price + markup,
        markup,
        brand: product.brand.clone(),
        sheet: product.sheet.clone(),
        detail,
    };

    match &product.kind {
        ProductKind::Corrugated { thickness, coating } => vec![variant(
            Decimal::ZERO,
            VariantDetail::Corrugated {
                thickness: thickness.clone(),
                coating: coating.clone(),
            },
        )],
        ProductKind::Standard { coating } => applicable_markups(rules, coating.as_deref())
            .into_iter()
            .map(|rule| {
                variant(
                    rule.markup,
                    VariantDetail::Standard {
                        color: rule.color.clone(),
                        coating: rule.coating.clone(),
                        region: rule.region.clone(),
                        unit_markup: rule.unit_markup,
                    },
                )
            })
            .collect(),
    }
}

/// Expands every product, keeping product order and variant order.
#[must_use]
pub fn apply_business_rules(
    products: &[NormalizedProduct],
    table: &ProductMappingTable,
    rules: &[MarkupRule],
) -> Vec<EnrichedVariant> {
    products
        .iter()
        .flat_map(|product| expand(product, table, rules))
        .collect()
}
