//! Static lookup tables used when the catalog store cannot be reached.
//! They double as the initial catalog written by `db seed`.

use pricelist_core::{MarkupRule, ProductMapping, ProductMappingTable};
use rust_decimal::Decimal;

/// Bumped whenever either fallback table changes.
pub const FALLBACK_TABLE_VERSION: &str = "2024-06-01";

const DEFAULT_UNIT: &str = "м2";

const FALLBACK_CATEGORIES: [(&str, &str); 20] = [
    ("Кредо GL", "1156"),
    ("Монтекристо S", "1157"),
    ("Классик GL", "1158"),
    ("Модерн GL", "1159"),
    ("Квадро Профи GL", "1160"),
    ("Ламонтерра МП", "1161"),
    ("Ламонтерра Х МП", "1162"),
    ("Камея GL", "1163"),
    ("Квинта+GL", "1164"),
    ("Трамонтана S МП", "1165"),
    ("Профнастил С-8", "2001"),
    ("МП-10", "2002"),
    ("Профнастил GL-10", "2003"),
    ("C10", "2004"),
    ("Профнастил С10 фигурный", "2005"),
    ("Профнастил С-20", "2006"),
    ("Профнастил С-21", "2007"),
    ("С-44", "2008"),
    ("Профнастил НС-35", "2009"),
    ("Плоский лист", "2010"),
];

/// (color, coating, region, markup, unit markup), amounts in hundredths.
const FALLBACK_MARKUPS: [(&str, &str, &str, i64, i64); 5] = [
    ("1015", "PE 0,45", "spb_nn_kirov_penza", 700, 70),
    ("1018", "Satin", "all", 5000, 500),
    ("standard", "PE 0,45 двс", "all", 5000, 500),
    ("standard", "PE 0,7", "all", 5000, 500),
    ("standard", "PE 0,8", "all", 5500, 550),
];

#[must_use]
pub fn fallback_product_mapping() -> ProductMappingTable {
    FALLBACK_CATEGORIES
        .iter()
        .map(|&(name, category_id)| (name, ProductMapping::new(category_id, DEFAULT_UNIT)))
        .collect()
}

#[must_use]
pub fn fallback_markup_rules() -> Vec<MarkupRule> {
    FALLBACK_MARKUPS
        .iter()
        .map(|&(color, coating, region, markup, unit_markup)| MarkupRule {
            color: color.to_string(),
            coating: coating.to_string(),
            region: region.to_string(),
            markup: Decimal::new(markup, 2),
            unit_markup: Decimal::new(unit_markup, 2),
        })
        .collect()
}
