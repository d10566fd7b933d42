//! Corrugated sheet ("профнастил") detection and thickness/coating inference.

use crate::prices::split_prices;

/// Substrings of a lower-cased name that mark a corrugated sheet product.
/// `"c10"` is spelled with a Latin `c`.
const CORRUGATED_KEYWORDS: &[&str] = &[
    "профнастил",
    "плоский лист",
    "мп-10",
    "с-8",
    "с-20",
    "с-21",
    "с-44",
    "нс-35",
    "gl-10",
    "c10",
];

/// Roofing families that are never corrugated sheet.
const KNOWN_FAMILIES: &[&str] = &[
    "кредо",
    "монтекристо",
    "классик",
    "модерн",
    "квадро",
    "камея",
    "квинта",
    "ламонтерра",
    "трамонтана",
];

/// Outcome of matching a product name against the keyword lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    Corrugated,
    /// A known non-corrugated roofing family.
    KnownFamily,
    Unknown,
}

/// Classifies `name` by case-insensitive substring match. Corrugated keywords
/// take priority over family keywords.
#[must_use]
pub fn classify(name: &str) -> NameClass {
    let lower = name.to_lowercase();
    if CORRUGATED_KEYWORDS.iter().any(|k| lower.contains(k)) {
        NameClass::Corrugated
    } else if KNOWN_FAMILIES.iter().any(|k| lower.contains(k)) {
        NameClass::KnownFamily
    } else {
        NameClass::Unknown
    }
}

/// Closed world: only names with a corrugated keyword are corrugated.
#[must_use]
pub fn is_corrugated(name: &str) -> bool {
    classify(name) == NameClass::Corrugated
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coating {
    Zinc,
    Polyester,
}

impl Coating {
    /// Label used in catalog output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Zinc => "Цинк",
            Self::Polyester => "Полиэстер",
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Zinc => "Zn",
            Self::Polyester => "PE",
        }
    }
}

/// One entry of the corrugated sheet thickness table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThicknessCoating {
    pub key: &'static str,
    pub thickness: &'static str,
    pub coating: Coating,
}

const fn entry(key: &'static str, thickness: &'static str, coating: Coating) -> ThicknessCoating {
    ThicknessCoating {
        key,
        thickness,
        coating,
    }
}

/// Every (thickness, coating) pair the inferencer can produce.
pub const THICKNESS_TABLE: [ThicknessCoating; 14] = [
    entry("zn_0.3", "0,3", Coating::Zinc),
    entry("zn_0.35", "0,35", Coating::Zinc),
    entry("zn_0.4", "0,4", Coating::Zinc),
    entry("zn_0.45", "0,45", Coating::Zinc),
    entry("zn_0.5", "0,5", Coating::Zinc),
    entry("zn_0.55", "0,55", Coating::Zinc),
    entry("zn_0.6", "0,6", Coating::Zinc),
    entry("pe_op", "Оп", Coating::Polyester),
    entry("pe_0.35", "0,35", Coating::Polyester),
    entry("pe_0.4", "0,4", Coating::Polyester),
    entry("pe_0.45", "0,45", Coating::Polyester),
    entry("pe_0.5", "0,5", Coating::Polyester),
    entry("pe_0.4_dvs", "0,4двс", Coating::Polyester),
    entry("pe_0.45_dvs", "0,45двс", Coating::Polyester),
];

const DEFAULT: ThicknessCoating = THICKNESS_TABLE[1];

/// Bucket upper bounds (exclusive) for `sf` zinc sheet.
const SF_BUCKETS: [(u64, &str); 5] = [
    (380, "0,3"),
    (400, "0,35"),
    (450, "0,4"),
    (500, "0,45"),
    (550, "0,5"),
];
const SF_TOP: &str = "0,55";

/// Bucket upper bounds (exclusive) for `гл`/`мп` polyester sheet.
const POLYESTER_BUCKETS: [(u64, &str); 3] = [(400, "0,35"), (450, "0,4"), (500, "0,45")];
const POLYESTER_TOP: &str = "0,5";

fn bucket(price: u64, buckets: &[(u64, &'static str)], top: &'static str) -> &'static str {
    buckets
        .iter()
        .find(|(bound, _)| price < *bound)
        .map_or(top, |&(_, thickness)| thickness)
}

/// Maps a brand suffix and price onto a thickness table entry.
///
/// Total over all inputs: an absent or unrecognized brand yields
/// `("0,35", Цинк)`.
#[must_use]
pub fn infer_thickness_coating(brand: Option<&str>, price: u64) -> (&'static str, Coating) {
    let Some(brand) = brand else {
        return (DEFAULT.thickness, DEFAULT.coating);
    };
    let brand = brand.to_lowercase();

    match brand.as_str() {
        "оп" | "op" => ("Оп", Coating::Polyester),
        "sf" => (bucket(price, &SF_BUCKETS, SF_TOP), Coating::Zinc),
        "гл" | "gl" | "мп" | "mp" => (
            bucket(price, &POLYESTER_BUCKETS, POLYESTER_TOP),
            Coating::Polyester,
        ),
        b if b.contains("двс") || b.contains("dvs") => {
            let thickness = if b.contains("0.4") || price < 550 {
                "0,4двс"
            } else {
                "0,45двс"
            };
            (thickness, Coating::Polyester)
        }
        _ => (DEFAULT.thickness, DEFAULT.coating),
    }
}

/// A price token of a corrugated row with its inferred attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrugatedPrice {
    pub price: u64,
    pub brand: Option<String>,
    pub thickness: &'static str,
    pub coating: Coating,
}

/// Splits a corrugated row's price cell and infers thickness/coating for
/// every token, preserving order.
#[must_use]
pub fn parse_corrugated_price_cell(cell: &str) -> Vec<CorrugatedPrice> {
    split_prices(cell)
        .into_iter()
        .map(|token| {
            let (thickness, coating) = infer_thickness_coating(token.brand.as_deref(), token.price);
            CorrugatedPrice {
                price: token.price,
                brand: token.brand,
                thickness,
                coating,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_table(thickness: &str, coating: Coating) -> bool {
        THICKNESS_TABLE
            .iter()
            .any(|e| e.thickness == thickness && e.coating == coating)
    }

    // -----------------------------------------------------------------------
    // classify / is_corrugated
    // -----------------------------------------------------------------------

    #[test]
    fn corrugated_keywords_match() {
        assert!(is_corrugated("Профнастил С-8"));
        assert!(is_corrugated("С-20 оцинкованный"));
        assert!(is_corrugated("МП-10"));
        assert!(is_corrugated("Плоский лист"));
        assert!(is_corrugated("C10(1154,1100)sf"));
        assert!(is_corrugated("Профнастил GL-10"));
    }

    #[test]
    fn known_families_are_not_corrugated() {
        assert!(!is_corrugated("Кредо GL"));
        assert!(!is_corrugated("Ламонтерра Х МП"));
        assert_eq!(classify("Кредо GL"), NameClass::KnownFamily);
        assert_eq!(classify("Трамонтана S МП"), NameClass::KnownFamily);
    }

    #[test]
    fn unknown_names_are_not_corrugated() {
        assert_eq!(classify("Водосток"), NameClass::Unknown);
        assert!(!is_corrugated("Водосток"));
        assert!(!is_corrugated(""));
    }

    #[test]
    fn corrugated_keyword_wins_over_family_keyword() {
        assert_eq!(classify("Кредо профнастил"), NameClass::Corrugated);
    }

    #[test]
    fn cyrillic_c_ten_is_not_the_latin_keyword() {
        // "С10" with a Cyrillic С does not match "c10".
        assert_eq!(classify("С10"), NameClass::Unknown);
    }

    // -----------------------------------------------------------------------
    // infer_thickness_coating
    // -----------------------------------------------------------------------

    #[test]
    fn absent_brand_defaults_to_zinc_035() {
        assert_eq!(infer_thickness_coating(None, 999), ("0,35", Coating::Zinc));
    }

    #[test]
    fn op_brand_is_polyester_op() {
        assert_eq!(infer_thickness_coating(Some("оп"), 399), ("Оп", Coating::Polyester));
        assert_eq!(infer_thickness_coating(Some("OP"), 10), ("Оп", Coating::Polyester));
    }

    #[test]
    fn sf_buckets() {
        let cases = [
            (0, "0,3"),
            (379, "0,3"),
            (380, "0,35"),
            (399, "0,35"),
            (400, "0,4"),
            (449, "0,4"),
            (450, "0,45"),
            (499, "0,45"),
            (500, "0,5"),
            (549, "0,5"),
            (550, "0,55"),
            (u64::MAX, "0,55"),
        ];
        for (price, expected) in cases {
            assert_eq!(
                infer_thickness_coating(Some("sf"), price),
                (expected, Coating::Zinc),
                "price {price}"
            );
        }
    }

    #[test]
    fn gl_and_mp_share_buckets() {
        let cases = [
            (399, "0,35"),
            (400, "0,4"),
            (449, "0,4"),
            (450, "0,45"),
            (499, "0,45"),
            (500, "0,5"),
        ];
        for brand in ["гл", "gl", "мп", "mp"] {
            for (price, expected) in cases {
                assert_eq!(
                    infer_thickness_coating(Some(brand), price),
                    (expected, Coating::Polyester),
                    "brand {brand} price {price}"
                );
            }
        }
    }

    #[test]
    fn dvs_thickness_depends_on_price() {
        assert_eq!(
            infer_thickness_coating(Some("двс"), 549),
            ("0,4двс", Coating::Polyester)
        );
        assert_eq!(
            infer_thickness_coating(Some("двс"), 550),
            ("0,45двс", Coating::Polyester)
        );
        assert_eq!(
            infer_thickness_coating(Some("dvs0.4"), 900),
            ("0,4двс", Coating::Polyester)
        );
    }

    #[test]
    fn unrecognized_brand_defaults_to_zinc_035() {
        assert_eq!(infer_thickness_coating(Some("xyz"), 700), ("0,35", Coating::Zinc));
        assert_eq!(infer_thickness_coating(Some(""), 700), ("0,35", Coating::Zinc));
    }

    #[test]
    fn inference_is_total_and_stays_in_table() {
        let brands = [
            None,
            Some("оп"),
            Some("op"),
            Some("sf"),
            Some("гл"),
            Some("gl"),
            Some("мп"),
            Some("mp"),
            Some("двс"),
            Some("dvs"),
            Some("zz"),
            Some("ёж"),
        ];
        for brand in brands {
            for price in (0..1200).step_by(7).chain([u64::MAX]) {
                let (thickness, coating) = infer_thickness_coating(brand, price);
                assert!(
                    in_table(thickness, coating),
                    "{brand:?}/{price} -> {thickness} {coating:?}"
                );
            }
        }
    }

    #[test]
    fn coating_labels_and_codes() {
        assert_eq!(Coating::Zinc.label(), "Цинк");
        assert_eq!(Coating::Polyester.label(), "Полиэстер");
        assert_eq!(Coating::Zinc.code(), "Zn");
        assert_eq!(Coating::Polyester.code(), "PE");
    }

    // -----------------------------------------------------------------------
    // parse_corrugated_price_cell
    // -----------------------------------------------------------------------

    #[test]
    fn corrugated_cell_single_token() {
        let parsed = parse_corrugated_price_cell("362sf");
        assert_eq!(
            parsed,
            vec![CorrugatedPrice {
                price: 362,
                brand: Some("sf".to_string()),
                thickness: "0,3",
                coating: Coating::Zinc,
            }]
        );
    }

    #[test]
    fn corrugated_cell_preserves_token_order() {
        let parsed = parse_corrugated_price_cell("399оп//439гл/421мп");
        let summary: Vec<_> = parsed
            .iter()
            .map(|p| (p.price, p.thickness, p.coating))
            .collect();
        assert_eq!(
            summary,
            vec![
                (399, "Оп", Coating::Polyester),
                (439, "0,4", Coating::Polyester),
                (421, "0,4", Coating::Polyester),
            ]
        );
    }
}
