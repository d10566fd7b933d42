//! Row normalization: one spreadsheet row in, zero or more
//! [`NormalizedProduct`]s out.

use std::fmt;
use std::sync::LazyLock;

use pricelist_core::{NormalizedProduct, ProductKind, RawRow, Workbook};
use regex::Regex;

use crate::corrugated::{infer_thickness_coating, is_corrugated, parse_corrugated_price_cell};
use crate::names::{extract_individual_products, split_names};
use crate::prices::split_prices;

/// A price token carrying one of the known brand suffixes.
static BRAND_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(гл|мп|sf|оп|двс)").expect("valid regex"));

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Why a row produced no products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFewCells,
    EmptyName,
    EmptyPrice,
    DashPrice,
    NoDigits,
    PriceOverflow,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TooFewCells => "too_few_cells",
            Self::EmptyName => "empty_name",
            Self::EmptyPrice => "empty_price",
            Self::DashPrice => "dash_price",
            Self::NoDigits => "no_digits",
            Self::PriceOverflow => "price_overflow",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes every row of every sheet, in sheet order then row order.
///
/// Skipped rows are logged at DEBUG and do not affect their siblings.
#[must_use]
pub fn normalize_rows(workbook: &Workbook) -> Vec<NormalizedProduct> {
    let mut products = Vec::new();
    for sheet in &workbook.sheets {
        for (idx, row) in sheet.rows.iter().enumerate() {
            match normalize_row(&sheet.name, row) {
                Ok(mut normalized) => products.append(&mut normalized),
                Err(reason) => {
                    tracing::debug!(sheet = %sheet.name, row = idx + 1, %reason, "row skipped");
                }
            }
        }
    }
    products
}

/// Normalizes one row of `sheet`.
///
/// Only the first three cells are read: name, unit, price. The price cell
/// picks the path:
/// - branded tokens (`"738гл/775мп"`) on a corrugated name: thickness and
///   coating are inferred per token;
/// - branded tokens on any other name: one product per token;
/// - anything else: the first number is the price, shared by every name
///   extracted from the name cell.
///
/// Each product's kind follows its own parsed name. A corrugated name without
/// a thickness hint takes `("0,35", Цинк)`. A non-corrugated name split out of
/// a corrugated row stays standard but keeps the token's coating.
///
/// On the branded paths names and prices are aligned by position; price
/// tokens beyond the last name reuse the first name.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the row cannot yield any product.
pub fn normalize_row(sheet: &str, row: &RawRow) -> Result<Vec<NormalizedProduct>, SkipReason> {
    let [name, unit, price, ..] = row.cells.as_slice() else {
        return Err(SkipReason::TooFewCells);
    };
    let (name, unit, price) = (name.trim(), unit.trim(), price.trim());

    if name.is_empty() {
        return Err(SkipReason::EmptyName);
    }
    if price.is_empty() {
        return Err(SkipReason::EmptyPrice);
    }
    if price == "-" {
        return Err(SkipReason::DashPrice);
    }
    if !price.bytes().any(|b| b.is_ascii_digit()) {
        return Err(SkipReason::NoDigits);
    }

    let product = |parsed_name: String, price: u64, brand: Option<String>, kind: ProductKind| {
        NormalizedProduct {
            original_name: name.to_string(),
            parsed_name,
            unit: unit.to_string(),
            price,
            brand,
            sheet: sheet.to_string(),
            kind,
        }
    };

    if BRAND_SUFFIX.is_match(price) {
        if is_corrugated(name) {
            let names = extract_individual_products(name);
            return Ok(parse_corrugated_price_cell(price)
                .into_iter()
                .enumerate()
                .map(|(i, token)| {
                    let parsed = aligned_name(&names, i, name);
                    let coating = token.coating.label().to_string();
                    let kind = if is_corrugated(&parsed) {
                        ProductKind::Corrugated {
                            thickness: token.thickness.to_string(),
                            coating,
                        }
                    } else {
                        ProductKind::Standard {
                            coating: Some(coating),
                        }
                    };
                    product(parsed, token.price, token.brand, kind)
                })
                .collect());
        }

        let names = split_names(name);
        return Ok(split_prices(price)
            .into_iter()
            .enumerate()
            .map(|(i, token)| {
                let parsed = aligned_name(&names, i, name);
                let kind = kind_for(&parsed, token.price);
                product(parsed, token.price, token.brand, kind)
            })
            .collect());
    }

    let value = DIGITS
        .find(price)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or(SkipReason::PriceOverflow)?;

    Ok(extract_individual_products(name)
        .into_iter()
        .map(|parsed| {
            let kind = kind_for(&parsed, value);
            product(parsed, value, None, kind)
        })
        .collect())
}

/// Kind of a product whose price token carries no thickness hint.
/// Corrugated names get the default table entry.
fn kind_for(parsed_name: &str, price: u64) -> ProductKind {
    if is_corrugated(parsed_name) {
        let (thickness, coating) = infer_thickness_coating(None, price);
        ProductKind::Corrugated {
            thickness: thickness.to_string(),
            coating: coating.label().to_string(),
        }
    } else {
        ProductKind::standard()
    }
}

/// Name at position `i`, else the first name, else the raw cell.
fn aligned_name(names: &[String], i: usize, raw: &str) -> String {
    names
        .get(i)
        .or_else(|| names.first())
        .map_or_else(|| raw.to_string(), Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        RawRow::new(cells.iter().copied())
    }

    fn normalize(cells: &[&str]) -> Vec<NormalizedProduct> {
        normalize_row("Лист1", &row(cells)).expect("row should normalize")
    }

    #[test]
    fn corrugated_single_token() {
        let products = normalize(&["Профнастил С-8", "м2", "362sf"]);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.parsed_name, "Профнастил С-8");
        assert_eq!(p.price, 362);
        assert_eq!(p.brand.as_deref(), Some("sf"));
        assert_eq!(p.thickness(), Some("0,3"));
        assert_eq!(p.coating(), Some("Цинк"));
        assert_eq!(p.sheet, "Лист1");
    }

    #[test]
    fn corrugated_excess_prices_reuse_first_name() {
        let products = normalize(&["МП-10", "м2", "399оп//439гл/421мп"]);
        let summary: Vec<_> = products
            .iter()
            .map(|p| (p.parsed_name.as_str(), p.price, p.thickness()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("МП-10", 399, Some("Оп")),
                ("МП-10", 439, Some("0,4")),
                ("МП-10", 421, Some("0,4")),
            ]
        );
    }

    #[test]
    fn corrugated_names_align_by_position() {
        let products = normalize(&[
            "Профнастил GL-10 (1180,1150),C10(1154,1100)sf",
            "м2",
            "410sf/395sf",
        ]);
        let names: Vec<_> = products.iter().map(|p| p.parsed_name.as_str()).collect();
        assert_eq!(names, vec!["Профнастил GL-10 (1180,1150)", "C10(1154,1100)sf"]);
        assert!(products.iter().all(NormalizedProduct::is_corrugated));
    }

    #[test]
    fn standard_branded_row_yields_one_product_per_price() {
        let products = normalize(&["Кредо GL", "м2", "738гл/775мп"]);
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.parsed_name == "Кредо GL"));
        assert_eq!(products[0].price, 738);
        assert_eq!(products[0].brand.as_deref(), Some("гл"));
        assert_eq!(products[1].price, 775);
        assert_eq!(products[1].brand.as_deref(), Some("мп"));
        assert!(products.iter().all(|p| !p.is_corrugated()));
    }

    #[test]
    fn standard_branded_row_aligns_split_names() {
        let products = normalize(&["Кредо GL//Монтекристо S", "м2", "738гл/775мп/800мп"]);
        let names: Vec<_> = products.iter().map(|p| p.parsed_name.as_str()).collect();
        assert_eq!(names, vec!["Кредо GL", "Монтекристо S", "Кредо GL"]);
    }

    #[test]
    fn corrugated_name_with_plain_price_takes_default_thickness() {
        let products = normalize(&["Профнастил С-20", "м2", "450"]);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.price, 450);
        assert!(p.brand.is_none());
        assert_eq!(p.thickness(), Some("0,35"));
        assert_eq!(p.coating(), Some("Цинк"));
    }

    #[test]
    fn non_corrugated_name_in_corrugated_row_is_standard_with_coating() {
        let products = normalize(&[
            "Профнастил С-21 (1051,1000), Кредо(1190,1125)",
            "м2",
            "420гл/430гл",
        ]);
        assert_eq!(products.len(), 2);
        assert!(products[0].is_corrugated());
        assert_eq!(products[0].parsed_name, "Профнастил С-21 (1051,1000)");

        let kredo = &products[1];
        assert_eq!(kredo.parsed_name, "Кредо(1190,1125)");
        assert!(!kredo.is_corrugated());
        assert_eq!(kredo.coating(), Some("Полиэстер"));
    }

    #[test]
    fn plain_price_takes_first_number_for_every_name() {
        let products = normalize(&[
            "Квинта+GL(1210,1150)/ Трамонтана S МП(1195,1155)",
            "м2",
            "от 640 до 700 руб",
        ]);
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.price == 640 && p.brand.is_none()));
        assert_eq!(products[1].parsed_name, "Трамонтана S МП(1195,1155)");
    }

    #[test]
    fn uppercase_suffix_is_not_a_branded_price() {
        // The suffix check is case-sensitive; "362SF" takes the plain path.
        let products = normalize(&["Профнастил С-8", "м2", "362SF"]);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].thickness(), Some("0,35"));
        assert!(products[0].brand.is_none());
    }

    #[test]
    fn cells_are_trimmed_and_extra_cells_ignored() {
        let products = normalize(&["  Кредо GL ", " м2 ", " 700 ", "примечание"]);
        assert_eq!(products[0].original_name, "Кредо GL");
        assert_eq!(products[0].unit, "м2");
        assert_eq!(products[0].price, 700);
    }

    #[test]
    fn skip_reasons() {
        let cases: [(&[&str], SkipReason); 6] = [
            (&["Кредо GL", "м2"], SkipReason::TooFewCells),
            (&["  ", "м2", "700"], SkipReason::EmptyName),
            (&["Кредо GL", "м2", ""], SkipReason::EmptyPrice),
            (&["Кредо GL", "м2", "-"], SkipReason::DashPrice),
            (&["Кредо GL", "м2", "по запросу"], SkipReason::NoDigits),
            (
                &["Кредо GL", "м2", "99999999999999999999999"],
                SkipReason::PriceOverflow,
            ),
        ];
        for (cells, expected) in cases {
            assert_eq!(normalize_row("s", &row(cells)), Err(expected), "{cells:?}");
        }
    }

    #[test]
    fn skipped_rows_do_not_affect_siblings() {
        let mut workbook = Workbook::default();
        workbook.push_sheet(
            "Лист1",
            [
                row(&["Кредо GL", "м2", "700"]),
                row(&["Монтекристо S", "м2", "-"]),
                row(&["Камея GL", "м2", "нет"]),
                row(&["Классик GL", "м2", "650"]),
            ],
        );
        workbook.push_sheet("Лист2", [row(&["Профнастил С-8", "м2", "362sf"])]);

        let products = normalize_rows(&workbook);
        let names: Vec<_> = products.iter().map(|p| p.parsed_name.as_str()).collect();
        assert_eq!(names, vec!["Кредо GL", "Классик GL", "Профнастил С-8"]);
        assert_eq!(products[2].sheet, "Лист2");
    }

    #[test]
    fn parsed_name_is_never_empty() {
        let cells = [
            "//", "/ ", ",", "Х(", "(((", "Кредо GL//", "a,Б(", "Ё Х Ё(1,2) Ё(3,4)",
        ];
        for name in cells {
            for price in ["700", "400гл/500мп", "362sf"] {
                if let Ok(products) = normalize_row("s", &row(&[name, "м2", price])) {
                    assert!(
                        products.iter().all(|p| !p.parsed_name.is_empty()),
                        "{name:?} / {price:?}"
                    );
                }
            }
        }
    }
}
