//! Splitting of composite product-name cells.
//!
//! Price lists often pack several products into one name cell:
//! `"Кредо GL(1190,1125)//Монтекристо S"`, `"Профнастил С-21 (1051,1000), С-44(1047,1000)"`.
//! The `regex` crate has no look-around, so "split here if the text after the
//! delimiter looks like a new product" is done by scanning delimiter positions
//! and testing an anchored pattern against the remainder.

use std::sync::LazyLock;

use regex::Regex;

/// Capitalized product name after a comma: `"Монтекристо S"`, `"Кредо-Люкс(…)"`.
static CAPITALIZED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-ZА-ЯЁ][a-zа-яё\s\-+]+(?:\([^)]+\))?").expect("valid regex")
});

/// Slash + whitespace directly before a capital letter.
static SLASH_BEFORE_CAPITAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\s+[A-ZА-ЯЁ]").expect("valid regex"));

static SLASH_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\s+").expect("valid regex"));

/// Product code with coordinates after a comma: `"C10("`, `"С-44("`.
static NAME_WITH_PAREN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[А-ЯЁC][А-Яа-яё0-9\-+]*\s*\(").expect("valid regex")
});

/// `"Ламонтерра Х МП("`: the "Х"-suffixed sibling of a base product.
static X_SIBLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\s+Х\s+\w+\s*\(").expect("valid regex"));

/// Two adjacent names, each with its own parenthesized coordinate group.
static TWO_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([А-ЯЁ][а-яё\s\-+]*\([^)]+\))\s+([А-ЯЁ][а-яё\s\-+]*\([^)]+\))")
        .expect("valid regex")
});

static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]+\)").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Cyrillic capital Ha, used as a variant marker in product names.
const X_MARKER: char = 'Х';

/// Splits a composite product-name cell into individual product names.
///
/// Strategies, first match wins:
/// 1. `"//"` anywhere in the cell.
/// 2. A comma followed by a capitalized product name.
/// 3. The compound-name heuristics of [`extract_individual_products`], when
///    they yield more than one name.
///
/// Fragments are trimmed and empty fragments dropped. Never returns an empty
/// list: the trimmed cell is the fallback.
#[must_use]
pub fn split_names(cell: &str) -> Vec<String> {
    if cell.contains("//") {
        return collect_fragments(cell.split("//"), cell);
    }

    let by_comma = split_before_comma(cell, |rest| CAPITALIZED_NAME.is_match(rest));
    if by_comma.len() > 1 {
        return collect_fragments(by_comma, cell);
    }

    if let Some(names) = split_compound(&collapse_whitespace(cell)) {
        if names.len() > 1 {
            return names;
        }
    }

    vec![cell.trim().to_string()]
}

/// Extracts individual products from a compound name, the path used for
/// corrugated sheet rows and rows with a single plain price.
///
/// Whitespace is collapsed first. Then, first match wins:
/// - `"/ "` before a capital letter: split on every slash + whitespace;
/// - a comma before a product code with coordinates (`"…,C10(1154,1100)sf"`);
/// - a base product followed by its `"Х"` sibling, both with coordinates;
/// - two adjacent names with coordinates whose base names differ (or the cell
///   mentions `"Х"`): only the two matched names are kept;
/// - `"//"`.
///
/// Never returns an empty list.
#[must_use]
pub fn extract_individual_products(cell: &str) -> Vec<String> {
    let collapsed = collapse_whitespace(cell);

    if let Some(names) = split_compound(&collapsed) {
        return names;
    }

    if collapsed.contains("//") {
        return collect_fragments(collapsed.split("//"), &collapsed);
    }

    vec![collapsed]
}

/// The coordinate-aware heuristics shared by both public entry points.
/// `s` must already be whitespace-collapsed.
fn split_compound(s: &str) -> Option<Vec<String>> {
    if SLASH_BEFORE_CAPITAL.is_match(s) {
        return Some(collect_fragments(SLASH_SPACE.split(s), s));
    }

    let by_comma = split_before_comma(s, |rest| NAME_WITH_PAREN.is_match(rest));
    if by_comma.len() > 1 {
        return Some(collect_fragments(by_comma, s));
    }

    if s.contains(X_MARKER) && s.contains('(') {
        let parts = split_before_whitespace(s, |rest| X_SIBLING.is_match(rest));
        if parts.len() == 2 {
            return Some(collect_fragments(parts, s));
        }
    }

    let caps = TWO_NAMES.captures(s)?;
    let first = caps.get(1)?.as_str().trim();
    let second = caps.get(2)?.as_str().trim();
    if base_name(first) != base_name(second) || s.contains(X_MARKER) {
        return Some(vec![first.to_string(), second.to_string()]);
    }

    None
}

/// Splits at every comma whose following text (leading whitespace skipped)
/// satisfies `starts_product`. The comma and that whitespace are dropped.
fn split_before_comma<F>(s: &str, starts_product: F) -> Vec<&str>
where
    F: Fn(&str) -> bool,
{
    let mut parts = Vec::new();
    let mut start = 0usize;
    for (pos, _) in s.match_indices(',') {
        let rest = s[pos + 1..].trim_start();
        if starts_product(rest) {
            parts.push(&s[start..pos]);
            start = s.len() - rest.len();
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Splits at every whitespace run whose following text satisfies
/// `starts_product`. The whitespace run is dropped.
fn split_before_whitespace<F>(s: &str, starts_product: F) -> Vec<&str>
where
    F: Fn(&str) -> bool,
{
    let mut parts = Vec::new();
    let mut start = 0usize;
    for run in WHITESPACE.find_iter(s) {
        if starts_product(&s[run.end()..]) {
            parts.push(&s[start..run.start()]);
            start = run.end();
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Name with its coordinate group removed. Names matched by [`TWO_NAMES`]
/// end with their only group, so the prefix before it is the base.
fn base_name(name: &str) -> &str {
    PAREN_GROUP
        .find(name)
        .map_or(name, |m| name[..m.start()].trim())
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

fn collect_fragments<'a, I>(parts: I, fallback: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<String> = parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        vec![fallback.trim().to_string()]
    } else {
        names
    }
}
