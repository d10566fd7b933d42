//! Splitting of composite price cells such as `"738гл/775мп"`.

use std::sync::LazyLock;

use regex::Regex;

/// Leading digits, optional whitespace, then an optional letter suffix.
static PRICE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)\s*([a-zа-яё]*)").expect("valid regex")
});

static SLASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/+").expect("valid regex"));

/// One price recovered from a price cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceToken {
    pub price: u64,
    /// Lower-cased letter suffix, `None` when the token is digits only.
    pub brand: Option<String>,
}

impl PriceToken {
    #[must_use]
    pub fn new(price: u64, brand: Option<&str>) -> Self {
        Self {
            price,
            brand: brand.map(str::to_string),
        }
    }
}

/// Splits a price cell on runs of `/` into ordered [`PriceToken`]s.
///
/// Empty fragments and `"-"` are skipped, as are fragments that do not start
/// with a digit or whose digits overflow `u64`.
#[must_use]
pub fn split_prices(cell: &str) -> Vec<PriceToken> {
    SLASHES
        .split(cell)
        .map(str::trim)
        .filter(|part| !part.is_empty() && *part != "-")
        .filter_map(parse_token)
        .collect()
}

fn parse_token(part: &str) -> Option<PriceToken> {
    let caps = PRICE_TOKEN.captures(part)?;
    let price = caps.get(1)?.as_str().parse::<u64>().ok()?;
    let brand = caps
        .get(2)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    Some(PriceToken { price, brand })
}
