//! Lookup tables joined against normalized products: product-name →
//! category mapping and the markup rule list.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category and canonical unit for a base product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMapping {
    pub category_id: String,
    pub unit: String,
}

impl ProductMapping {
    #[must_use]
    pub fn new(category_id: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            unit: unit.into(),
        }
    }
}

/// Product name → [`ProductMapping`] table with a stable iteration order.
///
/// Iteration order is insertion order. Substring resolution walks the table
/// in this order and returns the first hit, so the order is part of the
/// observable behavior. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductMappingTable {
    entries: Vec<(String, ProductMapping)>,
    index: HashMap<String, usize>,
}

impl ProductMappingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, mapping: ProductMapping) {
        let name = name.into();
        if let Some(&pos) = self.index.get(&name) {
            self.entries[pos].1 = mapping;
        } else {
            self.index.insert(name.clone(), self.entries.len());
            self.entries.push((name, mapping));
        }
    }

    /// Exact-key lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProductMapping> {
        self.index.get(name).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProductMapping)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ProductMapping)> for ProductMappingTable {
    fn from_iter<T: IntoIterator<Item = (K, ProductMapping)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (name, mapping) in iter {
            table.insert(name, mapping);
        }
        table
    }
}

/// A color/coating price markup and the region it is valid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupRule {
    pub color: String,
    pub coating: String,
    /// `"all"` or a named regional scope such as `"spb_nn_kirov_penza"`.
    pub region: String,
    /// Added to the base price of the variant.
    pub markup: Decimal,
    pub unit_markup: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_preserves_insertion_order() {
        let table: ProductMappingTable = [
            ("Кредо GL", ProductMapping::new("1156", "м2")),
            ("Акцент", ProductMapping::new("1", "м2")),
            ("Ярус", ProductMapping::new("2", "шт")),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Кредо GL", "Акцент", "Ярус"]);
    }

    #[test]
    fn duplicate_key_replaces_value_but_keeps_position() {
        let mut table = ProductMappingTable::new();
        table.insert("A", ProductMapping::new("1", "м2"));
        table.insert("B", ProductMapping::new("2", "м2"));
        table.insert("A", ProductMapping::new("3", "шт"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("A"), Some(&ProductMapping::new("3", "шт")));
        assert_eq!(table.iter().next().map(|(k, _)| k), Some("A"));
    }

    #[test]
    fn get_is_exact_match_only() {
        let mut table = ProductMappingTable::new();
        table.insert("Кредо GL", ProductMapping::new("1156", "м2"));
        assert!(table.get("Кредо").is_none());
        assert!(table.get("кредо gl").is_none());
        assert!(table.get("Кредо GL").is_some());
    }
}
