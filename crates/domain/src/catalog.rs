//! Static nominee catalog.
//!
//! The catalog is an immutable, versioned, read-only lookup table keyed by
//! short string identifiers. It is injected as a dependency, never part of
//! the mutable data model: setup copies names out of it, and results map
//! persisted names back to it.

use serde::Serialize;

/// One selectable category and its nominees in display order.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogCategory {
    pub key: String,
    pub name: String,
    /// Display-order hint. Categories without one sort after those with one,
    /// in selection order.
    pub sort_order: Option<u32>,
    pub nominees: Vec<String>,
}

/// A versioned, read-only catalog of categories.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    categories: Vec<CatalogCategory>,
}

impl Catalog {
    pub fn new(version: impl Into<String>, categories: Vec<CatalogCategory>) -> Self {
        Self {
            version: version.into(),
            categories,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn find_by_key(&self, key: &str) -> Option<&CatalogCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Maps a persisted category name back to its catalog key.
    pub fn key_for_name(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.key.as_str())
    }

    /// Resolves a selection of keys into catalog categories, ordered by the
    /// catalog's sort_order hint when present, else by catalog position.
    /// Unknown keys are dropped.
    pub fn select(&self, keys: &[String]) -> Vec<&CatalogCategory> {
        let mut selected: Vec<(usize, &CatalogCategory)> = self
            .categories
            .iter()
            .enumerate()
            .filter(|(_, c)| keys.iter().any(|k| *k == c.key))
            .collect();
        selected.sort_by_key(|(idx, c)| (c.sort_order.unwrap_or(u32::MAX), *idx));
        selected.into_iter().map(|(_, c)| c).collect()
    }
}

lazy_static::lazy_static! {
    /// Built-in demo awards catalog.
    pub static ref AWARDS_CATALOG: Catalog = Catalog::new(
        "awards-2026",
        vec![
            CatalogCategory {
                key: "best_picture".into(),
                name: "Best Picture".into(),
                sort_order: Some(1),
                nominees: vec![
                    "Nominee A".into(),
                    "Nominee B".into(),
                    "Nominee C".into(),
                    "Nominee D".into(),
                    "Nominee E".into(),
                ],
            },
            CatalogCategory {
                key: "best_director".into(),
                name: "Best Director".into(),
                sort_order: Some(2),
                nominees: vec![
                    "Nominee A".into(),
                    "Nominee B".into(),
                    "Nominee C".into(),
                    "Nominee D".into(),
                    "Nominee E".into(),
                ],
            },
            CatalogCategory {
                key: "best_actor".into(),
                name: "Best Actor".into(),
                sort_order: Some(3),
                nominees: vec![
                    "Nominee A".into(),
                    "Nominee B".into(),
                    "Nominee C".into(),
                    "Nominee D".into(),
                    "Nominee E".into(),
                ],
            },
            CatalogCategory {
                key: "best_actress".into(),
                name: "Best Actress".into(),
                sort_order: Some(4),
                nominees: vec![
                    "Nominee A".into(),
                    "Nominee B".into(),
                    "Nominee C".into(),
                    "Nominee D".into(),
                    "Nominee E".into(),
                ],
            },
        ],
    );
}
