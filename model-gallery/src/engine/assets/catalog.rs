use bevy::prelude::*;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Label of the wildcard category. Never stored in a catalog.
pub const ALL_CATEGORIES_LABEL: &str = "All";

/// One portfolio entry: a 3D asset locator plus its display metadata.
/// Field names mirror the JSON catalog (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub file_name: String,
    pub category: String,
    pub tags: Vec<String>,
    pub thumbnail_url: String,
    pub model_url: String,
    pub date_created: NaiveDate,
    #[serde(default)]
    pub featured: bool,
}

impl ModelRecord {
    /// Creation date in the en-US short form, e.g. `1/15/2024`.
    pub fn localized_date(&self) -> String {
        self.date_created.format("%-m/%-d/%Y").to_string()
    }
}

/// Complete model catalog as a Bevy asset. Mirrors the JSON structure exactly.
/// Inserted as a read-only resource once it has loaded and validated.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub models: Vec<ModelRecord>,
}

/// Aggregate values shown in the gallery header. Always derived from the
/// full catalog, never from the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub categories: usize,
    pub featured: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog asset could not be loaded: {0}")]
    Unavailable(String),
    #[error("duplicate model id '{0}'")]
    DuplicateId(String),
    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),
    #[error("category labels must not be empty")]
    EmptyCategory,
    #[error("'All' is reserved for the wildcard filter")]
    ReservedCategory,
    #[error("model '{id}' uses unknown category '{category}'")]
    UnknownCategory { id: String, category: String },
}

impl Catalog {
    /// Check the invariants the gallery relies on: unique ids, unique
    /// non-reserved categories, and every record filed under a listed category.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut categories = HashSet::new();
        for category in &self.categories {
            if category.is_empty() {
                return Err(CatalogError::EmptyCategory);
            }
            if category == ALL_CATEGORIES_LABEL {
                return Err(CatalogError::ReservedCategory);
            }
            if !categories.insert(category.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.clone()));
            }
        }

        let mut ids = HashSet::new();
        for model in &self.models {
            if !ids.insert(model.id.as_str()) {
                return Err(CatalogError::DuplicateId(model.id.clone()));
            }
            if !categories.contains(model.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    id: model.id.clone(),
                    category: model.category.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ModelRecord> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.models.len(),
            categories: self.categories.len(),
            featured: self.models.iter().filter(|m| m.featured).count(),
        }
    }

    /// Filters offered by the category selector: the wildcard first, then
    /// every category in catalog order.
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(self.categories.iter().cloned().map(CategoryFilter::Only))
            .collect()
    }

    /// Resolve a selector label ("All" or a catalog category).
    pub fn parse_category(&self, label: &str) -> Option<CategoryFilter> {
        if label == ALL_CATEGORIES_LABEL {
            return Some(CategoryFilter::All);
        }
        self.categories
            .iter()
            .find(|c| c.as_str() == label)
            .map(|c| CategoryFilter::Only(c.clone()))
    }
}

/// Category selection: the wildcard or one catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_LABEL,
            Self::Only(category) => category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SHIPPED_CATALOG: &str =
        include_str!("../../../assets/catalog/portfolio.catalog.json");

    pub(crate) fn shipped_catalog() -> Catalog {
        serde_json::from_str(SHIPPED_CATALOG).expect("shipped catalog parses")
    }

    pub(crate) fn record(id: &str, name: &str, category: &str, tags: &[&str]) -> ModelRecord {
        ModelRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            file_name: format!("{id}.glb"),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            thumbnail_url: String::new(),
            model_url: format!("models/{id}.glb"),
            date_created: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
            featured: false,
        }
    }

    #[test]
    fn test_shipped_catalog_is_valid() {
        let catalog = shipped_catalog();
        assert_eq!(catalog.validate(), Ok(()));
        assert_eq!(catalog.models.len(), 6);
        assert_eq!(catalog.models[0].name, "Modern Chair");
    }

    #[test]
    fn test_stats_count_full_catalog() {
        let mut catalog = shipped_catalog();
        // Two featured records, six categories.
        for model in &mut catalog.models {
            model.featured = model.id == "1" || model.id == "3";
        }
        let stats = catalog.stats();
        assert_eq!(
            stats,
            CatalogStats {
                total: 6,
                categories: 6,
                featured: 2
            }
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_id() {
        let catalog = Catalog {
            categories: vec!["Art".to_string()],
            models: vec![
                record("1", "A", "Art", &[]),
                record("1", "B", "Art", &[]),
            ],
        };
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateId("1".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let catalog = Catalog {
            categories: vec!["Art".to_string()],
            models: vec![record("1", "A", "Nature", &[])],
        };
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::UnknownCategory {
                id: "1".to_string(),
                category: "Nature".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_reserved_category() {
        let catalog = Catalog {
            categories: vec![ALL_CATEGORIES_LABEL.to_string()],
            models: Vec::new(),
        };
        assert_eq!(catalog.validate(), Err(CatalogError::ReservedCategory));
    }

    #[test]
    fn test_category_options_start_with_wildcard() {
        let catalog = shipped_catalog();
        let options = catalog.category_options();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[2].label(), "Sci-Fi");
    }

    #[test]
    fn test_parse_category() {
        let catalog = shipped_catalog();
        assert_eq!(catalog.parse_category("All"), Some(CategoryFilter::All));
        assert_eq!(
            catalog.parse_category("Art"),
            Some(CategoryFilter::Only("Art".to_string()))
        );
        assert_eq!(catalog.parse_category("art"), None);
    }

    #[test]
    fn test_localized_date() {
        let catalog = shipped_catalog();
        assert_eq!(catalog.models[0].localized_date(), "1/15/2024");
        assert_eq!(catalog.models[1].localized_date(), "2/2/2024");
    }
}
