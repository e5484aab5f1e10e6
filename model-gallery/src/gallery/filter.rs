use crate::engine::assets::catalog::{Catalog, CategoryFilter, ModelRecord};

/// Case-insensitive substring match over name, description and tags.
/// An empty term matches everything. Whitespace is significant.
pub fn matches_search(record: &ModelRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    record.name.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

pub fn matches_category(record: &ModelRecord, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => record.category == *category,
    }
}

/// Records passing both predicates, in catalog order.
pub fn visible_set<'a>(
    catalog: &'a Catalog,
    term: &str,
    filter: &CategoryFilter,
) -> Vec<&'a ModelRecord> {
    catalog
        .models
        .iter()
        .filter(|record| matches_search(record, term) && matches_category(record, filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::tests::{record, shipped_catalog};

    fn names<'a>(records: &[&'a ModelRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filters_show_whole_catalog() {
        let catalog = shipped_catalog();
        let visible = visible_set(&catalog, "", &CategoryFilter::All);
        assert_eq!(visible.len(), catalog.models.len());
    }

    #[test]
    fn test_search_chair_finds_one() {
        let catalog = shipped_catalog();
        let visible = visible_set(&catalog, "chair", &CategoryFilter::All);
        assert_eq!(names(&visible), vec!["Modern Chair"]);
    }

    #[test]
    fn test_category_sci_fi_finds_helmet() {
        let catalog = shipped_catalog();
        let visible = visible_set(&catalog, "", &CategoryFilter::Only("Sci-Fi".to_string()));
        assert_eq!(names(&visible), vec!["Space Helmet"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = shipped_catalog();
        assert!(visible_set(&catalog, "zzz-no-match", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = shipped_catalog();
        let lower = visible_set(&catalog, "vintage", &CategoryFilter::All);
        let upper = visible_set(&catalog, "VINTAGE", &CategoryFilter::All);
        assert_eq!(names(&lower), names(&upper));
        assert_eq!(names(&lower), vec!["Vintage Car"]);
    }

    #[test]
    fn test_search_matches_tags_and_description() {
        let by_tag = record("1", "Thing", "Art", &["Glossy"]);
        assert!(matches_search(&by_tag, "gloss"));

        let by_description = record("2", "Other", "Art", &[]);
        assert!(matches_search(&by_description, "DESCRIPTION"));
        assert!(!matches_search(&by_description, "gloss"));
    }

    #[test]
    fn test_whitespace_is_significant() {
        let chair = record("1", "Modern Chair", "Furniture", &[]);
        assert!(matches_search(&chair, "n c"));
        assert!(!matches_search(&chair, " modern"));
    }

    #[test]
    fn test_visible_set_keeps_catalog_order() {
        let catalog = shipped_catalog();
        let visible = visible_set(&catalog, "a", &CategoryFilter::All);
        let positions: Vec<usize> = visible
            .iter()
            .map(|r| {
                catalog
                    .models
                    .iter()
                    .position(|m| m.id == r.id)
                    .expect("visible record comes from catalog")
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_filters_compose() {
        let catalog = shipped_catalog();
        let term = "e";
        let filter = CategoryFilter::Only("Furniture".to_string());
        let combined = visible_set(&catalog, term, &filter);
        for r in &catalog.models {
            let expected = matches_search(r, term) && matches_category(r, &filter);
            assert_eq!(combined.iter().any(|v| v.id == r.id), expected);
        }
    }
}
