/// Catalog of portfolio models, loaded once at startup.
pub const RELATIVE_CATALOG_PATH: &str = "catalog/portfolio.catalog.json";

/// Extension registered for catalog assets.
pub const CATALOG_EXTENSION: &str = "catalog.json";
