/// Asset locations relative to the asset root.
pub mod path;

/// Colours and type sizes for the gallery UI.
pub mod palette;
