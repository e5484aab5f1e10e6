//! Asset types backing the gallery.
//!
//! The catalog is the only data asset; model files are referenced by path
//! and loaded per card.

/// Model records, category list and catalog validation.
pub mod catalog;
