//! Asset loading for the catalog and per-card models.
//!
//! The catalog gates the transition to the running gallery. Model loads run
//! independently per card and settle into a loaded scene or a fallback.

/// Catalog asset loading and validation before the gallery starts.
pub mod catalog_loader;

/// Per-card glTF loading, failure classification and fallback geometry.
///
/// Polls load state each frame and applies settled outcomes to card scenes.
pub mod model_loader;

/// Aggregate model loading counters shown on card overlays.
pub mod progress;
