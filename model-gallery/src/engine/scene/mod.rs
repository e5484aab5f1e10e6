//! Isolated 3D scenes rendered into card viewports.
//!
//! Every card gets its own region of world space, camera, lights and
//! render target so cards never see each other's geometry.

/// Time-based idle sway and fallback spin.
pub mod animation;

/// World-space slot allocation keeping card scenes apart.
pub mod slots;

/// Card scene spawning and render target management.
///
/// Builds the camera, lights and model pivot for a card and keeps the
/// offscreen image sized to its viewport node.
pub mod viewport_scene;
