/// Viewport height in logical pixels while a card is expanded.
pub const EXPANDED_HEIGHT: f32 = 384.0;

/// Viewport height in logical pixels while a card is collapsed.
pub const COLLAPSED_HEIGHT: f32 = 256.0;

/// World-space distance between card scene slots along X.
pub const SCENE_SLOT_SPACING: f32 = 1000.0;

/// Smallest render target edge in physical pixels.
pub const MIN_TARGET_EDGE: u32 = 16;
