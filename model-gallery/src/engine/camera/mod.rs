//! Per-card orbit camera.
//!
//! Each card owns a camera that orbits its model, with drag rotation,
//! bounded wheel zoom and auto-rotation while hovered.

/// Orbit parameters, input forwarding from card viewports and transform updates.
pub mod orbit_camera;
