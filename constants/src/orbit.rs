/// Initial camera offset from the orbit target.
pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 5.0];

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 45.0;

pub const CAMERA_NEAR: f32 = 0.1;
/// Far plane. Must stay below `viewport::SCENE_SLOT_SPACING`.
pub const CAMERA_FAR: f32 = 100.0;

pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 8.0;

/// Pitch limit in radians, just short of the poles.
pub const PITCH_LIMIT: f32 = 1.55;

/// Radians of rotation per pixel of pointer drag.
pub const DRAG_SENSITIVITY: f32 = 0.008;

/// Distance change per wheel line.
pub const ZOOM_SPEED_LINE: f32 = 0.5;
/// Distance change per wheel pixel.
pub const ZOOM_SPEED_PIXEL: f32 = 0.01;

/// Auto-rotate speed multiplier. A speed of 1.0 completes an orbit in 60 seconds.
pub const AUTO_ROTATE_SPEED: f32 = 2.0;
