/// Idle sway applied to loaded models: yaw = sin(t * FREQUENCY) * AMPLITUDE.
pub const IDLE_SWAY_AMPLITUDE: f32 = 0.1;
pub const IDLE_SWAY_FREQUENCY: f32 = 0.5;

/// Uniform scale applied to loaded scenes.
pub const LOADED_MODEL_SCALE: f32 = 1.5;

/// Fallback cube motion: pitch = sin(t) * TILT, yaw = t * SPIN.
pub const FALLBACK_TILT_AMPLITUDE: f32 = 0.2;
pub const FALLBACK_SPIN_SPEED: f32 = 0.5;

/// Fallback cube edge length.
pub const FALLBACK_CUBE_SIZE: f32 = 2.0;
/// Indigo, #6366f1.
pub const FALLBACK_COLOUR: [u8; 3] = [0x63, 0x66, 0xf1];
pub const FALLBACK_ROUGHNESS: f32 = 0.4;
pub const FALLBACK_METALLIC: f32 = 0.6;
