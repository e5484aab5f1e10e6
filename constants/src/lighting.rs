/// Ambient brightness shared by every card viewport.
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Key spot light, relative to the card's scene centre.
pub const SPOT_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const SPOT_LIGHT_OUTER_ANGLE: f32 = 0.15;
/// Full penumbra: the cone fades from the axis to the outer angle.
pub const SPOT_LIGHT_INNER_ANGLE: f32 = 0.0;
pub const SPOT_LIGHT_INTENSITY: f32 = 4_000_000.0;
pub const SPOT_LIGHT_SHADOWS: bool = true;

/// Tinted fill light below and behind the model.
pub const FILL_LIGHT_POSITION: [f32; 3] = [-10.0, -10.0, -10.0];
pub const FILL_LIGHT_INTENSITY: f32 = 2_000_000.0;
/// Violet tint, #8b5cf6.
pub const FILL_LIGHT_COLOUR: [u8; 3] = [0x8b, 0x5c, 0xf6];

/// Light range in world units. Must stay below `viewport::SCENE_SLOT_SPACING`
/// so a card's lights never reach a neighbouring slot.
pub const LIGHT_RANGE: f32 = 40.0;
