use bevy::prelude::Color;

pub const PAGE_BACKGROUND: Color = Color::srgb(0.06, 0.09, 0.16);
pub const HEADER_BACKGROUND: Color = Color::srgb(0.10, 0.08, 0.20);
pub const PANEL_BACKGROUND: Color = Color::srgba(0.12, 0.16, 0.23, 0.6);
pub const PANEL_BORDER: Color = Color::srgba(0.20, 0.25, 0.33, 0.5);
pub const INPUT_BACKGROUND: Color = Color::srgba(0.06, 0.09, 0.16, 0.8);
pub const INPUT_BORDER_FOCUSED: Color = Color::srgb(0.66, 0.33, 0.97);

pub const CARD_BACKGROUND: Color = Color::srgb(0.09, 0.10, 0.18);
pub const CARD_BORDER: Color = Color::srgba(0.20, 0.25, 0.33, 0.5);
pub const CARD_BORDER_HOVERED: Color = Color::srgba(0.66, 0.33, 0.97, 0.5);
pub const VIEWPORT_BACKGROUND: Color = Color::srgb(0.12, 0.16, 0.23);
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.8);

pub const BUTTON_IDLE: Color = Color::srgb(0.20, 0.25, 0.33);
pub const BUTTON_HOVERED: Color = Color::srgb(0.28, 0.33, 0.42);
pub const BUTTON_PRESSED: Color = Color::srgb(0.16, 0.20, 0.27);
pub const BUTTON_ACTIVE: Color = Color::srgb(0.58, 0.20, 0.92);

pub const FEATURED_BADGE: Color = Color::srgb(0.58, 0.20, 0.92);
pub const TAG_BADGE: Color = Color::srgba(0.12, 0.16, 0.23, 0.5);
pub const CATEGORY_BADGE: Color = Color::srgba(0.35, 0.13, 0.55, 0.3);

pub const TEXT_PRIMARY: Color = Color::WHITE;
pub const TEXT_SECONDARY: Color = Color::srgb(0.80, 0.84, 0.88);
pub const TEXT_MUTED: Color = Color::srgb(0.58, 0.64, 0.72);
pub const TEXT_ACCENT: Color = Color::srgb(0.75, 0.52, 0.99);
pub const TEXT_ACCENT_PINK: Color = Color::srgb(0.96, 0.45, 0.71);
pub const TEXT_ERROR: Color = Color::srgb(0.97, 0.44, 0.44);

pub const TITLE_SIZE: f32 = 44.0;
pub const HEADING_SIZE: f32 = 20.0;
pub const BODY_SIZE: f32 = 15.0;
pub const SMALL_SIZE: f32 = 12.0;
pub const STAT_SIZE: f32 = 26.0;
