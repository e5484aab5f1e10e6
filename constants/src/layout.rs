/// Window widths (logical px) at which the grid gains a column.
pub const MEDIUM_BREAKPOINT: f32 = 768.0;
pub const LARGE_BREAKPOINT: f32 = 1024.0;

/// Maximum content width in grid mode.
pub const GRID_MAX_WIDTH: f32 = 1152.0;
/// Maximum content width in list mode.
pub const LIST_MAX_WIDTH: f32 = 896.0;

/// Horizontal page padding on each side.
pub const PAGE_PADDING: f32 = 16.0;

/// Gap between cards.
pub const CARD_GAP: f32 = 32.0;
