use super::state::ViewMode;
use bevy::math::{UVec2, Vec2};
use constants::layout::{
    CARD_GAP, GRID_MAX_WIDTH, LARGE_BREAKPOINT, LIST_MAX_WIDTH, MEDIUM_BREAKPOINT, PAGE_PADDING,
};
use constants::viewport::{COLLAPSED_HEIGHT, EXPANDED_HEIGHT, MIN_TARGET_EDGE};

/// Number of card columns for a window width in logical pixels.
pub fn columns_for(view_mode: ViewMode, window_width: f32) -> usize {
    match view_mode {
        ViewMode::List => 1,
        ViewMode::Grid if window_width < MEDIUM_BREAKPOINT => 1,
        ViewMode::Grid if window_width < LARGE_BREAKPOINT => 2,
        ViewMode::Grid => 3,
    }
}

/// Width of the card collection, capped per view mode.
pub fn content_width(view_mode: ViewMode, window_width: f32) -> f32 {
    let max_width = match view_mode {
        ViewMode::Grid => GRID_MAX_WIDTH,
        ViewMode::List => LIST_MAX_WIDTH,
    };
    (window_width - 2.0 * PAGE_PADDING).clamp(0.0, max_width)
}

pub fn card_width(view_mode: ViewMode, window_width: f32) -> f32 {
    let columns = columns_for(view_mode, window_width) as f32;
    let gaps = CARD_GAP * (columns - 1.0);
    ((content_width(view_mode, window_width) - gaps) / columns).max(0.0)
}

pub fn viewport_height(expanded: bool) -> f32 {
    if expanded {
        EXPANDED_HEIGHT
    } else {
        COLLAPSED_HEIGHT
    }
}

/// Render target size for a viewport node of `physical` pixels.
pub fn target_size(physical: Vec2) -> UVec2 {
    let edge = |v: f32| (v.round() as u32).max(MIN_TARGET_EDGE);
    UVec2::new(edge(physical.x), edge(physical.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns_follow_breakpoints() {
        assert_eq!(columns_for(ViewMode::Grid, 500.0), 1);
        assert_eq!(columns_for(ViewMode::Grid, 767.9), 1);
        assert_eq!(columns_for(ViewMode::Grid, 768.0), 2);
        assert_eq!(columns_for(ViewMode::Grid, 1023.0), 2);
        assert_eq!(columns_for(ViewMode::Grid, 1024.0), 3);
        assert_eq!(columns_for(ViewMode::Grid, 2560.0), 3);
    }

    #[test]
    fn test_list_is_single_column() {
        for width in [320.0, 800.0, 1920.0] {
            assert_eq!(columns_for(ViewMode::List, width), 1);
        }
    }

    #[test]
    fn test_content_width_is_capped() {
        assert_eq!(content_width(ViewMode::Grid, 1920.0), GRID_MAX_WIDTH);
        assert_eq!(content_width(ViewMode::List, 1920.0), LIST_MAX_WIDTH);
        assert_eq!(content_width(ViewMode::Grid, 600.0), 600.0 - 2.0 * PAGE_PADDING);
        assert_eq!(content_width(ViewMode::Grid, 10.0), 0.0);
    }

    #[test]
    fn test_card_width_fills_row() {
        let width = 1920.0;
        let columns = columns_for(ViewMode::Grid, width) as f32;
        let total = card_width(ViewMode::Grid, width) * columns + CARD_GAP * (columns - 1.0);
        assert!((total - content_width(ViewMode::Grid, width)).abs() < 1e-3);
    }

    #[test]
    fn test_viewport_height() {
        assert_eq!(viewport_height(true), 384.0);
        assert_eq!(viewport_height(false), 256.0);
    }

    #[test]
    fn test_target_size_rounds_and_clamps() {
        assert_eq!(target_size(Vec2::new(719.6, 512.0)), UVec2::new(720, 512));
        assert_eq!(target_size(Vec2::new(0.0, 256.0)), UVec2::new(MIN_TARGET_EDGE, 256));
    }
}
