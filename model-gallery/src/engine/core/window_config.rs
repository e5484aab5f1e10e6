use bevy::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use bevy::window::PresentMode;

#[cfg(target_arch = "wasm32")]
pub fn create_window_config() -> Window {
    Window {
        title: "3D Model Portfolio".to_string(),
        // Render into the host page's canvas and follow its size.
        canvas: Some("#bevy".to_string()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: true,
        ..default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn create_window_config() -> Window {
    Window {
        title: "3D Model Portfolio".to_string(),
        resolution: (1280.0, 860.0).into(),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}
