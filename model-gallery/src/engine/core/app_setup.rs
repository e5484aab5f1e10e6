use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{DEFAULT_FILTER, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::lighting::AMBIENT_BRIGHTNESS;

use crate::constants::palette::{PAGE_BACKGROUND, SMALL_SIZE, TEXT_ERROR};
use crate::constants::path::CATALOG_EXTENSION;
use crate::engine::assets::catalog::Catalog;
use crate::engine::camera::orbit_camera::{apply_orbit_transform, orbit_controller};
use crate::engine::core::app_state::{
    AppState, CatalogStatus, FpsText, despawn_loading_screen, spawn_loading_screen,
    transition_to_catalog_unavailable, transition_to_running,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{CatalogLoader, load_catalog_system, start_loading};
use crate::engine::loading::model_loader::{
    ModelLoadSet, ModelLoadSettled, apply_model_outcomes, poll_model_loads,
};
use crate::engine::scene::animation::{animate_fallback_spin, animate_idle_sway};
use crate::engine::scene::viewport_scene::resize_render_targets;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::gallery::{GalleryPlugin, GallerySet};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers Catalog as a loadable asset type from *.catalog.json files.
        .add_plugins(JsonAssetPlugin::<Catalog>::new(&[CATALOG_EXTENSION]))
        .add_event::<ModelLoadSettled>()
        .add_plugins(GalleryPlugin)
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(PAGE_BACKGROUND))
        .insert_resource(AmbientLight {
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        });

    // Initialise resources early
    app.init_resource::<CatalogLoader>()
        .init_resource::<CatalogStatus>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading, spawn_loading_screen).chain())
        .add_systems(
            Update,
            load_catalog_system.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnExit(AppState::Loading), despawn_loading_screen)
        .add_systems(OnEnter(AppState::Running), transition_to_running)
        .add_systems(
            OnEnter(AppState::CatalogUnavailable),
            transition_to_catalog_unavailable,
        );

    // Settled geometry must be spawned before cards can be unmounted.
    app.configure_sets(
        Update,
        ModelLoadSet
            .before(GallerySet::Controller)
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        Update,
        (poll_model_loads, apply_model_outcomes)
            .chain()
            .in_set(ModelLoadSet),
    );

    let runtime_systems = (
        (orbit_controller, apply_orbit_transform).chain(),
        animate_idle_sway,
        animate_fallback_spin,
        resize_render_targets,
        fps_notification_system,
    );

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    // Card cameras render offscreen; this one draws the page.
    commands.spawn((
        Name::new("UiCamera"),
        Camera2d,
        IsDefaultUiCamera,
    ));

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: SMALL_SIZE,
            ..default()
        },
        TextColor(TEXT_ERROR),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        GlobalZIndex(10),
        FpsText,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: format!("{DEFAULT_FILTER},model_gallery=debug"),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
