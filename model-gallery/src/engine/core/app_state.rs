use bevy::prelude::*;

use crate::constants::palette::{BODY_SIZE, HEADING_SIZE, PAGE_BACKGROUND, TEXT_ERROR, TEXT_MUTED};
use crate::engine::assets::catalog::CatalogError;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Resource)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    CatalogUnavailable,
}

#[derive(Component)]
pub struct FpsText;

/// Full-window placeholder shown while the catalog loads.
#[derive(Component)]
pub struct LoadingScreen;

/// Last catalog failure, shown on the unavailable screen.
#[derive(Resource, Default, Debug)]
pub struct CatalogStatus {
    pub error: Option<CatalogError>,
}

pub fn spawn_loading_screen(mut commands: Commands) {
    commands
        .spawn((
            LoadingScreen,
            Name::new("LoadingScreen"),
            BackgroundColor(PAGE_BACKGROUND),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading catalog..."),
                TextFont {
                    font_size: HEADING_SIZE,
                    ..default()
                },
                TextColor(TEXT_MUTED),
            ));
        });
}

pub fn despawn_loading_screen(mut commands: Commands, screens: Query<Entity, With<LoadingScreen>>) {
    for entity in &screens {
        commands.entity(entity).despawn();
    }
}

pub fn transition_to_running() {
    info!("→ Catalog ready, transitioning to Running state");
}

pub fn transition_to_catalog_unavailable(mut commands: Commands, status: Res<CatalogStatus>) {
    info!("→ Catalog unavailable, showing error screen");

    let message = status
        .error
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown error".to_string());

    commands
        .spawn((
            Name::new("CatalogUnavailable"),
            BackgroundColor(PAGE_BACKGROUND),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("The model catalog could not be loaded"),
                TextFont {
                    font_size: HEADING_SIZE,
                    ..default()
                },
                TextColor(TEXT_ERROR),
            ));
            parent.spawn((
                Text::new(message),
                TextFont {
                    font_size: BODY_SIZE,
                    ..default()
                },
                TextColor(TEXT_MUTED),
            ));
        });
}
