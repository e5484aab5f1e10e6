//! Card collection diffing and per-card presentation.
//!
//! Cards that stay visible across a filter change keep their entities, scene
//! slot and model handle. Removed cards release everything they own.

use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use bevy::window::PrimaryWindow;
use std::collections::HashMap;

use super::controller::VisibleModels;
use super::layout::{card_width, target_size, viewport_height};
use super::state::GalleryState;
use super::ui::CardContainer;
use crate::constants::palette::*;
use crate::engine::assets::catalog::{Catalog, ModelRecord};
use crate::engine::camera::orbit_camera::OrbitViewport;
use crate::engine::loading::model_loader::ModelViewState;
use crate::engine::loading::progress::ModelLoadProgress;
use crate::engine::scene::slots::SceneSlots;
use crate::engine::scene::viewport_scene::{CardScene, create_render_target, spawn_card_scene};

/// Logical card width used when no window is available.
const INITIAL_TARGET_WIDTH: f32 = 360.0;

/// UI root of one model card and the entities it updates.
#[derive(Component, Debug)]
pub struct ModelCard {
    pub model_id: String,
    pub scene: Entity,
    pub viewport: Entity,
    pub expand_button: Entity,
    pub expand_label: Entity,
    pub loading_overlay: Entity,
    pub loading_label: Entity,
}

/// Emits the toggle-expand request for its card.
#[derive(Component, Debug, Clone)]
pub struct ExpandButton {
    pub model_id: String,
}

pub fn expand_label(expanded: bool) -> &'static str {
    if expanded { "Hide" } else { "View" }
}

pub fn loading_message(percent: u32) -> String {
    format!("Loading {percent}%")
}

fn label(value: impl Into<String>, size: f32, colour: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(colour),
    )
}

fn badge(commands: &mut ChildSpawnerCommands, value: String, background: Color, colour: Color) {
    commands
        .spawn((
            BackgroundColor(background),
            BorderRadius::all(Val::Px(10.0)),
            Node {
                padding: UiRect::axes(Val::Px(8.0), Val::Px(2.0)),
                ..default()
            },
        ))
        .with_children(|badge| {
            badge.spawn(label(value, SMALL_SIZE, colour));
        });
}

/// Spawn the card UI for `record`. The viewport shows `target`, rendered by
/// `camera` inside `scene`.
fn spawn_card_ui(
    commands: &mut Commands,
    record: &ModelRecord,
    scene: Entity,
    camera: Entity,
    target: Handle<Image>,
    expanded: bool,
) -> Entity {
    let loading_label = commands.spawn(label(loading_message(0), BODY_SIZE, TEXT_PRIMARY)).id();
    let loading_overlay = commands
        .spawn((
            Name::new("LoadingOverlay"),
            BackgroundColor(OVERLAY_BACKGROUND),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .add_child(loading_label)
        .id();

    let expand_label_entity = commands
        .spawn(label(expand_label(expanded), SMALL_SIZE, TEXT_PRIMARY))
        .id();
    let expand_button = commands
        .spawn((
            ExpandButton {
                model_id: record.id.clone(),
            },
            Button,
            Name::new("ExpandButton"),
            BackgroundColor(BUTTON_ACTIVE),
            BorderRadius::all(Val::Px(16.0)),
            GlobalZIndex(5),
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                ..default()
            },
        ))
        .add_child(expand_label_entity)
        .id();

    let viewport = commands
        .spawn((
            Name::new("Viewport"),
            OrbitViewport { camera },
            ImageNode::new(target),
            Interaction::default(),
            RelativeCursorPosition::default(),
            BackgroundColor(VIEWPORT_BACKGROUND),
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(viewport_height(expanded)),
                ..default()
            },
        ))
        .add_children(&[loading_overlay, expand_button])
        .id();

    let card = commands
        .spawn((
            Name::new(format!("ModelCard {}", record.id)),
            BackgroundColor(CARD_BACKGROUND),
            BorderColor(CARD_BORDER),
            BorderRadius::all(Val::Px(12.0)),
            RelativeCursorPosition::default(),
            Node {
                flex_direction: FlexDirection::Column,
                border: UiRect::all(Val::Px(1.0)),
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .add_child(viewport)
        .id();

    commands.entity(card).with_children(|card| {
        card.spawn(Node {
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(24.0)),
            row_gap: Val::Px(12.0),
            ..default()
        })
        .with_children(|panel| {
            panel
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::FlexStart,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|title| {
                    title.spawn(label(record.name.clone(), HEADING_SIZE, TEXT_PRIMARY));
                    if record.featured {
                        badge(title, "Featured".to_string(), FEATURED_BADGE, TEXT_PRIMARY);
                    }
                });

            panel.spawn(label(record.description.clone(), BODY_SIZE, TEXT_MUTED));

            panel
                .spawn(Node {
                    flex_wrap: FlexWrap::Wrap,
                    column_gap: Val::Px(8.0),
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|tags| {
                    for tag in &record.tags {
                        badge(tags, tag.clone(), TAG_BADGE, TEXT_SECONDARY);
                    }
                });

            panel
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|footer| {
                    footer.spawn(label(record.localized_date(), SMALL_SIZE, TEXT_MUTED));
                    badge(footer, record.category.clone(), CATEGORY_BADGE, TEXT_ACCENT);
                });
        });
    });

    commands.entity(card).insert(ModelCard {
        model_id: record.id.clone(),
        scene,
        viewport,
        expand_button,
        expand_label: expand_label_entity,
        loading_overlay,
        loading_label,
    });

    card
}

/// Diff mounted cards against the visible set: spawn new ones, release
/// removed ones, then reorder to catalog order.
pub fn sync_cards(
    mut commands: Commands,
    visible: Res<VisibleModels>,
    catalog: Res<Catalog>,
    gallery: Res<GalleryState>,
    cards: Query<(Entity, &ModelCard)>,
    scenes: Query<(&CardScene, &ModelViewState)>,
    containers: Query<Entity, With<CardContainer>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut slots: ResMut<SceneSlots>,
    mut progress: ResMut<ModelLoadProgress>,
    time: Res<Time>,
) {
    if !visible.is_changed() {
        return;
    }
    let Ok(container) = containers.single() else {
        return;
    };

    let mut mounted: HashMap<&str, Entity> = HashMap::new();
    for (entity, card) in &cards {
        if visible.contains(&card.model_id) {
            mounted.insert(card.model_id.as_str(), entity);
            continue;
        }

        if let Ok((scene, state)) = scenes.get(card.scene) {
            if state.is_loading() {
                progress.abandon();
            }
            slots.release(scene.slot);
            images.remove(&scene.target);
        }
        commands.entity(card.scene).despawn();
        commands.entity(entity).despawn();
        debug!("Card '{}' unmounted", card.model_id);
    }

    // Resized to the laid-out node once the UI has been measured.
    let (logical_width, scale) = windows
        .single()
        .map(|window| {
            (
                card_width(gallery.view_mode(), window.width()),
                window.scale_factor(),
            )
        })
        .unwrap_or((INITIAL_TARGET_WIDTH, 1.0));

    let mut ordered = Vec::with_capacity(visible.len());
    for id in visible.ids() {
        if let Some(entity) = mounted.get(id.as_str()) {
            ordered.push(*entity);
            continue;
        }
        let Some(record) = catalog.get(id) else {
            warn!("Visible id '{}' missing from catalog", id);
            continue;
        };

        let expanded = gallery.is_expanded(id);
        let slot = slots.acquire();
        let initial =
            target_size(Vec2::new(logical_width, viewport_height(expanded)) * scale);
        let target = create_render_target(&mut images, initial);
        let spawned = spawn_card_scene(
            &mut commands,
            &asset_server,
            record,
            slot,
            target.clone(),
            time.elapsed_secs(),
        );
        progress.request();
        let card = spawn_card_ui(
            &mut commands,
            record,
            spawned.root,
            spawned.camera,
            target,
            expanded,
        );
        ordered.push(card);
    }

    debug!(
        "{} cards mounted, {} scene slots in use",
        ordered.len(),
        slots.in_use()
    );
    commands.entity(container).replace_children(&ordered);
}

pub fn update_card_expansion(
    gallery: Res<GalleryState>,
    cards: Query<&ModelCard>,
    mut nodes: Query<&mut Node>,
    mut texts: Query<&mut Text>,
) {
    if !gallery.is_changed() {
        return;
    }

    for card in &cards {
        let expanded = gallery.is_expanded(&card.model_id);
        if let Ok(mut node) = nodes.get_mut(card.viewport) {
            let height = Val::Px(viewport_height(expanded));
            if node.height != height {
                node.height = height;
            }
        }
        if let Ok(mut text) = texts.get_mut(card.expand_label) {
            if text.0 != expand_label(expanded) {
                text.0 = expand_label(expanded).to_string();
            }
        }
    }
}

// Hover highlights the card border and reveals the expand button
pub fn update_card_hover(
    mut cards: Query<(&ModelCard, &RelativeCursorPosition, &mut BorderColor)>,
    mut nodes: Query<&mut Node>,
) {
    for (card, cursor, mut border) in &mut cards {
        let hovered = cursor.mouse_over();
        let colour = if hovered { CARD_BORDER_HOVERED } else { CARD_BORDER };
        if border.0 != colour {
            border.0 = colour;
        }

        if let Ok(mut node) = nodes.get_mut(card.expand_button) {
            let display = if hovered { Display::Flex } else { Display::None };
            if node.display != display {
                node.display = display;
            }
        }
    }
}

/// Show "Loading N%" over cards whose model has not settled yet.
pub fn update_loading_overlays(
    progress: Res<ModelLoadProgress>,
    cards: Query<&ModelCard>,
    states: Query<&ModelViewState, Changed<ModelViewState>>,
    all_states: Query<&ModelViewState>,
    mut nodes: Query<&mut Node>,
    mut texts: Query<&mut Text>,
) {
    for card in &cards {
        let state_changed = states.contains(card.scene);
        if !state_changed && !progress.is_changed() {
            continue;
        }

        let loading = all_states
            .get(card.scene)
            .map(ModelViewState::is_loading)
            .unwrap_or(false);

        if let Ok(mut node) = nodes.get_mut(card.loading_overlay) {
            node.display = if loading { Display::Flex } else { Display::None };
        }
        if loading {
            if let Ok(mut text) = texts.get_mut(card.loading_label) {
                text.0 = loading_message(progress.percent());
            }
        }
    }
}
