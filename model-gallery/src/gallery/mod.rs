//! Searchable, filterable gallery of 3D model cards.
//!
//! `GalleryState` is only changed by `GalleryCommandEvent`s. Each frame the
//! input systems emit commands, the controller applies them, the visible set
//! is re-derived and the card collection is diffed against it.

pub mod cards;
pub mod controller;
pub mod filter;
pub mod interactions;
pub mod layout;
pub mod state;
pub mod ui;

use bevy::prelude::*;

use crate::engine::camera::orbit_camera::{ScrollCapture, orbit_controller};
use crate::engine::core::app_state::AppState;
use crate::engine::loading::model_loader::FallbackAssets;
use crate::engine::loading::progress::ModelLoadProgress;
use crate::engine::scene::slots::SceneSlots;
use cards::{sync_cards, update_card_expansion, update_card_hover, update_loading_overlays};
use controller::{VisibleModels, handle_gallery_commands, refresh_visible_models};
use interactions::{
    CategoryMenu, SearchFocus, category_option_interaction, category_selector_interaction,
    clear_filters_button_interaction, expand_button_interaction, page_scroll,
    search_box_interaction, search_keyboard_input, view_mode_button_interaction,
};
use state::{GalleryCommandEvent, GalleryState};
use ui::{
    apply_card_layout, reflect_view_mode_buttons, spawn_gallery_ui, update_category_selector,
    update_empty_state, update_results_info, update_search_box,
};

/// Ordering of the gallery's frame: input, then state, then presentation.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GallerySet {
    Input,
    Controller,
    Presentation,
}

pub struct GalleryPlugin;

impl Plugin for GalleryPlugin {
    fn build(&self, app: &mut App) {
        app
            // init resources
            .init_resource::<GalleryState>()
            .init_resource::<VisibleModels>()
            .init_resource::<SearchFocus>()
            .init_resource::<CategoryMenu>()
            .init_resource::<SceneSlots>()
            .init_resource::<ModelLoadProgress>()
            .init_resource::<ScrollCapture>()
            .init_resource::<FallbackAssets>()
            .add_event::<GalleryCommandEvent>()
            .configure_sets(
                Update,
                (
                    GallerySet::Input,
                    GallerySet::Controller,
                    GallerySet::Presentation,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnEnter(AppState::Running), spawn_gallery_ui)
            .add_systems(
                Update,
                (
                    search_box_interaction,
                    search_keyboard_input,
                    category_selector_interaction,
                    category_option_interaction,
                    view_mode_button_interaction,
                    clear_filters_button_interaction,
                    expand_button_interaction,
                    page_scroll.after(orbit_controller),
                )
                    .in_set(GallerySet::Input),
            )
            .add_systems(
                Update,
                (handle_gallery_commands, refresh_visible_models, sync_cards)
                    .chain()
                    .in_set(GallerySet::Controller),
            )
            .add_systems(
                Update,
                (
                    update_results_info,
                    update_empty_state,
                    update_search_box,
                    update_category_selector,
                    reflect_view_mode_buttons,
                    apply_card_layout,
                    update_card_expansion,
                    update_card_hover,
                    update_loading_overlays,
                )
                    .in_set(GallerySet::Presentation),
            );
    }
}
