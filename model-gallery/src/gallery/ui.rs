use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::layout::{CARD_GAP, GRID_MAX_WIDTH, PAGE_PADDING};

use super::controller::VisibleModels;
use super::interactions::{CategoryMenu, SearchFocus};
use super::layout::{columns_for, content_width};
use super::state::{GalleryState, ViewMode};
use crate::constants::palette::*;
use crate::engine::assets::catalog::{Catalog, CategoryFilter};

pub const SEARCH_PLACEHOLDER: &str = "Search models...";
pub const EMPTY_MESSAGE: &str = "No models found matching your criteria";

/// Scrollable page body.
#[derive(Component)]
pub struct GalleryPage;

#[derive(Component)]
pub struct SearchBox;

#[derive(Component)]
pub struct SearchText;

#[derive(Component)]
pub struct CategorySelectorButton;

#[derive(Component)]
pub struct CategorySelectorLabel;

#[derive(Component)]
pub struct CategoryMenuNode;

#[derive(Component, Debug, Clone)]
pub struct CategoryOption(pub CategoryFilter);

#[derive(Component, Debug, Clone, Copy)]
pub struct ViewModeButton(pub ViewMode);

#[derive(Component)]
pub struct ClearFiltersButton;

#[derive(Component)]
pub struct ResultsText;

#[derive(Component)]
pub struct CategoryBadge;

#[derive(Component)]
pub struct CategoryBadgeText;

/// Grid or list holding the model cards.
#[derive(Component)]
pub struct CardContainer;

#[derive(Component)]
pub struct EmptyState;

pub fn results_message(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} models")
}

fn text(value: impl Into<String>, size: f32, colour: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(colour),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
        border: UiRect::all(Val::Px(1.0)),
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        ..default()
    }
}

// Spawns the whole gallery page once the catalog is available
pub fn spawn_gallery_ui(mut commands: Commands, catalog: Res<Catalog>) {
    let stats = catalog.stats();

    commands
        .spawn((
            GalleryPage,
            Name::new("GalleryPage"),
            BackgroundColor(PAGE_BACKGROUND),
            ScrollPosition::default(),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                overflow: Overflow::scroll_y(),
                ..default()
            },
        ))
        .with_children(|page| {
            // Header
            page.spawn((
                Name::new("Header"),
                BackgroundColor(HEADER_BACKGROUND),
                Node {
                    width: Val::Percent(100.0),
                    padding: UiRect::axes(Val::Px(PAGE_PADDING), Val::Px(48.0)),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(16.0),
                    flex_shrink: 0.0,
                    ..default()
                },
            ))
            .with_children(|header| {
                header.spawn(text("3D Model Portfolio", TITLE_SIZE, TEXT_ACCENT));
                header.spawn(text(
                    "Explore my collection of 3D models and digital creations",
                    HEADING_SIZE,
                    TEXT_SECONDARY,
                ));

                header
                    .spawn(Node {
                        column_gap: Val::Px(48.0),
                        margin: UiRect::top(Val::Px(8.0)),
                        ..default()
                    })
                    .with_children(|row| {
                        for (value, label, colour) in [
                            (stats.total, "Total Models", TEXT_ACCENT),
                            (stats.categories, "Categories", TEXT_ACCENT_PINK),
                            (stats.featured, "Featured", TEXT_ACCENT),
                        ] {
                            row.spawn(Node {
                                flex_direction: FlexDirection::Column,
                                align_items: AlignItems::Center,
                                ..default()
                            })
                            .with_children(|stat| {
                                stat.spawn(text(value.to_string(), STAT_SIZE, colour));
                                stat.spawn(text(label, SMALL_SIZE, TEXT_MUTED));
                            });
                        }
                    });
            });

            // Body
            page.spawn((
                Name::new("Body"),
                Node {
                    width: Val::Percent(100.0),
                    max_width: Val::Px(GRID_MAX_WIDTH + 2.0 * PAGE_PADDING),
                    padding: UiRect::axes(Val::Px(PAGE_PADDING), Val::Px(32.0)),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Stretch,
                    row_gap: Val::Px(24.0),
                    flex_shrink: 0.0,
                    ..default()
                },
            ))
            .with_children(|body| {
                spawn_controls(body, &catalog);
                spawn_results_info(body, stats.total);

                body.spawn((
                    CardContainer,
                    Name::new("CardContainer"),
                    Node {
                        display: Display::Grid,
                        width: Val::Percent(100.0),
                        max_width: Val::Px(GRID_MAX_WIDTH),
                        align_self: AlignSelf::Center,
                        grid_template_columns: RepeatedGridTrack::flex(3, 1.0),
                        column_gap: Val::Px(CARD_GAP),
                        row_gap: Val::Px(CARD_GAP),
                        ..default()
                    },
                ));

                body.spawn((
                    EmptyState,
                    Name::new("EmptyState"),
                    Node {
                        display: Display::None,
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(0.0), Val::Px(64.0)),
                        row_gap: Val::Px(16.0),
                        ..default()
                    },
                ))
                .with_children(|empty| {
                    empty.spawn(text(EMPTY_MESSAGE, HEADING_SIZE, TEXT_MUTED));
                    empty
                        .spawn((
                            ClearFiltersButton,
                            Button,
                            Name::new("ClearFiltersButton"),
                            BackgroundColor(BUTTON_ACTIVE),
                            BorderColor(Color::NONE),
                            BorderRadius::all(Val::Px(8.0)),
                            button_node(),
                        ))
                        .with_children(|btn| {
                            btn.spawn(text("Clear Filters", BODY_SIZE, TEXT_PRIMARY));
                        });
                });
            });
        });
}

fn spawn_controls(body: &mut ChildSpawnerCommands, catalog: &Catalog) {
    body.spawn((
        Name::new("Controls"),
        BackgroundColor(PANEL_BACKGROUND),
        BorderColor(PANEL_BORDER),
        BorderRadius::all(Val::Px(12.0)),
        Node {
            padding: UiRect::all(Val::Px(20.0)),
            border: UiRect::all(Val::Px(1.0)),
            flex_wrap: FlexWrap::Wrap,
            align_items: AlignItems::Center,
            column_gap: Val::Px(16.0),
            row_gap: Val::Px(12.0),
            ..default()
        },
    ))
    .with_children(|controls| {
        controls
            .spawn((
                SearchBox,
                Button,
                Name::new("SearchBox"),
                BackgroundColor(INPUT_BACKGROUND),
                BorderColor(PANEL_BORDER),
                BorderRadius::all(Val::Px(8.0)),
                Node {
                    flex_grow: 1.0,
                    min_width: Val::Px(220.0),
                    justify_content: JustifyContent::FlexStart,
                    ..button_node()
                },
            ))
            .with_children(|search| {
                search.spawn((SearchText, text(SEARCH_PLACEHOLDER, BODY_SIZE, TEXT_MUTED)));
            });

        // Category selector with its drop-down menu
        controls
            .spawn(Node {
                flex_direction: FlexDirection::Column,
                ..default()
            })
            .with_children(|selector| {
                selector
                    .spawn((
                        CategorySelectorButton,
                        Button,
                        Name::new("CategorySelector"),
                        BackgroundColor(BUTTON_IDLE),
                        BorderColor(PANEL_BORDER),
                        BorderRadius::all(Val::Px(8.0)),
                        Node {
                            min_width: Val::Px(180.0),
                            ..button_node()
                        },
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            CategorySelectorLabel,
                            text("Category: All", BODY_SIZE, TEXT_PRIMARY),
                        ));
                    });

                selector
                    .spawn((
                        CategoryMenuNode,
                        Name::new("CategoryMenu"),
                        BackgroundColor(CARD_BACKGROUND),
                        BorderColor(PANEL_BORDER),
                        GlobalZIndex(10),
                        Node {
                            display: Display::None,
                            position_type: PositionType::Absolute,
                            top: Val::Px(44.0),
                            min_width: Val::Px(180.0),
                            flex_direction: FlexDirection::Column,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                    ))
                    .with_children(|menu| {
                        for option in catalog.category_options() {
                            menu.spawn((
                                CategoryOption(option.clone()),
                                Button,
                                BackgroundColor(BUTTON_IDLE),
                                Node {
                                    padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                                    ..default()
                                },
                            ))
                            .with_children(|btn| {
                                btn.spawn(text(option.label(), BODY_SIZE, TEXT_PRIMARY));
                            });
                        }
                    });
            });

        // View mode toggle
        controls
            .spawn(Node {
                column_gap: Val::Px(8.0),
                ..default()
            })
            .with_children(|toggle| {
                for mode in [ViewMode::Grid, ViewMode::List] {
                    toggle
                        .spawn((
                            ViewModeButton(mode),
                            Button,
                            Name::new(format!("ViewMode{}", mode.label())),
                            BackgroundColor(BUTTON_IDLE),
                            BorderColor(PANEL_BORDER),
                            BorderRadius::all(Val::Px(8.0)),
                            button_node(),
                        ))
                        .with_children(|btn| {
                            btn.spawn(text(mode.label(), BODY_SIZE, TEXT_PRIMARY));
                        });
                }
            });
    });
}

fn spawn_results_info(body: &mut ChildSpawnerCommands, total: usize) {
    body.spawn(Node {
        justify_content: JustifyContent::SpaceBetween,
        align_items: AlignItems::Center,
        ..default()
    })
    .with_children(|row| {
        row.spawn((ResultsText, text(results_message(total, total), BODY_SIZE, TEXT_MUTED)));
        row.spawn((
            CategoryBadge,
            BackgroundColor(CATEGORY_BADGE),
            BorderRadius::all(Val::Px(12.0)),
            Node {
                display: Display::None,
                padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                ..default()
            },
        ))
        .with_children(|badge| {
            badge.spawn((CategoryBadgeText, text("", SMALL_SIZE, TEXT_ACCENT)));
        });
    });
}

/// "Showing X of Y models" plus the active category badge.
pub fn update_results_info(
    visible: Res<VisibleModels>,
    gallery: Res<GalleryState>,
    mut results: Query<&mut Text, (With<ResultsText>, Without<CategoryBadgeText>)>,
    mut badge: Query<&mut Node, With<CategoryBadge>>,
    mut badge_text: Query<&mut Text, (With<CategoryBadgeText>, Without<ResultsText>)>,
) {
    if !visible.is_changed() && !gallery.is_changed() {
        return;
    }

    for mut text in &mut results {
        text.0 = results_message(visible.len(), visible.total());
    }

    let category = gallery.selected_category();
    for mut node in &mut badge {
        node.display = if category.is_all() {
            Display::None
        } else {
            Display::Flex
        };
    }
    for mut text in &mut badge_text {
        text.0 = category.label().to_string();
    }
}

/// Swap the card collection for the empty state when nothing matches.
pub fn update_empty_state(
    visible: Res<VisibleModels>,
    mut empty: Query<&mut Node, (With<EmptyState>, Without<CardContainer>)>,
    mut container: Query<&mut Node, (With<CardContainer>, Without<EmptyState>)>,
) {
    if !visible.is_changed() {
        return;
    }

    let (empty_display, cards_display) = if visible.is_empty() {
        (Display::Flex, Display::None)
    } else {
        (Display::None, Display::Grid)
    };
    for mut node in &mut empty {
        node.display = empty_display;
    }
    for mut node in &mut container {
        node.display = cards_display;
    }
}

pub fn update_search_box(
    gallery: Res<GalleryState>,
    focus: Res<SearchFocus>,
    mut texts: Query<(&mut Text, &mut TextColor), With<SearchText>>,
    mut boxes: Query<&mut BorderColor, With<SearchBox>>,
) {
    if !gallery.is_changed() && !focus.is_changed() {
        return;
    }

    let term = gallery.search_term();
    for (mut text, mut colour) in &mut texts {
        let caret = if focus.focused { "|" } else { "" };
        if term.is_empty() && !focus.focused {
            text.0 = SEARCH_PLACEHOLDER.to_string();
            colour.0 = TEXT_MUTED;
        } else {
            text.0 = format!("{term}{caret}");
            colour.0 = TEXT_PRIMARY;
        }
    }
    for mut border in &mut boxes {
        border.0 = if focus.focused {
            INPUT_BORDER_FOCUSED
        } else {
            PANEL_BORDER
        };
    }
}

pub fn update_category_selector(
    gallery: Res<GalleryState>,
    menu: Res<CategoryMenu>,
    mut labels: Query<&mut Text, With<CategorySelectorLabel>>,
    mut menus: Query<&mut Node, With<CategoryMenuNode>>,
) {
    if gallery.is_changed() {
        for mut text in &mut labels {
            text.0 = format!("Category: {}", gallery.selected_category());
        }
    }
    if menu.is_changed() {
        for mut node in &mut menus {
            node.display = if menu.open { Display::Flex } else { Display::None };
        }
    }
}

// Highlights the button for the active view mode
pub fn reflect_view_mode_buttons(
    gallery: Res<GalleryState>,
    mut buttons: Query<(&ViewModeButton, &Interaction, &mut BackgroundColor)>,
) {
    if !gallery.is_changed() {
        return;
    }
    for (button, interaction, mut bg) in &mut buttons {
        *bg = BackgroundColor(view_mode_colour(
            button.0 == gallery.view_mode(),
            *interaction,
        ));
    }
}

pub fn view_mode_colour(active: bool, interaction: Interaction) -> Color {
    match (active, interaction) {
        (true, _) => BUTTON_ACTIVE,
        (false, Interaction::Pressed) => BUTTON_PRESSED,
        (false, Interaction::Hovered) => BUTTON_HOVERED,
        (false, Interaction::None) => BUTTON_IDLE,
    }
}

/// Match column count and content width to the window and view mode.
pub fn apply_card_layout(
    gallery: Res<GalleryState>,
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    all_windows: Query<&Window, With<PrimaryWindow>>,
    mut containers: Query<&mut Node, With<CardContainer>>,
) {
    if !gallery.is_changed() && windows.is_empty() {
        return;
    }
    let Ok(window) = all_windows.single() else {
        return;
    };

    let view_mode = gallery.view_mode();
    let columns = columns_for(view_mode, window.width());
    let max_width = content_width(view_mode, window.width());

    for mut node in &mut containers {
        node.grid_template_columns = vec![RepeatedGridTrack::flex(columns as u16, 1.0)];
        node.max_width = Val::Px(max_width);
    }
}
