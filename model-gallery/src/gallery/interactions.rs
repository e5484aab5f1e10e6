use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::cards::ExpandButton;
use super::state::{CommandSource, GalleryCommand, GalleryCommandEvent, GalleryState};
use super::ui::{
    CategoryOption, CategorySelectorButton, ClearFiltersButton, GalleryPage, SearchBox,
    ViewModeButton, view_mode_colour,
};
use crate::constants::palette::*;
use crate::engine::camera::orbit_camera::ScrollCapture;

/// Page scroll distance per wheel line.
const SCROLL_LINE_HEIGHT: f32 = 48.0;

/// Whether typed characters go to the search box.
#[derive(Resource, Default, Debug)]
pub struct SearchFocus {
    pub focused: bool,
}

#[derive(Resource, Default, Debug)]
pub struct CategoryMenu {
    pub open: bool,
}

/// Effect of one key press on the focused search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEdit {
    Changed(String),
    Release,
    Ignored,
}

pub fn edit_search_term(current: &str, key: &Key) -> SearchEdit {
    match key {
        Key::Character(chars) => {
            let typed: String = chars.chars().filter(|c| !c.is_control()).collect();
            if typed.is_empty() {
                SearchEdit::Ignored
            } else {
                SearchEdit::Changed(format!("{current}{typed}"))
            }
        }
        Key::Space => SearchEdit::Changed(format!("{current} ")),
        Key::Backspace => {
            let mut term = current.to_string();
            if term.pop().is_some() {
                SearchEdit::Changed(term)
            } else {
                SearchEdit::Ignored
            }
        }
        Key::Escape | Key::Enter => SearchEdit::Release,
        _ => SearchEdit::Ignored,
    }
}

fn is_focus_shortcut(key: &Key, ctrl: bool) -> bool {
    match key {
        Key::Character(chars) => {
            chars.as_str() == "/" || (ctrl && chars.eq_ignore_ascii_case("l"))
        }
        _ => false,
    }
}

// Clicking the search box focuses it, clicking anywhere else releases it
pub fn search_box_interaction(
    boxes: Query<&Interaction, With<SearchBox>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut focus: ResMut<SearchFocus>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let over_box = boxes
        .iter()
        .any(|interaction| *interaction != Interaction::None);
    if focus.focused != over_box {
        focus.focused = over_box;
    }
}

/// Route key presses to the focused search box, or handle focus shortcuts.
pub fn search_keyboard_input(
    mut keys: EventReader<KeyboardInput>,
    keyboard: Res<ButtonInput<KeyCode>>,
    gallery: Res<GalleryState>,
    mut focus: ResMut<SearchFocus>,
    mut commands_out: EventWriter<GalleryCommandEvent>,
) {
    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let mut term = gallery.search_term().to_string();
    let mut changed = false;

    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }

        if !focus.focused {
            if is_focus_shortcut(&event.logical_key, ctrl) {
                focus.focused = true;
            }
            continue;
        }

        if ctrl {
            continue;
        }

        match edit_search_term(&term, &event.logical_key) {
            SearchEdit::Changed(next) => {
                term = next;
                changed = true;
            }
            SearchEdit::Release => focus.focused = false,
            SearchEdit::Ignored => {}
        }
    }

    if changed {
        commands_out.write(GalleryCommandEvent::new(
            GalleryCommand::SetSearchTerm(term),
            CommandSource::Keyboard,
        ));
    }
}

pub fn category_selector_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<CategorySelectorButton>),
    >,
    mut menu: ResMut<CategoryMenu>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                menu.open = !menu.open;
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

pub fn category_option_interaction(
    mut q: Query<(&Interaction, &CategoryOption, &mut BackgroundColor), Changed<Interaction>>,
    mut menu: ResMut<CategoryMenu>,
    mut commands_out: EventWriter<GalleryCommandEvent>,
) {
    for (interaction, option, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                commands_out.write(GalleryCommandEvent::new(
                    GalleryCommand::SetCategory(option.0.clone()),
                    CommandSource::Ui,
                ));
                menu.open = false;
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

pub fn view_mode_button_interaction(
    mut q: Query<(&Interaction, &ViewModeButton, &mut BackgroundColor), Changed<Interaction>>,
    gallery: Res<GalleryState>,
    mut commands_out: EventWriter<GalleryCommandEvent>,
) {
    for (interaction, button, mut bg) in &mut q {
        if *interaction == Interaction::Pressed {
            commands_out.write(GalleryCommandEvent::new(
                GalleryCommand::SetViewMode(button.0),
                CommandSource::Ui,
            ));
        }
        *bg = BackgroundColor(view_mode_colour(
            button.0 == gallery.view_mode(),
            *interaction,
        ));
    }
}

pub fn clear_filters_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<ClearFiltersButton>),
    >,
    mut commands_out: EventWriter<GalleryCommandEvent>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                commands_out.write(GalleryCommandEvent::new(
                    GalleryCommand::ClearFilters,
                    CommandSource::Ui,
                ));
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_ACTIVE),
        }
    }
}

pub fn expand_button_interaction(
    q: Query<(&Interaction, &ExpandButton), Changed<Interaction>>,
    mut commands_out: EventWriter<GalleryCommandEvent>,
) {
    for (interaction, button) in &q {
        if *interaction == Interaction::Pressed {
            commands_out.write(GalleryCommandEvent::new(
                GalleryCommand::ToggleExpand(button.model_id.clone()),
                CommandSource::Ui,
            ));
        }
    }
}

/// Scroll the page unless a card viewport used the wheel for zooming.
pub fn page_scroll(
    mut wheel: EventReader<MouseWheel>,
    capture: Res<ScrollCapture>,
    mut pages: Query<&mut ScrollPosition, With<GalleryPage>>,
) {
    let delta: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y * SCROLL_LINE_HEIGHT,
            MouseScrollUnit::Pixel => ev.y,
        })
        .sum();

    if capture.wheel_consumed || delta == 0.0 {
        return;
    }

    for mut position in &mut pages {
        position.offset_y = (position.offset_y - delta).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::keyboard::NativeKeyCode;

    fn character(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn test_typing_appends() {
        assert_eq!(
            edit_search_term("cha", &character("i")),
            SearchEdit::Changed("chai".to_string())
        );
        assert_eq!(
            edit_search_term("modern", &Key::Space),
            SearchEdit::Changed("modern ".to_string())
        );
    }

    #[test]
    fn test_backspace_removes_last_character() {
        assert_eq!(
            edit_search_term("chair", &Key::Backspace),
            SearchEdit::Changed("chai".to_string())
        );
        assert_eq!(edit_search_term("", &Key::Backspace), SearchEdit::Ignored);
    }

    #[test]
    fn test_escape_and_enter_release_focus() {
        assert_eq!(edit_search_term("x", &Key::Escape), SearchEdit::Release);
        assert_eq!(edit_search_term("x", &Key::Enter), SearchEdit::Release);
        assert_eq!(edit_search_term("x", &Key::ArrowLeft), SearchEdit::Ignored);
    }

    #[test]
    fn test_focus_shortcuts() {
        assert!(is_focus_shortcut(&character("/"), false));
        assert!(is_focus_shortcut(&character("l"), true));
        assert!(!is_focus_shortcut(&character("l"), false));
    }

    fn keyboard_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<GalleryState>()
            .init_resource::<SearchFocus>()
            .add_event::<KeyboardInput>()
            .add_event::<GalleryCommandEvent>()
            .add_systems(Update, search_keyboard_input);
        app
    }

    fn press(app: &mut App, key: Key) {
        app.world_mut().send_event(KeyboardInput {
            key_code: KeyCode::Unidentified(NativeKeyCode::Unidentified),
            logical_key: key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    fn sent_commands(app: &App) -> Vec<GalleryCommand> {
        let events = app.world().resource::<Events<GalleryCommandEvent>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).map(|e| e.command.clone()).collect()
    }

    #[test]
    fn test_unfocused_typing_is_ignored_until_shortcut() {
        let mut app = keyboard_app();
        press(&mut app, character("c"));
        app.update();
        assert!(sent_commands(&app).is_empty());

        press(&mut app, character("/"));
        press(&mut app, character("c"));
        press(&mut app, character("a"));
        press(&mut app, character("r"));
        app.update();

        assert!(app.world().resource::<SearchFocus>().focused);
        assert_eq!(
            sent_commands(&app),
            vec![GalleryCommand::SetSearchTerm("car".to_string())]
        );
    }

    #[test]
    fn test_enter_releases_focus() {
        let mut app = keyboard_app();
        app.world_mut().resource_mut::<SearchFocus>().focused = true;
        press(&mut app, Key::Enter);
        app.update();
        assert!(!app.world().resource::<SearchFocus>().focused);
        assert!(sent_commands(&app).is_empty());
    }
}
