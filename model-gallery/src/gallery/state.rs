use crate::engine::assets::catalog::CategoryFilter;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Card collection arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Convert string identifier to view mode for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grid" => Some(Self::Grid),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::List => "List",
        }
    }
}

/// Presentation state owned by the gallery controller.
/// Fields are private; every change goes through a named transition.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryState {
    search_term: String,
    selected_category: CategoryFilter,
    view_mode: ViewMode,
    /// At most one card is expanded at a time.
    expanded_id: Option<String>,
}

impl GalleryState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded_id.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_id.as_deref() == Some(id)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.selected_category = category;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Expand `id`, or collapse it if it is already the expanded card.
    pub fn toggle_expand(&mut self, id: &str) {
        if self.is_expanded(id) {
            self.expanded_id = None;
        } else {
            self.expanded_id = Some(id.to_string());
        }
    }

    /// Reset search and category. View mode and expansion are kept.
    pub fn clear_filters(&mut self) {
        self.search_term.clear();
        self.selected_category = CategoryFilter::All;
    }

    pub fn apply(&mut self, command: &GalleryCommand) {
        match command {
            GalleryCommand::SetSearchTerm(term) => self.set_search_term(term.as_str()),
            GalleryCommand::SetCategory(category) => self.set_category(category.clone()),
            GalleryCommand::SetViewMode(mode) => self.set_view_mode(*mode),
            GalleryCommand::ToggleExpand(id) => self.toggle_expand(id),
            GalleryCommand::ClearFilters => self.clear_filters(),
        }
    }

    /// Snapshot for the host page.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "search_term": self.search_term,
            "category": self.selected_category.label(),
            "view_mode": self.view_mode.as_str(),
            "expanded_id": self.expanded_id,
        })
    }
}

/// Requested change to the gallery state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryCommand {
    SetSearchTerm(String),
    SetCategory(CategoryFilter),
    SetViewMode(ViewMode),
    ToggleExpand(String),
    ClearFilters,
}

/// Where a command came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Ui,
    Keyboard,
    Rpc,
}

/// Event carrying a gallery command from any input surface.
#[derive(Event, Debug, Clone)]
pub struct GalleryCommandEvent {
    pub command: GalleryCommand,
    pub source: CommandSource,
}

impl GalleryCommandEvent {
    pub fn new(command: GalleryCommand, source: CommandSource) -> Self {
        Self { command, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = GalleryState::default();
        assert_eq!(state.search_term(), "");
        assert_eq!(state.selected_category(), &CategoryFilter::All);
        assert_eq!(state.view_mode(), ViewMode::Grid);
        assert_eq!(state.expanded_id(), None);
    }

    #[test]
    fn test_toggle_expand_is_involution() {
        let mut state = GalleryState::default();
        state.toggle_expand("3");
        assert_eq!(state.expanded_id(), Some("3"));
        state.toggle_expand("3");
        assert_eq!(state.expanded_id(), None);
    }

    #[test]
    fn test_toggle_expand_switches_card() {
        let mut state = GalleryState::default();
        state.toggle_expand("1");
        state.toggle_expand("2");
        assert_eq!(state.expanded_id(), Some("2"));
        assert!(!state.is_expanded("1"));
    }

    #[test]
    fn test_clear_filters_keeps_view_and_expansion() {
        let mut state = GalleryState::default();
        state.set_search_term("chair");
        state.set_category(CategoryFilter::Only("Furniture".to_string()));
        state.set_view_mode(ViewMode::List);
        state.toggle_expand("1");

        state.clear_filters();

        assert_eq!(state.search_term(), "");
        assert_eq!(state.selected_category(), &CategoryFilter::All);
        assert_eq!(state.view_mode(), ViewMode::List);
        assert_eq!(state.expanded_id(), Some("1"));
    }

    #[test]
    fn test_view_mode_from_string() {
        assert_eq!(ViewMode::from_string("grid"), Some(ViewMode::Grid));
        assert_eq!(ViewMode::from_string("LIST"), Some(ViewMode::List));
        assert_eq!(ViewMode::from_string("table"), None);
    }

    #[test]
    fn test_apply_matches_transitions() {
        let mut applied = GalleryState::default();
        applied.apply(&GalleryCommand::SetSearchTerm("helmet".to_string()));
        applied.apply(&GalleryCommand::SetViewMode(ViewMode::List));
        applied.apply(&GalleryCommand::ToggleExpand("2".to_string()));

        let mut direct = GalleryState::default();
        direct.set_search_term("helmet");
        direct.set_view_mode(ViewMode::List);
        direct.toggle_expand("2");

        assert_eq!(applied, direct);
    }

    #[test]
    fn test_to_json() {
        let mut state = GalleryState::default();
        state.set_category(CategoryFilter::Only("Art".to_string()));
        let json = state.to_json();
        assert_eq!(json["category"], "Art");
        assert_eq!(json["view_mode"], "grid");
        assert!(json["expanded_id"].is_null());
    }
}
