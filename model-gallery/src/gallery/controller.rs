use bevy::prelude::*;

use super::filter::visible_set;
use super::state::{GalleryCommand, GalleryCommandEvent, GalleryState};
use crate::engine::assets::catalog::Catalog;

/// Ids of the records passing the current filters, in catalog order.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct VisibleModels {
    ids: Vec<String>,
    total: usize,
}

impl VisibleModels {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Size of the whole catalog.
    pub fn total(&self) -> usize {
        self.total
    }

    /// True when the filters exclude every record.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|visible| visible == id)
    }
}

/// Apply queued commands in arrival order. The resource is only marked
/// changed when the resulting state differs.
pub fn handle_gallery_commands(
    mut events: EventReader<GalleryCommandEvent>,
    mut gallery: ResMut<GalleryState>,
) {
    if events.is_empty() {
        return;
    }

    let mut next = gallery.clone();
    for event in events.read() {
        match &event.command {
            GalleryCommand::SetSearchTerm(term) => {
                debug!("Search term set via {:?}: {:?}", event.source, term)
            }
            command => info!("Gallery command via {:?}: {:?}", event.source, command),
        }
        next.apply(&event.command);
    }
    gallery.set_if_neq(next);
}

/// Re-derive the visible set when the filters or the catalog change.
pub fn refresh_visible_models(
    catalog: Res<Catalog>,
    gallery: Res<GalleryState>,
    mut visible: ResMut<VisibleModels>,
) {
    if !catalog.is_changed() && !gallery.is_changed() {
        return;
    }

    let ids = visible_set(&catalog, gallery.search_term(), gallery.selected_category())
        .into_iter()
        .map(|record| record.id.clone())
        .collect();

    visible.set_if_neq(VisibleModels {
        ids,
        total: catalog.models.len(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::tests::shipped_catalog;
    use crate::engine::assets::catalog::{CatalogStats, CategoryFilter};
    use crate::gallery::state::{CommandSource, ViewMode};

    fn controller_app(catalog: Catalog) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(catalog)
            .init_resource::<GalleryState>()
            .init_resource::<VisibleModels>()
            .add_event::<GalleryCommandEvent>()
            .add_systems(
                Update,
                (handle_gallery_commands, refresh_visible_models).chain(),
            );
        app.update();
        app
    }

    fn send(app: &mut App, command: GalleryCommand) {
        app.world_mut()
            .send_event(GalleryCommandEvent::new(command, CommandSource::Ui));
        app.update();
    }

    fn visible_names(app: &App) -> Vec<String> {
        let catalog = app.world().resource::<Catalog>();
        app.world()
            .resource::<VisibleModels>()
            .ids()
            .iter()
            .filter_map(|id| catalog.get(id))
            .map(|record| record.name.clone())
            .collect()
    }

    #[test]
    fn test_initial_view_shows_everything() {
        let app = controller_app(shipped_catalog());
        let visible = app.world().resource::<VisibleModels>();
        assert_eq!(visible.len(), 6);
        assert_eq!(visible.total(), 6);
        assert!(!visible.is_empty());
    }

    #[test]
    fn test_aggregates_ignore_filters() {
        let mut catalog = shipped_catalog();
        for model in &mut catalog.models {
            model.featured = matches!(model.id.as_str(), "2" | "4");
        }
        let mut app = controller_app(catalog);
        let expected = CatalogStats {
            total: 6,
            categories: 6,
            featured: 2,
        };
        assert_eq!(app.world().resource::<Catalog>().stats(), expected);

        send(&mut app, GalleryCommand::SetSearchTerm("chair".to_string()));
        assert_eq!(app.world().resource::<VisibleModels>().len(), 1);
        assert_eq!(app.world().resource::<Catalog>().stats(), expected);
    }

    #[test]
    fn test_search_narrows_to_chair() {
        let mut app = controller_app(shipped_catalog());
        send(&mut app, GalleryCommand::SetSearchTerm("chair".to_string()));
        assert_eq!(visible_names(&app), vec!["Modern Chair"]);
    }

    #[test]
    fn test_category_narrows_to_helmet() {
        let mut app = controller_app(shipped_catalog());
        send(
            &mut app,
            GalleryCommand::SetCategory(CategoryFilter::Only("Sci-Fi".to_string())),
        );
        assert_eq!(visible_names(&app), vec!["Space Helmet"]);
    }

    #[test]
    fn test_no_match_then_clear_filters() {
        let mut app = controller_app(shipped_catalog());
        send(&mut app, GalleryCommand::SetSearchTerm("zzz-no-match".to_string()));
        assert!(app.world().resource::<VisibleModels>().is_empty());

        send(&mut app, GalleryCommand::ClearFilters);
        assert_eq!(app.world().resource::<VisibleModels>().len(), 6);
        assert_eq!(app.world().resource::<GalleryState>().search_term(), "");
    }

    #[test]
    fn test_commands_apply_in_order() {
        let mut app = controller_app(shipped_catalog());
        for command in [
            GalleryCommand::SetSearchTerm("car".to_string()),
            GalleryCommand::ToggleExpand("3".to_string()),
            GalleryCommand::SetViewMode(ViewMode::List),
            GalleryCommand::ToggleExpand("3".to_string()),
            GalleryCommand::ToggleExpand("1".to_string()),
        ] {
            app.world_mut()
                .send_event(GalleryCommandEvent::new(command, CommandSource::Rpc));
        }
        app.update();

        let gallery = app.world().resource::<GalleryState>();
        assert_eq!(gallery.search_term(), "car");
        assert_eq!(gallery.view_mode(), ViewMode::List);
        assert_eq!(gallery.expanded_id(), Some("1"));
    }

    #[test]
    fn test_expansion_does_not_change_visible_set() {
        let mut app = controller_app(shipped_catalog());
        let before = app.world().resource::<VisibleModels>().clone();
        send(&mut app, GalleryCommand::ToggleExpand("4".to_string()));
        assert_eq!(*app.world().resource::<VisibleModels>(), before);
    }

    #[test]
    fn test_repeated_command_leaves_state_unchanged() {
        let mut app = controller_app(shipped_catalog());
        send(&mut app, GalleryCommand::SetViewMode(ViewMode::Grid));
        let gallery = app.world().resource_ref::<GalleryState>();
        assert!(!gallery.is_changed());
    }
}
