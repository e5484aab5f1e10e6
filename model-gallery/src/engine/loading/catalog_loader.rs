use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::RELATIVE_CATALOG_PATH;
use crate::engine::assets::catalog::{Catalog, CatalogError};
use crate::engine::core::app_state::{AppState, CatalogStatus};

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<Catalog>>,
}

// Start the loading process
pub fn start_loading(mut catalog_loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    info!("Loading catalog from {}", RELATIVE_CATALOG_PATH);
    catalog_loader.handle = Some(asset_server.load(RELATIVE_CATALOG_PATH));
}

/// Wait for the catalog asset, validate it and publish it as a resource.
pub fn load_catalog_system(
    catalog_loader: Res<CatalogLoader>,
    catalogs: Res<Assets<Catalog>>,
    asset_server: Res<AssetServer>,
    mut status: ResMut<CatalogStatus>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(ref handle) = catalog_loader.handle else {
        return;
    };

    let outcome = if let Some(catalog) = catalogs.get(handle) {
        catalog.validate().map(|()| catalog.clone())
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        Err(CatalogError::Unavailable(err.to_string()))
    } else {
        return;
    };

    match outcome {
        Ok(catalog) => {
            info!(
                "✓ Catalog loaded: {} models in {} categories",
                catalog.models.len(),
                catalog.categories.len()
            );
            commands.insert_resource(catalog);
            next_state.set(AppState::Running);
        }
        Err(err) => {
            error!("Catalog rejected: {}", err);
            status.error = Some(err);
            next_state.set(AppState::CatalogUnavailable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::tests::shipped_catalog;
    use bevy::state::app::StatesPlugin;

    fn loader_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<Catalog>()
            .init_state::<AppState>()
            .init_resource::<CatalogLoader>()
            .init_resource::<CatalogStatus>()
            .add_systems(
                Update,
                load_catalog_system.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn insert_catalog(app: &mut App, catalog: Catalog) {
        let handle = app
            .world_mut()
            .resource_mut::<Assets<Catalog>>()
            .add(catalog);
        app.world_mut().resource_mut::<CatalogLoader>().handle = Some(handle);
    }

    #[test]
    fn test_valid_catalog_enters_running() {
        let mut app = loader_app();
        insert_catalog(&mut app, shipped_catalog());

        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Running
        );
        assert_eq!(app.world().resource::<Catalog>().models.len(), 6);
        assert!(app.world().resource::<CatalogStatus>().error.is_none());
    }

    #[test]
    fn test_invalid_catalog_is_unavailable() {
        let mut app = loader_app();
        let mut catalog = shipped_catalog();
        catalog.models[1].id = catalog.models[0].id.clone();
        insert_catalog(&mut app, catalog);

        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::CatalogUnavailable
        );
        assert!(app.world().get_resource::<Catalog>().is_none());
        assert_eq!(
            app.world().resource::<CatalogStatus>().error,
            Some(CatalogError::DuplicateId("1".to_string()))
        );
    }

    #[test]
    fn test_waits_without_handle() {
        let mut app = loader_app();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Loading
        );
    }
}
