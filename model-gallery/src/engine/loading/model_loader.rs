use bevy::asset::io::AssetReaderError;
use bevy::asset::{AssetLoadError, LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::animation::{
    FALLBACK_COLOUR, FALLBACK_CUBE_SIZE, FALLBACK_METALLIC, FALLBACK_ROUGHNESS,
    LOADED_MODEL_SCALE,
};
use std::fmt;

use crate::engine::loading::progress::ModelLoadProgress;
use crate::engine::scene::animation::{FallbackSpin, IdleSway};
use crate::engine::scene::viewport_scene::CardScene;

/// What a card's viewport is currently showing.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub enum ModelViewState {
    #[default]
    Loading,
    Loaded(Handle<Scene>),
    FailedFallback,
}

impl ModelViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// In-flight glTF request for a card scene.
#[derive(Component)]
pub struct ModelRequest {
    pub handle: Handle<Gltf>,
    pub model_url: String,
}

/// Coarse failure classification. Only changes the log line; every kind
/// renders the fallback cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    UnsupportedFormat,
    Malformed,
}

impl FailureKind {
    pub fn from_error(error: &AssetLoadError) -> Self {
        match error {
            AssetLoadError::AssetReaderError(AssetReaderError::NotFound(_)) => Self::NotFound,
            AssetLoadError::MissingAssetLoaderForExtension(_)
            | AssetLoadError::MissingAssetLoader { .. } => Self::UnsupportedFormat,
            _ => Self::Malformed,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not found",
            Self::UnsupportedFormat => "unsupported format",
            Self::Malformed => "malformed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Pending,
    Ready,
    Failed(FailureKind),
}

/// Fold the root and recursive dependency states of a glTF load into one outcome.
pub fn classify_load(load: &LoadState, recursive: &RecursiveDependencyLoadState) -> LoadOutcome {
    match (load, recursive) {
        (LoadState::Failed(err), _) => LoadOutcome::Failed(FailureKind::from_error(err)),
        (_, RecursiveDependencyLoadState::Failed(err)) => {
            LoadOutcome::Failed(FailureKind::from_error(err))
        }
        (LoadState::Loaded, RecursiveDependencyLoadState::Loaded) => LoadOutcome::Ready,
        _ => LoadOutcome::Pending,
    }
}

/// Scene to show for a loaded glTF: the declared default, else the first one.
pub fn default_scene(gltf: &Gltf) -> Option<Handle<Scene>> {
    gltf.default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
}

/// Polling and applying model loads. Runs before the gallery unmounts cards
/// so spawned geometry is flushed while its pivot still exists.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelLoadSet;

/// Fired once per card scene when its model load finishes or fails.
#[derive(Event, Debug, Clone)]
pub struct ModelLoadSettled {
    pub scene: Entity,
    pub model_id: String,
    pub result: Result<Handle<Scene>, FailureKind>,
}

/// Shared mesh and material for every fallback cube.
#[derive(Resource)]
pub struct FallbackAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

impl FromWorld for FallbackAssets {
    fn from_world(world: &mut World) -> Self {
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Cuboid::from_length(FALLBACK_CUBE_SIZE));
        let [r, g, b] = FALLBACK_COLOUR;
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color: Color::srgb_u8(r, g, b),
                perceptual_roughness: FALLBACK_ROUGHNESS,
                metallic: FALLBACK_METALLIC,
                ..default()
            });
        Self { mesh, material }
    }
}

/// Poll pending glTF loads and report the ones that settled this frame.
pub fn poll_model_loads(
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    scenes: Query<(Entity, &CardScene, &ModelRequest, &ModelViewState)>,
    mut settled: EventWriter<ModelLoadSettled>,
) {
    for (entity, card_scene, request, state) in &scenes {
        if !state.is_loading() {
            continue;
        }

        let Some((load, _, recursive)) = asset_server.get_load_states(request.handle.id()) else {
            continue;
        };

        let result = match classify_load(&load, &recursive) {
            LoadOutcome::Pending => continue,
            LoadOutcome::Failed(kind) => Err(kind),
            LoadOutcome::Ready => {
                let Some(gltf) = gltfs.get(&request.handle) else {
                    continue;
                };
                default_scene(gltf).ok_or(FailureKind::Malformed)
            }
        };

        if let Err(kind) = result {
            warn!(
                "Model '{}' ({}) failed to load: {}, showing fallback",
                card_scene.model_id, request.model_url, kind
            );
        }

        settled.write(ModelLoadSettled {
            scene: entity,
            model_id: card_scene.model_id.clone(),
            result,
        });
    }
}

/// Swap the loading state for loaded geometry or the fallback cube.
pub fn apply_model_outcomes(
    mut events: EventReader<ModelLoadSettled>,
    mut scenes: Query<(&CardScene, &mut ModelViewState)>,
    mut progress: ResMut<ModelLoadProgress>,
    fallback: Res<FallbackAssets>,
    mut commands: Commands,
) {
    for event in events.read() {
        // The card may have been unmounted in the same frame.
        let Ok((card_scene, mut state)) = scenes.get_mut(event.scene) else {
            continue;
        };
        if !state.is_loading() {
            continue;
        }

        match &event.result {
            Ok(scene) => {
                commands.entity(card_scene.pivot).insert(IdleSway {
                    mounted_at: card_scene.mounted_at,
                });
                commands.spawn((
                    Name::new("LoadedModel"),
                    SceneRoot(scene.clone()),
                    Transform::from_scale(Vec3::splat(LOADED_MODEL_SCALE)),
                    ChildOf(card_scene.pivot),
                ));
                info!("Model '{}' loaded", event.model_id);
                *state = ModelViewState::Loaded(scene.clone());
            }
            Err(_) => {
                commands.spawn((
                    Name::new("FallbackCube"),
                    Mesh3d(fallback.mesh.clone()),
                    MeshMaterial3d(fallback.material.clone()),
                    FallbackSpin {
                        mounted_at: card_scene.mounted_at,
                    },
                    Transform::default(),
                    ChildOf(card_scene.pivot),
                ));
                *state = ModelViewState::FailedFallback;
            }
        }

        progress.settle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::CategoryFilter;
    use crate::gallery::state::{GalleryState, ViewMode};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    fn not_found() -> Arc<AssetLoadError> {
        Arc::new(AssetLoadError::AssetReaderError(AssetReaderError::NotFound(
            PathBuf::from("models/missing.glb"),
        )))
    }

    #[test]
    fn test_classify_pending_until_dependencies_load() {
        assert_eq!(
            classify_load(&LoadState::Loading, &RecursiveDependencyLoadState::Loading),
            LoadOutcome::Pending
        );
        assert_eq!(
            classify_load(&LoadState::Loaded, &RecursiveDependencyLoadState::Loading),
            LoadOutcome::Pending
        );
        assert_eq!(
            classify_load(&LoadState::Loaded, &RecursiveDependencyLoadState::Loaded),
            LoadOutcome::Ready
        );
    }

    #[test]
    fn test_classify_missing_file() {
        assert_eq!(
            classify_load(
                &LoadState::Failed(not_found()),
                &RecursiveDependencyLoadState::Failed(not_found())
            ),
            LoadOutcome::Failed(FailureKind::NotFound)
        );
    }

    #[test]
    fn test_classify_failed_dependency() {
        let err = Arc::new(AssetLoadError::AssetReaderError(AssetReaderError::Io(
            Arc::new(std::io::Error::other("truncated buffer")),
        )));
        assert_eq!(
            classify_load(&LoadState::Loaded, &RecursiveDependencyLoadState::Failed(err)),
            LoadOutcome::Failed(FailureKind::Malformed)
        );
    }

    fn outcome_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Scene>()
            .init_resource::<FallbackAssets>()
            .init_resource::<ModelLoadProgress>()
            .init_resource::<GalleryState>()
            .add_event::<ModelLoadSettled>()
            .add_systems(Update, apply_model_outcomes);
        app
    }

    fn spawn_card_scene(app: &mut App) -> (Entity, Entity) {
        let pivot = app.world_mut().spawn(Transform::default()).id();
        let scene = app
            .world_mut()
            .spawn((
                CardScene::for_test("2", pivot),
                ModelViewState::Loading,
            ))
            .id();
        app.world_mut().resource_mut::<ModelLoadProgress>().request();
        (scene, pivot)
    }

    #[test]
    fn test_failed_load_shows_fallback_and_keeps_gallery_state() {
        let mut app = outcome_app();
        {
            let mut gallery = app.world_mut().resource_mut::<GalleryState>();
            gallery.set_search_term("helmet");
            gallery.set_view_mode(ViewMode::List);
        }
        let before = app.world().resource::<GalleryState>().clone();
        let (scene, pivot) = spawn_card_scene(&mut app);

        app.world_mut().send_event(ModelLoadSettled {
            scene,
            model_id: "2".to_string(),
            result: Err(FailureKind::NotFound),
        });
        app.update();

        assert_eq!(
            app.world().get::<ModelViewState>(scene),
            Some(&ModelViewState::FailedFallback)
        );
        let children = app.world().get::<Children>(pivot).expect("fallback spawned");
        assert_eq!(children.len(), 1);
        assert!(app.world().get::<FallbackSpin>(children[0]).is_some());
        assert!(app.world().get::<IdleSway>(pivot).is_none());

        let after = app.world().resource::<GalleryState>();
        assert_eq!(*after, before);
        assert_eq!(after.selected_category(), &CategoryFilter::All);
        assert_eq!(app.world().resource::<ModelLoadProgress>().percent(), 100);
    }

    #[test]
    fn test_missing_model_file_settles_to_fallback() {
        let mut app = outcome_app();
        app.init_asset::<Gltf>()
            .add_systems(Update, poll_model_loads.before(apply_model_outcomes));
        let (scene, pivot) = spawn_card_scene(&mut app);
        let handle = app
            .world()
            .resource::<AssetServer>()
            .load::<Gltf>("models/does-not-exist.glb");
        app.world_mut().entity_mut(scene).insert(ModelRequest {
            handle,
            model_url: "models/does-not-exist.glb".to_string(),
        });

        // The load fails on the IO task pool; poll until the card settles.
        for _ in 0..500 {
            app.update();
            if app.world().get::<ModelViewState>(scene) != Some(&ModelViewState::Loading) {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(
            app.world().get::<ModelViewState>(scene),
            Some(&ModelViewState::FailedFallback)
        );
        let children = app.world().get::<Children>(pivot).expect("fallback spawned");
        assert!(app.world().get::<FallbackSpin>(children[0]).is_some());
        assert_eq!(app.world().resource::<ModelLoadProgress>().settled(), 1);
    }

    #[test]
    fn test_loaded_model_gets_idle_sway() {
        let mut app = outcome_app();
        let (scene, pivot) = spawn_card_scene(&mut app);
        let handle = app
            .world_mut()
            .resource_mut::<Assets<Scene>>()
            .add(Scene::new(World::new()));

        app.world_mut().send_event(ModelLoadSettled {
            scene,
            model_id: "2".to_string(),
            result: Ok(handle.clone()),
        });
        app.update();

        assert_eq!(
            app.world().get::<ModelViewState>(scene),
            Some(&ModelViewState::Loaded(handle))
        );
        assert!(app.world().get::<IdleSway>(pivot).is_some());
    }

    #[test]
    fn test_settles_once_per_scene() {
        let mut app = outcome_app();
        let (scene, _) = spawn_card_scene(&mut app);
        app.world_mut().resource_mut::<ModelLoadProgress>().request();

        for _ in 0..2 {
            app.world_mut().send_event(ModelLoadSettled {
                scene,
                model_id: "2".to_string(),
                result: Err(FailureKind::Malformed),
            });
        }
        app.update();

        let progress = app.world().resource::<ModelLoadProgress>();
        assert_eq!(progress.settled(), 1);
        assert_eq!(progress.percent(), 50);
    }
}
