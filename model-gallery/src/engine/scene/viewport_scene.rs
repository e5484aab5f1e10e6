use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use constants::lighting::{
    FILL_LIGHT_COLOUR, FILL_LIGHT_INTENSITY, FILL_LIGHT_POSITION, LIGHT_RANGE,
    SPOT_LIGHT_INNER_ANGLE, SPOT_LIGHT_INTENSITY, SPOT_LIGHT_OUTER_ANGLE, SPOT_LIGHT_POSITION,
    SPOT_LIGHT_SHADOWS,
};
use constants::orbit::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};

use crate::constants::palette::VIEWPORT_BACKGROUND;
use crate::engine::assets::catalog::ModelRecord;
use crate::engine::camera::orbit_camera::{OrbitCamera, OrbitViewport};
use crate::engine::loading::model_loader::{ModelRequest, ModelViewState};
use crate::engine::scene::slots::slot_origin;
use crate::gallery::layout::target_size;

/// Root of one card's isolated 3D scene.
#[derive(Component, Debug)]
pub struct CardScene {
    pub model_id: String,
    pub slot: u32,
    pub target: Handle<Image>,
    pub camera: Entity,
    /// Parent of the loaded model or fallback cube.
    pub pivot: Entity,
    /// `Time::elapsed_secs` when the card mounted.
    pub mounted_at: f32,
}

/// Entities created for a newly mounted card scene.
#[derive(Debug, Clone, Copy)]
pub struct SpawnedCardScene {
    pub root: Entity,
    pub camera: Entity,
}

/// Offscreen colour target a card camera renders into.
pub fn create_render_target(images: &mut Assets<Image>, size: UVec2) -> Handle<Image> {
    let mut image = Image::new_fill(
        Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::RENDER_ATTACHMENT;
    images.add(image)
}

/// Spawn camera, lights and pivot for `record` in `slot` and start loading
/// its model.
pub fn spawn_card_scene(
    commands: &mut Commands,
    asset_server: &AssetServer,
    record: &ModelRecord,
    slot: u32,
    target: Handle<Image>,
    mounted_at: f32,
) -> SpawnedCardScene {
    let orbit = OrbitCamera::default();

    let camera = commands
        .spawn((
            Name::new("CardCamera"),
            Camera3d::default(),
            Camera {
                target: RenderTarget::Image(target.clone().into()),
                order: -1,
                clear_color: ClearColorConfig::Custom(VIEWPORT_BACKGROUND),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                ..default()
            }),
            orbit.transform(),
            orbit,
        ))
        .id();

    let pivot = commands
        .spawn((Name::new("ModelPivot"), Transform::default(), Visibility::default()))
        .id();

    let spot = commands
        .spawn((
            Name::new("KeyLight"),
            SpotLight {
                intensity: SPOT_LIGHT_INTENSITY,
                range: LIGHT_RANGE,
                outer_angle: SPOT_LIGHT_OUTER_ANGLE,
                inner_angle: SPOT_LIGHT_INNER_ANGLE,
                shadows_enabled: SPOT_LIGHT_SHADOWS,
                ..default()
            },
            Transform::from_translation(Vec3::from_array(SPOT_LIGHT_POSITION))
                .looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();

    let [r, g, b] = FILL_LIGHT_COLOUR;
    let fill = commands
        .spawn((
            Name::new("FillLight"),
            PointLight {
                color: Color::srgb_u8(r, g, b),
                intensity: FILL_LIGHT_INTENSITY,
                range: LIGHT_RANGE,
                ..default()
            },
            Transform::from_translation(Vec3::from_array(FILL_LIGHT_POSITION)),
        ))
        .id();

    let request = ModelRequest {
        handle: asset_server.load(record.model_url.clone()),
        model_url: record.model_url.clone(),
    };

    let root = commands
        .spawn((
            Name::new(format!("CardScene {}", record.id)),
            CardScene {
                model_id: record.id.clone(),
                slot,
                target,
                camera,
                pivot,
                mounted_at,
            },
            request,
            ModelViewState::Loading,
            Transform::from_translation(slot_origin(slot)),
            Visibility::default(),
        ))
        .add_children(&[camera, pivot, spot, fill])
        .id();

    SpawnedCardScene { root, camera }
}

/// Keep every render target at the physical size of the node showing it.
pub fn resize_render_targets(
    viewports: Query<(&ComputedNode, &ImageNode), (With<OrbitViewport>, Changed<ComputedNode>)>,
    mut images: ResMut<Assets<Image>>,
) {
    for (node, image_node) in &viewports {
        let size = target_size(node.size());
        let Some(image) = images.get(&image_node.image) else {
            continue;
        };
        if image.size() == size {
            continue;
        }
        if let Some(image) = images.get_mut(&image_node.image) {
            image.resize(Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            });
        }
    }
}

#[cfg(test)]
impl CardScene {
    pub(crate) fn for_test(model_id: &str, pivot: Entity) -> Self {
        Self {
            model_id: model_id.to_string(),
            slot: 0,
            target: Handle::default(),
            camera: Entity::PLACEHOLDER,
            pivot,
            mounted_at: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_target_is_renderable() {
        let mut images = Assets::<Image>::default();
        let handle = create_render_target(&mut images, UVec2::new(320, 256));
        let image = images.get(&handle).expect("target stored");
        assert_eq!(image.size(), UVec2::new(320, 256));
        assert!(
            image
                .texture_descriptor
                .usage
                .contains(TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING)
        );
    }
}
