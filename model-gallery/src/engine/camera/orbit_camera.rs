use bevy::input::mouse::MouseScrollUnit;
use bevy::math::EulerRot;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
    ui::RelativeCursorPosition,
};
use constants::orbit::{
    AUTO_ROTATE_SPEED, CAMERA_POSITION, DRAG_SENSITIVITY, MAX_DISTANCE, MIN_DISTANCE, PITCH_LIMIT,
    ZOOM_SPEED_LINE, ZOOM_SPEED_PIXEL,
};
use std::f32::consts::TAU;

/// Orbit state of a card camera around its scene centre.
/// Pitch is positive above the horizon.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub auto_rotate: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let offset = Vec3::from_array(CAMERA_POSITION);
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / offset.length()).asin(),
            distance,
            auto_rotate: false,
        }
    }
}

impl OrbitCamera {
    /// Rotate by a pointer drag in logical pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw -= drag.x * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + drag.y * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move towards (negative) or away from (positive) the centre.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance + amount).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn advance_auto_rotate(&mut self, dt: f32) {
        if self.auto_rotate {
            self.yaw -= auto_rotate_rate() * dt;
        }
    }

    pub fn transform(&self) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        Transform::from_translation(rotation * Vec3::Z * self.distance)
            .looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Radians per second while auto-rotating.
pub fn auto_rotate_rate() -> f32 {
    TAU / 60.0 * AUTO_ROTATE_SPEED
}

/// UI node that forwards pointer input to a card camera.
#[derive(Component)]
pub struct OrbitViewport {
    pub camera: Entity,
}

/// Set when a viewport consumed the wheel this frame so the page does not scroll.
#[derive(Resource, Default)]
pub struct ScrollCapture {
    pub wheel_consumed: bool,
}

fn wheel_zoom(ev: &MouseWheel) -> f32 {
    match ev.unit {
        MouseScrollUnit::Line => -ev.y * ZOOM_SPEED_LINE,
        MouseScrollUnit::Pixel => -ev.y * ZOOM_SPEED_PIXEL,
    }
}

pub fn orbit_controller(
    viewports: Query<(&OrbitViewport, &Interaction, &RelativeCursorPosition)>,
    mut cameras: Query<&mut OrbitCamera>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut capture: ResMut<ScrollCapture>,
    time: Res<Time>,
) {
    let drag: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let zoom: f32 = scroll_events.read().map(wheel_zoom).sum();
    capture.wheel_consumed = false;

    for (viewport, interaction, cursor) in &viewports {
        let Ok(mut orbit) = cameras.get_mut(viewport.camera) else {
            continue;
        };

        let hovered = cursor.mouse_over();
        if orbit.auto_rotate != hovered {
            orbit.auto_rotate = hovered;
        }

        if *interaction == Interaction::Pressed && drag != Vec2::ZERO {
            orbit.rotate(drag);
        }

        if hovered && zoom != 0.0 {
            orbit.zoom(zoom);
            capture.wheel_consumed = true;
        }

        orbit.advance_auto_rotate(time.delta_secs());
    }
}

pub fn apply_orbit_transform(
    mut cameras: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
) {
    for (orbit, mut transform) in &mut cameras {
        *transform = orbit.transform();
    }
}
