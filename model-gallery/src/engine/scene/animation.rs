use bevy::prelude::*;
use constants::animation::{
    FALLBACK_SPIN_SPEED, FALLBACK_TILT_AMPLITUDE, IDLE_SWAY_AMPLITUDE, IDLE_SWAY_FREQUENCY,
};

/// Gentle yaw oscillation on a loaded model's pivot.
#[derive(Component, Debug, Clone, Copy)]
pub struct IdleSway {
    pub mounted_at: f32,
}

/// Continuous tumble of the fallback cube.
#[derive(Component, Debug, Clone, Copy)]
pub struct FallbackSpin {
    pub mounted_at: f32,
}

pub fn idle_sway_angle(t: f32) -> f32 {
    (t * IDLE_SWAY_FREQUENCY).sin() * IDLE_SWAY_AMPLITUDE
}

pub fn fallback_rotation(t: f32) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        t.sin() * FALLBACK_TILT_AMPLITUDE,
        t * FALLBACK_SPIN_SPEED,
        0.0,
    )
}

pub fn animate_idle_sway(time: Res<Time>, mut query: Query<(&IdleSway, &mut Transform)>) {
    let now = time.elapsed_secs();
    for (sway, mut transform) in &mut query {
        transform.rotation = Quat::from_rotation_y(idle_sway_angle(now - sway.mounted_at));
    }
}

pub fn animate_fallback_spin(time: Res<Time>, mut query: Query<(&FallbackSpin, &mut Transform)>) {
    let now = time.elapsed_secs();
    for (spin, mut transform) in &mut query {
        transform.rotation = fallback_rotation(now - spin.mounted_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_sway_is_bounded() {
        for i in 0..1000 {
            let t = i as f32 * 0.37;
            assert!(idle_sway_angle(t).abs() <= IDLE_SWAY_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn test_idle_sway_starts_at_rest() {
        assert_eq!(idle_sway_angle(0.0), 0.0);
    }

    #[test]
    fn test_fallback_rotation_follows_time() {
        let t = 2.0_f32;
        let (x, y, _) = fallback_rotation(t).to_euler(EulerRot::XYZ);
        assert!((x - t.sin() * FALLBACK_TILT_AMPLITUDE).abs() < 1e-4);
        assert!((y - t * FALLBACK_SPIN_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_animation_uses_time_since_mount() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, animate_idle_sway);
        let entity = app
            .world_mut()
            .spawn((IdleSway { mounted_at: 0.0 }, Transform::default()))
            .id();

        app.update();

        let elapsed = app.world().resource::<Time>().elapsed_secs();
        let transform = app.world().get::<Transform>(entity).expect("pivot transform");
        let expected = Quat::from_rotation_y(idle_sway_angle(elapsed));
        assert!(transform.rotation.angle_between(expected) < 1e-4);
    }
}
