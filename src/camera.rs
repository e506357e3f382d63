//! Camera setup and manual orbit controls.
//!
//! The focus controller owns scripted camera moves. Between moves the user
//! can orbit around the current look-at point with the right mouse button and
//! zoom with the scroll wheel.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};

use crate::config::OrreryConfig;
use crate::control::ActiveOrrery;
use crate::scene::CameraPose;
use crate::ui::UiCapture;

/// Closest the manual zoom gets to the look-at point.
pub const MIN_DISTANCE: f32 = 3.0;

/// Farthest the manual zoom reaches.
pub const MAX_DISTANCE: f32 = 500.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Radians of orbit per pixel of mouse drag.
pub const ORBIT_SPEED: f32 = 0.005;

/// Keeps the camera off the poles so `looking_at` stays well defined.
const MAX_PITCH: f32 = 1.5;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, orbit_controls);
    }
}

/// Spawn the main camera at the overview pose.
fn setup_camera(mut commands: Commands, config: Res<OrreryConfig>) {
    let pose = config.focus.overview_pose();
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            far: 5000.0,
            ..default()
        }),
        pose_transform(pose),
        MainCamera,
    ));
}

/// Transform that places the camera at `pose`.
pub fn pose_transform(pose: CameraPose) -> Transform {
    Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y)
}

/// Rotate `pose` around its look-at point and scale its distance.
pub fn orbit_pose(pose: CameraPose, yaw: f32, pitch: f32, zoom: f32) -> CameraPose {
    let offset = pose.position - pose.look_at;
    let distance = (offset.length() * zoom).clamp(MIN_DISTANCE, MAX_DISTANCE);

    let horizontal = Vec2::new(offset.x, offset.z).length();
    let current_yaw = offset.z.atan2(offset.x);
    let current_pitch = offset.y.atan2(horizontal);

    let new_yaw = current_yaw + yaw;
    let new_pitch = (current_pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
    let direction = Vec3::new(
        new_pitch.cos() * new_yaw.cos(),
        new_pitch.sin(),
        new_pitch.cos() * new_yaw.sin(),
    );
    CameraPose::new(pose.look_at + direction * distance, pose.look_at)
}

/// Right-drag to orbit, scroll to zoom. Ignored during scripted moves.
fn orbit_controls(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut orrery: ResMut<ActiveOrrery>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    capture: Res<UiCapture>,
) {
    let dragging = mouse_buttons.pressed(MouseButton::Right) && mouse_motion.delta != Vec2::ZERO;
    if !dragging && mouse_scroll.delta.y == 0.0 {
        return;
    }
    if capture.pointer || orrery.focus().transition().is_some() {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let (yaw, pitch) = if dragging {
        (mouse_motion.delta.x * ORBIT_SPEED, mouse_motion.delta.y * ORBIT_SPEED)
    } else {
        (0.0, 0.0)
    };
    let zoom = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;

    let pose = orbit_pose(orrery.focus().camera(), yaw, pitch, zoom);
    orrery.camera_moved(pose);
    *transform = pose_transform(pose);
}
