//! Per-frame orbital advance.
//!
//! Orbits are circular and kinematic. Each tick adds `dt * time_scale * speed`
//! to a body's angle, so the motion depends only on elapsed real time and a
//! body held by the focus controller picks up from where it stopped.

use bevy::log::debug;
use serde::{Deserialize, Serialize};

use crate::registry::BodyRegistry;
use crate::scene::SceneRenderer;
use crate::types::{
    AXIS_SPIN_PER_FRAME, BodyId, FOCUSED_SPIN_BONUS, ORBIT_TIME_SCALE, orbit_position,
};

/// Rates used by [`advance_orbits`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Radians per second per unit of angular speed.
    pub time_scale: f32,
    /// Own-axis rotation added to every body each frame.
    pub spin_per_frame: f32,
    /// Extra rotation for the focused body each frame.
    pub focused_spin_bonus: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            time_scale: ORBIT_TIME_SCALE,
            spin_per_frame: AXIS_SPIN_PER_FRAME,
            focused_spin_bonus: FOCUSED_SPIN_BONUS,
        }
    }
}

/// Advance every body by `dt` seconds and push the new transforms to the scene.
///
/// The `held` body keeps its orbital angle but spins faster.
pub fn advance_orbits<H, S>(
    registry: &mut BodyRegistry<H>,
    held: Option<BodyId>,
    dt: f32,
    settings: &OrbitSettings,
    scene: &mut S,
) where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    S: SceneRenderer<Handle = H> + ?Sized,
{
    let dt = if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        debug!("Ignoring frame delta {dt}");
        0.0
    };

    for body in registry.iter_all_mut() {
        let is_held = held == Some(body.id);
        if !is_held {
            body.angle += dt * settings.time_scale * body.angular_speed;
            scene.set_position(body.handle, orbit_position(body.angle, body.orbital_distance));
        }

        body.spin += settings.spin_per_frame;
        if is_held {
            body.spin += settings.focused_spin_bonus;
        }
        scene.set_spin(body.handle, body.spin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;
    use crate::types::{BodySpec, TextureFallback};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn registry_with(speeds: &[f32]) -> (BodyRegistry<u64>, HeadlessScene, Vec<BodyId>) {
        let mut scene = HeadlessScene::new();
        let mut registry = BodyRegistry::new();
        registry.set_star(&BodySpec::new("Sun", 5.0, 0.0, 0.0), &mut scene);
        let ids = speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| {
                registry.add_body(
                    &BodySpec::new(format!("P{i}"), 1.0, 20.0 + 10.0 * i as f32, speed),
                    TextureFallback::ByKind,
                    &mut scene,
                )
            })
            .collect();
        (registry, scene, ids)
    }

    fn angle_of(registry: &BodyRegistry<u64>, id: BodyId) -> f32 {
        registry.get(id).map(|b| b.angle).expect("body registered")
    }

    #[test]
    fn test_one_second_advance() {
        let (mut registry, mut scene, ids) = registry_with(&[0.02]);
        advance_orbits(&mut registry, None, 1.0, &OrbitSettings::default(), &mut scene);

        assert_relative_eq!(angle_of(&registry, ids[0]), 0.01, epsilon = 1e-7);
        let body = registry.get(ids[0]).expect("body");
        let visual = scene.visual(body.handle).expect("visual");
        assert_relative_eq!(visual.position.x, body.angle.cos() * 20.0, epsilon = 1e-5);
        assert_relative_eq!(visual.position.z, body.angle.sin() * 20.0, epsilon = 1e-5);
        assert_eq!(visual.position.y, 0.0);
    }

    #[test]
    fn test_held_body_does_not_orbit() {
        let (mut registry, mut scene, ids) = registry_with(&[0.02, 0.02]);
        let settings = OrbitSettings::default();
        for _ in 0..60 {
            advance_orbits(&mut registry, Some(ids[0]), 1.0 / 60.0, &settings, &mut scene);
        }

        assert_eq!(angle_of(&registry, ids[0]), 0.0);
        assert!(angle_of(&registry, ids[1]) > 0.0);
    }

    #[test]
    fn test_held_body_spins_faster() {
        let (mut registry, mut scene, ids) = registry_with(&[0.02, 0.02]);
        let settings = OrbitSettings::default();
        advance_orbits(&mut registry, Some(ids[0]), 0.016, &settings, &mut scene);

        let held = registry.get(ids[0]).expect("held").spin;
        let free = registry.get(ids[1]).expect("free").spin;
        assert_relative_eq!(held, AXIS_SPIN_PER_FRAME + FOCUSED_SPIN_BONUS);
        assert_relative_eq!(free, AXIS_SPIN_PER_FRAME);
    }

    #[test]
    fn test_release_resumes_without_jump() {
        let (mut registry, mut scene, ids) = registry_with(&[0.03]);
        let settings = OrbitSettings::default();
        advance_orbits(&mut registry, None, 2.0, &settings, &mut scene);
        let before_hold = angle_of(&registry, ids[0]);

        advance_orbits(&mut registry, Some(ids[0]), 5.0, &settings, &mut scene);
        assert_eq!(angle_of(&registry, ids[0]), before_hold);

        advance_orbits(&mut registry, None, 0.016, &settings, &mut scene);
        assert_relative_eq!(
            angle_of(&registry, ids[0]),
            before_hold + 0.016 * 0.5 * 0.03,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_star_stays_at_origin() {
        let (mut registry, mut scene, _) = registry_with(&[0.01]);
        advance_orbits(&mut registry, None, 10.0, &OrbitSettings::default(), &mut scene);

        let star = registry.star().expect("star");
        assert_eq!(star.position(), bevy::math::Vec3::ZERO);
        assert_relative_eq!(star.spin, AXIS_SPIN_PER_FRAME);
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let (mut registry, mut scene, ids) = registry_with(&[0.01]);
        let settings = OrbitSettings::default();
        advance_orbits(&mut registry, None, f32::NAN, &settings, &mut scene);
        advance_orbits(&mut registry, None, -1.0, &settings, &mut scene);
        assert_eq!(angle_of(&registry, ids[0]), 0.0);
    }

    proptest! {
        #[test]
        fn prop_split_frames_match_single_frame(
            speed in -0.05f32..0.05,
            dt in 0.001f32..0.5,
            split in 0.1f32..0.9,
        ) {
            let settings = OrbitSettings::default();
            let (mut whole, mut scene_a, ids_a) = registry_with(&[speed]);
            let (mut parts, mut scene_b, ids_b) = registry_with(&[speed]);

            advance_orbits(&mut whole, None, dt, &settings, &mut scene_a);
            advance_orbits(&mut parts, None, dt * split, &settings, &mut scene_b);
            advance_orbits(&mut parts, None, dt * (1.0 - split), &settings, &mut scene_b);

            prop_assert!((angle_of(&whole, ids_a[0]) - angle_of(&parts, ids_b[0])).abs() < 1e-6);
        }
    }
}
