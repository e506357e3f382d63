//! Background rendering: starfield shell and scene lighting.

use bevy::prelude::*;
use rand::Rng;

/// Number of background stars.
const STAR_COUNT: usize = 1500;

/// Radius band of the starfield shell, well beyond the manual zoom limit.
const STARFIELD_RADIUS: std::ops::Range<f32> = 900.0..1400.0;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

/// Uniform random point on a sphere shell.
fn random_shell_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..1.0);
    let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * theta.cos(), z, r * theta.sin()) * rng.gen_range(STARFIELD_RADIUS)
}

/// Spawn a starfield of small unlit spheres around the system.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(0.8).mesh().uv(8, 4));

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        let scale = rng.gen_range(0.5..1.5);
        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(random_shell_point(&mut rng))
                .with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {} background stars", STAR_COUNT);
}

/// Light the bodies from the star at the origin, plus a dim fill.
fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: 2.0e8,
            range: 2000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));

    info!("Scene lighting initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_shell_points_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let p = random_shell_point(&mut rng);
            let r = p.length();
            assert!(
                r >= STARFIELD_RADIUS.start - 1e-2 && r <= STARFIELD_RADIUS.end + 1e-2,
                "radius {r}"
            );
        }
    }
}
