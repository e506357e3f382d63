//! Bevy backend for the scene contract.
//!
//! [`BevyScene`] is a system parameter that turns [`SceneRenderer`] calls into
//! entity spawns, transform writes and material edits. Each body is one sphere
//! entity; rings and atmospheres are child entities that follow it.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::scene::{CameraPose, MaterialDesc, SceneRenderer, TextureOutcome, TextureTicket};

/// Ring band, as multiples of the body radius.
pub const RING_INNER: f32 = 1.5;
pub const RING_OUTER: f32 = 2.5;

/// Atmosphere shell radius, as a multiple of the body radius.
pub const ATMOSPHERE_SCALE: f32 = 1.1;

/// Emissive color of the focus highlight at full intensity (0x333333).
const HIGHLIGHT_COLOR: Srgba = Srgba::rgb(0.2, 0.2, 0.2);

/// Marks a body sphere and records its radius for picking.
#[derive(Component, Debug)]
pub struct BodyVisual {
    pub radius: f32,
}

#[derive(Debug)]
struct VisualRecord {
    material: Handle<StandardMaterial>,
    base_emissive: LinearRgba,
}

#[derive(Debug)]
struct PendingImage {
    entity: Entity,
    image: Handle<Image>,
}

/// Bookkeeping shared by every [`BevyScene`] borrow.
#[derive(Resource, Default, Debug)]
pub struct VisualIndex {
    records: HashMap<Entity, VisualRecord>,
    pending: HashMap<TextureTicket, PendingImage>,
    next_ticket: u64,
}

impl VisualIndex {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pending_textures(&self) -> usize {
        self.pending.len()
    }
}

/// Scene access for systems that drive the orrery.
#[derive(SystemParam)]
pub struct BevyScene<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    asset_server: Res<'w, AssetServer>,
    index: ResMut<'w, VisualIndex>,
    bodies: Query<'w, 's, (&'static mut Transform, &'static BodyVisual), Without<MainCamera>>,
    cameras: Query<
        'w,
        's,
        (&'static Camera, &'static GlobalTransform, &'static mut Transform),
        (With<MainCamera>, Without<BodyVisual>),
    >,
}

impl BevyScene<'_, '_> {
    /// Collect finished texture loads. Loaded textures show unmodulated.
    pub fn poll_textures(&mut self) -> Vec<(TextureTicket, TextureOutcome)> {
        let mut finished = Vec::new();
        for (ticket, pending) in &self.index.pending {
            let outcome = match self.asset_server.load_state(pending.image.id()) {
                LoadState::Loaded => TextureOutcome::Loaded,
                LoadState::Failed(err) => TextureOutcome::Failed(err.to_string()),
                LoadState::NotLoaded | LoadState::Loading => continue,
            };
            finished.push((*ticket, outcome));
        }

        for (ticket, outcome) in &finished {
            let Some(pending) = self.index.pending.remove(ticket) else {
                continue;
            };
            if *outcome != TextureOutcome::Loaded {
                continue;
            }
            if let Some(material) = self.material_mut(pending.entity) {
                material.base_color = Color::WHITE;
            }
        }
        finished
    }

    fn material_mut(&mut self, entity: Entity) -> Option<&mut StandardMaterial> {
        let record = self.index.records.get(&entity)?;
        self.materials.get_mut(&record.material)
    }

    fn spawn_rings(&mut self, parent: Entity, radius: f32) {
        let mesh = self.meshes.add(Annulus::new(radius * RING_INNER, radius * RING_OUTER));
        let material = self.materials.add(StandardMaterial {
            base_color: Color::srgba(0.8, 0.8, 0.8, 0.7),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 0.8,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        self.commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ChildOf(parent),
        ));
    }

    fn spawn_atmosphere(&mut self, parent: Entity, radius: f32) {
        let mesh = self.meshes.add(Sphere::new(radius * ATMOSPHERE_SCALE).mesh().uv(48, 24));
        let material = self.materials.add(StandardMaterial {
            base_color: Color::srgba(0.0, 0.667, 1.0, 0.2),
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        self.commands
            .spawn((Mesh3d(mesh), MeshMaterial3d(material), Transform::default(), ChildOf(parent)));
    }
}

impl SceneRenderer for BevyScene<'_, '_> {
    type Handle = Entity;

    fn create_sphere_visual(&mut self, radius: f32, desc: &MaterialDesc) -> Entity {
        let mesh = self.meshes.add(Sphere::new(radius).mesh().uv(64, 32));
        let base_emissive = if desc.emissive {
            LinearRgba::from(desc.color) * 2.0
        } else {
            LinearRgba::BLACK
        };
        let (roughness, metallic) = if desc.kind.is_gas_giant { (0.8, 0.2) } else { (0.5, 0.1) };
        let material = self.materials.add(StandardMaterial {
            base_color: desc.color.into(),
            emissive: base_emissive,
            perceptual_roughness: roughness,
            metallic,
            unlit: desc.emissive,
            ..default()
        });

        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material.clone()),
                Transform::default(),
                Visibility::Hidden,
                BodyVisual { radius },
            ))
            .id();

        if desc.kind.has_rings {
            self.spawn_rings(entity, radius);
        }
        if !desc.kind.is_gas_giant && !desc.emissive {
            self.spawn_atmosphere(entity, radius);
        }

        self.index.records.insert(entity, VisualRecord { material, base_emissive });
        entity
    }

    fn add_to_scene(&mut self, handle: Entity) {
        if let Ok(mut entity) = self.commands.get_entity(handle) {
            entity.insert(Visibility::Inherited);
        }
    }

    fn remove_from_scene(&mut self, handle: Entity) {
        if let Some(record) = self.index.records.remove(&handle) {
            self.materials.remove(&record.material);
        }
        self.index.pending.retain(|_, pending| pending.entity != handle);
        if let Ok(mut entity) = self.commands.get_entity(handle) {
            entity.despawn();
        }
    }

    fn set_position(&mut self, handle: Entity, position: Vec3) {
        match self.bodies.get_mut(handle) {
            Ok((mut transform, _)) => transform.translation = position,
            // Spawned this frame, not visible to the query yet.
            Err(_) => {
                if let Ok(mut entity) = self.commands.get_entity(handle) {
                    entity.insert(Transform::from_translation(position));
                }
            }
        }
    }

    fn set_spin(&mut self, handle: Entity, angle: f32) {
        if let Ok((mut transform, _)) = self.bodies.get_mut(handle) {
            transform.rotation = Quat::from_rotation_y(angle);
        }
    }

    fn set_highlight(&mut self, handle: Entity, intensity: f32) {
        let Some(record) = self.index.records.get(&handle) else {
            return;
        };
        let emissive = record.base_emissive + LinearRgba::from(HIGHLIGHT_COLOR) * intensity;
        if let Some(material) = self.materials.get_mut(&record.material) {
            material.emissive = emissive;
        }
    }

    fn set_color(&mut self, handle: Entity, color: Srgba) {
        if let Some(material) = self.material_mut(handle) {
            material.base_color = color.into();
            material.base_color_texture = None;
        }
    }

    fn load_texture(&mut self, handle: Entity, url: &str) -> TextureTicket {
        let ticket = TextureTicket(self.index.next_ticket);
        self.index.next_ticket += 1;

        let image: Handle<Image> = self.asset_server.load(url.to_string());
        if let Some(material) = self.material_mut(handle) {
            material.base_color_texture = Some(image.clone());
        }
        self.index.pending.insert(ticket, PendingImage { entity: handle, image });
        ticket
    }

    fn pick_at(&self, screen: Vec2, candidates: &[Entity]) -> Option<Entity> {
        let (camera, camera_transform, _) = self.cameras.single().ok()?;
        let ray = camera.viewport_to_world(camera_transform, screen).ok()?;

        candidates
            .iter()
            .filter_map(|&entity| {
                let (transform, visual) = self.bodies.get(entity).ok()?;
                let center = transform.translation;
                let t = ray_sphere_hit(ray.origin, *ray.direction, center, visual.radius)?;
                Some((entity, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    }

    fn set_camera(&mut self, pose: CameraPose) {
        if let Ok((_, _, mut transform)) = self.cameras.single_mut() {
            *transform = crate::camera::pose_transform(pose);
        }
    }
}

/// Distance along a unit-direction ray to the first sphere hit in front of
/// the origin.
pub fn ray_sphere_hit(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}
