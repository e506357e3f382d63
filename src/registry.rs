//! Body registry: the owning collection of the active system.
//!
//! Holds the central star and the orbiting bodies in insertion order, each
//! paired with exactly one render handle. A reverse map from handle to body
//! serves the picking adapter.

use std::collections::HashMap;

use bevy::color::Srgba;
use bevy::log::{debug, warn};
use bevy::math::Vec3;

use crate::scene::{MaterialDesc, SceneRenderer, TextureOutcome, TextureTicket};
use crate::types::{BodyId, BodyKind, BodySpec, TextureFallback, orbit_position};

/// One star or orbiting body.
#[derive(Clone, Debug)]
pub struct Body<H> {
    pub id: BodyId,
    pub name: String,
    pub radius: f32,
    pub orbital_distance: f32,
    pub angular_speed: f32,
    /// Orbital angle in radians.
    pub angle: f32,
    /// Own-axis rotation in radians.
    pub spin: f32,
    pub kind: BodyKind,
    pub color: Srgba,
    pub texture: Option<String>,
    pub handle: H,
}

impl<H> Body<H> {
    /// Current position on the circular orbit.
    pub fn position(&self) -> Vec3 {
        orbit_position(self.angle, self.orbital_distance)
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingTexture {
    body: BodyId,
    fallback: Srgba,
}

/// Bodies of the current system plus their render handles.
#[derive(Debug)]
pub struct BodyRegistry<H> {
    star: Option<Body<H>>,
    bodies: Vec<Body<H>>,
    by_handle: HashMap<H, BodyId>,
    pending_textures: HashMap<TextureTicket, PendingTexture>,
    next_id: u64,
}

impl<H> Default for BodyRegistry<H> {
    fn default() -> Self {
        Self {
            star: None,
            bodies: Vec::new(),
            by_handle: HashMap::new(),
            pending_textures: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<H: Copy + Eq + std::hash::Hash + std::fmt::Debug> BodyRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orbiting bodies; the star is not counted.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn star(&self) -> Option<&Body<H>> {
        self.star.as_ref()
    }

    /// Orbiting bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Body<H>> {
        self.bodies.iter()
    }

    /// Star first, then the orbiting bodies.
    pub fn iter_all(&self) -> impl Iterator<Item = &Body<H>> {
        self.star.iter().chain(self.bodies.iter())
    }

    pub(crate) fn iter_all_mut(&mut self) -> impl Iterator<Item = &mut Body<H>> {
        self.star.iter_mut().chain(self.bodies.iter_mut())
    }

    /// Look up a star or body by id.
    pub fn get(&self, id: BodyId) -> Option<&Body<H>> {
        self.iter_all().find(|body| body.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body<H>> {
        self.iter_all().find(|body| body.name == name)
    }

    pub fn body_for_handle(&self, handle: H) -> Option<BodyId> {
        self.by_handle.get(&handle).copied()
    }

    /// Pick candidates: star first, then the orbiting bodies.
    pub fn handles(&self) -> Vec<H> {
        self.iter_all().map(|body| body.handle).collect()
    }

    /// Texture loads still waiting for an outcome.
    pub fn pending_texture_count(&self) -> usize {
        self.pending_textures.len()
    }

    /// Remove every visual from the scene and empty the registry.
    ///
    /// Bodies created afterwards get fresh ids; outcomes of texture loads
    /// issued before the clear are ignored.
    pub fn clear<S>(&mut self, scene: &mut S)
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        for body in self.star.take().into_iter().chain(self.bodies.drain(..)) {
            scene.remove_from_scene(body.handle);
        }
        self.by_handle.clear();
        self.pending_textures.clear();
    }

    /// Replace the central star. It sits at the origin and glows.
    pub fn set_star<S>(&mut self, spec: &BodySpec, scene: &mut S) -> BodyId
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        if let Some(old) = self.star.take() {
            self.by_handle.remove(&old.handle);
            scene.remove_from_scene(old.handle);
        }
        let star_spec = BodySpec {
            orbital_distance: 0.0,
            angular_speed: 0.0,
            ..spec.clone()
        };
        let body = self.spawn(&star_spec, true, TextureFallback::OwnColor, scene);
        let id = body.id;
        self.star = Some(body);
        id
    }

    /// Create a body, put its visual in the scene and start its texture load.
    pub fn add_body<S>(
        &mut self,
        spec: &BodySpec,
        fallback: TextureFallback,
        scene: &mut S,
    ) -> BodyId
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        let body = self.spawn(spec, false, fallback, scene);
        let id = body.id;
        self.bodies.push(body);
        id
    }

    fn spawn<S>(
        &mut self,
        spec: &BodySpec,
        emissive: bool,
        fallback: TextureFallback,
        scene: &mut S,
    ) -> Body<H>
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        let material = MaterialDesc {
            color: spec.color,
            kind: spec.kind,
            emissive,
        };
        let handle = scene.create_sphere_visual(spec.radius, &material);
        let body = Body {
            id,
            name: spec.name.clone(),
            radius: spec.radius,
            orbital_distance: spec.orbital_distance,
            angular_speed: spec.angular_speed,
            angle: spec.initial_angle,
            spin: 0.0,
            kind: spec.kind,
            color: spec.color,
            texture: spec.texture.clone().filter(|url| !url.trim().is_empty()),
            handle,
        };

        scene.set_position(handle, body.position());
        scene.add_to_scene(handle);

        if let Some(url) = &body.texture {
            let ticket = scene.load_texture(handle, url);
            let fallback = match fallback {
                TextureFallback::ByKind => spec.kind.fallback_color(),
                TextureFallback::OwnColor => spec.color,
            };
            self.pending_textures.insert(ticket, PendingTexture { body: id, fallback });
        }

        self.by_handle.insert(handle, id);
        body
    }

    /// Apply the outcome of a texture load. Failures swap in the fallback color.
    ///
    /// Returns `true` if the ticket belonged to a body still in the registry.
    pub fn resolve_texture<S>(
        &mut self,
        ticket: TextureTicket,
        outcome: &TextureOutcome,
        scene: &mut S,
    ) -> bool
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        let Some(pending) = self.pending_textures.remove(&ticket) else {
            debug!("Ignoring texture outcome for retired ticket {:?}", ticket);
            return false;
        };
        let Some(body) = self.get(pending.body) else {
            return false;
        };

        match outcome {
            TextureOutcome::Loaded => {
                debug!("Texture ready for {}", body.name);
            }
            TextureOutcome::Failed(reason) => {
                warn!(
                    "Texture {:?} for {} failed to load ({}), using flat color",
                    body.texture.as_deref().unwrap_or_default(),
                    body.name,
                    reason
                );
                scene.set_color(body.handle, pending.fallback);
            }
        }
        true
    }
}
