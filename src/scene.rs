//! Renderer collaborator contract.
//!
//! The core never touches meshes or materials directly. It drives whatever
//! implements [`SceneRenderer`]: the Bevy backend in [`crate::render`] for the
//! app, or [`HeadlessScene`] for tests and tooling.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use bevy::color::Srgba;
use bevy::math::{Vec2, Vec3};

use crate::types::BodyKind;

/// Material inputs for a new body visual.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDesc {
    pub color: Srgba,
    pub kind: BodyKind,
    /// Self-lit, used for the star.
    pub emissive: bool,
}

/// Where the camera sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }
}

/// Identifies one in-flight texture load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureTicket(pub u64);

/// How a texture load ended.
#[derive(Clone, Debug, PartialEq)]
pub enum TextureOutcome {
    Loaded,
    Failed(String),
}

/// Operations the core needs from the scene graph.
pub trait SceneRenderer {
    /// Opaque reference to a visual owned by the renderer.
    type Handle: Copy + Eq + Hash + Debug;

    fn create_sphere_visual(&mut self, radius: f32, material: &MaterialDesc) -> Self::Handle;

    fn add_to_scene(&mut self, handle: Self::Handle);

    fn remove_from_scene(&mut self, handle: Self::Handle);

    fn set_position(&mut self, handle: Self::Handle, position: Vec3);

    /// Own-axis rotation around the local Y axis, in radians.
    fn set_spin(&mut self, handle: Self::Handle, angle: f32);

    /// Emissive highlight strength, 0 clears it.
    fn set_highlight(&mut self, handle: Self::Handle, intensity: f32);

    /// Replace the surface with a flat color (drops any texture).
    fn set_color(&mut self, handle: Self::Handle, color: Srgba);

    /// Start loading a texture onto the visual. The outcome is reported later
    /// and fed back through [`crate::Orrery::resolve_texture`].
    fn load_texture(&mut self, handle: Self::Handle, url: &str) -> TextureTicket;

    /// The first candidate under the screen point, if any.
    fn pick_at(&self, screen: Vec2, candidates: &[Self::Handle]) -> Option<Self::Handle>;

    fn set_camera(&mut self, pose: CameraPose);
}

/// State of one visual inside a [`HeadlessScene`].
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessVisual {
    pub radius: f32,
    pub material: MaterialDesc,
    pub position: Vec3,
    pub spin: f32,
    pub highlight: f32,
    /// Flat color currently applied, if a fallback replaced the material color.
    pub color_override: Option<Srgba>,
    pub texture: Option<String>,
}

/// In-memory scene used by tests and headless tooling.
///
/// Picking is scripted: [`HeadlessScene::place_pointer`] decides which handle
/// sits under a screen point.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u64,
    next_ticket: u64,
    visuals: HashMap<u64, HeadlessVisual>,
    in_scene: HashSet<u64>,
    pointer_targets: HashMap<(i32, i32), u64>,
    tickets: HashMap<TextureTicket, u64>,
    camera: Option<CameraPose>,
    camera_updates: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_scene(&self, handle: u64) -> bool {
        self.in_scene.contains(&handle)
    }

    pub fn scene_len(&self) -> usize {
        self.in_scene.len()
    }

    pub fn visual(&self, handle: u64) -> Option<&HeadlessVisual> {
        self.visuals.get(&handle)
    }

    pub fn camera(&self) -> Option<CameraPose> {
        self.camera
    }

    pub fn camera_updates(&self) -> usize {
        self.camera_updates
    }

    /// Make `handle` the pick result at this screen point.
    pub fn place_pointer(&mut self, screen: Vec2, handle: u64) {
        self.pointer_targets.insert(pixel(screen), handle);
    }

    /// The visual a texture ticket was issued for.
    pub fn ticket_target(&self, ticket: TextureTicket) -> Option<u64> {
        self.tickets.get(&ticket).copied()
    }

    /// Tickets issued so far, oldest first.
    pub fn issued_tickets(&self) -> Vec<TextureTicket> {
        let mut tickets: Vec<_> = self.tickets.keys().copied().collect();
        tickets.sort();
        tickets
    }
}

fn pixel(screen: Vec2) -> (i32, i32) {
    (screen.x.round() as i32, screen.y.round() as i32)
}

impl SceneRenderer for HeadlessScene {
    type Handle = u64;

    fn create_sphere_visual(&mut self, radius: f32, material: &MaterialDesc) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.visuals.insert(
            handle,
            HeadlessVisual {
                radius,
                material: material.clone(),
                position: Vec3::ZERO,
                spin: 0.0,
                highlight: 0.0,
                color_override: None,
                texture: None,
            },
        );
        handle
    }

    fn add_to_scene(&mut self, handle: u64) {
        self.in_scene.insert(handle);
    }

    fn remove_from_scene(&mut self, handle: u64) {
        self.in_scene.remove(&handle);
        self.visuals.remove(&handle);
    }

    fn set_position(&mut self, handle: u64, position: Vec3) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.position = position;
        }
    }

    fn set_spin(&mut self, handle: u64, angle: f32) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.spin = angle;
        }
    }

    fn set_highlight(&mut self, handle: u64, intensity: f32) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.highlight = intensity;
        }
    }

    fn set_color(&mut self, handle: u64, color: Srgba) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.color_override = Some(color);
            visual.texture = None;
        }
    }

    fn load_texture(&mut self, handle: u64, url: &str) -> TextureTicket {
        let ticket = TextureTicket(self.next_ticket);
        self.next_ticket += 1;
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.texture = Some(url.to_string());
        }
        self.tickets.insert(ticket, handle);
        ticket
    }

    fn pick_at(&self, screen: Vec2, candidates: &[u64]) -> Option<u64> {
        let handle = self.pointer_targets.get(&pixel(screen))?;
        candidates.contains(handle).then_some(*handle)
    }

    fn set_camera(&mut self, pose: CameraPose) {
        self.camera = Some(pose);
        self.camera_updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rocky() -> MaterialDesc {
        MaterialDesc {
            color: Srgba::WHITE,
            kind: BodyKind::ROCKY,
            emissive: false,
        }
    }

    #[test]
    fn test_headless_membership() {
        let mut scene = HeadlessScene::new();
        let a = scene.create_sphere_visual(1.0, &rocky());
        let b = scene.create_sphere_visual(2.0, &rocky());
        assert_ne!(a, b);
        assert!(!scene.is_in_scene(a), "created visuals start detached");

        scene.add_to_scene(a);
        scene.add_to_scene(b);
        assert_eq!(scene.scene_len(), 2);

        scene.remove_from_scene(a);
        assert!(!scene.is_in_scene(a));
        assert!(scene.visual(a).is_none());
        assert_eq!(scene.scene_len(), 1);
    }

    #[test]
    fn test_headless_pick_respects_candidates() {
        let mut scene = HeadlessScene::new();
        let a = scene.create_sphere_visual(1.0, &rocky());
        let point = Vec2::new(100.0, 200.0);
        scene.place_pointer(point, a);

        assert_eq!(scene.pick_at(point, &[a]), Some(a));
        assert_eq!(scene.pick_at(point, &[]), None);
        assert_eq!(scene.pick_at(Vec2::new(5.0, 5.0), &[a]), None);
    }

    #[test]
    fn test_set_color_drops_texture() {
        let mut scene = HeadlessScene::new();
        let a = scene.create_sphere_visual(1.0, &rocky());
        let ticket = scene.load_texture(a, "textures/mars.jpg");
        assert_eq!(scene.ticket_target(ticket), Some(a));
        assert_eq!(
            scene.visual(a).and_then(|v| v.texture.clone()).as_deref(),
            Some("textures/mars.jpg")
        );

        scene.set_color(a, Srgba::BLACK);
        let visual = scene.visual(a).expect("visual exists");
        assert_eq!(visual.color_override, Some(Srgba::BLACK));
        assert!(visual.texture.is_none());
    }
}
