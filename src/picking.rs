//! Screen-point picking: maps a pointer position to a body.

use bevy::math::Vec2;

use crate::registry::BodyRegistry;
use crate::scene::SceneRenderer;
use crate::types::BodyId;

/// The body under `screen`, star included.
pub fn pick<H, S>(registry: &BodyRegistry<H>, scene: &S, screen: Vec2) -> Option<BodyId>
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    S: SceneRenderer<Handle = H> + ?Sized,
{
    let candidates = registry.handles();
    let handle = scene.pick_at(screen, &candidates)?;
    registry.body_for_handle(handle)
}

/// Tooltip text for the body under `screen`.
pub fn hover_label<H, S>(registry: &BodyRegistry<H>, scene: &S, screen: Vec2) -> Option<String>
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    S: SceneRenderer<Handle = H> + ?Sized,
{
    let id = pick(registry, scene, screen)?;
    registry.get(id).map(|body| body.name.clone())
}
