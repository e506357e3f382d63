//! The orrery context: one value owning the active system, the focus
//! controller and the random source.
//!
//! This is the surface UI code talks to. Every method takes the scene it
//! should draw into, so the same context drives the Bevy app and the
//! headless tests.

use bevy::log::{info, warn};
use bevy::math::Vec2;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::OrreryConfig;
use crate::error::{OrreryError, Result};
use crate::focus::FocusController;
use crate::generators::{self, CustomBody, CustomSystem, SystemRecipe};
use crate::integrator::advance_orbits;
use crate::persistence::{SavedSystem, SystemStore, upsert};
use crate::picking;
use crate::registry::BodyRegistry;
use crate::scene::{CameraPose, SceneRenderer, TextureOutcome, TextureTicket};
use crate::types::BodyId;

/// What happened to a generate request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The registry now holds this many orbiting bodies.
    Applied(usize),
    /// Waiting for the camera to return to overview.
    Deferred,
}

#[derive(Debug)]
pub struct Orrery<H> {
    config: OrreryConfig,
    registry: BodyRegistry<H>,
    focus: FocusController,
    rng: StdRng,
}

impl<H> Orrery<H>
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    pub fn new(config: OrreryConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic random systems, for tests and reproducible demos.
    pub fn with_seed(config: OrreryConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: OrreryConfig, rng: StdRng) -> Self {
        let focus = FocusController::new(config.focus.clone());
        Self {
            config,
            registry: BodyRegistry::new(),
            focus,
            rng,
        }
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn registry(&self) -> &BodyRegistry<H> {
        &self.registry
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn focused(&self) -> Option<BodyId> {
        self.focus.focused()
    }

    pub fn focus_label(&self) -> &str {
        self.focus.label()
    }

    /// Replace the current system.
    ///
    /// While a body is focused the switch waits for the camera to get back to
    /// overview. Custom input is validated up front either way.
    pub fn request_generate<S>(
        &mut self,
        recipe: SystemRecipe,
        scene: &mut S,
    ) -> Result<GenerateOutcome>
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        generators::validate_recipe(&recipe)?;

        if self.focus.focused().is_some() || self.focus.has_pending_regeneration() {
            info!("Switching to {} after returning to overview", recipe.label());
            self.focus.defer_regeneration(recipe, &self.registry, scene);
            return Ok(GenerateOutcome::Deferred);
        }
        self.apply(&recipe, scene).map(GenerateOutcome::Applied)
    }

    fn apply<S>(&mut self, recipe: &SystemRecipe, scene: &mut S) -> Result<usize>
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        let count = generators::generate(recipe, &mut self.registry, scene, &mut self.rng)?;
        self.focus.system_replaced(&self.registry);
        Ok(count)
    }

    pub fn request_focus<S>(&mut self, id: BodyId, scene: &mut S)
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        self.focus.focus_on(id, &self.registry, scene);
    }

    pub fn request_return_to_overview<S>(&mut self, scene: &mut S)
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        if self.focus.focused().is_some() {
            self.focus.return_to_overview(&self.registry, scene);
        }
    }

    /// The user moved the camera by hand.
    pub fn camera_moved(&mut self, pose: CameraPose) {
        self.focus.sync_camera(pose);
    }

    /// Tooltip for the body under the pointer.
    pub fn hover<S>(&self, screen: Vec2, scene: &S) -> Option<String>
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        picking::hover_label(&self.registry, scene, screen)
    }

    /// Toggle focus on the body under the pointer.
    pub fn click<S>(&mut self, screen: Vec2, scene: &mut S) -> Option<BodyId>
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        let id = picking::pick(&self.registry, scene, screen)?;
        self.focus.focus_on(id, &self.registry, scene);
        Some(id)
    }

    /// One frame: advance orbits, then the camera, then any deferred switch.
    pub fn tick<S>(&mut self, dt: f32, scene: &mut S)
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        advance_orbits(&mut self.registry, self.focus.focused(), dt, &self.config.orbit, scene);

        let Some(recipe) = self.focus.update(dt, &self.registry, scene) else {
            return;
        };
        if let Err(err) = self.apply(&recipe, scene) {
            warn!("Deferred switch to {} failed: {}", recipe.label(), err);
        }
    }

    pub fn resolve_texture<S>(
        &mut self,
        ticket: TextureTicket,
        outcome: &TextureOutcome,
        scene: &mut S,
    ) -> bool
    where
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        self.registry.resolve_texture(ticket, outcome, scene)
    }

    /// Capture the orbiting bodies as a saved system. The star is not stored.
    pub fn snapshot(&self, name: &str) -> Result<SavedSystem> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OrreryError::EmptySystemName);
        }
        if self.registry.is_empty() {
            return Err(OrreryError::EmptyRegistry);
        }
        Ok(SavedSystem {
            name: name.to_string(),
            bodies: self.registry.iter().map(CustomBody::from).collect(),
            created_at: Utc::now(),
        })
    }

    /// Save the current system under `name`, replacing a same-named entry.
    pub fn save_current<St>(&self, name: &str, store: &mut St) -> Result<()>
    where
        St: SystemStore + ?Sized,
    {
        let system = self.snapshot(name)?;
        let mut systems = store.load_named_systems()?;
        let count = system.bodies.len();
        let saved_name = system.name.clone();
        upsert(&mut systems, system);
        store.save_named_systems(&systems)?;
        info!("Saved system {:?} with {} bodies", saved_name, count);
        Ok(())
    }

    /// Rebuild a saved system through the custom recipe.
    pub fn load_saved<St, S>(
        &mut self,
        name: &str,
        store: &St,
        scene: &mut S,
    ) -> Result<GenerateOutcome>
    where
        St: SystemStore + ?Sized,
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        let saved = store
            .load_named_systems()?
            .into_iter()
            .find(|system| system.name == name)
            .ok_or_else(|| OrreryError::UnknownSystem(name.to_string()))?;
        info!("Loading saved system {:?}", saved.name);
        self.request_generate(
            SystemRecipe::Custom(CustomSystem {
                name: saved.name,
                bodies: saved.bodies,
            }),
            scene,
        )
    }

    pub fn delete_saved<St>(&self, name: &str, store: &mut St) -> Result<()>
    where
        St: SystemStore + ?Sized,
    {
        let mut systems = store.load_named_systems()?;
        let before = systems.len();
        systems.retain(|system| system.name != name);
        if systems.len() == before {
            return Err(OrreryError::UnknownSystem(name.to_string()));
        }
        store.save_named_systems(&systems)?;
        info!("Deleted saved system {:?}", name);
        Ok(())
    }
}
