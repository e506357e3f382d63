//! Camera focus state machine.
//!
//! The controller owns the focus state, the single in-flight camera transition
//! and the regeneration continuation. Phases:
//!
//! ```text
//!   Overview --focus_on(a)--> Focusing(a) --settle--> Focused(a)
//!   Focusing(a) / Focused(a) --focus_on(b)--> Focusing(b)
//!   Focusing(a) / Focused(a) --focus_on(a) or return--> Defocusing --settle--> Overview
//! ```
//!
//! A new request always replaces the running transition, starting from the
//! camera's live position.

use bevy::log::{debug, info};
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::generators::SystemRecipe;
use crate::registry::BodyRegistry;
use crate::scene::{CameraPose, SceneRenderer};
use crate::types::BodyId;

/// Camera position for the whole-system view. The camera looks at the origin.
pub const OVERVIEW_POSITION: Vec3 = Vec3::new(0.0, 15.0, 55.0);

/// Length of every camera transition.
pub const TRANSITION_SECONDS: f32 = 1.5;

/// Emissive strength of the focused body.
pub const HIGHLIGHT_INTENSITY: f32 = 0.3;

/// Tunables for focus framing and transitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    pub transition_seconds: f32,
    pub overview_position: [f32; 3],
    /// Viewing distance is `radius * distance_factor`, clamped.
    pub distance_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Extra height as a fraction of the viewing distance.
    pub elevation: f32,
    pub highlight_intensity: f32,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            transition_seconds: TRANSITION_SECONDS,
            overview_position: OVERVIEW_POSITION.to_array(),
            distance_factor: 8.0,
            min_distance: 15.0,
            max_distance: 50.0,
            elevation: 0.3,
            highlight_intensity: HIGHLIGHT_INTENSITY,
        }
    }
}

impl FocusSettings {
    pub fn overview_pose(&self) -> CameraPose {
        CameraPose::new(Vec3::from_array(self.overview_position), Vec3::ZERO)
    }

    /// Viewing distance for a body of this radius.
    pub fn focus_distance(&self, radius: f32) -> f32 {
        (radius * self.distance_factor).clamp(self.min_distance, self.max_distance)
    }

    /// Where the camera should end up to frame a body, approaching from `camera`.
    pub fn focus_position(&self, camera: Vec3, body: Vec3, radius: f32) -> Vec3 {
        let distance = self.focus_distance(radius);
        let direction = (body - camera).try_normalize().unwrap_or(Vec3::NEG_Z);
        let mut target = body - direction * distance;
        target.y += self.elevation * distance;
        target
    }
}

/// Quadratic ease-in-out ("power2.inOut").
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// One eased camera move.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransition {
    pub from: Vec3,
    pub to: Vec3,
    pub look_at: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

impl CameraTransition {
    pub fn new(from: Vec3, to: Vec3, look_at: Vec3, duration: f32) -> Self {
        Self {
            from,
            to,
            look_at,
            elapsed: 0.0,
            duration,
        }
    }

    /// Progress in `[0, 1]`. A zero-length transition is complete immediately.
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.fraction() >= 1.0
    }

    pub fn pose(&self) -> CameraPose {
        let t = ease_in_out_quad(self.fraction());
        CameraPose::new(self.from.lerp(self.to, t), self.look_at)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPhase {
    Overview,
    Focusing(BodyId),
    Focused(BodyId),
    Defocusing,
}

#[derive(Debug)]
pub struct FocusController {
    settings: FocusSettings,
    phase: FocusPhase,
    transition: Option<CameraTransition>,
    camera: CameraPose,
    label: String,
    pending: Option<SystemRecipe>,
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new(FocusSettings::default())
    }
}

impl FocusController {
    pub fn new(settings: FocusSettings) -> Self {
        let camera = settings.overview_pose();
        Self {
            settings,
            phase: FocusPhase::Overview,
            transition: None,
            camera,
            label: String::new(),
            pending: None,
        }
    }

    pub fn settings(&self) -> &FocusSettings {
        &self.settings
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    /// The body currently held by focus, from `focus_on` until the next
    /// return to overview.
    pub fn focused(&self) -> Option<BodyId> {
        match self.phase {
            FocusPhase::Focusing(id) | FocusPhase::Focused(id) => Some(id),
            FocusPhase::Overview | FocusPhase::Defocusing => None,
        }
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    /// Last pose pushed to the camera.
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Record a camera move made outside the controller, such as manual
    /// orbiting. The next transition starts from here.
    pub fn sync_camera(&mut self, pose: CameraPose) {
        self.camera = pose;
    }

    pub fn has_pending_regeneration(&self) -> bool {
        self.pending.is_some()
    }

    /// Fly to a body, or back to overview if it is already the focus.
    ///
    /// Unknown ids and requests made while a regeneration waits are ignored.
    pub fn focus_on<H, S>(&mut self, id: BodyId, registry: &BodyRegistry<H>, scene: &mut S)
    where
        H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        if self.pending.is_some() {
            debug!("Focus request {id} ignored, system switch pending");
            return;
        }
        if self.focused() == Some(id) {
            self.return_to_overview(registry, scene);
            return;
        }
        let Some(body) = registry.get(id) else {
            debug!("Focus request for stale body {id}");
            return;
        };

        let look_at = body.position();
        let to = self.settings.focus_position(self.camera.position, look_at, body.radius);
        debug!("Focusing {} ({id})", body.name);

        clear_highlights(registry, scene);
        self.phase = FocusPhase::Focusing(id);
        self.start_transition(to, look_at);
    }

    /// Fly back to the overview pose and release the held body.
    pub fn return_to_overview<H, S>(&mut self, registry: &BodyRegistry<H>, scene: &mut S)
    where
        H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        clear_highlights(registry, scene);
        self.label = overview_label(registry);
        self.phase = FocusPhase::Defocusing;
        let overview = self.settings.overview_pose();
        self.start_transition(overview.position, overview.look_at);
    }

    /// Leave focus and run `recipe` once the camera is back at overview.
    ///
    /// A later recipe replaces one that is still waiting.
    pub fn defer_regeneration<H, S>(
        &mut self,
        recipe: SystemRecipe,
        registry: &BodyRegistry<H>,
        scene: &mut S,
    )
    where
        H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        if self.phase != FocusPhase::Defocusing {
            self.return_to_overview(registry, scene);
        }
        if let Some(previous) = self.pending.replace(recipe) {
            debug!("Replacing pending switch to {}", previous.label());
        }
    }

    /// Called after the registry has been repopulated.
    pub fn system_replaced<H>(&mut self, registry: &BodyRegistry<H>)
    where
        H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    {
        if self.focused().is_some() {
            self.phase = FocusPhase::Overview;
            self.transition = None;
        }
        self.label = overview_label(registry);
    }

    /// Advance the running transition by `dt` seconds.
    ///
    /// Returns the deferred recipe on the frame the return to overview settles.
    pub fn update<H, S>(
        &mut self,
        dt: f32,
        registry: &BodyRegistry<H>,
        scene: &mut S,
    ) -> Option<SystemRecipe>
    where
        H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
        S: SceneRenderer<Handle = H> + ?Sized,
    {
        let transition = self.transition.as_mut()?;
        if dt.is_finite() && dt > 0.0 {
            transition.elapsed += dt;
        }
        let pose = transition.pose();
        let complete = transition.is_complete();
        self.camera = pose;
        scene.set_camera(pose);

        if !complete {
            return None;
        }
        self.transition = None;

        match self.phase {
            FocusPhase::Focusing(id) => {
                let Some(body) = registry.get(id) else {
                    self.phase = FocusPhase::Overview;
                    return None;
                };
                for other in registry.iter_all() {
                    let intensity = if other.id == id {
                        self.settings.highlight_intensity
                    } else {
                        0.0
                    };
                    scene.set_highlight(other.handle, intensity);
                }
                self.label = focus_label(&body.name);
                self.phase = FocusPhase::Focused(id);
                info!("Camera centered on {}", body.name);
                None
            }
            FocusPhase::Defocusing => {
                self.phase = FocusPhase::Overview;
                self.pending.take()
            }
            FocusPhase::Overview | FocusPhase::Focused(_) => None,
        }
    }

    fn start_transition(&mut self, to: Vec3, look_at: Vec3) {
        self.transition = Some(CameraTransition::new(
            self.camera.position,
            to,
            look_at,
            self.settings.transition_seconds,
        ));
    }
}

fn clear_highlights<H, S>(registry: &BodyRegistry<H>, scene: &mut S)
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    S: SceneRenderer<Handle = H> + ?Sized,
{
    for body in registry.iter_all() {
        scene.set_highlight(body.handle, 0.0);
    }
}

fn focus_label(name: &str) -> String {
    format!("Centered on: {name}")
}

fn overview_label<H>(registry: &BodyRegistry<H>) -> String
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    registry
        .star()
        .map(|star| focus_label(&star.name))
        .unwrap_or_else(|| "Overview".to_string())
}
