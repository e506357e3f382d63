//! App wiring for the orrery context.
//!
//! UI and input never touch the context directly. They write
//! [`OrreryCommand`] messages, handled here once per frame before the tick.

use bevy::prelude::*;

use crate::config::OrreryConfig;
use crate::error::Result;
use crate::generators::SystemRecipe;
use crate::orrery::{GenerateOutcome, Orrery};
use crate::persistence::{JsonFileStore, SavedSystem, SystemStore};
use crate::render::BevyScene;
use crate::scene::SceneRenderer;
use crate::types::BodyId;

/// How long a status line stays up, in seconds.
pub const STATUS_SECONDS: f32 = 4.0;

/// The running orrery.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveOrrery(pub Orrery<Entity>);

/// Saved systems, with a cached list for the UI.
#[derive(Resource)]
pub struct SystemLibrary {
    store: Box<dyn SystemStore + Send + Sync>,
    systems: Vec<SavedSystem>,
}

impl SystemLibrary {
    pub fn new(store: impl SystemStore + Send + Sync + 'static) -> Self {
        let mut library = Self {
            store: Box::new(store),
            systems: Vec::new(),
        };
        library.refresh();
        library
    }

    pub fn systems(&self) -> &[SavedSystem] {
        &self.systems
    }

    pub fn store_mut(&mut self) -> &mut (dyn SystemStore + Send + Sync) {
        self.store.as_mut()
    }

    /// Re-read the store. A broken store shows as empty.
    pub fn refresh(&mut self) {
        match self.store.load_named_systems() {
            Ok(systems) => self.systems = systems,
            Err(err) => {
                warn!("Could not read saved systems: {}", err);
                self.systems.clear();
            }
        }
    }
}

/// One line of feedback for the user.
#[derive(Resource, Default, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub remaining: f32,
}

impl StatusMessage {
    pub fn info(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.is_error = false;
        self.remaining = STATUS_SECONDS;
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.is_error = true;
        self.remaining = STATUS_SECONDS;
    }

    pub fn is_visible(&self) -> bool {
        self.remaining > 0.0 && !self.text.is_empty()
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}

/// Requests from the UI and input layers.
#[derive(Message, Clone, Debug)]
pub enum OrreryCommand {
    Generate(SystemRecipe),
    Focus(BodyId),
    ReturnToOverview,
    Save(String),
    LoadSaved(String),
    DeleteSaved(String),
}

/// Run one command. Returns the status line to show, if any.
pub fn execute_command<H, S, St>(
    orrery: &mut Orrery<H>,
    store: &mut St,
    command: &OrreryCommand,
    scene: &mut S,
) -> Result<Option<String>>
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    S: SceneRenderer<Handle = H> + ?Sized,
    St: SystemStore + ?Sized,
{
    let generated = |label: &str, outcome: GenerateOutcome| match outcome {
        GenerateOutcome::Applied(count) => format!("{label}: {count} bodies"),
        GenerateOutcome::Deferred => format!("{label} after returning to overview"),
    };

    match command {
        OrreryCommand::Generate(recipe) => {
            let outcome = orrery.request_generate(recipe.clone(), scene)?;
            Ok(Some(generated(recipe.label(), outcome)))
        }
        OrreryCommand::Focus(id) => {
            orrery.request_focus(*id, scene);
            Ok(None)
        }
        OrreryCommand::ReturnToOverview => {
            orrery.request_return_to_overview(scene);
            Ok(None)
        }
        OrreryCommand::Save(name) => {
            orrery.save_current(name, store)?;
            Ok(Some(format!("Saved {:?}", name.trim())))
        }
        OrreryCommand::LoadSaved(name) => {
            let outcome = orrery.load_saved(name, store, scene)?;
            Ok(Some(generated(name, outcome)))
        }
        OrreryCommand::DeleteSaved(name) => {
            orrery.delete_saved(name, store)?;
            Ok(Some(format!("Deleted {name:?}")))
        }
    }
}

/// Plugin owning the orrery context and its frame loop.
pub struct OrreryPlugin;

impl Plugin for OrreryPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<OrreryConfig>()
            .cloned()
            .unwrap_or_default();

        let store = JsonFileStore::new(config.store_path.clone());
        info!("Saved systems live in {}", store.path().display());

        app.insert_resource(SystemLibrary::new(store))
            .insert_resource(ActiveOrrery(Orrery::new(config.clone())))
            .insert_resource(config)
            .init_resource::<StatusMessage>()
            .add_message::<OrreryCommand>()
            .add_systems(Startup, generate_startup_system)
            .add_systems(Update, (handle_commands, resolve_textures, tick_orrery).chain());
    }
}

fn generate_startup_system(
    mut orrery: ResMut<ActiveOrrery>,
    config: Res<OrreryConfig>,
    mut scene: BevyScene,
    mut status: ResMut<StatusMessage>,
) {
    let recipe = config.startup_recipe().unwrap_or_else(|err| {
        warn!("{}, starting with a random system", err);
        SystemRecipe::Random
    });
    match orrery.request_generate(recipe, &mut scene) {
        Ok(_) => status.info(orrery.focus_label().to_string()),
        Err(err) => status.error(err.to_string()),
    }
}

fn handle_commands(
    mut commands: MessageReader<OrreryCommand>,
    mut orrery: ResMut<ActiveOrrery>,
    mut library: ResMut<SystemLibrary>,
    mut scene: BevyScene,
    mut status: ResMut<StatusMessage>,
) {
    for command in commands.read() {
        match execute_command(&mut orrery.0, library.store_mut(), command, &mut scene) {
            Ok(Some(text)) => status.info(text),
            Ok(None) => {}
            Err(err) => {
                warn!("{:?} failed: {}", command, err);
                status.error(err.to_string());
            }
        }
        if matches!(command, OrreryCommand::Save(_) | OrreryCommand::DeleteSaved(_)) {
            library.refresh();
        }
    }
}

fn resolve_textures(mut orrery: ResMut<ActiveOrrery>, mut scene: BevyScene) {
    for (ticket, outcome) in scene.poll_textures() {
        orrery.resolve_texture(ticket, &outcome, &mut scene);
    }
}

fn tick_orrery(
    time: Res<Time>,
    mut orrery: ResMut<ActiveOrrery>,
    mut scene: BevyScene,
    mut status: ResMut<StatusMessage>,
) {
    let dt = time.delta_secs();
    orrery.tick(dt, &mut scene);
    status.tick(dt);
}
