//! Headless Bevy integration tests.
//!
//! These tests drive the orrery from Bevy systems and messages without a GPU,
//! using the in-memory scene in place of the renderer.

use bevy::prelude::*;
use orrery::Orrery;
use orrery::config::OrreryConfig;
use orrery::control::{OrreryCommand, StatusMessage, execute_command};
use orrery::focus::FocusPhase;
use orrery::generators::{REAL_SOLAR_SYSTEM, SystemRecipe};
use orrery::persistence::MemoryStore;
use orrery::scene::HeadlessScene;

#[derive(Resource)]
struct HeadlessOrrery {
    orrery: Orrery<u64>,
    scene: HeadlessScene,
    store: MemoryStore,
}

fn create_minimal_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

fn create_orrery_app() -> App {
    let mut app = create_minimal_app();
    let mut scene = HeadlessScene::new();
    let mut orrery = Orrery::with_seed(OrreryConfig::default(), 21);
    orrery
        .request_generate(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM), &mut scene)
        .expect("solar system");

    app.insert_resource(HeadlessOrrery {
        orrery,
        scene,
        store: MemoryStore::default(),
    })
    .init_resource::<StatusMessage>()
    .add_message::<OrreryCommand>()
    .add_systems(Update, (handle_commands, tick).chain());
    app
}

fn handle_commands(
    mut commands: MessageReader<OrreryCommand>,
    mut state: ResMut<HeadlessOrrery>,
    mut status: ResMut<StatusMessage>,
) {
    let HeadlessOrrery { orrery, scene, store } = &mut *state;
    for command in commands.read() {
        match execute_command(orrery, store, command, scene) {
            Ok(Some(text)) => status.info(text),
            Ok(None) => {}
            Err(err) => status.error(err.to_string()),
        }
    }
}

/// Fixed step so the test does not depend on wall-clock time.
fn tick(mut state: ResMut<HeadlessOrrery>) {
    let HeadlessOrrery { orrery, scene, .. } = &mut *state;
    orrery.tick(0.05, scene);
}

fn send(app: &mut App, command: OrreryCommand) {
    app.world_mut().write_message(command);
}

#[test]
fn test_orbits_advance_each_frame() {
    let mut app = create_orrery_app();
    let before: Vec<f32> = app
        .world()
        .resource::<HeadlessOrrery>()
        .orrery
        .registry()
        .iter()
        .map(|body| body.angle)
        .collect();

    for _ in 0..5 {
        app.update();
    }

    let state = app.world().resource::<HeadlessOrrery>();
    for (body, angle) in state.orrery.registry().iter().zip(before) {
        assert!(body.angle > angle, "{} did not move", body.name);
        let visual = state.scene.visual(body.handle).expect("visual");
        assert_eq!(visual.position, body.position());
    }
}

#[test]
fn test_focus_message_settles() {
    let mut app = create_orrery_app();
    let earth = app
        .world()
        .resource::<HeadlessOrrery>()
        .orrery
        .registry()
        .find_by_name("Earth")
        .expect("earth")
        .id;

    send(&mut app, OrreryCommand::Focus(earth));
    // 1.5 s transition at 0.05 s per frame.
    for _ in 0..35 {
        app.update();
    }

    let state = app.world().resource::<HeadlessOrrery>();
    assert_eq!(state.orrery.focus().phase(), FocusPhase::Focused(earth));
}

#[test]
fn test_save_message_on_command() {
    let mut app = create_orrery_app();
    send(&mut app, OrreryCommand::Save("  Home ".to_string()));
    app.update();

    let state = app.world().resource::<HeadlessOrrery>();
    assert_eq!(state.store.systems.len(), 1);
    assert_eq!(state.store.systems[0].name, "Home");

    let status = app.world().resource::<StatusMessage>();
    assert!(!status.is_error);
    assert!(status.text.contains("Home"));
}

#[test]
fn test_bad_command_reports_error() {
    let mut app = create_orrery_app();
    send(&mut app, OrreryCommand::LoadSaved("Nope".to_string()));
    app.update();

    let status = app.world().resource::<StatusMessage>();
    assert!(status.is_error);
    assert!(status.is_visible());
}
