//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use orrery::Orrery;
use orrery::config::OrreryConfig;
use orrery::generators::{CustomBody, SystemRecipe};
use orrery::scene::HeadlessScene;

/// Frame length used when stepping a system, in seconds.
pub const FRAME: f32 = 1.0 / 60.0;

/// A seeded orrery already showing `recipe`.
pub fn seeded(recipe: SystemRecipe, seed: u64) -> (Orrery<u64>, HeadlessScene) {
    let mut scene = HeadlessScene::new();
    let mut orrery = Orrery::with_seed(OrreryConfig::default(), seed);
    orrery
        .request_generate(recipe, &mut scene)
        .expect("system should generate");
    (orrery, scene)
}

/// Step at 60 fps for `seconds`.
pub fn run_for(orrery: &mut Orrery<u64>, scene: &mut HeadlessScene, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        orrery.tick(FRAME, scene);
    }
}

/// Step until any running camera transition has finished.
pub fn settle(orrery: &mut Orrery<u64>, scene: &mut HeadlessScene) {
    let seconds = orrery.config().focus.transition_seconds + 0.1;
    run_for(orrery, scene, seconds);
}

/// Id of the body with this name in the current system.
pub fn body_id(orrery: &Orrery<u64>, name: &str) -> orrery::types::BodyId {
    orrery
        .registry()
        .find_by_name(name)
        .unwrap_or_else(|| panic!("no body named {name}"))
        .id
}

pub fn custom_body(name: &str, distance: f32) -> CustomBody {
    CustomBody {
        name: name.to_string(),
        size: 1.0,
        distance,
        speed: 0.02,
        color: "#aa33cc".to_string(),
        is_gas_giant: false,
        has_rings: false,
        texture: None,
    }
}

/// Fresh path in the temp dir, removed first if a previous run left it.
pub fn temp_store_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("orrery-{}-{}.json", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}
