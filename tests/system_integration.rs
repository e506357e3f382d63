//! Integration tests for system generation, texture fallbacks and saved systems.

mod common;

use bevy::color::Srgba;
use orrery::OrreryError;
use orrery::generators::{CustomSystem, PRESETS, REAL_SOLAR_SYSTEM, STAR_WARS, SystemRecipe};
use orrery::persistence::{JsonFileStore, MemoryStore, SAVED_SYSTEMS_KEY, SystemStore};
use orrery::scene::TextureOutcome;
use orrery::types::{GAS_GIANT_FALLBACK, ROCKY_FALLBACK};

use common::{custom_body, seeded, temp_store_path};

#[test]
fn test_preset_unique_ids() {
    let mut ids: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
    ids.sort();
    for i in 1..ids.len() {
        assert_ne!(ids[i - 1], ids[i], "Duplicate preset ID: {}", ids[i]);
    }
}

#[test]
fn test_presets_have_eight_distinct_bodies() {
    for preset in PRESETS {
        assert_eq!(preset.bodies.len(), 8, "{} body count", preset.id);
        let mut names: Vec<&str> = preset.bodies.iter().map(|b| b.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8, "{} has duplicate names", preset.id);
        for body in preset.bodies {
            assert!(body.distance > preset.star.radius, "{} sits inside the star", body.name);
            assert!(body.radius > 0.0);
        }
    }
}

#[test]
fn test_only_saturn_has_rings() {
    let ringed: Vec<&str> = REAL_SOLAR_SYSTEM
        .bodies
        .iter()
        .filter(|b| b.kind.has_rings)
        .map(|b| b.name)
        .collect();
    assert_eq!(ringed, ["Saturn"]);
}

#[test]
fn test_generate_replaces_previous_system() {
    let (mut orrery, mut scene) = seeded(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM), 5);
    let old_handles = orrery.registry().handles();

    orrery
        .request_generate(SystemRecipe::Curated(&STAR_WARS), &mut scene)
        .expect("star wars");

    for handle in old_handles {
        assert!(!scene.is_in_scene(handle), "old visual {handle} left behind");
    }
    assert_eq!(orrery.registry().star().expect("star").name, "Death Star");
    assert_eq!(scene.scene_len(), 9);
}

#[test]
fn test_same_seed_same_random_system() {
    let (a, _) = seeded(SystemRecipe::Random, 42);
    let (b, _) = seeded(SystemRecipe::Random, 42);
    let describe = |o: &orrery::Orrery<u64>| {
        o.registry()
            .iter()
            .map(|body| (body.name.clone(), body.radius, body.orbital_distance))
            .collect::<Vec<_>>()
    };
    assert_eq!(describe(&a), describe(&b));
}

#[test]
fn test_failed_preset_texture_uses_kind_color() {
    let (mut orrery, mut scene) = seeded(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM), 6);
    let tickets = scene.issued_tickets();
    assert_eq!(orrery.registry().pending_texture_count(), tickets.len());

    for ticket in tickets {
        let outcome = TextureOutcome::Failed("404".to_string());
        assert!(orrery.resolve_texture(ticket, &outcome, &mut scene));
    }
    assert_eq!(orrery.registry().pending_texture_count(), 0);

    let jupiter = orrery.registry().find_by_name("Jupiter").expect("jupiter");
    let mars = orrery.registry().find_by_name("Mars").expect("mars");
    let jupiter_visual = scene.visual(jupiter.handle).expect("jupiter visual");
    let mars_visual = scene.visual(mars.handle).expect("mars visual");
    assert_eq!(jupiter_visual.color_override, Some(GAS_GIANT_FALLBACK));
    assert_eq!(mars_visual.color_override, Some(ROCKY_FALLBACK));
    assert_eq!(mars_visual.texture, None);
}

#[test]
fn test_custom_texture_failure_keeps_own_color() {
    let mut body = custom_body("Painted", 15.0);
    body.texture = Some("https://example.invalid/none.png".to_string());
    let recipe = SystemRecipe::Custom(CustomSystem {
        name: "Gallery".to_string(),
        bodies: vec![body],
    });
    let (mut orrery, mut scene) = seeded(recipe, 7);

    let ticket = scene.issued_tickets()[0];
    orrery.resolve_texture(ticket, &TextureOutcome::Failed("offline".into()), &mut scene);

    let painted = orrery.registry().find_by_name("Painted").expect("painted");
    let visual = scene.visual(painted.handle).expect("visual");
    assert_eq!(visual.color_override, Some(Srgba::hex("#aa33cc").expect("hex")));
}

#[test]
fn test_stale_texture_ticket_is_ignored() {
    let (mut orrery, mut scene) = seeded(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM), 8);
    let old_tickets = scene.issued_tickets();
    orrery
        .request_generate(SystemRecipe::Random, &mut scene)
        .expect("random");

    for ticket in old_tickets {
        assert!(!orrery.resolve_texture(ticket, &TextureOutcome::Loaded, &mut scene));
    }
}

#[test]
fn test_invalid_custom_body_keeps_current_system() {
    let (mut orrery, mut scene) = seeded(SystemRecipe::Curated(&STAR_WARS), 9);
    let mut bad = custom_body("Nowhere", 12.0);
    bad.color = "blue-ish".to_string();

    let result = orrery.request_generate(
        SystemRecipe::Custom(CustomSystem {
            name: "Broken".to_string(),
            bodies: vec![custom_body("Fine", 10.0), bad],
        }),
        &mut scene,
    );
    assert!(matches!(result, Err(OrreryError::InvalidColor(_))));
    assert!(orrery.registry().find_by_name("Hoth").is_some());
}

#[test]
fn test_saving_empty_system_is_refused() {
    let recipe = SystemRecipe::Custom(CustomSystem {
        name: "Lonely".to_string(),
        bodies: Vec::new(),
    });
    let (orrery, _scene) = seeded(recipe, 10);
    let mut store = MemoryStore::default();

    let result = orrery.save_current("Lonely", &mut store);
    assert!(matches!(result, Err(OrreryError::EmptyRegistry)));
    assert_eq!(store.writes, 0);
}

#[test]
fn test_save_and_load_through_json_file() {
    let path = temp_store_path("roundtrip");
    let mut store = JsonFileStore::new(&path);

    let (mut orrery, mut scene) = seeded(SystemRecipe::Curated(&STAR_WARS), 11);
    orrery.save_current("Outer Rim", &mut store).expect("save");
    orrery.save_current("Outer Rim", &mut store).expect("save again");

    let text = std::fs::read_to_string(&path).expect("store file");
    let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    let saved = json[SAVED_SYSTEMS_KEY].as_array().expect("saved list");
    assert_eq!(saved.len(), 1, "same name replaces the entry");
    assert_eq!(saved[0]["planets"].as_array().map(Vec::len), Some(8));
    assert!(saved[0]["createdAt"].is_string());
    assert!(saved[0]["planets"][0].get("isGasGiant").is_some());

    orrery
        .request_generate(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM), &mut scene)
        .expect("solar system");
    orrery.load_saved("Outer Rim", &store, &mut scene).expect("load");

    let hoth = orrery.registry().find_by_name("Hoth").expect("hoth restored");
    assert_eq!(orrery.registry().len(), 8);
    assert_eq!(orrery.registry().star().expect("star").name, "Sun");
    assert!(hoth.orbital_distance > 0.0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_store_keeps_unrelated_keys() {
    let path = temp_store_path("foreign-keys");
    std::fs::write(&path, r#"{"theme": "dark"}"#).expect("seed file");
    let mut store = JsonFileStore::new(&path);

    let (orrery, _scene) = seeded(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM), 12);
    orrery.save_current("Home", &mut store).expect("save");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(json["theme"], "dark");
    assert_eq!(store.load_named_systems().expect("load").len(), 1);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_saved_system_is_an_error() {
    let (mut orrery, mut scene) = seeded(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM), 13);
    let store = MemoryStore::default();
    let result = orrery.load_saved("Ghost", &store, &mut scene);
    assert!(matches!(result, Err(OrreryError::UnknownSystem(name)) if name == "Ghost"));
}
