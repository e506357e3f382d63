//! Test utilities shared by the unit tests.
//!
//! Provides fixtures for user-authored bodies and populated orreries, plus a
//! headless Bevy app builder.

/// Fixtures for building test systems.
pub mod fixtures {
    use crate::config::OrreryConfig;
    use crate::generators::{CustomBody, SystemRecipe};
    use crate::orrery::Orrery;
    use crate::scene::HeadlessScene;

    /// A rocky, untextured body at distance 20 with the given color string.
    pub fn custom_body(name: &str, color: &str) -> CustomBody {
        CustomBody {
            name: name.to_string(),
            size: 1.5,
            distance: 20.0,
            speed: 0.01,
            color: color.to_string(),
            is_gas_giant: false,
            has_rings: false,
            texture: None,
        }
    }

    /// A seeded orrery already showing `recipe`.
    pub fn orrery_with(recipe: SystemRecipe, seed: u64) -> (Orrery<u64>, HeadlessScene) {
        let mut scene = HeadlessScene::new();
        let mut orrery = Orrery::with_seed(OrreryConfig::default(), seed);
        if let Err(err) = orrery.request_generate(recipe, &mut scene) {
            panic!("fixture system failed to generate: {err}");
        }
        (orrery, scene)
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::REAL_SOLAR_SYSTEM;

    #[test]
    fn test_custom_body_is_valid() {
        let body = fixtures::custom_body("Probe", "#abcdef");
        assert!(crate::types::parse_hex_color(&body.color).is_some());
        assert!(body.size > 0.0);
    }

    #[test]
    fn test_orrery_fixture_is_populated() {
        let recipe = crate::generators::SystemRecipe::Curated(&REAL_SOLAR_SYSTEM);
        let (orrery, scene) = fixtures::orrery_with(recipe, 1);
        assert_eq!(orrery.registry().len(), 8);
        assert_eq!(scene.scene_len(), 9);
    }

    #[test]
    fn test_headless_app_updates() {
        let mut app = bevy_test::headless_app();
        app.update();
    }
}
