//! Orrery - Solar System Visualizer
//!
//! A desktop application showing orbiting bodies around a star, with
//! click-to-focus camera flights and saved custom systems.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::config::OrreryConfig;
use orrery::control::OrreryPlugin;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(OrreryConfig::load_or_default())
        .add_plugins((OrreryPlugin, RenderPlugin, CameraPlugin, InputPlugin, UiPlugin))
        .run();
}
