//! Pointer picking and keyboard shortcuts.
//!
//! Hovering a body shows its name; clicking toggles focus on it. Keys:
//! `R` random system, `1` solar system, `2` Star Wars, `Esc` overview.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::control::{ActiveOrrery, OrreryCommand};
use crate::generators::{REAL_SOLAR_SYSTEM, STAR_WARS, SystemRecipe};
use crate::picking;
use crate::render::BevyScene;
use crate::ui::UiCapture;

/// Body under the cursor, for the tooltip.
#[derive(Resource, Default, Debug)]
pub struct HoveredBody {
    pub label: Option<String>,
    /// Cursor position in logical pixels.
    pub cursor: Vec2,
}

/// Plugin providing keyboard shortcuts and pointer picking.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredBody>()
            .add_systems(Update, (keyboard_shortcuts, pointer_picking));
    }
}

/// Map a key press to a command.
pub fn shortcut_command(key: KeyCode) -> Option<OrreryCommand> {
    match key {
        KeyCode::KeyR => Some(OrreryCommand::Generate(SystemRecipe::Random)),
        KeyCode::Digit1 => Some(OrreryCommand::Generate(SystemRecipe::Curated(&REAL_SOLAR_SYSTEM))),
        KeyCode::Digit2 => Some(OrreryCommand::Generate(SystemRecipe::Curated(&STAR_WARS))),
        KeyCode::Escape => Some(OrreryCommand::ReturnToOverview),
        _ => None,
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: MessageWriter<OrreryCommand>,
    capture: Res<UiCapture>,
) {
    if capture.keyboard {
        return;
    }
    for key in keys.get_just_pressed() {
        if let Some(command) = shortcut_command(*key) {
            commands.write(command);
        }
    }
}

/// Hover tooltip and click-to-focus.
fn pointer_picking(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    orrery: Res<ActiveOrrery>,
    scene: BevyScene,
    capture: Res<UiCapture>,
    mut hovered: ResMut<HoveredBody>,
    mut commands: MessageWriter<OrreryCommand>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        hovered.label = None;
        return;
    };
    if capture.pointer {
        hovered.label = None;
        return;
    }

    hovered.cursor = cursor;
    hovered.label = orrery.hover(cursor, &scene);

    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if let Some(id) = picking::pick(orrery.registry(), &scene, cursor) {
        commands.write(OrreryCommand::Focus(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts() {
        assert!(matches!(
            shortcut_command(KeyCode::KeyR),
            Some(OrreryCommand::Generate(SystemRecipe::Random))
        ));
        assert!(matches!(
            shortcut_command(KeyCode::Digit2),
            Some(OrreryCommand::Generate(SystemRecipe::Curated(p))) if p.id == "star_wars"
        ));
        assert!(matches!(shortcut_command(KeyCode::Escape), Some(OrreryCommand::ReturnToOverview)));
        assert!(shortcut_command(KeyCode::KeyQ).is_none());
    }
}
