//! UI module providing the egui interface.
//!
//! A side panel with system buttons, the saved-system library and the
//! custom system editor, plus overlays for the focus label, the hover
//! tooltip and the status line.

mod editor;
pub mod icons;
mod overlay;
mod panel;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};

pub use editor::EditorState;

/// Whether egui is using the pointer or keyboard this frame.
///
/// Picking, camera drag and shortcuts stand down while it is.
#[derive(Resource, Default, Debug)]
pub struct UiCapture {
    pub pointer: bool,
    pub keyboard: bool,
}

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiCapture>()
            .init_resource::<EditorState>()
            .init_resource::<panel::PanelState>()
            .init_resource::<icons::IconFontReady>()
            .add_systems(EguiPrimaryContextPass, icons::install_icon_font)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    panel::system_panel,
                    editor::editor_window,
                    overlay::focus_label,
                    overlay::hover_tooltip,
                    overlay::status_line,
                    track_capture,
                )
                    .chain()
                    .after(icons::install_icon_font)
                    .run_if(|ready: Res<icons::IconFontReady>| ready.0),
            );
    }
}

/// Record whether egui wants input, after every window has been laid out.
fn track_capture(mut contexts: EguiContexts, mut capture: ResMut<UiCapture>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    capture.pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    capture.keyboard = ctx.wants_keyboard_input();
}
