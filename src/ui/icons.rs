//! Phosphor icon definitions for the UI.
//!
//! The font is installed by [`install_icon_font`] before any panel draws.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Set once the icon font has been handed to egui.
#[derive(Resource, Default)]
pub struct IconFontReady(pub bool);

/// Register the Phosphor font with egui on the first frame that has a context.
pub fn install_icon_font(mut contexts: EguiContexts, mut ready: ResMut<IconFontReady>) {
    if ready.0 {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
    ready.0 = true;
    debug!("Icon font installed");
}

// Browse all icons at https://phosphoricons.com/

pub const RANDOM: &str = egui_phosphor::regular::SHUFFLE;
pub const SOLAR_SYSTEM: &str = egui_phosphor::regular::SUN;
pub const STAR_WARS: &str = egui_phosphor::regular::PLANET;
pub const OVERVIEW: &str = egui_phosphor::regular::ARROWS_OUT;
pub const SAVE: &str = egui_phosphor::regular::FLOPPY_DISK;
pub const LOAD: &str = egui_phosphor::regular::FOLDER_OPEN;
pub const DELETE: &str = egui_phosphor::regular::TRASH;
pub const ADD: &str = egui_phosphor::regular::PLUS;
pub const BUILD: &str = egui_phosphor::regular::HAMMER;
pub const EDIT: &str = egui_phosphor::regular::PENCIL_SIMPLE;
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;
pub const WARNING: &str = egui_phosphor::regular::WARNING;
pub const INFO: &str = egui_phosphor::regular::INFO;

/// Icon for a curated preset id.
pub fn preset_icon(id: &str) -> &'static str {
    match id {
        "real" => SOLAR_SYSTEM,
        "star_wars" => STAR_WARS,
        _ => RANDOM,
    }
}
