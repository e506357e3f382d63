//! Screen overlays: the focus label, the hover tooltip and the status line.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::control::{ActiveOrrery, StatusMessage};
use crate::input::HoveredBody;

mod colors {
    use bevy_egui::egui::Color32;

    pub const LABEL: Color32 = Color32::from_rgb(230, 230, 240);
    pub const ERROR: Color32 = Color32::from_rgb(224, 85, 85);
    pub const INFO: Color32 = Color32::from_rgb(85, 153, 221);
}

/// Offset of the tooltip from the cursor.
const TOOLTIP_OFFSET: egui::Vec2 = egui::vec2(14.0, 14.0);

/// "Centered on: X" along the top edge.
pub fn focus_label(mut contexts: EguiContexts, orrery: Res<ActiveOrrery>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("focus_label"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(orrery.focus_label())
                    .size(18.0)
                    .strong()
                    .color(colors::LABEL),
            );
        });
}

pub fn hover_tooltip(mut contexts: EguiContexts, hovered: Res<HoveredBody>) {
    let Some(label) = hovered.label.as_deref() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let pos = egui::pos2(hovered.cursor.x, hovered.cursor.y) + TOOLTIP_OFFSET;
    egui::Area::new(egui::Id::new("body_tooltip"))
        .fixed_pos(pos)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(label);
            });
        });
}

/// Last command result, fading out after a few seconds.
pub fn status_line(mut contexts: EguiContexts, status: Res<StatusMessage>) {
    if !status.is_visible() {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let (icon, color) = if status.is_error {
        (icons::WARNING, colors::ERROR)
    } else {
        (icons::INFO, colors::INFO)
    };
    egui::Area::new(egui::Id::new("status_line"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(format!("{icon} {}", status.text)).color(color));
            });
        });
}
