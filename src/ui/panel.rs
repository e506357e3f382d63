//! System panel - the left side panel.
//!
//! Buttons for the random system and the curated presets, the body list,
//! and the saved-system library. Everything goes out as [`OrreryCommand`]s.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::editor::EditorState;
use super::icons;
use crate::control::{ActiveOrrery, OrreryCommand, SystemLibrary};
use crate::generators::{PRESETS, SystemRecipe};
use crate::render::VisualIndex;

/// Text typed into the save field.
#[derive(Resource, Default)]
pub struct PanelState {
    pub save_name: String,
}

mod colors {
    use bevy_egui::egui::Color32;

    pub const HEADER: Color32 = Color32::from_rgb(180, 180, 200);
    pub const FOCUSED: Color32 = Color32::from_rgb(255, 210, 90);
    pub const MUTED: Color32 = Color32::from_rgb(120, 120, 140);
}

const PANEL_WIDTH: f32 = 230.0;

pub fn system_panel(
    mut contexts: EguiContexts,
    mut state: ResMut<PanelState>,
    mut editor: ResMut<EditorState>,
    orrery: Res<ActiveOrrery>,
    library: Res<SystemLibrary>,
    visuals: Res<VisualIndex>,
    mut commands: MessageWriter<OrreryCommand>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::left("system_panel")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Systems").strong().color(colors::HEADER));
            ui.add_space(4.0);

            if ui
                .button(format!("{} Random system", icons::RANDOM))
                .on_hover_text("Generate a random system (R)")
                .clicked()
            {
                commands.write(OrreryCommand::Generate(SystemRecipe::Random));
            }
            for (index, preset) in PRESETS.iter().copied().enumerate() {
                let icon = icons::preset_icon(preset.id);
                let button = ui.button(format!("{icon} {}", preset.name));
                let hint = format!("{} ({})", preset.description, index + 1);
                if button.on_hover_text(hint).clicked() {
                    commands.write(OrreryCommand::Generate(SystemRecipe::Curated(preset)));
                }
            }
            if ui
                .button(format!("{} Build your own", icons::EDIT))
                .on_hover_text("Open the system editor")
                .clicked()
            {
                editor.open = true;
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Bodies").strong().color(colors::HEADER));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let overview = ui
                        .add_enabled(
                            orrery.focused().is_some(),
                            egui::Button::new(format!("{} Overview", icons::OVERVIEW)),
                        )
                        .on_hover_text("Return to overview (Esc)");
                    if overview.clicked() {
                        commands.write(OrreryCommand::ReturnToOverview);
                    }
                });
            });

            egui::ScrollArea::vertical()
                .id_salt("body_list")
                .max_height(220.0)
                .show(ui, |ui| {
                    let registry = orrery.registry();
                    for body in registry.iter_all() {
                        let focused = orrery.focused() == Some(body.id);
                        let text = if focused {
                            egui::RichText::new(format!("{} {}", icons::TARGET, body.name))
                                .color(colors::FOCUSED)
                        } else {
                            egui::RichText::new(&body.name)
                        };
                        if ui.selectable_label(focused, text).clicked() {
                            commands.write(OrreryCommand::Focus(body.id));
                        }
                    }
                });

            let pending = visuals.pending_textures();
            let summary = if pending > 0 {
                format!("{} visuals, {} textures loading", visuals.len(), pending)
            } else {
                format!("{} visuals", visuals.len())
            };
            ui.label(egui::RichText::new(summary).small().color(colors::MUTED));

            ui.separator();

            ui.label(egui::RichText::new("Saved").strong().color(colors::HEADER));
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.save_name)
                        .hint_text("Name")
                        .desired_width(PANEL_WIDTH - 70.0),
                );
                if ui
                    .button(icons::SAVE)
                    .on_hover_text("Save the current system")
                    .clicked()
                {
                    commands.write(OrreryCommand::Save(state.save_name.clone()));
                }
            });

            if library.systems().is_empty() {
                ui.label(egui::RichText::new("No saved systems").italics().color(colors::MUTED));
            }
            egui::ScrollArea::vertical().id_salt("saved_list").show(ui, |ui| {
                for saved in library.systems() {
                    ui.horizontal(|ui| {
                        let load = ui
                            .button(format!("{} {}", icons::LOAD, saved.name))
                            .on_hover_text(format!(
                                "{} bodies, saved {}",
                                saved.bodies.len(),
                                saved.created_at.format("%Y-%m-%d %H:%M")
                            ));
                        if load.clicked() {
                            commands.write(OrreryCommand::LoadSaved(saved.name.clone()));
                        }
                        if ui.small_button(icons::DELETE).on_hover_text("Delete").clicked() {
                            commands.write(OrreryCommand::DeleteSaved(saved.name.clone()));
                        }
                    });
                }
            });
        });
}
