//! System editor window.
//!
//! Rows of user-authored bodies. "Build" sends them as a custom recipe;
//! validation happens when the command runs, so bad rows show up on the
//! status line.

use bevy::color::{ColorToPacked, Srgba};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::control::{ActiveOrrery, OrreryCommand};
use crate::generators::{CustomBody, CustomSystem, SystemRecipe};
use crate::types::{parse_hex_color, to_hex_color};

#[derive(Resource)]
pub struct EditorState {
    pub open: bool,
    pub name: String,
    pub bodies: Vec<CustomBody>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            open: false,
            name: "My System".to_string(),
            bodies: vec![new_row(1)],
        }
    }
}

impl EditorState {
    pub fn recipe(&self) -> SystemRecipe {
        SystemRecipe::Custom(CustomSystem {
            name: self.name.trim().to_string(),
            bodies: self.bodies.clone(),
        })
    }
}

fn new_row(index: usize) -> CustomBody {
    CustomBody {
        name: format!("Planet {index}"),
        size: 1.0,
        distance: 10.0 + 8.0 * index as f32,
        speed: 0.01,
        color: "#3399ff".to_string(),
        is_gas_giant: false,
        has_rings: false,
        texture: None,
    }
}

pub fn editor_window(
    mut contexts: EguiContexts,
    mut editor: ResMut<EditorState>,
    orrery: Res<ActiveOrrery>,
    mut commands: MessageWriter<OrreryCommand>,
) {
    if !editor.open {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut open = editor.open;
    egui::Window::new(format!("{} System editor", icons::BUILD))
        .open(&mut open)
        .default_width(420.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut editor.name);
            });
            ui.separator();

            let mut remove = None;
            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                for (index, body) in editor.bodies.iter_mut().enumerate() {
                    ui.push_id(index, |ui| {
                        if body_row(ui, body) {
                            remove = Some(index);
                        }
                    });
                    ui.add_space(4.0);
                }
            });
            if let Some(index) = remove {
                editor.bodies.remove(index);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button(format!("{} Add body", icons::ADD)).clicked() {
                    let next = editor.bodies.len() + 1;
                    editor.bodies.push(new_row(next));
                }
                if ui
                    .button(format!("{} Copy current", icons::LOAD))
                    .on_hover_text("Start from the system on screen")
                    .clicked()
                {
                    editor.bodies = orrery.registry().iter().map(CustomBody::from).collect();
                }
                if ui
                    .add_enabled(
                        !editor.bodies.is_empty(),
                        egui::Button::new(format!("{} Build", icons::BUILD)),
                    )
                    .clicked()
                {
                    commands.write(OrreryCommand::Generate(editor.recipe()));
                }
            });
        });
    editor.open = open;
}

/// One editable body. Returns true when the row asks to be removed.
fn body_row(ui: &mut egui::Ui, body: &mut CustomBody) -> bool {
    let mut remove = false;
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut body.name).desired_width(110.0));
        color_button(ui, &mut body.color);
        ui.checkbox(&mut body.is_gas_giant, "Gas giant");
        ui.add_enabled(body.is_gas_giant, egui::Checkbox::new(&mut body.has_rings, "Rings"));
        if ui.small_button(icons::DELETE).on_hover_text("Remove").clicked() {
            remove = true;
        }
    });
    if !body.is_gas_giant {
        body.has_rings = false;
    }
    ui.horizontal(|ui| {
        ui.label("Size");
        ui.add(egui::DragValue::new(&mut body.size).speed(0.05).range(0.1..=10.0));
        ui.label("Distance");
        ui.add(egui::DragValue::new(&mut body.distance).speed(0.5).range(0.0..=200.0));
        ui.label("Speed");
        ui.add(egui::DragValue::new(&mut body.speed).speed(0.001).range(-0.2..=0.2));
    });

    let mut texture = body.texture.clone().unwrap_or_default();
    let response = ui.add(
        egui::TextEdit::singleline(&mut texture)
            .hint_text("Texture URL (optional)")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        body.texture = (!texture.trim().is_empty()).then_some(texture);
    }
    remove
}

fn color_button(ui: &mut egui::Ui, color: &mut String) {
    let Some(current) = parse_hex_color(color) else {
        // Unparseable text stays editable so the user can fix it.
        ui.add(egui::TextEdit::singleline(color).desired_width(64.0))
            .on_hover_text(format!("{} Expected #rrggbb", icons::WARNING));
        return;
    };
    let [r, g, b, _] = current.to_u8_array();
    let mut rgb = [r, g, b];
    if ui.color_edit_button_srgb(&mut rgb).changed() {
        *color = to_hex_color(Srgba::rgb_u8(rgb[0], rgb[1], rgb[2]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_editor_builds_valid_recipe() {
        let editor = EditorState::default();
        let recipe = editor.recipe();
        assert_eq!(recipe.label(), "My System");
        assert!(crate::generators::validate_recipe(&recipe).is_ok());
    }

    #[test]
    fn test_new_rows_spread_out() {
        assert!(new_row(2).distance > new_row(1).distance);
        assert!(parse_hex_color(&new_row(1).color).is_some());
    }
}
