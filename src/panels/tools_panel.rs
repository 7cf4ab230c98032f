use egui::Color32;

use crate::SketchApp;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            ui.horizontal(|ui| {
                let tools = app.tools_mut();
                if ui.selectable_label(!tools.erase_mode, "✏ Pen").clicked() {
                    tools.erase_mode = false;
                }
                if ui.selectable_label(tools.erase_mode, "⌫ Eraser").clicked() {
                    tools.erase_mode = true;
                }
            });

            // A single slider edits whichever tool is active.
            ui.horizontal(|ui| {
                let tools = app.tools_mut();
                if tools.erase_mode {
                    ui.label("Size:");
                    ui.add(egui::Slider::new(&mut tools.eraser_size, 1.0..=100.0));
                } else {
                    ui.label("Width:");
                    ui.add(egui::Slider::new(&mut tools.stroke_width, 1.0..=100.0));
                }
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.tools_mut().stroke_color,
                    egui::color_picker::Alpha::Opaque,
                );
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(app.can_undo(), egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(app.can_redo(), egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.separator();

            if ui.button("Clear").clicked() {
                app.clear();
            }
            if ui.button("Export PNG").clicked() {
                app.export();
            }

            ui.separator();
            ui.label("Drop a PNG onto the window to use it as the base image.");

            if app.controller().load_pending() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading image…");
                });
            }
            if let Some(notice) = app.notice() {
                ui.colored_label(Color32::RED, notice);
            }
        });
}
