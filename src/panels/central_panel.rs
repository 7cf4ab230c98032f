use crate::SketchApp;
use crate::app::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::input;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_size = egui::vec2(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);

        // Center the fixed-size canvas; the buffer maps 1:1 onto it.
        let margin = ((ui.available_size() - canvas_size) * 0.5).max(egui::Vec2::ZERO);
        ui.add_space(margin.y);
        ui.horizontal(|ui| {
            ui.add_space(margin.x);
            let (response, painter) = ui.allocate_painter(canvas_size, egui::Sense::drag());

            for event in input::canvas_events(&response) {
                app.route_pointer(event);
            }

            app.paint_canvas(ctx, &painter, response.rect);
        });
    });
}
