use egui::{Color32, Painter, Rect, TextureHandle, TextureOptions};

use crate::controller::SurfaceController;

/// Displays the live buffer: keeps one canvas texture and re-uploads it only
/// when the controller's revision changed.
pub struct Renderer {
    texture: Option<TextureHandle>,
    uploaded_revision: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            texture: None,
            uploaded_revision: 0,
        }
    }

    /// Paint the buffer into `rect`.
    pub fn paint(
        &mut self,
        ctx: &egui::Context,
        painter: &Painter,
        rect: Rect,
        controller: &SurfaceController,
    ) {
        let revision = controller.revision();
        if self.texture.is_none() || revision != self.uploaded_revision {
            let image = controller.buffer().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ctx.load_texture("sketch_canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = revision;
        }

        // White backdrop so transparent regions read as paper; the exported
        // PNG keeps the real transparency.
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::from_gray(180)));
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
