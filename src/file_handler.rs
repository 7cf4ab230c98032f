use eframe::egui;

use crate::controller::{CanvasHandle, SurfaceController};

/// Routes PNG files dropped onto the window into the canvas as base images.
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            dropped_files: Vec::new(),
        }
    }

    /// Collect any newly dropped files from the UI context.
    /// Returns true if there is something to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|input| {
            if !input.raw.dropped_files.is_empty() {
                self.dropped_files = input.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Hand the dropped files to the controller. Returns a user-visible
    /// notice when a file had to be rejected.
    pub fn load_dropped(&mut self, controller: &mut SurfaceController) -> Option<String> {
        let files = std::mem::take(&mut self.dropped_files);
        let mut notice = None;
        for file in &files {
            let name = Self::display_name(file);
            if !Self::is_png(file) {
                log::warn!("dropped file is not a PNG: {name}");
                notice = Some(format!("{name}: only PNG images are supported"));
                continue;
            }
            match Self::file_bytes(file) {
                Some(bytes) => match controller.load_image(bytes) {
                    Ok(()) => log::info!("decoding dropped image: {name}"),
                    Err(err) => notice = Some(format!("{name}: {err}")),
                },
                None => log::warn!("dropped file has no accessible data: {name}"),
            }
        }
        notice
    }

    fn display_name(file: &egui::DroppedFile) -> String {
        if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        }
    }

    /// The upload surface accepts PNG only; check MIME type or extension.
    fn is_png(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime == "image/png"
        } else if let Some(path) = &file.path {
            path.extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("png"))
        } else {
            false
        }
    }

    fn file_bytes(file: &egui::DroppedFile) -> Option<Vec<u8>> {
        if let Some(bytes) = &file.bytes {
            return Some(bytes.to_vec());
        }
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &file.path {
            match std::fs::read(path) {
                Ok(bytes) => return Some(bytes),
                Err(err) => {
                    log::error!("failed to read dropped file {}: {err}", path.display());
                    return None;
                }
            }
        }
        None
    }

    /// Overlay shown while files hover over the window.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|input| input.raw.hovered_files.is_empty()) {
            return;
        }
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop a PNG to use it as the base image",
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}
