use crate::controller::{CanvasHandle, SurfaceController};
use crate::file_handler::FileHandler;
use crate::input::{self, HandleAction, InputEvent};
use crate::panels;
use crate::renderer::Renderer;
use crate::tools::ToolConfig;

/// Logical canvas size, matching the embedding page's drawing area.
pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 500;

/// We derive Deserialize/Serialize so the tool choices survive restarts.
/// The drawing itself is never persisted; export is the only artifact.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SketchApp {
    tools: ToolConfig,
    #[serde(skip)]
    controller: SurfaceController,
    #[serde(skip)]
    renderer: Renderer,
    #[serde(skip)]
    file_handler: FileHandler,
    // User-visible notice, e.g. a rejected upload.
    #[serde(skip)]
    notice: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self {
            tools: ToolConfig::default(),
            controller: SurfaceController::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            renderer: Renderer::new(),
            file_handler: FileHandler::new(),
            notice: None,
        }
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        }
        Self::default()
    }

    pub fn controller(&self) -> &SurfaceController {
        &self.controller
    }

    pub fn tools_mut(&mut self) -> &mut ToolConfig {
        &mut self.tools
    }

    pub fn can_undo(&self) -> bool {
        self.controller.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.controller.can_redo()
    }

    pub fn undo(&mut self) {
        self.controller.undo();
    }

    pub fn redo(&mut self) {
        self.controller.redo();
    }

    pub fn clear(&mut self) {
        self.controller.clear();
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Encode the canvas and, on native, write it next to the executable.
    pub fn export(&mut self) {
        match self.controller.export_png() {
            Ok(bytes) => {
                #[cfg(not(target_arch = "wasm32"))]
                match std::fs::write("sketch.png", &bytes) {
                    Ok(()) => {
                        log::info!("exported {} bytes to sketch.png", bytes.len());
                        self.notice = Some("Exported sketch.png".to_owned());
                    }
                    Err(err) => {
                        log::error!("failed to write export: {err}");
                        self.notice = Some(format!("Export failed: {err}"));
                    }
                }
                #[cfg(target_arch = "wasm32")]
                {
                    let _ = bytes;
                    self.notice = Some("Export is available in the desktop app".to_owned());
                }
            }
            Err(err) => self.notice = Some(format!("Export failed: {err}")),
        }
    }

    pub(crate) fn route_pointer(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(pos) => {
                let tools = self.tools;
                self.controller.pointer_down(pos, &tools);
            }
            InputEvent::PointerMove(pos) => self.controller.pointer_move(pos),
            InputEvent::PointerUp(pos) => self.controller.pointer_up(pos),
            InputEvent::PointerCancel => self.controller.pointer_cancel(),
        }
    }

    pub(crate) fn paint_canvas(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: egui::Rect,
    ) {
        self.renderer.paint(ctx, painter, rect, &self.controller);
    }
}

impl eframe::App for SketchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(result) = self.controller.poll_load() {
            match result {
                Ok(()) => self.notice = None,
                Err(err) => self.notice = Some(err.to_string()),
            }
        }

        for action in input::handle_actions(ctx) {
            match action {
                HandleAction::Undo => self.undo(),
                HandleAction::Redo => self.redo(),
            }
        }

        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            if let Some(notice) = self.file_handler.load_dropped(&mut self.controller) {
                self.notice = Some(notice);
            }
        }

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        // Keep polling the decode task even without input.
        if self.controller.load_pending() {
            ctx.request_repaint();
        }
    }
}
