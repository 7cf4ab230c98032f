use egui::Pos2;
use futures::channel::oneshot;
use image::RgbaImage;

use crate::buffer::PixelBuffer;
use crate::compositor;
use crate::error::CanvasError;
use crate::history::SnapshotHistory;
use crate::stroke::StrokeRecorder;
use crate::tools::ToolConfig;

/// Interaction state of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Idle,
    Drawing,
}

/// The imperative handle the embedding UI drives: undo/redo buttons,
/// keyboard shortcuts, and the upload path all go through these three.
pub trait CanvasHandle {
    fn undo(&mut self);
    fn redo(&mut self);
    /// Start decoding an image to become the new base layer. Decoding is
    /// asynchronous; completion is observed via [`SurfaceController::poll_load`].
    fn load_image(&mut self, bytes: Vec<u8>) -> Result<(), CanvasError>;
}

/// Owns the live buffer and binds pointer input, tool selection, image
/// import and history together.
///
/// Pointer events feed the recorder and paint incrementally, so a partial
/// stroke is visible while the pointer is still down. A snapshot is taken
/// only at commit boundaries: stroke end, image load, clear.
pub struct SurfaceController {
    buffer: PixelBuffer,
    recorder: StrokeRecorder,
    history: SnapshotHistory,
    state: SurfaceState,
    pending_load: Option<oneshot::Receiver<Result<RgbaImage, CanvasError>>>,
    revision: u64,
}

impl SurfaceController {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_history_capacity(width, height, SnapshotHistory::DEFAULT_CAPACITY)
    }

    pub fn with_history_capacity(width: u32, height: u32, capacity: usize) -> Self {
        let buffer = PixelBuffer::new(width, height);
        let mut history = SnapshotHistory::with_capacity(capacity);
        // Seed with the blank canvas so undo below the first action is a
        // no-op, not an error.
        history.snapshot(&buffer);
        Self {
            buffer,
            recorder: StrokeRecorder::new(),
            history,
            state: SurfaceState::Idle,
            pending_load: None,
            revision: 0,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Bumped on every visible buffer change; the renderer re-uploads the
    /// display texture when it observes a new value.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == SurfaceState::Drawing
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn load_pending(&self) -> bool {
        self.pending_load.is_some()
    }

    // --- Pointer events (positions in buffer coordinates) ---

    pub fn pointer_down(&mut self, pos: Pos2, config: &ToolConfig) {
        if self.pending_load.is_some() {
            log::debug!("pointer down ignored while an image load is pending");
            return;
        }
        if self.state == SurfaceState::Drawing {
            // Missed pointer-up on some devices; commit what we have.
            log::warn!("pointer down while drawing; committing the previous stroke");
            self.commit_active_stroke();
        }
        self.recorder.begin(pos, config);
        if let Some((width, color, mode)) = self.recorder.brush() {
            compositor::paint_dot(&mut self.buffer, pos, width, color, mode);
            self.revision += 1;
        }
        self.state = SurfaceState::Drawing;
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        if self.state != SurfaceState::Drawing {
            return;
        }
        if let Some(prev) = self.recorder.extend(pos) {
            self.paint_segment(prev, pos);
        }
    }

    pub fn pointer_up(&mut self, pos: Pos2) {
        if self.state != SurfaceState::Drawing {
            log::debug!("pointer up ignored: no stroke in progress");
            return;
        }
        if let Some(prev) = self.recorder.extend(pos) {
            self.paint_segment(prev, pos);
        }
        self.commit_active_stroke();
    }

    /// Abnormal end of a gesture (pointer left the canvas, pointer cancel).
    /// The in-progress stroke is discarded and its incremental paint rolled
    /// back from the current history entry.
    pub fn pointer_cancel(&mut self) {
        if self.state != SurfaceState::Drawing {
            return;
        }
        self.recorder.cancel();
        if let Some(entry) = self.history.current() {
            self.restore(&entry);
        }
        self.state = SurfaceState::Idle;
    }

    // --- Committed actions ---

    /// Repaint the buffer to blank as a committed, undoable action.
    pub fn clear(&mut self) {
        if self.pending_load.is_some() {
            return;
        }
        if self.state == SurfaceState::Drawing {
            self.pointer_cancel();
        }
        self.buffer.clear();
        self.history.snapshot(&self.buffer);
        self.revision += 1;
        log::info!("canvas cleared");
    }

    /// Drive a pending image load. Returns `Some` exactly once per load,
    /// when the decode completes: `Ok` after the buffer was updated and a
    /// snapshot taken, `Err` with the buffer and history untouched.
    pub fn poll_load(&mut self) -> Option<Result<(), CanvasError>> {
        let receiver = self.pending_load.as_mut()?;
        match receiver.try_recv() {
            Ok(None) => None,
            Ok(Some(Ok(base))) => {
                self.pending_load = None;
                log::info!("loaded {}x{} base image", base.width(), base.height());
                self.buffer.underlay(&base);
                self.history.snapshot(&self.buffer);
                self.revision += 1;
                Some(Ok(()))
            }
            Ok(Some(Err(err))) => {
                self.pending_load = None;
                log::error!("image load failed: {err}");
                Some(Err(err))
            }
            Err(oneshot::Canceled) => {
                self.pending_load = None;
                Some(Err(CanvasError::Decode(image::ImageError::IoError(
                    std::io::Error::other("image decode task was dropped"),
                ))))
            }
        }
    }

    /// Encode the flattened buffer as PNG bytes for upload.
    pub fn export_png(&self) -> Result<Vec<u8>, CanvasError> {
        self.buffer.encode_png()
    }

    // --- Internals ---

    fn paint_segment(&mut self, prev: Pos2, next: Pos2) {
        if let Some((width, color, mode)) = self.recorder.brush() {
            compositor::paint_segment(&mut self.buffer, prev, next, width, color, mode);
            self.revision += 1;
        }
    }

    fn commit_active_stroke(&mut self) {
        if let Some(stroke) = self.recorder.commit() {
            self.history.snapshot(&self.buffer);
            log::info!(
                "committed {:?} stroke with {} points",
                stroke.mode(),
                stroke.points().len()
            );
        }
        self.state = SurfaceState::Idle;
    }

    fn restore(&mut self, entry: &PixelBuffer) {
        self.buffer.copy_from(entry);
        self.revision += 1;
    }
}

impl CanvasHandle for SurfaceController {
    fn undo(&mut self) {
        if self.pending_load.is_some() {
            log::debug!("undo ignored while an image load is pending");
            return;
        }
        if self.state == SurfaceState::Drawing {
            self.commit_active_stroke();
        }
        if let Some(entry) = self.history.undo() {
            self.restore(&entry);
        }
    }

    fn redo(&mut self) {
        if self.pending_load.is_some() {
            log::debug!("redo ignored while an image load is pending");
            return;
        }
        if self.state == SurfaceState::Drawing {
            self.commit_active_stroke();
        }
        if let Some(entry) = self.history.redo() {
            self.restore(&entry);
        }
    }

    fn load_image(&mut self, bytes: Vec<u8>) -> Result<(), CanvasError> {
        if self.pending_load.is_some() {
            return Err(CanvasError::LoadInFlight);
        }
        if self.state == SurfaceState::Drawing {
            // A file dropped mid-gesture ends the stroke.
            self.commit_active_stroke();
        }
        let (sender, receiver) = oneshot::channel();

        // Decode off the UI queue on native; wasm decodes in place and the
        // result is still applied on the next poll.
        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let _ = sender.send(PixelBuffer::decode_png(&bytes));
        });
        #[cfg(target_arch = "wasm32")]
        {
            let _ = sender.send(PixelBuffer::decode_png(&bytes));
        }

        self.pending_load = Some(receiver);
        Ok(())
    }
}
