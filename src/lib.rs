#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod buffer;
pub mod compositor;
pub mod controller;
pub mod error;
pub mod file_handler;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod stroke;
pub mod tools;

pub use app::SketchApp;
pub use buffer::PixelBuffer;
pub use controller::{CanvasHandle, SurfaceController, SurfaceState};
pub use error::CanvasError;
pub use history::SnapshotHistory;
pub use renderer::Renderer;
pub use stroke::{Stroke, StrokeMode, StrokeRecorder};
pub use tools::ToolConfig;
