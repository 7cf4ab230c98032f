use egui::{Color32, Pos2};

use crate::tools::ToolConfig;

/// Points closer together than this are considered duplicates and coalesce.
/// Zero-length segments would otherwise corrupt width interpolation.
const MIN_SEGMENT_LEN: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeMode {
    Pen,
    Eraser,
}

/// A committed stroke: one continuous pointer-drag gesture.
/// Immutable once the recorder hands it out.
#[derive(Debug, Clone)]
pub struct Stroke {
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
    mode: StrokeMode,
}

impl Stroke {
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }
}

// The stroke being drawn, plus the tool parameters frozen at begin.
#[derive(Debug)]
struct ActiveStroke {
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
    mode: StrokeMode,
}

/// Records a pointer-drag gesture into an ordered point sequence.
///
/// At most one stroke is active at a time. `extend`/`commit` without an
/// active stroke are defensive no-ops; pointer event ordering across
/// devices is not reliable enough to treat them as hard errors.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    active: Option<ActiveStroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Brush parameters of the active stroke, frozen at `begin`.
    pub fn brush(&self) -> Option<(f32, Color32, StrokeMode)> {
        self.active
            .as_ref()
            .map(|stroke| (stroke.width, stroke.color, stroke.mode))
    }

    /// Start a stroke with the tool configuration frozen for its duration.
    pub fn begin(&mut self, point: Pos2, config: &ToolConfig) {
        if self.active.is_some() {
            // The caller should have committed or canceled first.
            log::warn!("begin called with a stroke already active; discarding it");
        }
        self.active = Some(ActiveStroke {
            points: vec![point],
            width: config.active_width(),
            color: config.stroke_color,
            mode: config.mode(),
        });
    }

    /// Append a point to the active stroke. Returns the previous tail point
    /// when a new segment should be painted; `None` when the point coalesced
    /// with the tail or no stroke is active.
    pub fn extend(&mut self, point: Pos2) -> Option<Pos2> {
        let Some(stroke) = self.active.as_mut() else {
            log::debug!("extend ignored: no active stroke");
            return None;
        };
        let tail = *stroke.points.last()?;
        if (point - tail).length_sq() < MIN_SEGMENT_LEN * MIN_SEGMENT_LEN {
            return None;
        }
        stroke.points.push(point);
        Some(tail)
    }

    /// Finalize and return the stroke, clearing recorder state.
    pub fn commit(&mut self) -> Option<Stroke> {
        let stroke = self.active.take()?;
        Some(Stroke {
            points: stroke.points,
            width: stroke.width,
            color: stroke.color,
            mode: stroke.mode,
        })
    }

    /// Discard the in-progress stroke, e.g. when the pointer leaves the
    /// canvas without a proper pointer-up.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            log::debug!("active stroke canceled");
        }
    }
}
