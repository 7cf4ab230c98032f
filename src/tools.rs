use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::stroke::StrokeMode;

/// Tool configuration owned by the embedding UI and read by the surface at
/// stroke start. Mid-stroke changes never affect an in-progress stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub erase_mode: bool,
    /// Pen width in buffer pixels.
    pub stroke_width: f32,
    /// Eraser width in buffer pixels.
    pub eraser_size: f32,
    pub stroke_color: Color32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            erase_mode: false,
            stroke_width: 4.0,
            eraser_size: 12.0,
            stroke_color: Color32::BLACK,
        }
    }
}

impl ToolConfig {
    pub fn mode(&self) -> StrokeMode {
        if self.erase_mode {
            StrokeMode::Eraser
        } else {
            StrokeMode::Pen
        }
    }

    /// The brush width of the currently selected tool.
    pub fn active_width(&self) -> f32 {
        if self.erase_mode {
            self.eraser_size
        } else {
            self.stroke_width
        }
    }

    /// Set the stroke color from a `#rrggbb`/`#rrggbbaa` string.
    /// Returns false (leaving the color unchanged) when the string is malformed.
    pub fn set_stroke_color_hex(&mut self, hex: &str) -> bool {
        match parse_hex_color(hex) {
            Some(color) => {
                self.stroke_color = color;
                true
            }
            None => false,
        }
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let r = channel(0)?;
    let g = channel(2)?;
    let b = channel(4)?;
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}
