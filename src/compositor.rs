use egui::{Color32, Pos2};

use crate::buffer::PixelBuffer;
use crate::stroke::StrokeMode;

/// Half-width of the anti-aliased brush edge, in pixels.
const EDGE: f32 = 0.5;
/// Width-1 strokes still need a visible disc.
const MIN_RADIUS: f32 = 0.5;

/// Paint a single brush stamp, the visual for a click without a drag.
pub fn paint_dot(buffer: &mut PixelBuffer, center: Pos2, width: f32, color: Color32, mode: StrokeMode) {
    stamp_disc(buffer, center, radius_of(width), color, mode);
}

/// Paint the segment between two consecutive stroke points.
///
/// Discs are stamped at half-radius spacing along the segment, so adjacent
/// stamps always overlap and a fast gesture (two points many radii apart)
/// renders as a continuous round-capped stroke.
pub fn paint_segment(
    buffer: &mut PixelBuffer,
    p1: Pos2,
    p2: Pos2,
    width: f32,
    color: Color32,
    mode: StrokeMode,
) {
    let radius = radius_of(width);
    let length = (p2 - p1).length();
    if length <= f32::EPSILON {
        stamp_disc(buffer, p2, radius, color, mode);
        return;
    }
    let spacing = (radius * 0.5).max(0.5);
    let steps = (length / spacing).ceil().max(1.0) as u32;
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        stamp_disc(buffer, p1.lerp(p2, t), radius, color, mode);
    }
}

fn radius_of(width: f32) -> f32 {
    (width * 0.5).max(MIN_RADIUS)
}

/// Stamp one filled disc. Pen and eraser share this coverage computation so
/// the two tools are geometrically identical.
fn stamp_disc(buffer: &mut PixelBuffer, center: Pos2, radius: f32, color: Color32, mode: StrokeMode) {
    let min_x = (center.x - radius - EDGE).floor() as i32;
    let max_x = (center.x + radius + EDGE).ceil() as i32;
    let min_y = (center.y - radius - EDGE).floor() as i32;
    let max_y = (center.y + radius + EDGE).ceil() as i32;

    let rgba = [color.r(), color.g(), color.b(), color.a()];
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // Sample at the pixel center.
            let dx = (x as f32 + 0.5) - center.x;
            let dy = (y as f32 + 0.5) - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = coverage(radius, dist);
            if coverage <= 0.0 {
                continue;
            }
            match mode {
                StrokeMode::Pen => buffer.blend_pixel(x, y, rgba, coverage),
                StrokeMode::Eraser => buffer.knockout_pixel(x, y, coverage),
            }
        }
    }
}

/// Coverage of a pixel at `dist` from the disc center: 1 inside, 0 outside,
/// smooth over the one-pixel edge band.
fn coverage(radius: f32, dist: f32) -> f32 {
    1.0 - smoothstep(radius - EDGE, radius + EDGE, dist)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
