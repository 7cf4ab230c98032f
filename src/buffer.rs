use std::io::Cursor;

use egui::ColorImage;
use image::{ImageEncoder, ImageFormat, RgbaImage};

use crate::error::CanvasError;

/// The live drawing surface: a straight-alpha RGBA8 raster.
///
/// This is the single source of truth for what is displayed and what gets
/// exported. All coordinates are in buffer pixels, origin top-left.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA8, row-major
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Read one pixel as `[r, g, b, a]`. `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let i = self.index(x as u32, y as u32);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Alpha-over one pixel with `coverage` scaling the source alpha.
    /// Out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4], coverage: f32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let sa = (rgba[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        let i = self.index(x as u32, y as u32);
        blend_over(&mut self.pixels[i..i + 4], rgba[0], rgba[1], rgba[2], sa);
    }

    /// Reduce one pixel's alpha by `coverage` (destination-out).
    /// Out-of-bounds writes are ignored.
    pub fn knockout_pixel(&mut self, x: i32, y: i32, coverage: f32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        let i = self.index(x as u32, y as u32) + 3;
        let da = self.pixels[i] as f32 / 255.0;
        self.pixels[i] = (da * (1.0 - coverage) * 255.0).round() as u8;
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Overwrite this buffer's content with another buffer of the same size.
    pub fn copy_from(&mut self, other: &PixelBuffer) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.pixels.copy_from_slice(&other.pixels);
    }

    /// Place `base` at the origin as the new bottom layer and flatten the
    /// current content over it. Pixels of `base` outside the buffer are
    /// clipped; buffer area not covered by `base` keeps its content over
    /// transparency.
    pub fn underlay(&mut self, base: &RgbaImage) {
        let mut flat = vec![0u8; self.pixels.len()];
        let copy_w = self.width.min(base.width());
        let copy_h = self.height.min(base.height());
        for y in 0..copy_h {
            for x in 0..copy_w {
                let i = self.index(x, y);
                flat[i..i + 4].copy_from_slice(&base.get_pixel(x, y).0);
            }
        }
        for (dst, src) in flat.chunks_exact_mut(4).zip(self.pixels.chunks_exact(4)) {
            let sa = src[3] as f32 / 255.0;
            blend_over(dst, src[0], src[1], src[2], sa);
        }
        self.pixels = flat;
    }

    /// Decode PNG bytes. Valid images in any other format are rejected with
    /// [`CanvasError::UnsupportedFormat`] before anything is decoded.
    pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, CanvasError> {
        let format = image::guess_format(bytes).map_err(CanvasError::Decode)?;
        if format != ImageFormat::Png {
            return Err(CanvasError::UnsupportedFormat);
        }
        let decoded =
            image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(CanvasError::Decode)?;
        Ok(decoded.to_rgba8())
    }

    /// Encode the buffer as a PNG byte stream, the upload artifact.
    pub fn encode_png(&self) -> Result<Vec<u8>, CanvasError> {
        let mut out = Cursor::new(Vec::new());
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &self.pixels,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(CanvasError::Encode)?;
        Ok(out.into_inner())
    }

    /// Convert for display as an egui texture.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }
}

/// Straight-alpha source-over: `sa` is the source alpha already scaled by
/// coverage, in `0..=1`.
fn blend_over(dst: &mut [u8], r: u8, g: u8, b: u8, sa: f32) {
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    let w_src = sa / out_a;
    let w_dst = (da * (1.0 - sa)) / out_a;
    dst[0] = (r as f32 * w_src + dst[0] as f32 * w_dst).round() as u8;
    dst[1] = (g as f32 * w_src + dst[1] as f32 * w_dst).round() as u8;
    dst[2] = (b as f32 * w_src + dst[2] as f32 * w_dst).round() as u8;
    dst[3] = (out_a * 255.0).round() as u8;
}
