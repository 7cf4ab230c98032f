use thiserror::Error;

/// Errors surfaced by the drawing surface.
///
/// Only `Decode` and `UnsupportedFormat` are expected to reach the user;
/// everything else the surface absorbs as a no-op.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The supplied file could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    /// Encoding the buffer for export failed.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    /// The supplied file is a valid image but not a PNG.
    #[error("only PNG images are supported")]
    UnsupportedFormat,
    /// A previous `load_image` has not completed yet.
    #[error("an image load is already in progress")]
    LoadInFlight,
}
