// One error enum for the whole crate. Every variant states *where* things
// went wrong; decode failures and out-of-bounds samples are the only errors a
// correct caller can trigger, the window variants come from the preview shell.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Input bytes are not a decodable raster image. Surfaced to the caller
    /// as-is; the session keeps whatever it was showing before.
    #[error("could not decode image")]
    Decode(#[source] image::ImageError),

    /// PNG re-encoding of the result failed.
    #[error("could not encode PNG")]
    Encode(#[source] image::ImageError),

    /// A sample coordinate fell outside the pixel grid. The coordinate
    /// mapping in `coords` clamps before sampling, so hitting this means an
    /// integration bug rather than a user action.
    #[error("sample coordinate ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("window init failed: {0}")]
    WindowInit(String),

    #[error("window update failed: {0}")]
    WindowUpdate(String),
}
