// Decoding, pixel sampling, and PNG export.
// The decode is the only place a new source buffer is born; everything
// downstream treats it as read-only.

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::error::Error;
use crate::types::{RasterImage, Rgb};

/// Decode user-supplied bytes into an RGBA pixel buffer.
///
/// Format sniffing is left to the `image` crate, which covers PNG, JPEG and
/// WebP among others. Indexed, grayscale and RGB inputs are expanded to RGBA
/// so the masking pass only ever sees one layout.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, Error> {
    let decoded = image::load_from_memory(bytes).map_err(Error::Decode)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RasterImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Read the color of one pixel at an image-space coordinate.
///
/// Out-of-bounds coordinates are rejected, not clamped: by the time a click
/// reaches this function it has already been mapped and clamped into image
/// space, so a miss here is a defect worth surfacing loudly.
pub fn sample(image: &RasterImage, x: u32, y: u32) -> Result<Rgb, Error> {
    if !image.in_bounds(x, y) {
        return Err(Error::OutOfBounds {
            x,
            y,
            width: image.width,
            height: image.height,
        });
    }
    let i = image.offset(x, y);
    Ok(Rgb {
        r: image.pixels[i],
        g: image.pixels[i + 1],
        b: image.pixels[i + 2],
    })
}

/// Re-encode an image as a PNG byte stream.
///
/// PNG is the only permitted output encoding: the whole point of the mask is
/// the alpha channel, and it must round-trip losslessly.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(Error::Encode)?;
    Ok(out)
}
