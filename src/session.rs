// The interactive session: a single (source, reference, tolerance, result)
// tuple with one writer. Every operation here is synchronous and either
// replaces the result wholesale or leaves it untouched.

use std::time::Instant;

use crate::error::Error;
use crate::types::{RasterImage, Rgb, Tolerance};
use crate::{chroma, raster};

#[derive(Debug)]
pub struct EraserSession {
    source: RasterImage,
    reference: Option<Rgb>,
    tolerance: Tolerance,
    result: Option<RasterImage>,
}

impl EraserSession {
    /// Decode `bytes` and start a fresh session showing the unmasked source.
    pub fn new(bytes: &[u8], tolerance: Tolerance) -> Result<Self, Error> {
        Ok(Self::from_image(raster::decode(bytes)?, tolerance))
    }

    /// Start from an already-decoded image.
    pub fn from_image(source: RasterImage, tolerance: Tolerance) -> Self {
        Self {
            source,
            reference: None,
            tolerance,
            result: None,
        }
    }

    /// The image to display: the masked result once a reference has been
    /// picked, the untouched source before that.
    pub fn current(&self) -> &RasterImage {
        self.result.as_ref().unwrap_or(&self.source)
    }

    pub fn source(&self) -> &RasterImage {
        &self.source
    }

    pub fn reference(&self) -> Option<Rgb> {
        self.reference
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Pick a new reference color at an image-space coordinate and recompute.
    ///
    /// Always samples the *source*, never the masked result, and replaces any
    /// previous reference and mask. On an out-of-bounds coordinate the error
    /// is returned and the session state is left exactly as it was.
    pub fn pick(&mut self, x: u32, y: u32) -> Result<Rgb, Error> {
        let reference = raster::sample(&self.source, x, y)?;
        log::info!(
            "picked reference ({}, {}, {}) at ({x}, {y})",
            reference.r,
            reference.g,
            reference.b
        );
        self.reference = Some(reference);
        self.recompute();
        Ok(reference)
    }

    /// Change the tolerance. Recomputes against the existing reference, if
    /// any; with no reference picked yet this only stores the new value.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        if tolerance == self.tolerance {
            return;
        }
        self.tolerance = tolerance;
        self.recompute();
    }

    /// Discard the mask and the reference; the session shows the unmodified
    /// original decode again.
    pub fn reset(&mut self) {
        self.reference = None;
        self.result = None;
    }

    /// Encode whatever is currently displayed as a PNG byte stream.
    pub fn export_png(&self) -> Result<Vec<u8>, Error> {
        raster::encode_png(self.current())
    }

    // Every recompute starts from the pristine source, so parameter changes
    // never stack on top of an earlier mask.
    fn recompute(&mut self) {
        let Some(reference) = self.reference else {
            self.result = None;
            return;
        };
        let start = Instant::now();
        let masked = chroma::apply_chroma_key(&self.source, reference, self.tolerance);
        log::debug!(
            "masked {}x{} at tolerance {} in {:?}",
            self.source.width,
            self.source.height,
            self.tolerance.percent(),
            start.elapsed()
        );
        self.result = Some(masked);
    }
}
