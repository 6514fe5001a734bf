// Core types shared by every module.

/// A decoded RGBA image: the canonical source of truth for one session.
///
/// Nothing in this crate mutates a `RasterImage` in place. Every masking pass
/// builds a fresh buffer from this one, so repeated parameter changes never
/// compound and reset is always exact.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// RGBA interleaved, row-major; length = width * height * 4.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Byte offset of the pixel at (x, y). Caller guarantees bounds.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

/// Reference color sampled from one pixel of the source image.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Euclidean distance to another color in RGB space:
    /// sqrt((r-r')^2 + (g-g')^2 + (b-b')^2).
    pub fn distance_to(self, r: u8, g: u8, b: u8) -> f64 {
        let dr = self.r as f64 - r as f64;
        let dg = self.g as f64 - g as f64;
        let db = self.b as f64 - b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// The largest possible distance between two RGB8 colors, sqrt(3 * 255^2).
pub fn max_rgb_distance() -> f64 {
    (3.0_f64 * 255.0 * 255.0).sqrt()
}

/// Tolerance as a percentage of [`max_rgb_distance`], clamped into [1, 100].
///
/// The clamp floor is 1, not 0: masking uses a strict `distance < threshold`
/// comparison, so a zero threshold would match nothing at all and the slider
/// would silently go dead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tolerance(u8);

impl Tolerance {
    pub fn new(percent: i32) -> Self {
        Self(percent.clamp(1, 100) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Absolute distance threshold this tolerance resolves to.
    pub fn threshold(self) -> f64 {
        (self.0 as f64 / 100.0) * max_rgb_distance()
    }
}
