// sRGB <-> linear lookup tables for the preview compositor.
//
// Fully opaque and fully transparent pixels skip blending entirely; the
// tables only matter for sources that arrive with fractional alpha, where
// compositing in linear light keeps edges free of dark halos.

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255), quantized to 4096 steps
    to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            };
        }

        let mut to_srgb = [0u8; 4096];
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 {
                12.92 * l
            } else {
                1.055 * l.powf(1.0 / 2.4) - 0.055
            };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn encode(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.to_srgb[idx]
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
