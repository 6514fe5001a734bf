// The chroma-key masking pass.
//
// One rule holds everything together: the pass is pure, and callers apply it
// to the original decode only. Two slider moves in a row therefore produce
// exactly the same buffer as a single move to the final value.

use crate::types::{RasterImage, Rgb, Tolerance};

/// Make every pixel within `tolerance` of `reference` fully transparent.
///
/// For each pixel the Euclidean RGB distance to the reference is compared
/// against `tolerance.threshold()`; strictly closer pixels get alpha 0, all
/// others are copied through untouched, including their original alpha.
/// RGB channels are never modified, only alpha.
pub fn apply_chroma_key(
    source: &RasterImage,
    reference: Rgb,
    tolerance: Tolerance,
) -> RasterImage {
    let threshold = tolerance.threshold();
    let mut out = source.clone();
    for px in out.pixels.chunks_exact_mut(4) {
        if reference.distance_to(px[0], px[1], px[2]) < threshold {
            px[3] = 0;
        }
    }
    out
}
