// Display-space to image-space mapping for the scaled preview.
//
// The preview window is usually smaller than the image, so a click at display
// pixel (dx, dy) does not land on image pixel (dx, dy). Off-by-scale bugs
// here are classic, which is why the mapping lives in two small pure
// functions instead of inside the event handler.

/// Pick a preview size that fits `max` while preserving aspect ratio.
///
/// Never upscales: an image smaller than the limit renders 1:1.
pub fn fit_display_size(image: (u32, u32), max: (usize, usize)) -> (usize, usize) {
    let (iw, ih) = (image.0 as f64, image.1 as f64);
    let scale = (max.0 as f64 / iw).min(max.1 as f64 / ih).min(1.0);
    let w = (iw * scale).round() as usize;
    let h = (ih * scale).round() as usize;
    (w.max(1), h.max(1))
}

/// Map a display coordinate into image pixel space:
/// `imageCoord = displayCoord * (imageDim / displayDim)`.
///
/// The result is clamped into bounds rather than rejected. The window clamps
/// the cursor to its own edges already, and rounding on the last row or
/// column can otherwise land one pixel outside the grid; rejection for truly
/// wild coordinates lives in `raster::sample`.
pub fn display_to_image(
    dx: usize,
    dy: usize,
    display: (usize, usize),
    image: (u32, u32),
) -> (u32, u32) {
    let x = (dx as f64 * image.0 as f64 / display.0.max(1) as f64) as u32;
    let y = (dy as f64 * image.1 as f64 / display.1.max(1) as f64) as u32;
    (x.min(image.0.saturating_sub(1)), y.min(image.1.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_small_images_at_native_size() {
        assert_eq!(fit_display_size((320, 240), (1280, 800)), (320, 240));
    }

    #[test]
    fn fit_shrinks_to_the_tighter_axis() {
        // 4000x1000 into 1280x800: width is the binding constraint.
        assert_eq!(fit_display_size((4000, 1000), (1280, 800)), (1280, 320));
        // 1000x4000: height binds.
        assert_eq!(fit_display_size((1000, 4000), (1280, 800)), (200, 800));
    }

    #[test]
    fn fit_preserves_aspect_ratio_for_typical_photos() {
        let (w, h) = fit_display_size((3000, 2000), (1280, 800));
        assert_eq!((w, h), (1200, 800));
    }

    #[test]
    fn identity_mapping_at_native_scale() {
        assert_eq!(display_to_image(0, 0, (320, 240), (320, 240)), (0, 0));
        assert_eq!(display_to_image(57, 113, (320, 240), (320, 240)), (57, 113));
        assert_eq!(
            display_to_image(319, 239, (320, 240), (320, 240)),
            (319, 239)
        );
    }

    #[test]
    fn halved_display_doubles_coordinates() {
        // 200x100 image shown at 100x50: display (30, 20) -> image (60, 40).
        assert_eq!(display_to_image(30, 20, (100, 50), (200, 100)), (60, 40));
    }

    #[test]
    fn last_display_pixel_stays_inside_the_image() {
        // At a 2x shrink the last display column maps to 198, not 200.
        assert_eq!(display_to_image(99, 49, (100, 50), (200, 100)), (198, 98));
        // Even a deliberately out-of-range display coordinate clamps.
        assert_eq!(display_to_image(100, 50, (100, 50), (200, 100)), (199, 99));
    }

    #[test]
    fn non_integer_ratios_round_down_consistently() {
        // 300-wide image in a 173-wide preview: scale = 300/173.
        let (x, _) = display_to_image(100, 0, (173, 100), (300, 100));
        assert_eq!(x, (100.0 * 300.0 / 173.0) as u32);
        assert!(x < 300);
    }
}
