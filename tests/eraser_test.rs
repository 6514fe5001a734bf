// End-to-end pipeline: encode a fixture as PNG, open a session from raw
// bytes, pick through the display mapping, and check the exported PNG holds
// the exact same masked/unmasked partition as the in-memory result.

use chroma_eraser::{EraserSession, RasterImage, Rgb, Tolerance, coords, raster};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

/// 8x8 red canvas with a 4x4 blue square in the middle.
fn fixture() -> RasterImage {
    let mut pixels = Vec::with_capacity(8 * 8 * 4);
    for y in 0..8u32 {
        for x in 0..8u32 {
            let inside = (2..6).contains(&x) && (2..6).contains(&y);
            pixels.extend_from_slice(if inside { &BLUE } else { &RED });
        }
    }
    RasterImage {
        width: 8,
        height: 8,
        pixels,
    }
}

#[test]
fn pick_mask_export_round_trip() {
    let png = raster::encode_png(&fixture()).unwrap();
    let mut session = EraserSession::new(&png, Tolerance::new(10)).unwrap();

    // Pick a red corner pixel; tolerance 10 keeps the blue square opaque.
    let picked = session.pick(0, 0).unwrap();
    assert_eq!(picked, Rgb { r: 255, g: 0, b: 0 });

    let exported = session.export_png().unwrap();
    let reloaded = raster::decode(&exported).unwrap();
    assert_eq!(&reloaded, session.current());

    for (i, px) in reloaded.pixels.chunks_exact(4).enumerate() {
        let (x, y) = (i as u32 % 8, i as u32 / 8);
        let inside = (2..6).contains(&x) && (2..6).contains(&y);
        if inside {
            assert_eq!(px, &BLUE, "blue square must survive at ({x}, {y})");
        } else {
            // Background: RGB kept, alpha gone.
            assert_eq!(&px[..3], &RED[..3]);
            assert_eq!(px[3], 0);
        }
    }
}

#[test]
fn reset_after_export_restores_the_decoded_source() {
    let png = raster::encode_png(&fixture()).unwrap();
    let mut session = EraserSession::new(&png, Tolerance::new(50)).unwrap();

    session.pick(7, 7).unwrap();
    let _ = session.export_png().unwrap();
    session.reset();

    assert_eq!(session.current(), &fixture());
}

#[test]
fn clicks_on_a_scaled_preview_pick_the_intended_pixel() {
    // Pretend the 8x8 fixture is shown in a 4x4 preview (a 2x shrink, as if
    // the window clamp had kicked in). A click on display (1, 1) must land
    // on image (2, 2) -- the blue square, not the red border.
    let display = (4usize, 4usize);
    let (ix, iy) = coords::display_to_image(1, 1, display, (8, 8));
    assert_eq!((ix, iy), (2, 2));

    let png = raster::encode_png(&fixture()).unwrap();
    let mut session = EraserSession::new(&png, Tolerance::new(10)).unwrap();
    let picked = session.pick(ix, iy).unwrap();
    assert_eq!(picked, Rgb { r: 0, g: 0, b: 255 });
}

#[test]
fn garbage_bytes_fail_to_open_a_session() {
    let err = EraserSession::new(b"<html>not an image</html>", Tolerance::new(20)).unwrap_err();
    assert!(matches!(err, chroma_eraser::Error::Decode(_)));
}
