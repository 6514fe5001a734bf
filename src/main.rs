// What you SEE when this runs:
// • Your image opens in a window, scaled down to fit if it is large.
// • Click any pixel: that color (within the tolerance) turns into the
//   checkerboard, meaning it is now transparent.
// • Up/Down arrows widen/narrow the tolerance; the mask recomputes from the
//   original image every time, so nothing ever compounds.
// • R restores the original, S writes the PNG, ESC quits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chroma_eraser::coords;
use chroma_eraser::draw::Preview;
use chroma_eraser::{EraserSession, Tolerance};

/// The preview never exceeds this size; larger images are rendered scaled
/// down and clicks are mapped back into image pixel space.
const MAX_PREVIEW: (usize, usize) = (1280, 800);

#[derive(Parser, Debug)]
#[command(name = "chroma-eraser")]
#[command(about = "Erase an image background by clicking the color to remove")]
struct Args {
    /// Image to open (PNG, JPEG or WebP)
    input: PathBuf,

    /// Initial tolerance in percent, 1-100 (higher erases more broadly)
    #[arg(short, long, default_value_t = 20)]
    tolerance: i32,

    /// Where the PNG is written when pressing S
    #[arg(short, long, default_value = "erased.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    /* --- Session setup ---
       Decode once; that buffer stays pristine for the whole run. */
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let mut session = EraserSession::new(&bytes, Tolerance::new(args.tolerance))
        .with_context(|| format!("decoding {}", args.input.display()))?;
    let image_size = (session.source().width, session.source().height);
    log::info!(
        "opened {} ({}x{})",
        args.input.display(),
        image_size.0,
        image_size.1
    );

    /* --- Window sized to a shrink-to-fit preview --- */
    let display = coords::fit_display_size(image_size, MAX_PREVIEW);
    let mut preview = Preview::new("Chroma Eraser", display.0, display.1)?;

    // Frames left to keep the SAVED tag visible after an export.
    let mut saved_frames = 0u32;

    while preview.is_open() && !preview.esc_pressed() {
        /* 1) Click: map display -> image, sample the source, recompute. */
        if preview.left_clicked() {
            if let Some((mx, my)) = preview.mouse_pos() {
                let (ix, iy) = coords::display_to_image(mx, my, display, image_size);
                if let Err(e) = session.pick(ix, iy) {
                    log::warn!("pick failed: {e}");
                }
            }
        }

        /* 2) Up/Down: nudge tolerance, re-mask against the same reference. */
        let delta = preview.tolerance_delta();
        if delta != 0 {
            let next = session.tolerance().percent() as i32 + delta;
            session.set_tolerance(Tolerance::new(next));
        }

        /* 3) R: back to the untouched original. */
        if preview.reset_pressed() {
            session.reset();
            log::info!("reset to original");
        }

        /* 4) S: export whatever is on screen as PNG (alpha intact). */
        if preview.save_pressed() {
            let png = session.export_png()?;
            std::fs::write(&args.output, &png)
                .with_context(|| format!("writing {}", args.output.display()))?;
            log::info!("saved {} ({} bytes)", args.output.display(), png.len());
            saved_frames = 120;
        }

        /* 5) HUD + present. */
        let mut hud = match session.reference() {
            None => "CLICK A COLOR TO ERASE IT".to_string(),
            Some(c) => format!(
                "TOL: {:03} | REF: {:03} {:03} {:03} | R: RESET  S: SAVE",
                session.tolerance().percent(),
                c.r,
                c.g,
                c.b
            ),
        };
        if saved_frames > 0 {
            saved_frames -= 1;
            hud.push_str(" | SAVED");
        }
        preview.render(session.current(), &hud)?;
    }

    Ok(())
}
