//! Interactive chroma-key background eraser.
//!
//! Open an image, click the color you want gone, and every pixel whose RGB
//! distance to that reference falls under a tolerance threshold turns fully
//! transparent. The mask is always recomputed from the original decode, never
//! from an earlier result, so slider moves don't compound and reset is exact.
//!
//! ```no_run
//! use chroma_eraser::{EraserSession, Tolerance};
//!
//! let bytes = std::fs::read("photo.png")?;
//! let mut session = EraserSession::new(&bytes, Tolerance::new(20))?;
//! session.pick(10, 10)?; // sample the background color
//! std::fs::write("erased.png", session.export_png()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chroma;
pub mod coords;
pub mod draw;
pub mod error;
pub mod gamma;
pub mod raster;
pub mod session;
pub mod types;

pub use chroma::apply_chroma_key;
pub use error::Error;
pub use session::EraserSession;
pub use types::{RasterImage, Rgb, Tolerance};
