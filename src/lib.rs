//! Overlay a watermark image onto a base image.
//!
//! The watermark is mixed into the base image with a percentage weight:
//! `result = (weight * watermark + (100 - weight) * base) / 100` per RGB
//! channel. Watermark pixels can be skipped through their alpha channel or a
//! color key, and the watermark is drawn either once or tiled as a grid.
//!
//! # Quick Start
//!
//! ```no_run
//! use watermark_overlay::{apply_watermark, BlendConfig, ImageRole, Placement};
//!
//! let mut image = watermark_overlay::load("photo.png", ImageRole::Image).unwrap();
//! let logo = watermark_overlay::load("logo.png", ImageRole::Watermark).unwrap();
//! let config = BlendConfig::default()
//!     .with_weight(30)
//!     .with_placement(Placement::Grid);
//! apply_watermark(image.pixels_mut(), logo.pixels(), &config);
//! ```
//!
//! # Interactive use
//!
//! [`Session`] drives the same steps from line-based answers, validating each
//! one and failing with a distinct [`Error::exit_code`] on the first bad one.
//!
//! ```no_run
//! use std::io;
//!
//! use watermark_overlay::Session;
//!
//! let stdin = io::stdin();
//! let result = Session::new(stdin.lock(), io::stdout()).run();
//! if let Err(e) = result {
//!     println!("{e}");
//!     std::process::exit(e.exit_code());
//! }
//! ```

#![deny(missing_docs)]

pub mod blending;
pub mod config;
pub mod error;
pub mod raster;
mod session;
pub mod validate;

pub use blending::apply_watermark;
pub use config::{BlendConfig, Placement};
pub use error::{Error, ImageRole, Result};
pub use raster::{load, OutputFormat, Raster};
pub use session::Session;
