//! Error types for the watermark-overlay crate.
//!
//! Each validation failure is terminal and carries its own process exit code.
//! The `Display` text of a variant is the message shown to the user.

use std::fmt;

/// Which of the two input images a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    /// The base image the watermark is drawn onto.
    Image,
    /// The watermark image.
    Watermark,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("image"),
            Self::Watermark => f.write_str("watermark"),
        }
    }
}

/// Errors that can end a watermarking session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base or watermark file does not exist.
    #[error("The file {path} doesn't exist.")]
    FileNotFound {
        /// Filename exactly as entered.
        path: String,
    },

    /// The image does not have exactly three color components.
    #[error("The number of {role} color components isn't 3.")]
    ColorComponents {
        /// Image the check failed on.
        role: ImageRole,
    },

    /// The image is not 24 or 32 bits per pixel.
    #[error("The {role} isn't 24 or 32-bit.")]
    BitDepth {
        /// Image the check failed on.
        role: ImageRole,
    },

    /// The watermark is wider or taller than the base image.
    #[error("The watermark's dimensions are larger.")]
    WatermarkTooLarge,

    /// The transparency percentage is not a plain non-negative integer.
    #[error("The transparency percentage isn't an integer number.")]
    WeightNotInteger,

    /// The transparency percentage is outside `0..=100`.
    #[error("The transparency percentage is out of range.")]
    WeightOutOfRange,

    /// The output filename does not end in `.jpg` or `.png`.
    #[error("The output file extension isn't \"jpg\" or \"png\".")]
    OutputExtension,

    /// The transparency color is not three integers in `0..=255`.
    #[error("The transparency color input is invalid.")]
    TransparencyColor,

    /// The placement method is neither `single` nor `grid`.
    #[error("The position method input is invalid.")]
    PlacementMethod,

    /// The position is not two (optionally signed) integers.
    #[error("The position input is invalid.")]
    PositionFormat,

    /// The position would place the watermark outside the base image.
    #[error("The position input is out of range.")]
    PositionOutOfRange,

    /// Console or file I/O failed, including end of input at a prompt.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding an image failed.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Process exit code for this failure.
    ///
    /// Validation failures use `21..=31`, one code each. Generic I/O and codec
    /// failures share code 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 21,
            Self::ColorComponents { .. } => 22,
            Self::BitDepth { .. } => 23,
            Self::WatermarkTooLarge => 24,
            Self::WeightNotInteger => 25,
            Self::WeightOutOfRange => 26,
            Self::OutputExtension => 27,
            Self::TransparencyColor => 28,
            Self::PlacementMethod => 29,
            Self::PositionFormat => 30,
            Self::PositionOutOfRange => 31,
            Self::Io(_) | Self::Image(_) => 1,
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
