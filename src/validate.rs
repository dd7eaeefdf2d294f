//! Validation of user answers.
//!
//! Every function takes the raw answer text and either returns the parsed
//! value or the [`Error`] that ends the session. None of them perform I/O.

use std::sync::LazyLock;

use image::Rgb;
use regex::Regex;

use crate::config::Placement;
use crate::error::{Error, Result};
use crate::raster::{OutputFormat, Raster};

static UNSIGNED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("unsigned pattern compiles"));
static SIGNED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("signed pattern compiles"));

/// Placement method chosen at the position prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMethod {
    /// One watermark at a user-chosen position.
    Single,
    /// Watermark tiled over the whole image.
    Grid,
}

/// `true` only for `yes`, in any letter case.
#[must_use]
pub fn parse_yes(answer: &str) -> bool {
    answer.to_lowercase() == "yes"
}

/// Reject a watermark wider or taller than the base image.
///
/// # Errors
///
/// Returns [`Error::WatermarkTooLarge`].
pub fn check_dimensions(image: &Raster, watermark: &Raster) -> Result<()> {
    if image.width() < watermark.width() || image.height() < watermark.height() {
        return Err(Error::WatermarkTooLarge);
    }
    Ok(())
}

/// Parse the transparency percentage.
///
/// # Errors
///
/// - [`Error::WeightNotInteger`] unless the answer is only ASCII digits.
/// - [`Error::WeightOutOfRange`] if the value exceeds 100.
pub fn parse_weight(answer: &str) -> Result<u8> {
    if !UNSIGNED.is_match(answer) {
        return Err(Error::WeightNotInteger);
    }
    match answer.parse::<u8>() {
        Ok(weight) if weight <= 100 => Ok(weight),
        _ => Err(Error::WeightOutOfRange),
    }
}

/// Parse a transparency color written as `R G B`.
///
/// Fields are separated by single spaces and must be digits in `0..=255`.
///
/// # Errors
///
/// Returns [`Error::TransparencyColor`] for any malformed or out-of-range input.
pub fn parse_transparency_color(answer: &str) -> Result<Rgb<u8>> {
    let fields: Vec<&str> = answer.split(' ').collect();
    let [r, g, b] = fields.as_slice() else {
        return Err(Error::TransparencyColor);
    };
    let channel = |field: &str| {
        if !UNSIGNED.is_match(field) {
            return Err(Error::TransparencyColor);
        }
        field.parse::<u8>().map_err(|_| Error::TransparencyColor)
    };
    Ok(Rgb([channel(*r)?, channel(*g)?, channel(*b)?]))
}

/// Parse the placement method, which must be exactly `single` or `grid`.
///
/// # Errors
///
/// Returns [`Error::PlacementMethod`] for anything else.
pub fn parse_placement_method(answer: &str) -> Result<PlacementMethod> {
    match answer {
        "single" => Ok(PlacementMethod::Single),
        "grid" => Ok(PlacementMethod::Grid),
        _ => Err(Error::PlacementMethod),
    }
}

/// Parse a single-placement position written as `x y`.
///
/// Both numbers may carry a sign but must land in `0..=max_x` and `0..=max_y`.
///
/// # Errors
///
/// - [`Error::PositionFormat`] unless the answer is two integers separated by one space.
/// - [`Error::PositionOutOfRange`] if either coordinate is outside its range.
pub fn parse_position(answer: &str, max_x: u32, max_y: u32) -> Result<Placement> {
    let fields: Vec<&str> = answer.split(' ').collect();
    let [x, y] = fields.as_slice() else {
        return Err(Error::PositionFormat);
    };
    if !SIGNED.is_match(x) || !SIGNED.is_match(y) {
        return Err(Error::PositionFormat);
    }
    let coordinate = |field: &str, max: u32| {
        field
            .parse::<i64>()
            .ok()
            .and_then(|value| u32::try_from(value).ok())
            .filter(|value| *value <= max)
            .ok_or(Error::PositionOutOfRange)
    };
    Ok(Placement::Single {
        x: coordinate(*x, max_x)?,
        y: coordinate(*y, max_y)?,
    })
}

/// Check the output filename and pick its format.
///
/// # Errors
///
/// Returns [`Error::OutputExtension`] unless the name ends in `.jpg` or `.png`.
pub fn parse_output_filename(answer: &str) -> Result<OutputFormat> {
    OutputFormat::from_filename(answer).ok_or(Error::OutputExtension)
}
