//! Interactive watermarking session.
//!
//! A [`Session`] asks its questions in a fixed order, validates each answer
//! as soon as it is read and stops at the first invalid one. Nothing is
//! written to disk unless every answer was valid.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use image::Rgb;
use log::{debug, info};

use crate::blending;
use crate::config::{BlendConfig, Placement};
use crate::error::{ImageRole, Result};
use crate::raster::{self, Raster};
use crate::validate::{self, PlacementMethod};

/// Prompt/answer loop over any line-oriented input and text output.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session reading answers from `input` and writing prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the whole session and return the path of the written image.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or an I/O or codec error.
    pub fn run(mut self) -> Result<PathBuf> {
        let (mut image, watermark, config) = self.configure()?;

        info!("applying watermark: {config:?}");
        blending::apply_watermark(image.pixels_mut(), watermark.pixels(), &config);
        writeln!(self.output)?;

        let filename = self.ask("Input the output image filename (jpg or png extension):")?;
        let format = validate::parse_output_filename(&filename)?;
        let path = PathBuf::from(&filename);
        image.save(&path, format)?;

        writeln!(self.output, "The watermarked image {filename} has been created.")?;
        Ok(path)
    }

    /// Load both images and collect the blend settings.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or an I/O or codec error.
    pub fn configure(&mut self) -> Result<(Raster, Raster, BlendConfig)> {
        let image = self.load_image(ImageRole::Image)?;
        let watermark = self.load_image(ImageRole::Watermark)?;
        validate::check_dimensions(&image, &watermark)?;

        let use_alpha = self.ask_use_alpha(&watermark)?;
        let transparency_color = self.ask_transparency_color(&watermark)?;
        let weight = self.ask_weight()?;
        let placement = self.ask_placement(&image, &watermark)?;

        let config = BlendConfig {
            weight,
            use_alpha,
            transparency_color,
            placement,
        };
        Ok((image, watermark, config))
    }

    fn load_image(&mut self, role: ImageRole) -> Result<Raster> {
        let prompt = match role {
            ImageRole::Image => "Input the image filename:",
            ImageRole::Watermark => "Input the watermark image filename:",
        };
        let filename = self.ask(prompt)?;
        raster::load(&filename, role)
    }

    fn ask_use_alpha(&mut self, watermark: &Raster) -> Result<bool> {
        if !watermark.is_translucent() {
            return Ok(false);
        }
        let answer = self.ask("Do you want to use the watermark's Alpha channel?")?;
        Ok(validate::parse_yes(&answer))
    }

    fn ask_transparency_color(&mut self, watermark: &Raster) -> Result<Option<Rgb<u8>>> {
        if watermark.is_translucent() {
            return Ok(None);
        }
        let answer = self.ask("Do you want to set a transparency color?")?;
        if !validate::parse_yes(&answer) {
            return Ok(None);
        }
        let answer = self.ask("Input a transparency color ([Red] [Green] [Blue]):")?;
        validate::parse_transparency_color(&answer).map(Some)
    }

    fn ask_weight(&mut self) -> Result<u8> {
        let answer = self.ask("Input the watermark transparency percentage (Integer 0-100):")?;
        validate::parse_weight(&answer)
    }

    fn ask_placement(&mut self, image: &Raster, watermark: &Raster) -> Result<Placement> {
        let answer = self.ask("Choose the position method (single, grid):")?;
        match validate::parse_placement_method(&answer)? {
            PlacementMethod::Grid => Ok(Placement::Grid),
            PlacementMethod::Single => {
                // check_dimensions already guarantees the watermark fits
                let max_x = image.width() - watermark.width();
                let max_y = image.height() - watermark.height();
                let answer =
                    self.ask(&format!("Input the watermark position ([x 0-{max_x}] [y 0-{max_y}]):"))?;
                validate::parse_position(&answer, max_x, max_y)
            }
        }
    }

    /// Print a prompt and read one answer line without its line terminator.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before the question was answered",
            )
            .into());
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        debug!("{prompt} -> {line:?}");
        Ok(line)
    }
}
