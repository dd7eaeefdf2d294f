//! Image loading and saving.
//!
//! Images are decoded into an RGBA buffer regardless of their stored color
//! type. The `translucent` flag remembers whether the source carried an alpha
//! channel so the image can be written back without one.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{
    DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat, ImageReader, RgbImage, RgbaImage,
};
use log::debug;

use crate::error::{Error, ImageRole, Result};

/// Quality used for JPEG output.
const JPEG_QUALITY: u8 = 100;

/// Output formats accepted for the watermarked image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `.jpg`
    Jpeg,
    /// `.png`
    Png,
}

impl OutputFormat {
    /// Pick the format from the text after the last `.` of a filename.
    ///
    /// The match is exact: only `jpg` and `png` are accepted, in lowercase.
    #[must_use]
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension {
            "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// A decoded image held as RGBA pixels.
#[derive(Debug, Clone)]
pub struct Raster {
    pixels: RgbaImage,
    translucent: bool,
}

impl Raster {
    /// Wrap an RGBA buffer.
    ///
    /// `translucent` says whether the alpha channel is meaningful.
    #[must_use]
    pub fn new(pixels: RgbaImage, translucent: bool) -> Self {
        Self {
            pixels,
            translucent,
        }
    }

    /// Convert a decoded image, rejecting color types other than 8-bit RGB(A).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColorComponents`] or [`Error::BitDepth`] for
    /// unsupported color types.
    pub fn from_dynamic(image: DynamicImage, role: ImageRole) -> Result<Self> {
        let color = image.color();
        check_color_type(color.into(), role)?;
        Ok(Self::new(image.into_rgba8(), color.has_alpha()))
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Whether the source image had an alpha channel.
    #[must_use]
    pub fn is_translucent(&self) -> bool {
        self.translucent
    }

    /// The pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Mutable access to the pixel buffer.
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Consume the raster and return its pixel buffer.
    #[must_use]
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// Encode and write the image.
    ///
    /// JPEG output and images without an alpha channel are written as RGB.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or encoding fails.
    pub fn save(&self, path: &Path, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Jpeg => {
                let rgb: RgbImage = self.pixels.convert();
                let mut file = BufWriter::new(File::create(path)?);
                JpegEncoder::new_with_quality(&mut file, JPEG_QUALITY).encode_image(&rgb)?;
                file.flush()?;
            }
            OutputFormat::Png if self.translucent => {
                self.pixels.save_with_format(path, ImageFormat::Png)?;
            }
            OutputFormat::Png => {
                let rgb: RgbImage = self.pixels.convert();
                rgb.save_with_format(path, ImageFormat::Png)?;
            }
        }
        debug!("wrote {}x{} {format:?} to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}

/// Load an image from a filename entered by the user.
///
/// The format is detected from the file contents, not the extension. The
/// color type checks use the type stored in the file, before the decoder
/// expands palettes or converts CMYK.
///
/// # Errors
///
/// - [`Error::FileNotFound`] if nothing exists at `filename`.
/// - [`Error::ColorComponents`] / [`Error::BitDepth`] for unsupported color types.
/// - [`Error::Io`] / [`Error::Image`] if the file cannot be read or decoded.
pub fn load(filename: &str, role: ImageRole) -> Result<Raster> {
    let path = Path::new(filename);
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: filename.to_string(),
        });
    }

    let decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let stored = decoder.original_color_type();
    let (width, height) = decoder.dimensions();
    debug!("loaded {role} {}: {width}x{height} {stored:?}", path.display());
    check_color_type(stored, role)?;

    Raster::from_dynamic(DynamicImage::from_decoder(decoder)?, role)
}

/// Accept only three color components at 24 or 32 bits per pixel.
///
/// Indexed images are reported as `Unknown(bits)`: their palette entries are
/// RGB but each pixel is only an index, so they fail on bit depth. CMYK has
/// four color components.
fn check_color_type(color: ExtendedColorType, role: ImageRole) -> Result<()> {
    match color {
        ExtendedColorType::Unknown(_) => return Err(Error::BitDepth { role }),
        ExtendedColorType::Cmyk8 => return Err(Error::ColorComponents { role }),
        _ => {}
    }
    if !matches!(color.channel_count(), 3 | 4) {
        return Err(Error::ColorComponents { role });
    }
    if !matches!(color.bits_per_pixel(), 24 | 32) {
        return Err(Error::BitDepth { role });
    }
    Ok(())
}
