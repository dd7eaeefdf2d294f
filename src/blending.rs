//! Weighted blending of a watermark into a base image.
//!
//! Each blended channel is computed with integer math:
//! `result = (weight * watermark + (100 - weight) * base) / 100`
//!
//! The base image is modified in place. Its alpha channel is never touched.

use image::{Rgba, RgbaImage};
use log::{debug, trace};

use crate::config::{BlendConfig, Placement};

/// Blend one channel value. Weights above 100 are treated as 100.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // a weighted mean of two u8 values fits in u8
pub fn blend_channel(watermark: u8, base: u8, weight: u8) -> u8 {
    let weight = u32::from(weight.min(100));
    let mixed = (weight * u32::from(watermark) + (100 - weight) * u32::from(base)) / 100;
    mixed as u8
}

/// Whether a watermark pixel is left out of the blend.
fn is_skipped(pixel: Rgba<u8>, config: &BlendConfig) -> bool {
    if config.use_alpha && pixel[3] == 0 {
        return true;
    }
    config
        .transparency_color
        .is_some_and(|key| key.0 == [pixel[0], pixel[1], pixel[2]])
}

/// Blend the watermark with its top-left corner at `(pos_x, pos_y)`.
///
/// The region is clipped to the base image bounds. Pixels matching the skip
/// policy of `config` leave the base pixel unchanged.
pub fn blend_at(
    base: &mut RgbaImage,
    watermark: &RgbaImage,
    pos_x: u32,
    pos_y: u32,
    config: &BlendConfig,
) {
    // Clip to image bounds
    let x2 = pos_x.saturating_add(watermark.width()).min(base.width());
    let y2 = pos_y.saturating_add(watermark.height()).min(base.height());

    if pos_x >= x2 || pos_y >= y2 {
        return;
    }

    for dy in 0..(y2 - pos_y) {
        for dx in 0..(x2 - pos_x) {
            let wm = *watermark.get_pixel(dx, dy);
            if is_skipped(wm, config) {
                continue;
            }

            let px = base.get_pixel_mut(pos_x + dx, pos_y + dy);
            for ch in 0..3 {
                px[ch] = blend_channel(wm[ch], px[ch], config.weight);
            }
        }
    }
}

/// Top-left corners of the tiles covering a `width` x `height` image.
///
/// Tiles start at the origin and step by the tile size. The last row and
/// column may extend past the image edge. A zero-sized tile yields nothing.
pub fn tile_origins(
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let (cols, rows) = if tile_width == 0 || tile_height == 0 {
        (0, 0)
    } else {
        (width.div_ceil(tile_width), height.div_ceil(tile_height))
    };
    (0..cols).flat_map(move |col| (0..rows).map(move |row| (col * tile_width, row * tile_height)))
}

/// Draw the watermark onto `base` according to `config` and return `base`.
pub fn apply_watermark<'a>(
    base: &'a mut RgbaImage,
    watermark: &RgbaImage,
    config: &BlendConfig,
) -> &'a mut RgbaImage {
    match config.placement {
        Placement::Single { x, y } => {
            debug!("blending single watermark at ({x}, {y})");
            blend_at(base, watermark, x, y, config);
        }
        Placement::Grid => {
            let origins: Vec<_> = tile_origins(
                base.width(),
                base.height(),
                watermark.width(),
                watermark.height(),
            )
            .collect();
            debug!("blending {} grid tiles", origins.len());
            for (x, y) in origins {
                trace!("tile at ({x}, {y})");
                blend_at(base, watermark, x, y, config);
            }
        }
    }
    base
}
