//! Blend configuration assembled from validated user input.

use image::Rgb;

/// Where the watermark is drawn on the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A single copy with its top-left corner at `(x, y)`.
    Single {
        /// Horizontal offset in pixels.
        x: u32,
        /// Vertical offset in pixels.
        y: u32,
    },
    /// Tiled from the origin across the whole base image.
    Grid,
}

/// Options controlling how watermark pixels are blended into the base image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendConfig {
    /// Blend strength in percent: 0 keeps the base, 100 copies the watermark.
    pub weight: u8,
    /// Skip watermark pixels whose alpha is 0.
    pub use_alpha: bool,
    /// Skip watermark pixels whose RGB equals this color.
    pub transparency_color: Option<Rgb<u8>>,
    /// Single position or grid tiling.
    pub placement: Placement,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            weight: 100,
            use_alpha: false,
            transparency_color: None,
            placement: Placement::Single { x: 0, y: 0 },
        }
    }
}

impl BlendConfig {
    /// Set the blend weight, clamped to `0..=100`.
    #[must_use]
    pub fn with_weight(mut self, weight: u8) -> Self {
        self.weight = weight.min(100);
        self
    }

    /// Enable or disable alpha-aware skipping.
    #[must_use]
    pub fn with_alpha(mut self, use_alpha: bool) -> Self {
        self.use_alpha = use_alpha;
        self
    }

    /// Set the color key.
    #[must_use]
    pub fn with_transparency_color(mut self, color: Option<Rgb<u8>>) -> Self {
        self.transparency_color = color;
        self
    }

    /// Set the placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}
