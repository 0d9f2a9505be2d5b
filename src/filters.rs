//! Preset filter registry and the adjustment pipeline.
//!
//! Each preset maps to a fixed [`AdjustmentSpec`] whose coefficients follow
//! the CSS filter-function definitions. Both the live preview and the export
//! render go through [`AdjustmentSpec::apply`], so the two paths cannot
//! drift apart: application order is always
//! sepia/grayscale, then saturation, then brightness, then contrast.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;

use crate::error::Error;

/// Luminance weights used by the grayscale stage (CSS `grayscale()`).
const GRAY_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];
/// Luminance weights used by the saturation stage (CSS `saturate()`).
const SAT_WEIGHTS: [f32; 3] = [0.213, 0.715, 0.072];

/// The closed set of presentation filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPreset {
    /// Identity: no adjustment.
    #[default]
    None,
    /// Sepia 0.6, brightness 0.9, contrast 1.2.
    Vintage,
    /// Saturation 1.2, contrast 1.1.
    Crisp,
    /// Grayscale 0.5, contrast 1.2, brightness 0.9.
    Urban,
}

impl FilterPreset {
    /// All selectable presets, in display order.
    pub const ALL: [Self; 4] = [Self::None, Self::Vintage, Self::Crisp, Self::Urban];

    /// The adjustment coefficients for this preset.
    ///
    /// This table is the single authoritative mapping; any rendering path
    /// (preview, export, CSS string) derives from it.
    #[must_use]
    pub fn adjustments(self) -> AdjustmentSpec {
        match self {
            Self::None => AdjustmentSpec::IDENTITY,
            Self::Vintage => AdjustmentSpec {
                sepia: 0.6,
                brightness: 0.9,
                contrast: 1.2,
                ..AdjustmentSpec::IDENTITY
            },
            Self::Crisp => AdjustmentSpec {
                saturation: 1.2,
                contrast: 1.1,
                ..AdjustmentSpec::IDENTITY
            },
            Self::Urban => AdjustmentSpec {
                grayscale: 0.5,
                contrast: 1.2,
                brightness: 0.9,
                ..AdjustmentSpec::IDENTITY
            },
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Vintage => "vintage",
            Self::Crisp => "crisp",
            Self::Urban => "urban",
        };
        f.write_str(name)
    }
}

impl FromStr for FilterPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "vintage" => Ok(Self::Vintage),
            "crisp" => Ok(Self::Crisp),
            "urban" => Ok(Self::Urban),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown filter preset: {other}"
            ))),
        }
    }
}

/// An ordered set of visual adjustments with numeric coefficients.
///
/// Fields are listed in application order. `sepia` and `grayscale` are
/// amounts in `[0, 1]`; the remaining fields are multipliers where `1.0`
/// is identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentSpec {
    /// Sepia amount, 0 = none.
    pub sepia: f32,
    /// Grayscale amount, 0 = none.
    pub grayscale: f32,
    /// Saturation multiplier.
    pub saturation: f32,
    /// Brightness multiplier.
    pub brightness: f32,
    /// Contrast multiplier (pivot at mid-gray).
    pub contrast: f32,
}

impl AdjustmentSpec {
    /// The identity spec: applying it leaves every pixel unchanged.
    pub const IDENTITY: Self = Self {
        sepia: 0.0,
        grayscale: 0.0,
        saturation: 1.0,
        brightness: 1.0,
        contrast: 1.0,
    };

    /// Whether this spec is a no-op.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Bake the adjustments into pixel data, in the fixed stage order.
    ///
    /// Alpha is preserved. Each stage clamps to the displayable range
    /// before the next one runs, matching how a rasterizer chains
    /// filter functions.
    pub fn apply(&self, image: &mut RgbaImage) {
        if self.is_identity() {
            return;
        }

        for px in image.pixels_mut() {
            let mut rgb = [
                f32::from(px[0]) / 255.0,
                f32::from(px[1]) / 255.0,
                f32::from(px[2]) / 255.0,
            ];

            if self.sepia > 0.0 {
                rgb = sepia_stage(rgb, self.sepia);
            }
            if self.grayscale > 0.0 {
                rgb = mix_toward_luma(rgb, GRAY_WEIGHTS, self.grayscale);
            }
            if (self.saturation - 1.0).abs() > f32::EPSILON {
                rgb = mix_toward_luma(rgb, SAT_WEIGHTS, 1.0 - self.saturation);
            }
            if (self.brightness - 1.0).abs() > f32::EPSILON {
                for c in &mut rgb {
                    *c = (*c * self.brightness).clamp(0.0, 1.0);
                }
            }
            if (self.contrast - 1.0).abs() > f32::EPSILON {
                for c in &mut rgb {
                    *c = ((*c - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0);
                }
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            for (ch, c) in rgb.iter().enumerate() {
                px[ch] = (c * 255.0).round() as u8;
            }
        }
    }

    /// Render the equivalent CSS `filter` value, in the same stage order.
    ///
    /// Useful for embedding the preview in a styled surface; the pixel
    /// path in [`apply`](Self::apply) remains authoritative.
    #[must_use]
    pub fn css(&self) -> String {
        let mut parts = Vec::new();
        if self.sepia > 0.0 {
            parts.push(format!("sepia({})", self.sepia));
        }
        if self.grayscale > 0.0 {
            parts.push(format!("grayscale({})", self.grayscale));
        }
        if (self.saturation - 1.0).abs() > f32::EPSILON {
            parts.push(format!("saturate({})", self.saturation));
        }
        if (self.brightness - 1.0).abs() > f32::EPSILON {
            parts.push(format!("brightness({})", self.brightness));
        }
        if (self.contrast - 1.0).abs() > f32::EPSILON {
            parts.push(format!("contrast({})", self.contrast));
        }
        parts.join(" ")
    }
}

/// CSS `sepia(amount)`: interpolate between identity and the sepia matrix.
fn sepia_stage(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    let [r, g, b] = rgb;
    let sr = 0.393 * r + 0.769 * g + 0.189 * b;
    let sg = 0.349 * r + 0.686 * g + 0.168 * b;
    let sb = 0.272 * r + 0.534 * g + 0.131 * b;
    [
        (r + (sr - r) * amount).clamp(0.0, 1.0),
        (g + (sg - g) * amount).clamp(0.0, 1.0),
        (b + (sb - b) * amount).clamp(0.0, 1.0),
    ]
}

/// Move each channel toward the weighted luma by `amount`.
///
/// `amount = 1` collapses to pure luma; negative amounts push away from it
/// (saturation boost).
fn mix_toward_luma(rgb: [f32; 3], weights: [f32; 3], amount: f32) -> [f32; 3] {
    let luma = weights[0] * rgb[0] + weights[1] * rgb[1] + weights[2] * rgb[2];
    [
        (rgb[0] + (luma - rgb[0]) * amount).clamp(0.0, 1.0),
        (rgb[1] + (luma - rgb[1]) * amount).clamp(0.0, 1.0),
        (rgb[2] + (luma - rgb[2]) * amount).clamp(0.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    #[test]
    fn preset_table_matches_registry() {
        let v = FilterPreset::Vintage.adjustments();
        assert_eq!((v.sepia, v.brightness, v.contrast), (0.6, 0.9, 1.2));
        assert_eq!((v.grayscale, v.saturation), (0.0, 1.0));

        let c = FilterPreset::Crisp.adjustments();
        assert_eq!((c.saturation, c.contrast), (1.2, 1.1));

        let u = FilterPreset::Urban.adjustments();
        assert_eq!((u.grayscale, u.contrast, u.brightness), (0.5, 1.2, 0.9));

        assert!(FilterPreset::None.adjustments().is_identity());
    }

    #[test]
    fn preset_round_trips_through_strings() {
        for preset in FilterPreset::ALL {
            let parsed: FilterPreset = preset.to_string().parse().unwrap();
            assert_eq!(parsed, preset);
        }
        assert!("sparkle".parse::<FilterPreset>().is_err());
    }

    #[test]
    fn identity_leaves_pixels_untouched() {
        let mut img = solid(4, 4, [13, 77, 201, 255]);
        let before = img.clone();
        AdjustmentSpec::IDENTITY.apply(&mut img);
        assert_eq!(img, before);
    }

    #[test]
    fn brightness_scales_channels() {
        let mut img = solid(1, 1, [100, 100, 100, 255]);
        let spec = AdjustmentSpec {
            brightness: 0.5,
            ..AdjustmentSpec::IDENTITY
        };
        spec.apply(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgba([50, 50, 50, 255]));
    }

    #[test]
    fn contrast_pivots_at_mid_gray() {
        let mut img = solid(1, 1, [128, 128, 128, 255]);
        let spec = AdjustmentSpec {
            contrast: 2.0,
            ..AdjustmentSpec::IDENTITY
        };
        spec.apply(&mut img);
        // Mid-gray (127.5 in continuous space) stays within a rounding step.
        let px = img.get_pixel(0, 0);
        assert!((i32::from(px[0]) - 128).abs() <= 1);
    }

    #[test]
    fn full_grayscale_equalizes_channels() {
        let mut img = solid(1, 1, [200, 50, 10, 255]);
        let spec = AdjustmentSpec {
            grayscale: 1.0,
            ..AdjustmentSpec::IDENTITY
        };
        spec.apply(&mut img);
        let px = img.get_pixel(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn saturation_boost_spreads_channels() {
        let mut img = solid(1, 1, [150, 100, 50, 255]);
        let spec = AdjustmentSpec {
            saturation: 1.5,
            ..AdjustmentSpec::IDENTITY
        };
        spec.apply(&mut img);
        let px = img.get_pixel(0, 0);
        assert!(px[0] > 150);
        assert!(px[2] < 50);
    }

    #[test]
    fn stage_order_is_not_commutative() {
        // brightness-then-contrast must differ from contrast-then-brightness
        // for the same coefficients; the pipeline always runs brightness first.
        let start = [180u8, 180, 180, 255];

        let mut pipeline = solid(1, 1, start);
        AdjustmentSpec {
            brightness: 0.9,
            contrast: 1.2,
            ..AdjustmentSpec::IDENTITY
        }
        .apply(&mut pipeline);

        // Hand-rolled reversed order.
        let mut swapped = solid(1, 1, start);
        AdjustmentSpec {
            contrast: 1.2,
            ..AdjustmentSpec::IDENTITY
        }
        .apply(&mut swapped);
        AdjustmentSpec {
            brightness: 0.9,
            ..AdjustmentSpec::IDENTITY
        }
        .apply(&mut swapped);

        assert_ne!(pipeline.get_pixel(0, 0), swapped.get_pixel(0, 0));
    }

    #[test]
    fn alpha_channel_is_preserved() {
        let mut img = solid(1, 1, [10, 20, 30, 42]);
        FilterPreset::Vintage.adjustments().apply(&mut img);
        assert_eq!(img.get_pixel(0, 0)[3], 42);
    }

    #[test]
    fn css_string_follows_stage_order() {
        assert_eq!(
            FilterPreset::Vintage.adjustments().css(),
            "sepia(0.6) brightness(0.9) contrast(1.2)"
        );
        assert_eq!(
            FilterPreset::Urban.adjustments().css(),
            "grayscale(0.5) brightness(0.9) contrast(1.2)"
        );
        assert_eq!(FilterPreset::None.adjustments().css(), "");
    }
}
