//! Perceptual-ish distance between swatches.
//!
//! Hue dominates: `0.6 * hue + 0.3 * saturation + 0.1 * lightness`, each term
//! normalized to `[0, 1]`, so the result is in `[0, 1]` as well.
use super::swatch::Swatch;

pub const HUE_WEIGHT: f32 = 0.6;
pub const SATURATION_WEIGHT: f32 = 0.3;
pub const LIGHTNESS_WEIGHT: f32 = 0.1;

/// Shortest way around the hue ring, in degrees (`0..=180`).
#[inline]
pub fn hue_gap(a: u16, b: u16) -> u16 {
    let diff = (a % 360).abs_diff(b % 360);
    diff.min(360 - diff)
}

pub fn swatch_distance(a: &Swatch, b: &Swatch) -> f32 {
    let hue = hue_gap(a.hue(), b.hue()) as f32 / 180.0;
    let sat = a.saturation().abs_diff(b.saturation()) as f32 / 100.0;
    let light = a.lightness().abs_diff(b.lightness()) as f32 / 100.0;
    // weights sum to 1; clamp only absorbs f32 rounding at the extremes
    (HUE_WEIGHT * hue + SATURATION_WEIGHT * sat + LIGHTNESS_WEIGHT * light).min(1.0)
}

/// Mean distance from `candidate` to every swatch in `others`; `None` when empty.
pub fn mean_distance<'a, I>(candidate: &Swatch, others: I) -> Option<f32>
where
    I: IntoIterator<Item = &'a Swatch>,
{
    let (sum, n) = others
        .into_iter()
        .fold((0.0f32, 0usize), |(sum, n), o| (sum + swatch_distance(candidate, o), n + 1));
    (n > 0).then(|| sum / n as f32)
}
