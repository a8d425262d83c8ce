use bevy::prelude::*;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One candidate color: an integer HSL triple plus its derived hex string and id.
///
/// Equality and hashing go through the hex string, so two triples that round
/// to the same sRGB value are the same swatch.
#[derive(Debug, Clone)]
pub struct Swatch {
    hue: u16,
    saturation: u8,
    lightness: u8,
    hex: String,
    id: u32,
}

impl Swatch {
    /// `hue` is wrapped into `0..360`; saturation and lightness are clamped to `0..=100`.
    pub fn from_hsl(hue: u16, saturation: u8, lightness: u8) -> Self {
        let hue = hue % 360;
        let saturation = saturation.min(100);
        let lightness = lightness.min(100);
        Self {
            hue,
            saturation,
            lightness,
            hex: hsl_to_hex(hue, saturation, lightness),
            id: swatch_id(hue, saturation, lightness),
        }
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }
    pub fn saturation(&self) -> u8 {
        self.saturation
    }
    pub fn lightness(&self) -> u8 {
        self.lightness
    }
    pub fn hex(&self) -> &str {
        &self.hex
    }
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn color(&self) -> Color {
        Color::hsl(
            self.hue as f32,
            self.saturation as f32 / 100.0,
            self.lightness as f32 / 100.0,
        )
    }
}

impl PartialEq for Swatch {
    fn eq(&self, other: &Self) -> bool {
        self.hex == other.hex
    }
}
impl Eq for Swatch {}

impl Hash for Swatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hex.hash(state);
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} (h={} s={} l={})",
            self.id, self.hex, self.hue, self.saturation, self.lightness
        )
    }
}

/// Lowercase `#rrggbb` for an HSL triple (h in degrees, s / l in percent).
pub fn hsl_to_hex(hue: u16, saturation: u8, lightness: u8) -> String {
    let h = hue as f64;
    let l = lightness as f64 / 100.0;
    let a = saturation as f64 * l.min(1.0 - l) / 100.0;
    let channel = |n: f64| -> u8 {
        let k = (n + h / 30.0) % 12.0;
        let c = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * c).round().clamp(0.0, 255.0) as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

/// Display number in `1000..=9999`. Distinct colors may share an id.
pub fn swatch_id(hue: u16, saturation: u8, lightness: u8) -> u32 {
    let spread = 1000 + hue as u32 * 25 + (saturation as u32 * lightness as u32) / 100;
    spread % 9000 + 1000
}
