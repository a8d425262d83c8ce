use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 420.0,
            height: 760.0,
            title: "Swatch Swipe".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SampleRange {
    pub min: u16,
    /// Exclusive upper bound.
    pub max: u16,
}
impl Default for SampleRange {
    fn default() -> Self {
        Self { min: 0, max: 1 }
    }
}

/// Candidate generation and selection tuning for the preference engine.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub count: usize,
    pub hue: SampleRange,
    pub saturation: SampleRange,
    pub lightness: SampleRange,
    /// Number of uniformly random picks before preferences are consulted.
    pub cold_start: usize,
    /// Share of the ranked pool that stays eligible for the weighted pick.
    pub shortlist_fraction: f32,
}
impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            count: 150,
            hue: SampleRange { min: 0, max: 360 },
            saturation: SampleRange { min: 40, max: 100 },
            lightness: SampleRange { min: 40, max: 80 },
            cold_start: 5,
            shortlist_fraction: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SwipeConfig {
    /// Vertical travel (logical px) needed to commit a like / dislike.
    pub commit_threshold: f32,
    /// Vertical travel at which the like / dislike hint appears.
    pub hint_threshold: f32,
    /// Degrees of card tilt per px of travel.
    pub rotation_per_px: f32,
}
impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: 100.0,
            hint_threshold: 50.0,
            rotation_per_px: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Seconds a departing card stays visible before the next color is shown.
    pub departure_secs: f32,
    /// Seconds between pressing finalize and revealing the chosen color.
    pub reveal_delay_secs: f32,
}
impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            departure_secs: 0.5,
            reveal_delay_secs: 1.5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SubmitConfig {
    pub enabled: bool,
    /// Receives `GET <endpoint>?colorId=<id>`; the response body is never read.
    pub endpoint: String,
    /// Seconds after a request that did not fail before it counts as saved.
    pub settle_secs: f32,
}
impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: String::new(),
            settle_secs: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub palette: PaletteConfig,
    pub swipe: SwipeConfig,
    pub feed: FeedConfig,
    pub submit: SubmitConfig,
}

impl AppConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Reads every path in order and deep-merges the RON maps (later files win).
    /// Returns the config, the paths actually used and any read / parse errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match merged.as_mut() {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<AppConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (Self::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let p = &self.palette;
        if p.count == 0 {
            w.push("palette.count is 0; nothing to swipe".into());
        }
        fn check_range(w: &mut Vec<String>, label: &str, r: &SampleRange, ceiling: u16) {
            if r.min >= r.max {
                w.push(format!("{label} min ({}) must be below max ({})", r.min, r.max));
            }
            if r.max > ceiling {
                w.push(format!("{label} max ({}) above {ceiling}", r.max));
            }
        }
        check_range(&mut w, "palette.hue", &p.hue, 360);
        check_range(&mut w, "palette.saturation", &p.saturation, 101);
        check_range(&mut w, "palette.lightness", &p.lightness, 101);
        if !(0.0..=1.0).contains(&p.shortlist_fraction) || p.shortlist_fraction == 0.0 {
            w.push(format!(
                "palette.shortlist_fraction {} outside (0, 1]",
                p.shortlist_fraction
            ));
        }
        if p.cold_start >= p.count && p.count > 0 {
            w.push(format!(
                "palette.cold_start {} >= count {}; preferences never kick in",
                p.cold_start, p.count
            ));
        }
        let s = &self.swipe;
        if s.commit_threshold <= 0.0 {
            w.push("swipe.commit_threshold must be > 0".into());
        }
        if s.hint_threshold < 0.0 || s.hint_threshold > s.commit_threshold {
            w.push(format!(
                "swipe.hint_threshold {} should sit between 0 and commit_threshold {}",
                s.hint_threshold, s.commit_threshold
            ));
        }
        if self.feed.departure_secs < 0.0 || self.feed.reveal_delay_secs < 0.0 {
            w.push("feed delays must be >= 0".into());
        }
        if self.submit.enabled && self.submit.endpoint.trim().is_empty() {
            w.push("submit.enabled but submit.endpoint is empty; selections are only logged".into());
        }
        if self.submit.settle_secs < 0.0 {
            w.push("submit.settle_secs must be >= 0".into());
        }
        w
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}
