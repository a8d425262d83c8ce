use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::distance::mean_distance;
use super::swatch::Swatch;
use crate::core::config::{PaletteConfig, SampleRange};

/// Weight of "close to what was liked" in a candidate's score.
pub const LIKE_WEIGHT: f32 = 0.7;
/// Weight of "far from what was disliked" in a candidate's score.
pub const DISLIKE_WEIGHT: f32 = 0.3;

/// Which selection policy the next call to [`PreferenceEngine::next_color`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Fewer than `cold_start` colors shown; uniform pick.
    ColdStart,
    /// Past cold start but nothing liked yet; dislikes alone do not steer.
    Exploring,
    /// Ranked by score, uniform pick within the shortlist.
    Preference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Like,
    Dislike,
}

/// Session-scoped candidate pool plus the like / dislike history that steers it.
///
/// `pool` and `shown` always partition the generated set; `liked` and
/// `disliked` are disjoint subsets of `shown`.
#[derive(Resource, Debug, Clone)]
pub struct PreferenceEngine {
    settings: PaletteConfig,
    rng: StdRng,
    pool: Vec<Swatch>,
    shown: Vec<Swatch>,
    liked: Vec<Swatch>,
    disliked: Vec<Swatch>,
    shown_count: usize,
}

impl PreferenceEngine {
    pub fn new(settings: PaletteConfig) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_seed(settings: PaletteConfig, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: PaletteConfig, mut rng: StdRng) -> Self {
        let pool = generate_swatches(&settings, &mut rng);
        Self {
            settings,
            rng,
            pool,
            shown: Vec::new(),
            liked: Vec::new(),
            disliked: Vec::new(),
            shown_count: 0,
        }
    }

    /// Engine over a hand-picked pool. [`reset`](Self::reset) still regenerates
    /// from `settings`.
    pub fn from_pool(settings: PaletteConfig, pool: Vec<Swatch>, seed: u64) -> Self {
        Self {
            settings,
            rng: StdRng::seed_from_u64(seed),
            pool,
            shown: Vec::new(),
            liked: Vec::new(),
            disliked: Vec::new(),
            shown_count: 0,
        }
    }

    pub fn settings(&self) -> &PaletteConfig {
        &self.settings
    }

    /// New settings apply from the next [`reset`](Self::reset).
    pub fn set_settings(&mut self, settings: PaletteConfig) {
        self.settings = settings;
    }

    pub fn pool(&self) -> &[Swatch] {
        &self.pool
    }
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
    pub fn shown(&self) -> &[Swatch] {
        &self.shown
    }
    pub fn liked(&self) -> &[Swatch] {
        &self.liked
    }
    pub fn disliked(&self) -> &[Swatch] {
        &self.disliked
    }
    pub fn shown_count(&self) -> usize {
        self.shown_count
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.shown_count < self.settings.cold_start {
            SelectionPhase::ColdStart
        } else if self.liked.is_empty() {
            SelectionPhase::Exploring
        } else {
            SelectionPhase::Preference
        }
    }

    /// Takes the next color out of the pool. `None` once the pool is exhausted.
    pub fn next_color(&mut self) -> Option<Swatch> {
        if self.pool.is_empty() {
            return None;
        }
        let phase = self.phase();
        let index = match phase {
            SelectionPhase::ColdStart | SelectionPhase::Exploring => {
                self.rng.gen_range(0..self.pool.len())
            }
            SelectionPhase::Preference => {
                let ranked = self.ranked_indices();
                let top = self.shortlist_len(ranked.len());
                ranked[self.rng.gen_range(0..top)].0
            }
        };
        let swatch = self.pool.swap_remove(index);
        debug!(
            target: "preference",
            "next {swatch} via {phase:?}; pool left={}",
            self.pool.len()
        );
        self.shown.push(swatch.clone());
        self.shown_count += 1;
        Some(swatch)
    }

    pub fn like_color(&mut self, swatch: &Swatch) {
        self.record(Verdict::Like, swatch);
    }

    pub fn dislike_color(&mut self, swatch: &Swatch) {
        self.record(Verdict::Dislike, swatch);
    }

    /// Records a verdict for a shown swatch. A later verdict replaces an earlier
    /// opposite one; repeating the same verdict changes nothing.
    pub fn record(&mut self, verdict: Verdict, swatch: &Swatch) {
        if !self.shown.contains(swatch) {
            warn!(target: "preference", "ignoring {verdict:?} for never-shown {swatch}");
            return;
        }
        let (target, other) = match verdict {
            Verdict::Like => (&mut self.liked, &mut self.disliked),
            Verdict::Dislike => (&mut self.disliked, &mut self.liked),
        };
        other.retain(|s| s != swatch);
        if !target.contains(swatch) {
            target.push(swatch.clone());
        }
    }

    pub fn verdict_for(&self, swatch: &Swatch) -> Option<Verdict> {
        if self.liked.contains(swatch) {
            Some(Verdict::Like)
        } else if self.disliked.contains(swatch) {
            Some(Verdict::Dislike)
        } else {
            None
        }
    }

    /// Most recently shown swatch, `None` before the first pick.
    pub fn current_color(&self) -> Option<&Swatch> {
        self.shown.last()
    }

    pub fn reset(&mut self) {
        self.pool = generate_swatches(&self.settings, &mut self.rng);
        self.shown.clear();
        self.liked.clear();
        self.disliked.clear();
        self.shown_count = 0;
        info!(target: "preference", "engine reset; {} candidates", self.pool.len());
    }

    /// `0.7 * (1 - mean distance to liked) + 0.3 * mean distance to disliked`.
    /// Each half contributes 0 when its history is empty.
    pub fn score_candidate(&self, candidate: &Swatch) -> f32 {
        let like = mean_distance(candidate, &self.liked).map_or(0.0, |d| 1.0 - d);
        let dislike = mean_distance(candidate, &self.disliked).unwrap_or(0.0);
        LIKE_WEIGHT * like + DISLIKE_WEIGHT * dislike
    }

    /// Candidates eligible for the next preference-driven pick, best first.
    pub fn preference_shortlist(&self) -> Vec<Swatch> {
        let ranked = self.ranked_indices();
        let top = self.shortlist_len(ranked.len());
        ranked
            .into_iter()
            .take(top)
            .map(|(i, _)| self.pool[i].clone())
            .collect()
    }

    fn ranked_indices(&self) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .pool
            .iter()
            .enumerate()
            .map(|(i, c)| (i, self.score_candidate(c)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    fn shortlist_len(&self, ranked: usize) -> usize {
        let share = (ranked as f32 * self.settings.shortlist_fraction).floor() as usize;
        share.clamp(1, ranked.max(1))
    }
}

fn sample(rng: &mut StdRng, range: SampleRange) -> u16 {
    if range.min >= range.max {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}

/// Independent uniform samples; duplicates are possible and tolerated.
pub fn generate_swatches(settings: &PaletteConfig, rng: &mut StdRng) -> Vec<Swatch> {
    (0..settings.count)
        .map(|_| {
            let h = sample(rng, settings.hue);
            let s = sample(rng, settings.saturation).min(100) as u8;
            let l = sample(rng, settings.lightness).min(100) as u8;
            Swatch::from_hsl(h, s, l)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(count: usize) -> PaletteConfig {
        PaletteConfig {
            count,
            ..Default::default()
        }
    }

    #[test]
    fn generation_respects_ranges() {
        let engine = PreferenceEngine::with_seed(PaletteConfig::default(), 7);
        assert_eq!(engine.pool_len(), 150);
        for s in engine.pool() {
            assert!(s.hue() < 360);
            assert!((40..100).contains(&s.saturation()), "{s}");
            assert!((40..80).contains(&s.lightness()), "{s}");
        }
    }

    #[test]
    fn phases_progress() {
        let mut engine = PreferenceEngine::with_seed(small(20), 1);
        for _ in 0..5 {
            assert_eq!(engine.phase(), SelectionPhase::ColdStart);
            engine.next_color();
        }
        assert_eq!(engine.phase(), SelectionPhase::Exploring);
        let first = engine.shown()[0].clone();
        engine.dislike_color(&first);
        assert_eq!(engine.phase(), SelectionPhase::Exploring);
        engine.like_color(&first);
        assert_eq!(engine.phase(), SelectionPhase::Preference);
    }

    #[test]
    fn verdicts_stay_disjoint() {
        let mut engine = PreferenceEngine::with_seed(small(10), 3);
        let a = engine.next_color().unwrap();
        engine.like_color(&a);
        engine.like_color(&a);
        assert_eq!(engine.liked().len(), 1);
        engine.dislike_color(&a);
        assert!(engine.liked().is_empty());
        assert_eq!(engine.disliked(), &[a.clone()]);
        assert_eq!(engine.verdict_for(&a), Some(Verdict::Dislike));
    }

    #[test]
    fn unshown_verdict_is_ignored() {
        let mut engine = PreferenceEngine::with_seed(small(10), 3);
        let stranger = engine.pool()[0].clone();
        engine.like_color(&stranger);
        assert!(engine.liked().is_empty());
    }

    #[test]
    fn score_prefers_liked_neighbourhood() {
        let mut engine = PreferenceEngine::from_pool(
            small(0),
            vec![Swatch::from_hsl(0, 100, 50)],
            0,
        );
        let liked = engine.next_color().unwrap();
        engine.like_color(&liked);
        let near = Swatch::from_hsl(10, 100, 50);
        let far = Swatch::from_hsl(180, 100, 50);
        assert!(engine.score_candidate(&near) > engine.score_candidate(&far));
        assert!((engine.score_candidate(&liked) - LIKE_WEIGHT).abs() < 1e-6);
    }

    #[test]
    fn shortlist_has_at_least_one() {
        let mut engine = PreferenceEngine::with_seed(small(8), 5);
        let c = engine.next_color().unwrap();
        engine.like_color(&c);
        assert_eq!(engine.preference_shortlist().len(), 1);
    }
}
