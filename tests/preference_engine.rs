use swatch_swipe::core::config::{PaletteConfig, SampleRange};
use swatch_swipe::preference::{hue_gap, PreferenceEngine, SelectionPhase, Swatch};

fn palette(count: usize) -> PaletteConfig {
    PaletteConfig {
        count,
        ..Default::default()
    }
}

#[test]
fn pool_exhausts_after_count_picks() {
    let mut engine = PreferenceEngine::with_seed(palette(150), 11);
    for i in 0..150 {
        let c = engine.next_color();
        assert!(c.is_some(), "pick {i} came back empty");
        if i % 3 == 0 {
            engine.like_color(&c.unwrap());
        }
    }
    assert_eq!(engine.pool_len(), 0);
    assert_eq!(engine.shown_count(), 150);
    assert!(engine.next_color().is_none());
    assert!(engine.next_color().is_none());
    assert_eq!(engine.shown_count(), 150);
}

/// Forty swatches with distinct hues, so pool membership identifies a pick.
fn distinct_pool() -> Vec<Swatch> {
    (0..40u16).map(|i| Swatch::from_hsl(i * 9, 60, 50)).collect()
}

#[test]
fn cold_start_ignores_histories() {
    // Same seed, same pool. Verdicts during the first five picks must not
    // change which colors come out.
    let mut quiet = PreferenceEngine::from_pool(palette(40), distinct_pool(), 99);
    let mut opinionated = PreferenceEngine::from_pool(palette(40), distinct_pool(), 99);
    for i in 0..5 {
        assert_eq!(opinionated.phase(), SelectionPhase::ColdStart);
        let a = quiet.next_color().unwrap();
        assert!(opinionated.pool().contains(&a), "pick {i}: {a} not pending");
        let b = opinionated.next_color().unwrap();
        assert_eq!(a, b);
        assert!(!opinionated.pool().contains(&b), "pick {i}: {b} still pending");
        assert_eq!(opinionated.pool_len(), 40 - (i + 1));
        opinionated.like_color(&b);
    }
    assert_eq!(opinionated.phase(), SelectionPhase::Preference);
}

#[test]
fn no_likes_stays_uniform_after_cold_start() {
    let mut quiet = PreferenceEngine::with_seed(palette(40), 5);
    let mut grumpy = PreferenceEngine::with_seed(palette(40), 5);
    for _ in 0..20 {
        let a = quiet.next_color().unwrap();
        let b = grumpy.next_color().unwrap();
        assert_eq!(a, b);
        // dislikes alone never switch to the preference path
        grumpy.dislike_color(&b);
    }
    assert_eq!(grumpy.phase(), SelectionPhase::Exploring);
}

#[test]
fn picks_drift_toward_liked_hues() {
    const TARGET: u16 = 120;
    let mut engine = PreferenceEngine::with_seed(palette(150), 2024);
    let mut preference_gaps = Vec::new();
    for _ in 0..60 {
        let phase = engine.phase();
        let c = engine.next_color().unwrap();
        let gap = hue_gap(c.hue(), TARGET);
        if phase == SelectionPhase::Preference {
            preference_gaps.push(f32::from(gap));
        }
        if gap <= 30 {
            engine.like_color(&c);
        } else {
            engine.dislike_color(&c);
        }
    }
    assert!(!preference_gaps.is_empty(), "never liked anything");
    let mean = preference_gaps.iter().sum::<f32>() / preference_gaps.len() as f32;
    // uniform hues average ~90 away from any target
    assert!(mean < 60.0, "preference picks should cluster near the target (mean gap {mean})");
}

#[test]
fn reset_returns_to_fresh_session() {
    let mut engine = PreferenceEngine::with_seed(palette(30), 8);
    for _ in 0..10 {
        let c = engine.next_color().unwrap();
        engine.like_color(&c);
    }
    engine.reset();
    assert_eq!(engine.pool_len(), 30);
    assert_eq!(engine.shown_count(), 0);
    assert!(engine.shown().is_empty());
    assert!(engine.liked().is_empty());
    assert!(engine.disliked().is_empty());
    assert!(engine.current_color().is_none());
    assert_eq!(engine.phase(), SelectionPhase::ColdStart);

    engine.reset();
    assert_eq!(engine.pool_len(), 30);
    assert_eq!(engine.shown_count(), 0);
}

#[test]
fn preference_pick_comes_from_shortlist() {
    let settings = PaletteConfig {
        count: 0,
        cold_start: 0,
        shortlist_fraction: 0.1,
        ..Default::default()
    };
    let wheel: Vec<Swatch> = (0..36).map(|i| Swatch::from_hsl(i * 10, 70, 50)).collect();
    let mut engine = PreferenceEngine::from_pool(settings, wheel, 3);
    // no likes yet: uniform pick
    let liked = engine.next_color().unwrap();
    engine.like_color(&liked);
    assert_eq!(engine.phase(), SelectionPhase::Preference);

    let shortlist = engine.preference_shortlist();
    assert_eq!(shortlist.len(), 3, "floor(35 * 0.1)");
    for s in &shortlist {
        assert!(hue_gap(s.hue(), liked.hue()) <= 20, "{s} far from {liked}");
    }
    let next = engine.next_color().unwrap();
    assert!(shortlist.contains(&next));
}

#[test]
fn narrow_ranges_are_respected() {
    let settings = PaletteConfig {
        count: 25,
        hue: SampleRange { min: 200, max: 210 },
        saturation: SampleRange { min: 60, max: 61 },
        lightness: SampleRange { min: 50, max: 51 },
        ..Default::default()
    };
    let engine = PreferenceEngine::with_seed(settings, 1);
    for s in engine.pool() {
        assert!((200..210).contains(&s.hue()));
        assert_eq!(s.saturation(), 60);
        assert_eq!(s.lightness(), 50);
        assert!((1000..=9999).contains(&s.id()));
    }
}

#[test]
fn sixth_pick_follows_a_single_cold_start_like() {
    for seed in [1, 7, 99, 2024] {
        let mut engine = PreferenceEngine::with_seed(palette(40), seed);
        assert_eq!(engine.settings().cold_start, 5);
        for i in 0..5 {
            let c = engine.next_color().unwrap();
            if i == 2 {
                engine.like_color(&c);
            } else {
                engine.dislike_color(&c);
            }
        }
        assert_eq!(engine.phase(), SelectionPhase::Preference);
        let shortlist = engine.preference_shortlist();
        assert_eq!(shortlist.len(), 3, "floor(35 * 0.1)");
        let sixth = engine.next_color().unwrap();
        assert!(
            shortlist.contains(&sixth),
            "seed {seed}: {sixth} outside {shortlist:?}"
        );
    }
}
