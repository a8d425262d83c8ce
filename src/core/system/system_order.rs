//! Central system ordering labels to make the per-frame swipe pipeline explicit.
//! Stages (high-level):
//! 1. PointerInput (mouse / touch normalized into `PointerEvent`s)
//! 2. Swipe (recognizer consumes pointer events, moves the card, emits commits)
//! 3. Feed (verdicts recorded, deferred actions run, next card presented)
//! 4. Presentation (labels / buttons refreshed from session state)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PointerInputSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SwipeSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FeedSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PresentationSet;
