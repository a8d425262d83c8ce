//! Vertical swipe state machine: `Idle -> Tracking -> {Accepted | Rejected | Reset} -> Idle`.
//!
//! The recognizer knows nothing about colors or UI. It is bound to one target
//! at a time, turns pointer events into [`SwipeEffect`]s for that target, and
//! drops the binding once a swipe commits so the next card has to be bound
//! explicitly.
use bevy::prelude::*;

use crate::core::config::SwipeConfig;
use crate::interaction::pointer::{PointerEvent, PointerId, PointerPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeHint {
    #[default]
    Neutral,
    LeaningAccept,
    LeaningReject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeVerdict {
    /// Swiped up past the commit threshold.
    Accept,
    /// Swiped down past the commit threshold.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEffect {
    /// Interaction started; the target should follow the pointer 1:1.
    Grab,
    Drag {
        offset: f32,
        rotation_deg: f32,
        hint: SwipeHint,
    },
    /// Released short of the threshold; offset goes back to zero.
    Settle,
    Depart(SwipeVerdict),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeStep<T> {
    pub target: T,
    pub effect: SwipeEffect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tracking {
    pointer: PointerId,
    anchor: Vec2,
    current: Vec2,
}

impl Tracking {
    fn delta(&self) -> f32 {
        self.current.y - self.anchor.y
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SwipeRecognizer<T = Entity> {
    config: SwipeConfig,
    target: Option<T>,
    tracking: Option<Tracking>,
    hint: SwipeHint,
}

impl<T> Default for SwipeRecognizer<T> {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl<T> SwipeRecognizer<T> {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            target: None,
            tracking: None,
            hint: SwipeHint::Neutral,
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SwipeConfig) {
        self.config = config;
    }

    /// Attaches the recognizer to a new target; an interaction in flight on the
    /// previous target is abandoned without a verdict.
    pub fn bind(&mut self, target: T) {
        self.target = Some(target);
        self.tracking = None;
        self.hint = SwipeHint::Neutral;
    }

    pub fn unbind(&mut self) -> Option<T> {
        self.tracking = None;
        self.hint = SwipeHint::Neutral;
        self.target.take()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    pub fn hint(&self) -> SwipeHint {
        self.hint
    }

    /// Current vertical travel, `None` while idle.
    pub fn delta(&self) -> Option<f32> {
        self.tracking.map(|t| t.delta())
    }

    pub fn hint_for(&self, delta: f32) -> SwipeHint {
        if delta < -self.config.hint_threshold {
            SwipeHint::LeaningAccept
        } else if delta > self.config.hint_threshold {
            SwipeHint::LeaningReject
        } else {
            SwipeHint::Neutral
        }
    }

    /// Commit check is inclusive: exactly `-commit_threshold` accepts.
    pub fn verdict_for(&self, delta: f32) -> Option<SwipeVerdict> {
        if delta <= -self.config.commit_threshold {
            Some(SwipeVerdict::Accept)
        } else if delta >= self.config.commit_threshold {
            Some(SwipeVerdict::Reject)
        } else {
            None
        }
    }
}

impl<T: Copy> SwipeRecognizer<T> {
    pub fn target(&self) -> Option<T> {
        self.target
    }

    /// Feeds one pointer event. Out-of-order events (move / end while idle,
    /// a second pointer while one is tracked, anything while unbound) yield `None`.
    pub fn handle(&mut self, event: &PointerEvent) -> Option<SwipeStep<T>> {
        let target = self.target?;
        let effect = match event.phase {
            PointerPhase::Start => {
                if self.tracking.is_some() {
                    return None;
                }
                let pos = event.position?;
                self.tracking = Some(Tracking {
                    pointer: event.pointer,
                    anchor: pos,
                    current: pos,
                });
                self.hint = SwipeHint::Neutral;
                SwipeEffect::Grab
            }
            PointerPhase::Move => {
                let tracking = self.tracking.as_mut().filter(|t| t.pointer == event.pointer)?;
                if let Some(pos) = event.position {
                    tracking.current = pos;
                }
                let offset = tracking.delta();
                self.hint = self.hint_for(offset);
                SwipeEffect::Drag {
                    offset,
                    rotation_deg: offset * self.config.rotation_per_px,
                    hint: self.hint,
                }
            }
            PointerPhase::End => {
                let mut tracking = self.tracking.filter(|t| t.pointer == event.pointer)?;
                if let Some(pos) = event.position {
                    tracking.current = pos;
                }
                self.tracking = None;
                self.hint = SwipeHint::Neutral;
                match self.verdict_for(tracking.delta()) {
                    Some(verdict) => {
                        self.target = None;
                        SwipeEffect::Depart(verdict)
                    }
                    None => SwipeEffect::Settle,
                }
            }
        };
        Some(SwipeStep { target, effect })
    }
}
