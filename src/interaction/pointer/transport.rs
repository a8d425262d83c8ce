//! Mouse and touch input normalized into one `PointerEvent` stream.
use bevy::prelude::*;
use smallvec::SmallVec;

/// Which physical pointer produced an event. Touches keep their platform id so
/// a second finger never hijacks the tracked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// Common event shape consumed by the swipe recognizer. Positions are window
/// logical pixels, y grows downward.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    /// `None` only when a mouse button is released outside the window.
    pub position: Option<Vec2>,
}

impl PointerEvent {
    pub fn new(pointer: PointerId, phase: PointerPhase, position: Vec2) -> Self {
        Self {
            pointer,
            phase,
            position: Some(position),
        }
    }
}

pub type PointerBatch = SmallVec<[PointerEvent; 4]>;

/// An input device adapted to [`PointerEvent`]s for the current frame.
pub trait PointerTransport {
    fn pointer_events(&self) -> PointerBatch;
}

/// Left mouse button plus the window cursor.
pub struct MouseTransport<'a> {
    pub buttons: &'a ButtonInput<MouseButton>,
    pub cursor: Option<Vec2>,
}

impl PointerTransport for MouseTransport<'_> {
    fn pointer_events(&self) -> PointerBatch {
        let mut out = PointerBatch::new();
        let button = MouseButton::Left;
        if self.buttons.just_pressed(button) {
            if let Some(pos) = self.cursor {
                out.push(PointerEvent::new(PointerId::Mouse, PointerPhase::Start, pos));
            }
        } else if self.buttons.pressed(button) {
            if let Some(pos) = self.cursor {
                out.push(PointerEvent::new(PointerId::Mouse, PointerPhase::Move, pos));
            }
        }
        if self.buttons.just_released(button) {
            out.push(PointerEvent {
                pointer: PointerId::Mouse,
                phase: PointerPhase::End,
                position: self.cursor,
            });
        }
        out
    }
}

/// Every active touch; cancelled touches end like released ones.
pub struct TouchTransport<'a> {
    pub touches: &'a Touches,
}

impl PointerTransport for TouchTransport<'_> {
    fn pointer_events(&self) -> PointerBatch {
        let mut out = PointerBatch::new();
        for t in self.touches.iter_just_pressed() {
            out.push(PointerEvent::new(PointerId::Touch(t.id()), PointerPhase::Start, t.position()));
        }
        for t in self.touches.iter() {
            if self.touches.just_pressed(t.id()) || t.delta() == Vec2::ZERO {
                continue;
            }
            out.push(PointerEvent::new(PointerId::Touch(t.id()), PointerPhase::Move, t.position()));
        }
        for t in self
            .touches
            .iter_just_released()
            .chain(self.touches.iter_just_canceled())
        {
            out.push(PointerEvent::new(PointerId::Touch(t.id()), PointerPhase::End, t.position()));
        }
        out
    }
}

pub fn collect_pointer_events(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    mut out: EventWriter<PointerEvent>,
) {
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());
    let touch = TouchTransport { touches: &touches };
    let mouse = MouseTransport {
        buttons: &buttons,
        cursor,
    };
    for ev in touch.pointer_events().into_iter().chain(mouse.pointer_events()) {
        out.write(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_press_drag_release() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        let ev = MouseTransport {
            buttons: &buttons,
            cursor: Some(Vec2::new(10.0, 20.0)),
        }
        .pointer_events();
        assert_eq!(
            ev.as_slice(),
            &[PointerEvent::new(PointerId::Mouse, PointerPhase::Start, Vec2::new(10.0, 20.0))]
        );

        buttons.clear();
        let ev = MouseTransport {
            buttons: &buttons,
            cursor: Some(Vec2::new(10.0, 80.0)),
        }
        .pointer_events();
        assert_eq!(ev[0].phase, PointerPhase::Move);

        buttons.release(MouseButton::Left);
        let ev = MouseTransport {
            buttons: &buttons,
            cursor: None,
        }
        .pointer_events();
        assert_eq!(
            ev.as_slice(),
            &[PointerEvent {
                pointer: PointerId::Mouse,
                phase: PointerPhase::End,
                position: None
            }]
        );
    }

    #[test]
    fn mouse_press_outside_window_is_dropped() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        let ev = MouseTransport {
            buttons: &buttons,
            cursor: None,
        }
        .pointer_events();
        assert!(ev.is_empty());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Right);
        let ev = MouseTransport {
            buttons: &buttons,
            cursor: Some(Vec2::ZERO),
        }
        .pointer_events();
        assert!(ev.is_empty());
    }
}
