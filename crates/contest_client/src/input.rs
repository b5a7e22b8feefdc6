//! Pointer and touch input folded into board gestures.
//!
//! Mouse and touch follow the same rules: a primary button press or the
//! end of a touch confirms, the secondary button cancels, and everything
//! else just moves the hover position.

use contest_games::Point;

/// Mouse buttons the boards care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button.
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Middle,
}

/// Raw pointer input on the board surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved, no button change.
    MouseMoved(Point),
    /// A button went down.
    MouseDown {
        /// Pointer position.
        at: Point,
        /// Pressed button.
        button: PointerButton,
    },
    /// A button went up.
    MouseUp(Point),
    /// A finger touched the surface.
    TouchStart(Point),
    /// The finger moved.
    TouchMove(Point),
    /// The finger lifted.
    TouchEnd,
    /// The platform aborted the touch.
    TouchCancel,
}

/// What the board does with input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Highlight whatever lies under the point.
    Hover(Point),
    /// Pick whatever lies under the point.
    Confirm(Point),
    /// Drop the current selection.
    Cancel,
}

/// Tracks touch state between events.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    touch: Option<Point>,
}

impl InputTracker {
    /// Creates a tracker with no touch in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into at most one gesture.
    pub fn process(&mut self, event: PointerEvent) -> Option<Gesture> {
        match event {
            PointerEvent::MouseMoved(at) | PointerEvent::MouseUp(at) => Some(Gesture::Hover(at)),
            PointerEvent::MouseDown { at, button } => match button {
                PointerButton::Primary => Some(Gesture::Confirm(at)),
                PointerButton::Secondary => Some(Gesture::Cancel),
                PointerButton::Middle => None,
            },
            PointerEvent::TouchStart(at) | PointerEvent::TouchMove(at) => {
                self.touch = Some(at);
                Some(Gesture::Hover(at))
            }
            PointerEvent::TouchEnd => self.touch.take().map(Gesture::Confirm),
            PointerEvent::TouchCancel => {
                self.touch = None;
                None
            }
        }
    }

    /// Position of the finger while a touch is in progress.
    pub fn touch(&self) -> Option<Point> {
        self.touch
    }
}
