//! Translation of window events into pointer events.
//!
//! The field only understands [`PointerEvent`]s in logical pixels. [`Input`]
//! turns raw winit events into those, listening to either the cursor/mouse
//! family or the touch family depending on the host's [`InputMode`]:
//!
//! ```ignore
//! let mut input = Input::new(InputMode::Pointer, window.scale_factor());
//! if let Some(event) = input.handle_event(&window_event) {
//!     field.handle_pointer(event, clock.now());
//! }
//! ```

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, TouchPhase, WindowEvent};

use crate::environment::InputMode;

/// Pointer activity as seen by the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to a position (hover or drag).
    Move(Vec2),
    /// Button pressed or finger down at a position.
    Down(Vec2),
    /// Button released or finger lifted.
    Up,
    /// The platform aborted the gesture.
    Cancel,
    /// The pointer left the window.
    Leave,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            PointerEvent::Move(p) | PointerEvent::Down(p) => Some(*p),
            PointerEvent::Up | PointerEvent::Cancel | PointerEvent::Leave => None,
        }
    }
}

/// Stateful translator from winit events.
#[derive(Debug, Clone)]
pub struct Input {
    mode: InputMode,
    scale_factor: f64,
    // Last cursor position; mouse buttons carry none of their own.
    cursor: Option<Vec2>,
}

impl Input {
    pub fn new(mode: InputMode, scale_factor: f64) -> Self {
        Self {
            mode,
            scale_factor: if scale_factor > 0.0 { scale_factor } else { 1.0 },
            cursor: None,
        }
    }

    /// Update the physical-to-logical conversion factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Vec2 {
        Vec2::new(
            (position.x / self.scale_factor) as f32,
            (position.y / self.scale_factor) as f32,
        )
    }

    /// Translate one window event. Returns `None` for events the field
    /// does not care about, or that belong to the other input family.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match (self.mode, event) {
            (InputMode::Pointer, WindowEvent::CursorMoved { position, .. }) => {
                let p = self.to_logical(*position);
                self.cursor = Some(p);
                Some(PointerEvent::Move(p))
            }
            (InputMode::Pointer, WindowEvent::MouseInput { state, .. }) => match state {
                ElementState::Pressed => self.cursor.map(PointerEvent::Down),
                ElementState::Released => Some(PointerEvent::Up),
            },
            (InputMode::Pointer, WindowEvent::CursorLeft { .. }) => {
                self.cursor = None;
                Some(PointerEvent::Leave)
            }
            (InputMode::Touch, WindowEvent::Touch(touch)) => {
                let p = self.to_logical(touch.location);
                match touch.phase {
                    TouchPhase::Started => Some(PointerEvent::Down(p)),
                    TouchPhase::Moved => Some(PointerEvent::Move(p)),
                    TouchPhase::Ended => Some(PointerEvent::Up),
                    TouchPhase::Cancelled => Some(PointerEvent::Cancel),
                }
            }
            _ => None,
        }
    }
}
