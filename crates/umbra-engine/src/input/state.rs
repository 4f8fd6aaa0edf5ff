use crate::coords::Vec2;

use super::types::{InputEvent, PointerMoveEvent};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels while the pointer is over the window.
    pub pointer_pos: Option<Vec2>,

    /// Last pointer position ever reported. Survives `PointerLeft`.
    pub last_pointer_pos: Option<Vec2>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let p = Vec2::new(x, y);
                self.pointer_pos = Some(p);
                self.last_pointer_pos = Some(p);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }
        }
    }
}
