//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s through
//! `platform::translate_window_event`.

mod state;
mod types;

pub(crate) mod platform;

pub use state::InputState;
pub use types::{InputEvent, PointerMoveEvent};
