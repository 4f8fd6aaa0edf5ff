//! Time subsystem.
//!
//! Animation time advances by a fixed step per presented frame rather than by
//! wall-clock delta, so the shader drift and the physics stay in lockstep with
//! the frame count.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` once per presented frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
