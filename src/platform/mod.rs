//! Platform abstraction layer
//!
//! Browser-independent pieces of the host loop:
//! - Keyboard state
//! - Fixed timestep pacing

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{KeyCode, KeyState};
