//! Platform abstraction layer
//!
//! Handles the frame loop's side of the simulation:
//! - Frame-rate limiting
//! - Start/Pause and quit controls

pub mod input;
pub mod time;

pub use input::{Command, SimControl};
pub use time::FrameClock;
