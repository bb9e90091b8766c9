//! Utility Module
//!
//! - [`FrameClock`]: per-frame delta measurement for the render loop

pub mod time;

pub use time::FrameClock;
