pub mod action;
pub mod clip;
pub mod controller;
pub mod mixer;
pub mod registry;
pub mod system;

pub use action::{AnimationAction, LoopMode};
pub use clip::AnimationClip;
pub use controller::{PlaybackController, PlaybackState, PlaybackStatus};
pub use mixer::{ActionHandle, AnimationMixer};
pub use registry::AnimationRegistry;
pub use system::AnimationSystem;
