//! # Myth Viewer
//!
//! Animation playback core for interactive model viewers.
//!
//! An asset is loaded asynchronously, its named clips are collected into an
//! [`AnimationRegistry`], and a [`PlaybackController`] exposes the transport
//! operations (play, pause/resume, next, previous) on top of them. The render
//! loop calls [`AnimationViewer::frame`] once per frame to advance the running
//! clip and keep the controller's view of it current.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use myth_viewer::{AnimationViewer, ManifestLoader, ViewerSettings};
//!
//! let mut viewer = AnimationViewer::new(ViewerSettings::default());
//! viewer.load("models/animated/robot.json", Arc::new(ManifestLoader));
//!
//! // each frame
//! viewer.frame(dt);
//!
//! // UI
//! viewer.next();
//! viewer.toggle_play_pause();
//! println!("{}", viewer.controller().label());
//! ```

pub mod animation;
pub mod assets;
pub mod errors;
pub mod settings;
pub mod utils;
pub mod viewer;

pub use animation::{
    ActionHandle, AnimationAction, AnimationClip, AnimationMixer, AnimationRegistry,
    AnimationSystem, LoopMode, PlaybackController, PlaybackState, PlaybackStatus,
};
pub use assets::{Asset, AssetLoader, AssetSource, LoadState, LoadedAsset, ManifestLoader, MemoryLoader};
pub use errors::{Result, ViewerError};
pub use settings::ViewerSettings;
pub use utils::FrameClock;
pub use viewer::{AnimationViewer, LoadTicket};
