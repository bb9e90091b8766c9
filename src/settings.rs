//! Viewer Settings
//!
//! Configuration for [`AnimationViewer`](crate::AnimationViewer).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_viewer::{AnimationViewer, ViewerSettings, LoopMode};
//!
//! // Defaults: loop clips, no autoplay, real-time speed
//! let viewer = AnimationViewer::new(ViewerSettings::default());
//!
//! // Play the first clip as soon as the asset arrives, at half speed
//! let settings = ViewerSettings {
//!     autoplay: true,
//!     time_scale: 0.5,
//!     ..Default::default()
//! };
//!
//! // Or from a JSON file shipped with the page
//! let settings = ViewerSettings::from_json(r#"{ "loop_mode": "once" }"#)?;
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::animation::LoopMode;
use crate::errors::Result;

/// Viewer configuration.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Asset to load on startup, if any.
    pub asset: Option<String>,

    /// Start clip 0 as soon as the asset is loaded.
    ///
    /// Off by default: the viewer waits for the first transport command.
    pub autoplay: bool,

    /// Loop behaviour given to every discovered clip.
    pub loop_mode: LoopMode,

    /// Global playback speed multiplier.
    pub time_scale: f32,

    /// Upper bound, in seconds, on the delta applied in a single frame.
    pub max_frame_delta: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            asset: None,
            autoplay: false,
            loop_mode: LoopMode::Loop,
            time_scale: 1.0,
            max_frame_delta: 0.1,
        }
    }
}

impl ViewerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn max_frame_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.max_frame_delta.max(0.0)).unwrap_or(Duration::MAX)
    }
}
