use serde::Deserialize;

/// A named, finite-duration animation discovered in a loaded asset.
///
/// Clips are immutable once discovered and are shared between the handles
/// that play them through `Arc<AnimationClip>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Length in seconds.
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
        }
    }
}
