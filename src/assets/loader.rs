use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::animation::AnimationClip;
use crate::assets::io::{AssetReaderVariant, AssetSource};
use crate::errors::{Result, ViewerError};

/// What a successful load hands to the viewer.
///
/// The scene graph itself belongs to the renderer; the viewer only consumes
/// the clip definitions, in the order the asset declares them.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    pub source: String,
    pub clips: Vec<AnimationClip>,
}

/// Resolves an asset reference into its animation clips.
///
/// Implementations must not block the caller. The viewer may lose interest in
/// the result before it arrives; loaders do not need to handle that case.
pub trait AssetLoader: Send + Sync {
    fn load(&self, uri: &str) -> impl std::future::Future<Output = Result<LoadedAsset>> + Send;
}

// ============================================================================
// Manifest Loader
// ============================================================================

#[derive(Debug, Deserialize)]
struct ClipManifest {
    #[serde(default)]
    clips: Vec<AnimationClip>,
}

/// Loads a JSON clip manifest from disk or over HTTP.
///
/// ```json
/// { "clips": [ { "name": "Idle", "duration": 2.0 }, { "name": "Walk", "duration": 1.2 } ] }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestLoader;

impl ManifestLoader {
    /// Decodes manifest bytes. Clips keep their declared order.
    pub fn parse(source: &str, bytes: &[u8]) -> Result<LoadedAsset> {
        let manifest: ClipManifest = serde_json::from_slice(bytes)?;

        for clip in &manifest.clips {
            if clip.name.is_empty() {
                return Err(ViewerError::InvalidAsset {
                    source_uri: source.to_string(),
                    reason: "clip with empty name".to_string(),
                });
            }
            if !clip.duration.is_finite() || clip.duration < 0.0 {
                return Err(ViewerError::InvalidAsset {
                    source_uri: source.to_string(),
                    reason: format!("clip '{}' has invalid duration {}", clip.name, clip.duration),
                });
            }
        }

        Ok(LoadedAsset {
            source: source.to_string(),
            clips: manifest.clips,
        })
    }
}

impl AssetLoader for ManifestLoader {
    async fn load(&self, uri: &str) -> Result<LoadedAsset> {
        let reader = AssetReaderVariant::from_source(uri)?;
        let filename = uri
            .filename()
            .ok_or_else(|| ViewerError::AssetNotFound(uri.to_string()))?;

        let bytes = reader.read_bytes(&filename).await?;
        log::debug!("Read {} byte(s) from {uri}", bytes.len());

        Self::parse(uri, &bytes)
    }
}

// ============================================================================
// Memory Loader
// ============================================================================

/// Serves clip lists registered up front. Unknown references fail with
/// [`ViewerError::AssetNotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    assets: FxHashMap<String, Vec<AnimationClip>>,
    failures: FxHashMap<String, String>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` with clips built from `(name, duration)` pairs.
    #[must_use]
    pub fn with_clips<'a>(
        mut self,
        source: impl Into<String>,
        clips: impl IntoIterator<Item = (&'a str, f32)>,
    ) -> Self {
        let clips = clips
            .into_iter()
            .map(|(name, duration)| AnimationClip::new(name, duration))
            .collect();
        self.assets.insert(source.into(), clips);
        self
    }

    /// Makes `source` fail with `message`.
    #[must_use]
    pub fn with_failure(mut self, source: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(source.into(), message.into());
        self
    }
}

impl AssetLoader for MemoryLoader {
    async fn load(&self, uri: &str) -> Result<LoadedAsset> {
        if let Some(message) = self.failures.get(uri) {
            return Err(ViewerError::InvalidAsset {
                source_uri: uri.to_string(),
                reason: message.clone(),
            });
        }
        let clips = self
            .assets
            .get(uri)
            .cloned()
            .ok_or_else(|| ViewerError::AssetNotFound(uri.to_string()))?;
        Ok(LoadedAsset {
            source: uri.to_string(),
            clips,
        })
    }
}
