use crate::errors::{Result, ViewerError};

/// Where an asset is in its load lifecycle.
///
/// ```text
/// Unloaded ──▶ Loading ──▶ Loaded
///                 │
///                 └──────▶ Error(message)
/// ```
///
/// Transitions only move forward. A retry is a new [`Asset`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Error(String),
}

impl LoadState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// An asset reference together with its load state.
#[derive(Debug, Clone)]
pub struct Asset {
    source: String,
    state: LoadState,
}

impl Asset {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: LoadState::Unloaded,
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// `Unloaded -> Loading`
    pub fn begin_loading(&mut self) -> Result<()> {
        self.transition(LoadState::Unloaded, LoadState::Loading, "Loading")
    }

    /// `Loading -> Loaded`
    pub fn finish_loaded(&mut self) -> Result<()> {
        self.transition(LoadState::Loading, LoadState::Loaded, "Loaded")
    }

    /// `Loading -> Error(message)`
    pub fn finish_error(&mut self, message: impl Into<String>) -> Result<()> {
        self.transition(LoadState::Loading, LoadState::Error(message.into()), "Error")
    }

    fn transition(&mut self, expected: LoadState, next: LoadState, name: &'static str) -> Result<()> {
        if self.state != expected {
            return Err(ViewerError::InvalidTransition {
                from: self.state.clone(),
                to: name,
            });
        }
        self.state = next;
        Ok(())
    }
}
