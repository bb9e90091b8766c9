//! Playback Controller
//!
//! The transport state machine behind the viewer's play / pause / next /
//! previous buttons.
//!
//! ```text
//!            registry loaded (count > 0)
//!   Idle ───────────────────────────────▶ Ready
//!                                           │ play(i) / next / previous / toggle
//!                                           ▼
//!                                        Playing(i) ◀──── toggle ────┐
//!                                           │                        │
//!                                           └──── toggle / finish ──▶ Paused(i)
//! ```
//!
//! The controller never owns clip handles. It keeps the
//! [`AnimationRegistry`] that maps indices to [`ActionHandle`]s and issues
//! commands to the [`AnimationMixer`] passed into each call.
//!
//! # Guarantees
//!
//! - At most one action in the mixer is scheduled after any transport call.
//!   Every scheduled action is stopped *before* the target is started.
//! - With clips loaded, `current_index` stays in `0..count`.
//! - Every transport call is safe at any time. Without clips, or with an
//!   out-of-range index, it is a no-op.

use crate::animation::mixer::{ActionHandle, AnimationMixer};
use crate::animation::registry::AnimationRegistry;

const NO_ANIMATIONS_LABEL: &str = "No animations available";

/// Coarse transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No clips known.
    #[default]
    Idle,
    /// Clips known, nothing started yet.
    Ready,
    Playing,
    Paused,
}

/// Read-only snapshot handed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// `None` while no clips are known.
    pub current_index: Option<usize>,
    pub is_playing: bool,
}

#[derive(Debug, Default)]
pub struct PlaybackController {
    registry: AnimationRegistry,
    status: PlaybackStatus,
    current_index: usize,
}

impl PlaybackController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes over a freshly loaded registry.
    ///
    /// A non-empty registry moves the controller to `Ready` at index 0. An
    /// empty one leaves it `Idle`, where every transport call is a no-op.
    pub fn attach(&mut self, registry: AnimationRegistry) {
        self.registry = registry;
        self.current_index = 0;
        self.status = if self.registry.is_empty() {
            PlaybackStatus::Idle
        } else {
            PlaybackStatus::Ready
        };
        log::debug!(
            "Playback controller attached with {} clip(s)",
            self.registry.count()
        );
    }

    /// Drops the registry and returns to `Idle`.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.status = PlaybackStatus::Idle;
        self.current_index = 0;
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Jumps to clip `index` and plays it from the start.
    ///
    /// Playing the clip that is already playing restarts it.
    pub fn play(&mut self, mixer: &mut AnimationMixer, index: usize) {
        let Some(handle) = self.registry.handle_at(index) else {
            log::debug!(
                "play({index}) ignored: {} clip(s) available",
                self.registry.count()
            );
            return;
        };
        if !Self::restart(mixer, handle) {
            return;
        }

        self.current_index = index;
        self.status = PlaybackStatus::Playing;
        log::info!("Playing animation: {}", self.registry.names()[index]);
    }

    /// Pauses the current clip, or resumes it where it was paused.
    ///
    /// Resuming a clip that is no longer scheduled (it ran to the end, or was
    /// never started) restarts it from zero instead.
    pub fn toggle_play_pause(&mut self, mixer: &mut AnimationMixer) {
        if self.status == PlaybackStatus::Idle {
            return;
        }
        let Some(handle) = self.registry.handle_at(self.current_index) else {
            return;
        };
        let Some(action) = mixer.action_mut(handle) else {
            log::warn!("Animation handle for index {} is gone", self.current_index);
            return;
        };

        if self.status == PlaybackStatus::Playing {
            action.pause();
            self.status = PlaybackStatus::Paused;
            log::debug!("Animation paused");
            return;
        }

        action.resume();
        let still_scheduled = action.is_active();
        if !still_scheduled && !Self::restart(mixer, handle) {
            return;
        }
        self.status = PlaybackStatus::Playing;
        log::debug!("Animation resumed/started");
    }

    /// Plays the following clip, wrapping from the last to the first.
    pub fn next(&mut self, mixer: &mut AnimationMixer) {
        let count = self.registry.count();
        if count == 0 {
            return;
        }
        self.play(mixer, (self.current_index + 1) % count);
    }

    /// Plays the preceding clip, wrapping from the first to the last.
    pub fn previous(&mut self, mixer: &mut AnimationMixer) {
        let count = self.registry.count();
        if count == 0 {
            return;
        }
        self.play(mixer, (self.current_index + count - 1) % count);
    }

    /// Brings `is_playing` back in line with the mixer.
    ///
    /// A clip that ran to its end and dropped out of the schedule leaves the
    /// controller `Paused` on that clip.
    pub fn reconcile(&mut self, mixer: &AnimationMixer) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        let finished = self
            .registry
            .handle_at(self.current_index)
            .and_then(|handle| mixer.action(handle))
            .is_none_or(|action| !action.is_active());

        if finished {
            self.status = PlaybackStatus::Paused;
            log::debug!(
                "Animation finished: {}",
                self.current_name().unwrap_or_default()
            );
        }
    }

    /// Stops everything that is scheduled, then rewinds and starts `handle`.
    fn restart(mixer: &mut AnimationMixer, handle: ActionHandle) -> bool {
        if mixer.action(handle).is_none() {
            log::warn!("Animation handle {handle:?} is not owned by the mixer");
            return false;
        }
        mixer.stop_all();
        if let Some(action) = mixer.action_mut(handle) {
            action.reset();
            action.play();
        }
        true
    }

    // ========================================================================
    // Observation
    // ========================================================================

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (!self.registry.is_empty()).then_some(self.current_index)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        self.registry.names()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.registry.count()
    }

    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        self.registry.name_at(self.current_index)
    }

    #[must_use]
    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    /// Whether transport buttons should be enabled.
    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        !self.registry.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_index: self.current_index(),
            is_playing: self.is_playing(),
        }
    }

    /// Display string such as `Animation: (2/3)`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.current_index() {
            Some(index) => format!("Animation: ({}/{})", index + 1, self.count()),
            None => NO_ANIMATIONS_LABEL.to_string(),
        }
    }
}
