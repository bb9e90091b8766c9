//! Animation Viewer
//!
//! Ties the load lifecycle to the playback core.
//!
//! Loads run on a background runtime and hand their result back through a
//! channel. Each load is tagged with a [`LoadTicket`]; a result is applied only
//! if its ticket is still the current one. Starting another load or calling
//! [`AnimationViewer::unload`] makes every outstanding ticket stale, and
//! dropping the viewer drops the receiving end, so late results go nowhere.
//!
//! Everything else runs on the caller's thread: transport calls and
//! [`AnimationViewer::frame`] complete before returning.

use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use flume::{Receiver, Sender};
use tokio::runtime::Runtime;

use crate::animation::{
    AnimationAction, AnimationMixer, AnimationRegistry, AnimationSystem, PlaybackController,
};
use crate::assets::{Asset, AssetLoader, AssetSource, LoadState, LoadedAsset};
use crate::errors::{Result, ViewerError};
use crate::settings::ViewerSettings;
use crate::utils::FrameClock;

fn load_runtime() -> Result<&'static Runtime> {
    static RUNTIME: OnceLock<std::io::Result<Runtime>> = OnceLock::new();
    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .thread_name("myth-viewer-loader")
                .enable_all()
                .build()
        })
        .as_ref()
        .map_err(|err| ViewerError::RuntimeError(err.to_string()))
}

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

struct LoadMessage {
    ticket: LoadTicket,
    result: Result<LoadedAsset>,
}

pub struct AnimationViewer {
    settings: ViewerSettings,
    asset: Option<Asset>,
    mixer: AnimationMixer,
    controller: PlaybackController,

    generation: u64,
    load_sender: Sender<LoadMessage>,
    load_receiver: Receiver<LoadMessage>,
}

impl Default for AnimationViewer {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl AnimationViewer {
    #[must_use]
    pub fn new(settings: ViewerSettings) -> Self {
        let (load_sender, load_receiver) = flume::unbounded();
        let mut mixer = AnimationMixer::new();
        mixer.time_scale = settings.time_scale;
        Self {
            settings,
            asset: None,
            mixer,
            controller: PlaybackController::new(),
            generation: 0,
            load_sender,
            load_receiver,
        }
    }

    // ========================================================================
    // Load lifecycle
    // ========================================================================

    /// Starts loading `source` with `loader` in the background.
    ///
    /// Supersedes any load still in flight. The result is picked up by the
    /// next [`AnimationViewer::poll_loads`] (or [`AnimationViewer::frame`]).
    pub fn load<L>(&mut self, source: impl AssetSource, loader: Arc<L>) -> LoadTicket
    where
        L: AssetLoader + 'static,
    {
        let uri = source.uri().into_owned();
        let ticket = self.begin_load(uri.as_str());

        let runtime = match load_runtime() {
            Ok(runtime) => runtime,
            Err(err) => {
                self.apply_load(ticket, Err(err));
                return ticket;
            }
        };

        let sender = self.load_sender.clone();
        runtime.spawn(async move {
            let result = loader.load(&uri).await;
            // The viewer may be gone by now
            let _ = sender.send(LoadMessage { ticket, result });
        });

        ticket
    }

    /// Loads `settings.asset`, if one is configured.
    pub fn load_configured<L>(&mut self, loader: Arc<L>) -> Option<LoadTicket>
    where
        L: AssetLoader + 'static,
    {
        let source = self.settings.asset.clone()?;
        Some(self.load(source, loader))
    }

    /// Marks a new load as in flight and returns its ticket.
    ///
    /// For callers that drive the loader future themselves; hand the outcome
    /// to [`AnimationViewer::apply_load`].
    pub fn begin_load(&mut self, source: impl AssetSource) -> LoadTicket {
        self.discard_current();
        self.generation += 1;

        let mut asset = Asset::new(source.uri());
        if let Err(err) = asset.begin_loading() {
            log::warn!("{err}");
        }
        log::info!("Loading asset: {}", asset.source());
        self.asset = Some(asset);

        LoadTicket(self.generation)
    }

    /// Applies a load result if `ticket` is still current.
    ///
    /// Returns `false` when the result was stale and dropped.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<LoadedAsset>) -> bool {
        if ticket != LoadTicket(self.generation) {
            log::debug!("Discarding stale load result {ticket:?}");
            return false;
        }
        let Some(asset) = self.asset.as_mut() else {
            log::debug!("Discarding load result {ticket:?}: no asset");
            return false;
        };
        if !asset.state().is_loading() {
            log::debug!("Discarding load result {ticket:?}: already {:?}", asset.state());
            return false;
        }

        match result {
            Ok(loaded) => {
                if let Err(err) = asset.finish_loaded() {
                    log::warn!("{err}");
                    return false;
                }
                self.install(loaded);
            }
            Err(err) => {
                log::error!("Failed to load {}: {err}", asset.source());
                if let Err(err) = asset.finish_error(err.to_string()) {
                    log::warn!("{err}");
                    return false;
                }
            }
        }
        true
    }

    /// Applies every load result that has arrived. Returns how many were
    /// applied (stale results are dropped and not counted).
    pub fn poll_loads(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.load_receiver.try_recv() {
            if self.apply_load(message.ticket, message.result) {
                applied += 1;
            }
        }
        applied
    }

    /// Blocks until the current load settles or `timeout` elapses.
    ///
    /// Returns `true` if the asset is no longer loading.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.load_state().is_some_and(LoadState::is_loading) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.load_receiver.recv_timeout(remaining) {
                Ok(message) => {
                    self.apply_load(message.ticket, message.result);
                }
                Err(_) => return false,
            }
        }
        true
    }

    /// Drops the asset and its clips. Loads still in flight become stale.
    pub fn unload(&mut self) {
        self.discard_current();
        self.generation += 1;
        self.asset = None;
    }

    fn discard_current(&mut self) {
        if self
            .asset
            .as_ref()
            .is_some_and(|asset| asset.state().is_loading())
        {
            log::debug!("Superseding in-flight load of {:?}", self.asset_source());
        }
        self.mixer.clear();
        self.controller.reset();
    }

    fn install(&mut self, loaded: LoadedAsset) {
        self.mixer.clear();
        self.mixer.time_scale = self.settings.time_scale;

        let loop_mode = self.settings.loop_mode;
        let clips: Vec<_> = loaded
            .clips
            .into_iter()
            .map(|clip| {
                let name = clip.name.clone();
                let action = AnimationAction::new(Arc::new(clip)).with_loop_mode(loop_mode);
                (name, self.mixer.add_action(action))
            })
            .collect();

        let mut registry = AnimationRegistry::new();
        if registry.load(clips) {
            log::info!("Animations found: {:?}", registry.names());
        } else {
            log::info!("Asset {} has no animations", loaded.source);
        }
        self.controller.attach(registry);

        if self.settings.autoplay {
            self.controller.play(&mut self.mixer, 0);
        }
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Per-frame entry point: picks up finished loads, then advances the
    /// running clip by `dt` seconds (clamped to `max_frame_delta`).
    pub fn frame(&mut self, dt: f32) {
        self.poll_loads();
        // `min` would turn NaN into a full capped step
        let dt = if dt.is_finite() {
            dt.min(self.settings.max_frame_delta)
        } else {
            0.0
        };
        AnimationSystem::update(&mut self.mixer, &mut self.controller, dt);
    }

    /// A frame clock clamped to `settings.max_frame_delta`.
    #[must_use]
    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::from_settings(&self.settings)
    }

    /// [`AnimationViewer::frame`] with the delta measured by `clock`.
    pub fn tick(&mut self, clock: &mut FrameClock) {
        let dt = clock.tick();
        self.frame(dt);
    }

    // ========================================================================
    // Transport
    // ========================================================================

    pub fn play(&mut self, index: usize) {
        self.controller.play(&mut self.mixer, index);
    }

    pub fn toggle_play_pause(&mut self) {
        self.controller.toggle_play_pause(&mut self.mixer);
    }

    pub fn next(&mut self) {
        self.controller.next(&mut self.mixer);
    }

    pub fn previous(&mut self) {
        self.controller.previous(&mut self.mixer);
    }

    // ========================================================================
    // Observation
    // ========================================================================

    #[must_use]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[must_use]
    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_ref()
    }

    #[must_use]
    pub fn asset_source(&self) -> Option<&str> {
        self.asset.as_ref().map(Asset::source)
    }

    #[must_use]
    pub fn load_state(&self) -> Option<&LoadState> {
        self.asset.as_ref().map(Asset::state)
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Elapsed time of the current clip, if any.
    #[must_use]
    pub fn current_time(&self) -> Option<f32> {
        let index = self.controller.current_index()?;
        let handle = self.controller.registry().handle_at(index)?;
        self.mixer.action(handle).map(|action| action.time)
    }
}
