//! Playback Controller Tests
//!
//! Tests for:
//! - play(): single active clip, restart from zero, out-of-range no-op
//! - next()/previous(): wrap-around in both directions
//! - toggle_play_pause(): position-preserving pause/resume, stopped-clip fallback
//! - Empty controller: every transport call is a no-op
//! - Observation helpers (label, snapshot, controls_enabled)

use std::sync::Arc;

use myth_viewer::animation::{
    ActionHandle, AnimationAction, AnimationClip, AnimationMixer, AnimationRegistry,
    AnimationSystem, LoopMode, PlaybackController, PlaybackState, PlaybackStatus,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

struct Fixture {
    mixer: AnimationMixer,
    controller: PlaybackController,
    handles: Vec<ActionHandle>,
}

impl Fixture {
    fn new(names: &[&str]) -> Self {
        Self::with_loop_mode(names, LoopMode::Loop)
    }

    fn with_loop_mode(names: &[&str], loop_mode: LoopMode) -> Self {
        let mut mixer = AnimationMixer::new();
        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let clip = Arc::new(AnimationClip::new(*name, 2.0));
                mixer.add_action(AnimationAction::new(clip).with_loop_mode(loop_mode))
            })
            .collect();

        let mut registry = AnimationRegistry::new();
        registry.load(
            names
                .iter()
                .map(|name| name.to_string())
                .zip(handles.iter().copied()),
        );

        let mut controller = PlaybackController::new();
        controller.attach(registry);
        Self {
            mixer,
            controller,
            handles,
        }
    }

    fn running(&self) -> Vec<usize> {
        self.handles
            .iter()
            .enumerate()
            .filter(|(_, h)| self.mixer.action(**h).unwrap().is_running())
            .map(|(i, _)| i)
            .collect()
    }

    fn active_count(&self) -> usize {
        self.handles
            .iter()
            .filter(|h| self.mixer.action(**h).unwrap().is_active())
            .count()
    }

    fn time(&self, index: usize) -> f32 {
        self.mixer.action(self.handles[index]).unwrap().time
    }

    fn frame(&mut self, dt: f32) {
        AnimationSystem::update(&mut self.mixer, &mut self.controller, dt);
    }

    fn state(&self) -> PlaybackState {
        self.controller.snapshot()
    }
}

fn state(index: usize, is_playing: bool) -> PlaybackState {
    PlaybackState {
        current_index: Some(index),
        is_playing,
    }
}

// ============================================================================
// play()
// ============================================================================

#[test]
fn play_runs_exactly_the_selected_clip() {
    let mut f = Fixture::new(&["Idle", "Walk", "Run"]);
    for i in [0, 2, 1, 1, 0] {
        f.controller.play(&mut f.mixer, i);
        assert_eq!(f.running(), vec![i]);
        assert_eq!(f.active_count(), 1);
        assert_eq!(f.state(), state(i, true));
    }
}

#[test]
fn play_stops_previous_clip() {
    let mut f = Fixture::new(&["Idle", "Walk"]);
    f.controller.play(&mut f.mixer, 0);
    f.frame(0.5);
    f.controller.play(&mut f.mixer, 1);

    assert_eq!(f.running(), vec![1]);
    assert!(approx(f.time(0), 0.0), "stopped clip should be rewound");
    f.frame(0.5);
    assert_eq!(f.running(), vec![1]);
}

#[test]
fn play_stops_paused_clip_too() {
    let mut f = Fixture::new(&["Idle", "Walk"]);
    f.controller.play(&mut f.mixer, 0);
    f.controller.toggle_play_pause(&mut f.mixer);
    f.controller.play(&mut f.mixer, 1);

    assert_eq!(f.active_count(), 1);
    assert_eq!(f.running(), vec![1]);
}

#[test]
fn play_same_index_restarts_from_zero() {
    let mut f = Fixture::new(&["Idle", "Walk"]);
    f.controller.play(&mut f.mixer, 1);
    f.frame(0.8);
    assert!(approx(f.time(1), 0.8));

    f.controller.play(&mut f.mixer, 1);
    assert!(approx(f.time(1), 0.0));
    assert_eq!(f.state(), state(1, true));
}

#[test]
fn play_out_of_range_is_noop() {
    let mut f = Fixture::new(&["Idle", "Walk"]);
    f.controller.play(&mut f.mixer, 1);
    f.frame(0.3);

    f.controller.play(&mut f.mixer, 2);
    f.controller.play(&mut f.mixer, usize::MAX);

    assert_eq!(f.state(), state(1, true));
    assert_eq!(f.running(), vec![1]);
    assert!(approx(f.time(1), 0.3));
}

// ============================================================================
// next() / previous()
// ============================================================================

#[test]
fn next_wraps_to_first() {
    let mut f = Fixture::new(&["Idle", "Walk", "Run"]);
    f.controller.play(&mut f.mixer, 2);
    f.controller.next(&mut f.mixer);
    assert_eq!(f.state(), state(0, true));
    assert_eq!(f.running(), vec![0]);
}

#[test]
fn previous_wraps_to_last() {
    let mut f = Fixture::new(&["Idle", "Walk", "Run"]);
    f.controller.play(&mut f.mixer, 0);
    f.controller.previous(&mut f.mixer);
    assert_eq!(f.state(), state(2, true));
    assert_eq!(f.running(), vec![2]);
}

#[test]
fn next_from_ready_plays_second_clip() {
    let mut f = Fixture::new(&["Idle", "Walk", "Run"]);
    assert_eq!(f.controller.status(), PlaybackStatus::Ready);
    f.controller.next(&mut f.mixer);
    assert_eq!(f.state(), state(1, true));
}

#[test]
fn next_restarts_new_clip() {
    let mut f = Fixture::new(&["Idle", "Walk"]);
    f.controller.play(&mut f.mixer, 1);
    f.frame(0.4);
    f.controller.next(&mut f.mixer);
    f.controller.next(&mut f.mixer);
    assert_eq!(f.state(), state(1, true));
    assert!(approx(f.time(1), 0.0));
}

#[test]
fn single_clip_next_and_previous_stay_put() {
    let mut f = Fixture::new(&["Idle"]);
    f.controller.next(&mut f.mixer);
    assert_eq!(f.state(), state(0, true));
    f.controller.previous(&mut f.mixer);
    assert_eq!(f.state(), state(0, true));
    assert_eq!(f.running(), vec![0]);
}

// ============================================================================
// toggle_play_pause()
// ============================================================================

#[test]
fn toggle_twice_restores_state_and_keeps_time() {
    let mut f = Fixture::new(&["Idle", "Walk"]);
    f.controller.play(&mut f.mixer, 1);
    f.frame(0.7);

    f.controller.toggle_play_pause(&mut f.mixer);
    assert_eq!(f.state(), state(1, false));
    assert!(f.running().is_empty());
    f.frame(0.5);
    assert!(approx(f.time(1), 0.7), "paused clip must not advance");

    f.controller.toggle_play_pause(&mut f.mixer);
    assert_eq!(f.state(), state(1, true));
    assert!(approx(f.time(1), 0.7), "resume must not rewind");
    f.frame(0.1);
    assert!(approx(f.time(1), 0.8));
}

#[test]
fn toggle_from_ready_starts_current_clip() {
    let mut f = Fixture::new(&["Idle", "Walk"]);
    f.controller.toggle_play_pause(&mut f.mixer);
    assert_eq!(f.state(), state(0, true));
    assert_eq!(f.running(), vec![0]);
}

#[test]
fn toggle_restarts_finished_clip() {
    let mut f = Fixture::with_loop_mode(&["Wave"], LoopMode::Once);
    f.controller.play(&mut f.mixer, 0);
    f.frame(1.5);
    f.frame(1.5);
    assert_eq!(f.state(), state(0, false));
    assert!(approx(f.time(0), 2.0));

    f.controller.toggle_play_pause(&mut f.mixer);
    assert_eq!(f.state(), state(0, true));
    assert!(approx(f.time(0), 0.0), "finished clip restarts from zero");
    assert_eq!(f.running(), vec![0]);
}

#[test]
fn toggle_on_paused_finished_clip_restarts() {
    let mut f = Fixture::with_loop_mode(&["Wave"], LoopMode::Once);
    f.controller.play(&mut f.mixer, 0);
    // Finishes inside the frame; the controller has not reconciled yet
    f.mixer.update(5.0);
    assert!(f.controller.is_playing());

    f.controller.toggle_play_pause(&mut f.mixer);
    assert_eq!(f.state(), state(0, false));
    f.controller.toggle_play_pause(&mut f.mixer);
    assert_eq!(f.state(), state(0, true));
    assert!(f.mixer.action(f.handles[0]).unwrap().is_running());
}

// ============================================================================
// Empty controller
// ============================================================================

#[test]
fn empty_controller_transport_is_noop() {
    let mut mixer = AnimationMixer::new();
    let mut controller = PlaybackController::new();
    let before = controller.snapshot();

    controller.play(&mut mixer, 0);
    controller.next(&mut mixer);
    controller.previous(&mut mixer);
    controller.toggle_play_pause(&mut mixer);
    AnimationSystem::update(&mut mixer, &mut controller, 0.016);

    assert_eq!(controller.snapshot(), before);
    assert_eq!(before.current_index, None);
    assert!(!controller.is_playing());
    assert_eq!(controller.status(), PlaybackStatus::Idle);
    assert!(!controller.controls_enabled());
}

#[test]
fn attaching_empty_registry_stays_idle() {
    let mut mixer = AnimationMixer::new();
    let mut controller = PlaybackController::new();
    controller.attach(AnimationRegistry::new());
    controller.toggle_play_pause(&mut mixer);
    assert_eq!(controller.status(), PlaybackStatus::Idle);
    assert_eq!(controller.count(), 0);
}

// ============================================================================
// Observation
// ============================================================================

#[test]
fn label_and_names() {
    let mut f = Fixture::new(&["Idle", "Walk", "Run"]);
    assert_eq!(f.controller.label(), "Animation: (1/3)");
    f.controller.previous(&mut f.mixer);
    assert_eq!(f.controller.label(), "Animation: (3/3)");
    assert_eq!(f.controller.current_name(), Some("Run"));
    assert_eq!(f.controller.names(), ["Idle", "Walk", "Run"]);
    assert!(f.controller.controls_enabled());
}

#[test]
fn three_clip_walkthrough() {
    let mut f = Fixture::new(&["Idle", "Walk", "Run"]);

    f.controller.play(&mut f.mixer, 0);
    assert_eq!(f.state(), state(0, true));
    f.controller.next(&mut f.mixer);
    assert_eq!(f.state(), state(1, true));
    f.controller.previous(&mut f.mixer);
    assert_eq!(f.state(), state(0, true));
    f.controller.previous(&mut f.mixer);
    assert_eq!(f.state(), state(2, true));

    f.frame(0.6);
    f.controller.toggle_play_pause(&mut f.mixer);
    assert_eq!(f.state(), state(2, false));
    f.frame(0.6);
    assert!(approx(f.time(2), 0.6), "Run keeps its paused position");
}
