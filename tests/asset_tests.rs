//! Asset Tests
//!
//! Tests for:
//! - Asset load-state transitions (forward only)
//! - ManifestLoader: decoding, validation, file-backed loads
//! - ViewerSettings: JSON with defaults

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use myth_viewer::assets::{Asset, LoadState, ManifestLoader};
use myth_viewer::{AnimationViewer, LoopMode, ViewerError, ViewerSettings};

// ============================================================================
// Asset Load State
// ============================================================================

#[test]
fn asset_starts_unloaded() {
    let asset = Asset::new("robot.glb");
    assert_eq!(asset.state(), &LoadState::Unloaded);
    assert_eq!(asset.source(), "robot.glb");
}

#[test]
fn asset_happy_path() {
    let mut asset = Asset::new("robot.glb");
    asset.begin_loading().unwrap();
    assert!(asset.state().is_loading());
    asset.finish_loaded().unwrap();
    assert!(asset.state().is_loaded());
}

#[test]
fn asset_error_path() {
    let mut asset = Asset::new("robot.glb");
    asset.begin_loading().unwrap();
    asset.finish_error("bad magic").unwrap();
    assert_eq!(asset.state().error(), Some("bad magic"));
}

#[test]
fn asset_rejects_backward_transitions() {
    let mut asset = Asset::new("robot.glb");
    assert!(matches!(
        asset.finish_loaded(),
        Err(ViewerError::InvalidTransition { to: "Loaded", .. })
    ));

    asset.begin_loading().unwrap();
    asset.finish_loaded().unwrap();
    assert!(asset.begin_loading().is_err());
    assert!(asset.finish_error("late").is_err());
    assert!(asset.state().is_loaded());
}

// ============================================================================
// Manifest Decoding
// ============================================================================

#[test]
fn manifest_keeps_declared_order() {
    let json = br#"{ "clips": [
        { "name": "Walk", "duration": 1.2 },
        { "name": "Idle", "duration": 2.0 }
    ] }"#;
    let asset = ManifestLoader::parse("robot.json", json).unwrap();
    let names: Vec<_> = asset.clips.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Walk", "Idle"]);
    assert_eq!(asset.source, "robot.json");
}

#[test]
fn manifest_without_clips_is_empty() {
    let asset = ManifestLoader::parse("static.json", b"{}").unwrap();
    assert!(asset.clips.is_empty());
}

#[test]
fn manifest_rejects_bad_clips() {
    let negative = br#"{ "clips": [ { "name": "Walk", "duration": -1.0 } ] }"#;
    assert!(matches!(
        ManifestLoader::parse("robot.json", negative),
        Err(ViewerError::InvalidAsset { .. })
    ));

    let unnamed = br#"{ "clips": [ { "name": "", "duration": 1.0 } ] }"#;
    assert!(matches!(
        ManifestLoader::parse("robot.json", unnamed),
        Err(ViewerError::InvalidAsset { .. })
    ));
}

#[test]
fn manifest_rejects_malformed_json() {
    assert!(matches!(
        ManifestLoader::parse("robot.json", b"{ clips: "),
        Err(ViewerError::JsonError(_))
    ));
}

// ============================================================================
// File-backed Loads
// ============================================================================

#[test]
fn manifest_file_loads_through_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{ "clips": [ {{ "name": "Idle", "duration": 2.0 }}, {{ "name": "Run", "duration": 0.8 }} ] }}"#
    )
    .unwrap();
    drop(file);

    let mut viewer = AnimationViewer::default();
    viewer.load(path.clone(), Arc::new(ManifestLoader));
    assert!(viewer.wait_for_load(Duration::from_secs(10)));

    assert_eq!(viewer.load_state(), Some(&LoadState::Loaded));
    assert_eq!(viewer.controller().names(), ["Idle", "Run"]);
}

#[test]
fn missing_manifest_file_is_error_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let mut viewer = AnimationViewer::default();
    viewer.load(path, Arc::new(ManifestLoader));
    assert!(viewer.wait_for_load(Duration::from_secs(10)));

    let error = viewer.load_state().and_then(LoadState::error).unwrap();
    assert!(error.contains("Asset not found"), "got {error}");
    assert_eq!(viewer.controller().count(), 0);
}

// ============================================================================
// Viewer Settings
// ============================================================================

#[test]
fn settings_defaults() {
    let settings = ViewerSettings::default();
    assert!(!settings.autoplay);
    assert_eq!(settings.loop_mode, LoopMode::Loop);
    assert!((settings.time_scale - 1.0).abs() < f32::EPSILON);
    assert_eq!(settings.asset, None);
}

#[test]
fn settings_partial_json_uses_defaults() {
    let settings =
        ViewerSettings::from_json(r#"{ "loop_mode": "ping_pong", "autoplay": true }"#).unwrap();
    assert_eq!(settings.loop_mode, LoopMode::PingPong);
    assert!(settings.autoplay);
    assert!((settings.max_frame_delta - 0.1).abs() < f32::EPSILON);
}

#[test]
fn settings_reject_unknown_loop_mode() {
    assert!(ViewerSettings::from_json(r#"{ "loop_mode": "bounce" }"#).is_err());
}

#[test]
fn settings_frame_duration_handles_garbage() {
    let settings = ViewerSettings {
        max_frame_delta: -1.0,
        ..Default::default()
    };
    assert_eq!(settings.max_frame_duration(), Duration::ZERO);
}
