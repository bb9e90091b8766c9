//! Headless viewer driver.
//!
//! Loads a clip manifest and drives the transport from stdin:
//!
//! ```text
//! cargo run --example viewer_cli -- [manifest | -] [settings.json]
//! > play 2 | toggle | next | prev | tick 250 | live 1000 | state | quit
//! ```
//!
//! `tick` feeds fixed 16ms steps; `live` runs the frame loop against the
//! wall clock for the given number of milliseconds.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use myth_viewer::{AnimationViewer, LoadState, ManifestLoader, ViewerSettings};

const DEFAULT_ASSET: &str = "demos/assets/robot.json";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let source = args.next().filter(|s| s != "-");

    let mut settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file {path}"))?;
            ViewerSettings::from_json(&json)?
        }
        None => ViewerSettings::default(),
    };
    if settings.asset.is_none() {
        settings.asset = Some(DEFAULT_ASSET.to_string());
    }

    let mut viewer = AnimationViewer::new(settings);
    let loader = Arc::new(ManifestLoader);
    match source {
        Some(source) => {
            viewer.load(source, loader);
        }
        None => {
            viewer.load_configured(loader);
        }
    }
    let source = viewer.asset_source().unwrap_or_default().to_string();

    if !viewer.wait_for_load(Duration::from_secs(30)) {
        bail!("Timed out loading {source}");
    }
    if let Some(LoadState::Error(message)) = viewer.load_state() {
        bail!("Failed to load {source}: {message}");
    }

    println!("Available animations:");
    for name in viewer.controller().names() {
        println!("  - {name}");
    }
    print_state(&viewer);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("play"), Some(index)) => match index.parse() {
                Ok(index) => viewer.play(index),
                Err(_) => println!("not an index: {index}"),
            },
            (Some("toggle" | "p"), _) => viewer.toggle_play_pause(),
            (Some("next" | "n"), _) => viewer.next(),
            (Some("prev" | "previous"), _) => viewer.previous(),
            (Some("tick"), ms) => {
                let ms: u64 = ms.and_then(|ms| ms.parse().ok()).unwrap_or(16);
                // Feed the frame loop in 16ms steps like a 60Hz display would
                let mut remaining = ms;
                while remaining > 0 {
                    let step = remaining.min(16);
                    viewer.frame(step as f32 / 1000.0);
                    remaining -= step;
                }
            }
            (Some("live"), ms) => {
                let ms: u64 = ms.and_then(|ms| ms.parse().ok()).unwrap_or(1000);
                let until = Instant::now() + Duration::from_millis(ms);
                let mut clock = viewer.frame_clock();
                while Instant::now() < until {
                    std::thread::sleep(Duration::from_millis(16));
                    viewer.tick(&mut clock);
                }
                log::debug!("Ran {} live frames", clock.frame_count);
            }
            (Some("state"), _) => {}
            (Some("quit" | "q"), _) => break,
            (None, _) => continue,
            (Some(other), _) => println!("unknown command: {other}"),
        }
        print_state(&viewer);
        stdout.flush()?;
    }

    Ok(())
}

fn print_state(viewer: &AnimationViewer) {
    let controller = viewer.controller();
    println!(
        "{} [{}] {} t={:.3}s",
        controller.label(),
        if controller.is_playing() { "playing" } else { "paused" },
        controller.current_name().unwrap_or("-"),
        viewer.current_time().unwrap_or(0.0),
    );
}
