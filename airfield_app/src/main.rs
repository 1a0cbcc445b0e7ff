//! Airfield viewer demo
//!
//! Drives the orchestration core over the airfield roster with headless
//! collaborators: a scripted flight of input frames, a logging device and
//! dispatcher, and an in-memory asset catalog. Run with RUST_LOG=debug
//! for per-draw logs.

mod drivers;

use airview_core::prelude::*;
use drivers::{AssetCatalog, HeadlessDevice, LoggingDispatch, ScriptedInput};
use std::path::PathBuf;

/// Fixed headless step; the demo has no vsync to pace it.
const FRAME_STEP: f32 = 1.0 / 60.0;

fn locate_data_dir() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("data"), PathBuf::from("airfield_app/data")];
    if let Some(arg) = std::env::args().nth(1) {
        candidates.insert(0, PathBuf::from(arg));
    }
    candidates
        .into_iter()
        .find(|dir| dir.join("scene.ron").is_file())
}

/// A short scripted flight: taxi forward, climb, bank left while looking
/// around, then reset the view. Exit follows once the script runs dry.
fn flight_script() -> Vec<CommandSet> {
    let mut frames = Vec::new();
    frames.extend(std::iter::repeat(CommandSet::MOVE_FORWARD).take(120));
    frames.extend(std::iter::repeat(CommandSet::MOVE_FORWARD | CommandSet::MOVE_UP).take(90));
    frames.extend(std::iter::repeat(CommandSet::TURN_LEFT).take(45));
    frames.extend(std::iter::repeat(CommandSet::MOVE_FORWARD | CommandSet::LOOK_DOWN).take(60));
    frames.push(CommandSet::RESET_VIEW);
    frames
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    airview_core::foundation::logging::init_with_level(log::LevelFilter::Info);

    log::info!("starting airfield viewer demo");

    let Some(data_dir) = locate_data_dir() else {
        log::error!("no data directory with scene.ron found (pass one as the first argument)");
        return Err("missing data directory".into());
    };

    let config = match ViewerConfig::load(data_dir.join("viewer.toml")) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("viewer config unavailable ({err}), using defaults");
            ViewerConfig::default()
        }
    };
    let manifest = SceneManifest::load(data_dir.join("scene.ron"))?;

    // The demo catalog stands in for mesh/texture parsing; any manifest
    // path missing here fails setup, as a real asset loader would.
    let mut assets = AssetCatalog::new()
        .with_model("models/terrain.txt", 2_904)
        .with_model("models/sky_dome.txt", 6_336)
        .with_model("models/airliner757.txt", 48_522)
        .with_model("models/control_tower.txt", 9_612)
        .with_model("models/airfield.txt", 17_844);

    let mut engine = Engine::initialize(
        &config,
        &manifest,
        ScriptedInput::new(flight_script()),
        HeadlessDevice::new(16.0 / 9.0),
        LoggingDispatch::new(),
        &mut assets,
    )?;

    loop {
        match engine.frame(FRAME_STEP)? {
            FrameFlow::Continue => {}
            FrameFlow::Exit => break,
        }
    }

    let pose = engine.viewpoint().pose();
    log::info!(
        "flight complete: {} draws over {} frames ({:.1}s simulated), final position ({:.2}, {:.2}, {:.2})",
        engine.dispatch().draws(),
        engine.device().frames_presented(),
        engine.clock().elapsed(),
        pose.position.x,
        pose.position.y,
        pose.position.z
    );
    Ok(())
}
