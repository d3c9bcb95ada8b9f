pub mod coords;
pub mod gesture;
pub mod models;
pub mod packing;
pub mod playhead;
pub mod replay;
pub mod settings;
pub mod timeline;
pub mod utils;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use log::info;

pub use models::{Segment, SegmentId};
pub use replay::{replay, ReplayOutcome, ReplayScript};
pub use settings::SettingsStore;
pub use timeline::{
    compose, reduce, EngineInput, EngineState, TimelineConfig, TimelineController, TimelineEvent,
    TimelineLayout, TimelineSession,
};

/// Arguments of the `segline` binary.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub script: PathBuf,
}

/// Replay a script and print each emitted event as a JSON line, then the
/// final layout.
pub async fn run(options: RunOptions) -> Result<()> {
    utils::logging::init();

    info!("segline starting up...");

    let config = match &options.config_path {
        Some(path) => SettingsStore::new(path.clone())?.timeline(),
        None => TimelineConfig::default(),
    };

    let script = ReplayScript::load(&options.script)?;
    let outcome = replay(script, config).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in &outcome.events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&outcome.layout)?)?;
    Ok(())
}
