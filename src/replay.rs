//! Scripted replays: load a recorded session, feed it through a controller
//! and collect what came out.
//!
//! ```json
//! {
//!   "clock": { "currentTime": 0, "duration": 120 },
//!   "trackWidthPx": 1200,
//!   "selectionMode": false,
//!   "segments": [{ "id": 1, "label": "polyp", "startTime": 10, "endTime": 30 }],
//!   "inputs": [
//!     { "type": "pointerDown", "pointerId": 1, "xPx": 100,
//!       "target": { "kind": "segmentBody", "id": 1 } },
//!     { "type": "pointerUp", "pointerId": 1, "xPx": 340 }
//!   ]
//! }
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::models::{segment::deserialize_normalized, Segment};
use crate::timeline::{
    EngineInput, TimelineConfig, TimelineController, TimelineEvent, TimelineLayout,
};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayClock {
    #[serde(default)]
    pub current_time: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    /// Overrides the settings file when present.
    #[serde(default)]
    pub config: Option<TimelineConfig>,
    #[serde(default, deserialize_with = "deserialize_normalized")]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub clock: Option<ReplayClock>,
    #[serde(default)]
    pub track_width_px: Option<f64>,
    #[serde(default)]
    pub selection_mode: bool,
    #[serde(default)]
    pub inputs: Vec<EngineInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub events: Vec<TimelineEvent>,
    pub layout: TimelineLayout,
}

impl ReplayScript {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Invalid replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("While loading {}", path.display()))
    }

    /// Inputs that establish the starting state before the recorded ones.
    fn preamble(&self) -> Vec<EngineInput> {
        let mut inputs = Vec::new();
        if let Some(clock) = self.clock {
            inputs.push(EngineInput::SetClock {
                current_time: clock.current_time,
                duration: clock.duration,
            });
        }
        if let Some(width_px) = self.track_width_px {
            inputs.push(EngineInput::SetTrackWidth { width_px });
        }
        inputs.push(EngineInput::SetSelectionMode {
            enabled: self.selection_mode,
        });
        inputs.push(EngineInput::SetSegments {
            segments: self.segments.clone(),
        });
        inputs
    }
}

/// Run a script to completion. `fallback` is used when the script carries no config.
pub async fn replay(script: ReplayScript, fallback: TimelineConfig) -> Result<ReplayOutcome> {
    let config = script.config.clone().unwrap_or(fallback);
    let (controller, mut rx) = TimelineController::new(config);

    let preamble = script.preamble();
    info!(
        "Replaying {} inputs over {} segments",
        script.inputs.len(),
        script.segments.len()
    );

    let mut layout = controller.layout().await;
    for input in preamble.into_iter().chain(script.inputs) {
        debug!("replay input: {:?}", input);
        layout = controller.dispatch(input).await;
    }

    // a script that stops mid-gesture leaves nothing captured
    controller.teardown().await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    Ok(ReplayOutcome { events, layout })
}
