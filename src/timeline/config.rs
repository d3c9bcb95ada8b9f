use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::packing::PackingConfig;

/// Rows are never rendered shorter than this.
pub const MIN_ROW_HEIGHT_PX: f64 = 45.0;

/// Timeline behaviour and layout constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineConfig {
    pub packing: PackingConfig,

    /// Selections this short or shorter are treated as a stray click
    pub min_selection_secs: f64,

    /// Resize floor expressed in pixels at the current track width
    pub min_segment_px: f64,

    /// Resize floor in seconds, applies when the pixel floor is smaller
    pub min_segment_secs: f64,

    pub row_height_px: f64,
    pub header_height_px: f64,
    pub padding_px: f64,

    /// Ruler tick spacing at zoom 1
    pub marker_interval_secs: f64,

    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,

    /// Emit non-final move/resize events on every pointer move
    pub emit_live_updates: bool,

    pub show_confidence: bool,

    /// Label key → display name, layered over the built-in names
    pub label_translations: HashMap<String, String>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            packing: PackingConfig::default(),
            min_selection_secs: 0.1,
            min_segment_px: 10.0,
            min_segment_secs: 0.1,
            row_height_px: 56.0,
            header_height_px: 36.0,
            padding_px: 12.0,
            marker_interval_secs: 10.0,
            min_zoom: 1.0,
            max_zoom: 5.0,
            zoom_step: 0.5,
            emit_live_updates: false,
            show_confidence: true,
            label_translations: HashMap::new(),
        }
    }
}

impl TimelineConfig {
    pub fn effective_row_height(&self) -> f64 {
        if self.row_height_px.is_finite() {
            self.row_height_px.max(MIN_ROW_HEIGHT_PX)
        } else {
            MIN_ROW_HEIGHT_PX
        }
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let min = self.min_zoom.max(1.0);
        let max = self.max_zoom.max(min);
        if zoom.is_finite() {
            zoom.clamp(min, max)
        } else {
            min
        }
    }
}
