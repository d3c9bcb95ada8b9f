use serde::Serialize;

use crate::coords::{self, TimeMarker};
use crate::gesture::GestureMode;
use crate::models::SegmentId;
use crate::packing;
use crate::playhead;
use crate::timeline::EngineState;
use crate::utils::{format_confidence, format_duration, format_time};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisualFlags {
    pub active: bool,
    pub dragging: bool,
    pub resizing: bool,
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentLayout {
    pub id: SegmentId,
    pub label: String,
    pub display_label: String,
    pub color: String,
    pub start_time: f64,
    pub end_time: f64,
    pub left_percent: f64,
    pub width_percent: f64,
    pub row_index: usize,
    pub top_px: f64,
    pub flags: VisualFlags,
    pub duration_text: String,
    pub confidence_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLayout {
    pub row_index: usize,
    pub key: String,
    pub label: Option<String>,
    pub label_display: Option<String>,
    pub top_px: f64,
    pub segments: Vec<SegmentLayout>,
}

/// Highlighted span while a selection gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOverlay {
    pub start: f64,
    pub end: f64,
    pub left_percent: f64,
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    pub rows: Vec<RowLayout>,
    pub playhead_percent: f64,
    pub markers: Vec<TimeMarker>,
    pub selection: Option<SelectionOverlay>,
    pub content_height_px: f64,
    pub current_time_text: String,
    pub duration_text: String,
    pub zoom_level: f64,
    pub gesture_mode: GestureMode,
}

impl TimelineLayout {
    pub fn segment(&self, id: &SegmentId) -> Option<&SegmentLayout> {
        self.rows
            .iter()
            .flat_map(|row| row.segments.iter())
            .find(|s| &s.id == id)
    }

    pub fn segment_count(&self) -> usize {
        self.rows.iter().map(|row| row.segments.len()).sum()
    }
}

/// Pack the working copy and place everything on screen.
pub fn compose(state: &EngineState) -> TimelineLayout {
    let config = &state.config;
    let viewport = state.viewport;
    let duration = viewport.duration_sec;
    let row_height = config.effective_row_height();
    let header = config.header_height_px;

    let packed = packing::pack(
        &state.segments,
        &config.packing,
        &state.label_order,
        state.selected_label.as_deref(),
        duration,
    );

    let gesture = &state.gesture;
    let rows: Vec<RowLayout> = packed
        .into_iter()
        .map(|row| {
            let top_px = header + row.row_index as f64 * row_height;
            let segments = row
                .segments
                .iter()
                .map(|segment| {
                    let (left_percent, width_percent) = coords::segment_span_percent(
                        segment.start_time,
                        segment.end_time,
                        duration,
                    );
                    let targeted = gesture.targets(&segment.id);
                    let flags = VisualFlags {
                        active: state.active_segment.as_ref() == Some(&segment.id),
                        dragging: targeted && gesture.mode == GestureMode::Dragging,
                        resizing: targeted && gesture.mode.is_resizing(),
                        draft: segment.is_draft(),
                    };
                    let confidence_text = segment
                        .avg_confidence
                        .filter(|_| config.show_confidence)
                        .map(format_confidence);

                    SegmentLayout {
                        id: segment.id.clone(),
                        label: segment.label.clone(),
                        display_label: state
                            .catalog
                            .display_for(&segment.label, segment.label_display.as_deref()),
                        color: state.catalog.color(&segment.label).to_string(),
                        start_time: segment.start_time,
                        end_time: segment.end_time,
                        left_percent,
                        width_percent,
                        row_index: row.row_index,
                        top_px,
                        flags,
                        duration_text: format_duration(segment.duration_secs()),
                        confidence_text,
                    }
                })
                .collect();

            let label_display = row.label.as_deref().map(|label| {
                let store_display = row
                    .segments
                    .iter()
                    .find_map(|s| s.label_display.as_deref());
                state.catalog.display_for(label, store_display)
            });

            RowLayout {
                row_index: row.row_index,
                key: row.key,
                label: row.label,
                label_display,
                top_px,
                segments,
            }
        })
        .collect();

    let selection = (gesture.mode == GestureMode::Selecting)
        .then(|| gesture.target_segment_id.as_ref())
        .flatten()
        .and_then(|id| state.segment(id))
        .map(|draft| {
            let (left_percent, width_percent) =
                coords::segment_span_percent(draft.start_time, draft.end_time, duration);
            SelectionOverlay {
                start: draft.start_time,
                end: draft.end_time,
                left_percent,
                width_percent,
            }
        });

    let content_height_px = header + rows.len() as f64 * row_height + config.padding_px;

    TimelineLayout {
        rows,
        playhead_percent: playhead::position_for_time(state.current_time, duration),
        markers: coords::time_markers(duration, viewport.zoom_level, config.marker_interval_secs),
        selection,
        content_height_px,
        current_time_text: format_time(state.current_time),
        duration_text: format_time(duration),
        zoom_level: viewport.zoom_level,
        gesture_mode: gesture.mode,
    }
}
