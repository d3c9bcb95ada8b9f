use serde::Deserialize;

use crate::gesture::PointerId;
use crate::models::{segment::deserialize_normalized, Segment, SegmentId};
use crate::timeline::TimelineConfig;

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerTarget {
    SegmentBody { id: SegmentId },
    StartHandle { id: SegmentId },
    EndHandle { id: SegmentId },
    /// Empty timeline track.
    Track,
    Playhead,
}

/// Everything that flows into the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EngineInput {
    SetSegments {
        #[serde(deserialize_with = "deserialize_normalized")]
        segments: Vec<Segment>,
    },
    /// Playback clock as reported by the media element; may be transiently invalid.
    SetClock {
        current_time: f64,
        duration: f64,
    },
    SetCurrentTime {
        current_time: f64,
    },
    SetTrackWidth {
        width_px: f64,
    },
    SetSelectionMode {
        enabled: bool,
    },
    SetShowConfidence {
        enabled: bool,
    },
    SetActiveSegment {
        id: Option<SegmentId>,
    },
    Configure {
        config: TimelineConfig,
    },
    ZoomIn,
    ZoomOut,
    Wheel {
        delta_y: f64,
    },
    PointerDown {
        pointer_id: PointerId,
        x_px: f64,
        target: PointerTarget,
    },
    PointerMove {
        pointer_id: PointerId,
        x_px: f64,
    },
    PointerUp {
        pointer_id: PointerId,
        x_px: f64,
    },
    PointerCancel {
        pointer_id: PointerId,
    },
    /// The pointer left the interactive surface entirely.
    PointerLeave {
        pointer_id: PointerId,
    },
    /// The element backing a segment went away (e.g. list re-render).
    TargetDetached {
        id: SegmentId,
    },
    SegmentClick {
        id: SegmentId,
    },
    ContextMenu {
        id: SegmentId,
        client_x: f64,
        client_y: f64,
    },
    PlaySegment {
        id: SegmentId,
    },
    EditSegment {
        id: SegmentId,
    },
    DeleteSegment {
        id: SegmentId,
    },
    DeleteSelected,
    KeyDown {
        key: String,
        #[serde(default)]
        editable_target: bool,
    },
    PlayPause,
    /// The hosting component is going away.
    Teardown,
}
