use serde::Serialize;

use crate::gesture::{PointerId, ResizeEdge};
use crate::models::SegmentId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerInfo {
    pub client_x: f64,
    pub client_y: f64,
}

/// Everything that leaves the engine. Plain data only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum TimelineEvent {
    Seek {
        time: f64,
    },
    SegmentMove {
        id: SegmentId,
        start_time: f64,
        end_time: f64,
        is_final: bool,
    },
    SegmentResize {
        id: SegmentId,
        start_time: f64,
        end_time: f64,
        edge: ResizeEdge,
        is_final: bool,
    },
    /// Request to create a segment over `[start, end)`.
    TimeSelection {
        start: f64,
        end: f64,
    },
    SegmentSelect {
        id: SegmentId,
    },
    SegmentContextmenu {
        id: SegmentId,
        pointer: PointerInfo,
    },
    SegmentEdit {
        id: SegmentId,
    },
    SegmentDelete {
        id: SegmentId,
    },
    PlayPause,
}

impl TimelineEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimelineEvent::Seek { .. } => "seek",
            TimelineEvent::SegmentMove { .. } => "segment-move",
            TimelineEvent::SegmentResize { .. } => "segment-resize",
            TimelineEvent::TimeSelection { .. } => "time-selection",
            TimelineEvent::SegmentSelect { .. } => "segment-select",
            TimelineEvent::SegmentContextmenu { .. } => "segment-contextmenu",
            TimelineEvent::SegmentEdit { .. } => "segment-edit",
            TimelineEvent::SegmentDelete { .. } => "segment-delete",
            TimelineEvent::PlayPause => "play-pause",
        }
    }

    /// Whether this event finalises a gesture result.
    pub fn is_commit(&self) -> bool {
        match self {
            TimelineEvent::SegmentMove { is_final, .. }
            | TimelineEvent::SegmentResize { is_final, .. } => *is_final,
            TimelineEvent::TimeSelection { .. } => true,
            _ => false,
        }
    }
}

/// Side effects requested by a reducer step, applied in order by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Emit(TimelineEvent),
    AcquireCapture(PointerId),
    ReleaseCapture(PointerId),
}
