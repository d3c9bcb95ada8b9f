use serde::{Deserialize, Serialize};

use crate::models::SegmentId;

/// Host-assigned pointer identifier (`PointerEvent.pointerId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u32);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GestureMode {
    Idle,
    Dragging,
    ResizingStart,
    ResizingEnd,
    Selecting,
    /// Dragging the playhead handle.
    Scrubbing,
}

impl Default for GestureMode {
    fn default() -> Self {
        GestureMode::Idle
    }
}

impl GestureMode {
    pub fn is_segment_gesture(&self) -> bool {
        matches!(
            self,
            GestureMode::Dragging | GestureMode::ResizingStart | GestureMode::ResizingEnd
        )
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, GestureMode::ResizingStart | GestureMode::ResizingEnd)
    }
}

/// Which boundary a resize gesture moves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResizeEdge {
    Start,
    End,
}

/// The transient interaction. Exactly one exists; `Idle` means none is active.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GestureState {
    pub mode: GestureMode,
    pub target_segment_id: Option<SegmentId>,
    pub pointer: Option<PointerId>,
    pub pointer_origin_px: f64,
    pub pointer_current_px: f64,
    pub original_start: f64,
    pub original_end: f64,
    /// Track width and duration read when the gesture began. The width is
    /// replaced, and the pointer positions rescaled, when the track resizes.
    pub track_width_px: f64,
    pub duration_secs: f64,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            mode: GestureMode::Idle,
            target_segment_id: None,
            pointer: None,
            pointer_origin_px: 0.0,
            pointer_current_px: 0.0,
            original_start: 0.0,
            original_end: 0.0,
            track_width_px: 0.0,
            duration_secs: 0.0,
        }
    }
}

impl GestureState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.mode == GestureMode::Idle
    }

    pub fn begin(
        mode: GestureMode,
        target: Option<SegmentId>,
        pointer: PointerId,
        origin_px: f64,
        original: (f64, f64),
        track_width_px: f64,
        duration_secs: f64,
    ) -> Self {
        Self {
            mode,
            target_segment_id: target,
            pointer: Some(pointer),
            pointer_origin_px: origin_px,
            pointer_current_px: origin_px,
            original_start: original.0,
            original_end: original.1,
            track_width_px,
            duration_secs,
        }
    }

    /// Whether an event from `pointer` belongs to this gesture.
    pub fn owns(&self, pointer: PointerId) -> bool {
        !self.is_idle() && self.pointer == Some(pointer)
    }

    pub fn targets(&self, id: &SegmentId) -> bool {
        self.target_segment_id.as_ref() == Some(id)
    }

    pub fn delta_px(&self) -> f64 {
        self.pointer_current_px - self.pointer_origin_px
    }
}
