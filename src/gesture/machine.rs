use crate::coords::{self, valid_duration};
use crate::gesture::bounds;
use crate::gesture::{GestureMode, GestureState, PointerId, ResizeEdge};
use crate::models::{Segment, SegmentId};
use crate::timeline::events::{Effect, TimelineEvent};
use crate::timeline::input::PointerTarget;
use crate::timeline::EngineState;

const ENABLE_LOGS: bool = true;

/// Label given to a selection draft when no label is selected.
pub const DRAFT_LABEL: &str = "draft";

fn valid_width(width_px: f64) -> bool {
    width_px.is_finite() && width_px > 0.0
}

impl EngineState {
    pub(crate) fn pointer_down(
        &mut self,
        pointer: PointerId,
        x_px: f64,
        target: PointerTarget,
    ) -> Vec<Effect> {
        if !self.gesture.is_idle() {
            crate::log_debug!(
                "Ignoring pointer {:?} down during {:?} gesture",
                pointer,
                self.gesture.mode
            );
            return Vec::new();
        }

        match target {
            PointerTarget::SegmentBody { id } => {
                self.begin_segment_gesture(GestureMode::Dragging, id, pointer, x_px)
            }
            PointerTarget::StartHandle { id } => {
                self.begin_segment_gesture(GestureMode::ResizingStart, id, pointer, x_px)
            }
            PointerTarget::EndHandle { id } => {
                self.begin_segment_gesture(GestureMode::ResizingEnd, id, pointer, x_px)
            }
            PointerTarget::Track if self.selection_mode => self.begin_selection(pointer, x_px),
            PointerTarget::Track => self.seek_from_track(x_px),
            PointerTarget::Playhead => self.begin_scrub(pointer, x_px),
        }
    }

    fn begin_segment_gesture(
        &mut self,
        mode: GestureMode,
        id: SegmentId,
        pointer: PointerId,
        x_px: f64,
    ) -> Vec<Effect> {
        let Some(original) = self.segment(&id).map(|s| (s.start_time, s.end_time)) else {
            crate::log_debug!("Pointer down on unknown segment {}", id);
            return Vec::new();
        };

        crate::log_debug!("Starting {:?} on segment {}", mode, id);
        self.snapshot = Some(self.segments.clone());
        self.gesture = GestureState::begin(
            mode,
            Some(id),
            pointer,
            x_px,
            original,
            self.viewport.width_px,
            self.viewport.duration_sec,
        );
        self.touch();
        self.acquire(pointer)
    }

    fn begin_selection(&mut self, pointer: PointerId, x_px: f64) -> Vec<Effect> {
        let width = self.viewport.width_px;
        let duration = self.viewport.duration_sec;
        let at = coords::px_to_time(x_px, width, duration);

        let draft_id = SegmentId::new_local_draft();
        let label = self
            .selected_label
            .clone()
            .unwrap_or_else(|| DRAFT_LABEL.to_string());

        crate::log_debug!("Starting selection at {:.2}s as {}", at, draft_id);
        self.snapshot = Some(self.segments.clone());
        self.segments.push(Segment::new(draft_id.clone(), label, at, at));
        self.gesture = GestureState::begin(
            GestureMode::Selecting,
            Some(draft_id),
            pointer,
            x_px,
            (at, at),
            width,
            duration,
        );
        self.touch();
        self.acquire(pointer)
    }

    fn begin_scrub(&mut self, pointer: PointerId, x_px: f64) -> Vec<Effect> {
        if !valid_duration(self.viewport.duration_sec) {
            crate::log_debug!("Ignoring playhead drag while duration is unknown");
            return Vec::new();
        }
        let at = self.current_time;
        self.gesture = GestureState::begin(
            GestureMode::Scrubbing,
            None,
            pointer,
            x_px,
            (at, at),
            self.viewport.width_px,
            self.viewport.duration_sec,
        );
        self.acquire(pointer)
    }

    fn acquire(&mut self, pointer: PointerId) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(stale) = self.captured.take() {
            effects.push(Effect::ReleaseCapture(stale));
        }
        self.captured = Some(pointer);
        effects.push(Effect::AcquireCapture(pointer));
        effects
    }

    fn release(&mut self) -> Vec<Effect> {
        self.captured
            .take()
            .map(|pointer| vec![Effect::ReleaseCapture(pointer)])
            .unwrap_or_default()
    }

    pub(crate) fn pointer_move(&mut self, pointer: PointerId, x_px: f64) -> Vec<Effect> {
        if !self.gesture.owns(pointer) || !x_px.is_finite() {
            return Vec::new();
        }
        self.gesture.pointer_current_px = x_px;

        match self.gesture.mode {
            GestureMode::Idle => Vec::new(),
            GestureMode::Scrubbing => self.scrub_seek().into_iter().collect(),
            GestureMode::Selecting => {
                self.update_selection();
                Vec::new()
            }
            GestureMode::Dragging | GestureMode::ResizingStart | GestureMode::ResizingEnd => {
                if !self.update_target_bounds() || !self.config.emit_live_updates {
                    return Vec::new();
                }
                self.target_event(false).map(Effect::Emit).into_iter().collect()
            }
        }
    }

    pub(crate) fn pointer_up(&mut self, pointer: PointerId, x_px: f64) -> Vec<Effect> {
        if !self.gesture.owns(pointer) {
            return Vec::new();
        }
        if x_px.is_finite() {
            self.gesture.pointer_current_px = x_px;
        }

        let mut effects = Vec::new();
        match self.gesture.mode {
            GestureMode::Idle => return Vec::new(),
            GestureMode::Scrubbing => effects.extend(self.scrub_seek()),
            GestureMode::Selecting => {
                let (start, end) = self.update_selection();
                if end - start > self.config.min_selection_secs {
                    crate::log_debug!("Committing selection {:.2}..{:.2}", start, end);
                    effects.push(Effect::Emit(TimelineEvent::TimeSelection { start, end }));
                } else {
                    crate::log_debug!("Discarding selection of {:.3}s", end - start);
                    self.rollback();
                }
            }
            GestureMode::Dragging | GestureMode::ResizingStart | GestureMode::ResizingEnd => {
                self.update_target_bounds();
                match self.target_event(true) {
                    Some(event) => {
                        crate::log_debug!("Committing {}", event.name());
                        effects.push(Effect::Emit(event));
                    }
                    None => self.rollback(),
                }
            }
        }

        self.finish();
        effects.extend(self.release());
        effects
    }

    /// Abort the active gesture and restore the pre-gesture working copy.
    pub(crate) fn cancel_gesture(&mut self, reason: &str) -> Vec<Effect> {
        if self.gesture.is_idle() {
            return Vec::new();
        }
        crate::log_debug!("Cancelling {:?} gesture: {}", self.gesture.mode, reason);

        let mut effects = Vec::new();
        let restore = self.gesture.mode.is_segment_gesture() && self.config.emit_live_updates;
        self.rollback();

        if restore {
            let original = (self.gesture.original_start, self.gesture.original_end);
            if let Some(id) = self.committable_target() {
                effects.push(Effect::Emit(self.bounds_event(id, original, false)));
            }
        }

        self.finish();
        effects.extend(self.release());
        effects
    }

    /// Keep an active gesture under the pointer when the track is resized.
    /// Its pixel positions are rescaled to the new width and the target redrawn.
    pub(crate) fn rebase_gesture(&mut self, width_px: f64) {
        if self.gesture.is_idle() || !valid_width(width_px) {
            return;
        }
        let g = &mut self.gesture;
        if valid_width(g.track_width_px) {
            let scale = width_px / g.track_width_px;
            g.pointer_origin_px *= scale;
            g.pointer_current_px *= scale;
        }
        g.track_width_px = width_px;
        let mode = g.mode;
        crate::log_debug!("Rebasing {:?} gesture onto a {}px track", mode, width_px);

        match mode {
            GestureMode::Selecting => {
                self.update_selection();
            }
            GestureMode::Dragging | GestureMode::ResizingStart | GestureMode::ResizingEnd => {
                self.update_target_bounds();
            }
            GestureMode::Idle | GestureMode::Scrubbing => {}
        }
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.segments = snapshot;
        }
        self.label_order.observe(&self.segments);
        self.touch();
    }

    fn finish(&mut self) {
        self.snapshot = None;
        self.gesture = GestureState::idle();
        self.touch();
    }

    /// Recompute the target's bounds from the originals plus the total delta.
    /// Returns false when nothing could be applied.
    fn update_target_bounds(&mut self) -> bool {
        let g = &self.gesture;
        if !valid_duration(g.duration_secs) {
            return false;
        }
        let Some(id) = g.target_segment_id.clone() else {
            return false;
        };

        let delta = coords::px_delta_to_time_delta(g.delta_px(), g.track_width_px, g.duration_secs);
        let min_len = bounds::min_segment_secs(
            self.config.min_segment_px,
            self.config.min_segment_secs,
            g.track_width_px,
            g.duration_secs,
        );
        let (start, end) = (g.original_start, g.original_end);
        let next = match g.mode {
            GestureMode::Dragging => bounds::drag_bounds(start, end, delta, g.duration_secs),
            GestureMode::ResizingStart => bounds::resize_start_bounds(start, end, delta, min_len),
            GestureMode::ResizingEnd => {
                bounds::resize_end_bounds(start, end, delta, min_len, g.duration_secs)
            }
            _ => return false,
        };

        match self.segment_mut(&id) {
            Some(segment) => {
                segment.start_time = next.0;
                segment.end_time = next.1;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Stretch the draft between the pointer origin and its current position.
    fn update_selection(&mut self) -> (f64, f64) {
        let g = &self.gesture;
        let span = bounds::selection_span(
            g.pointer_origin_px,
            g.pointer_current_px,
            g.track_width_px,
            g.duration_secs,
        );
        if let Some(id) = g.target_segment_id.clone() {
            if let Some(draft) = self.segment_mut(&id) {
                draft.start_time = span.0;
                draft.end_time = span.1;
            }
        }
        self.touch();
        span
    }

    fn committable_target(&self) -> Option<SegmentId> {
        let id = self.gesture.target_segment_id.as_ref()?;
        let event = if self.gesture.mode.is_resizing() {
            "segment-resize"
        } else {
            "segment-move"
        };
        self.outward_id(id, event)
    }

    /// Move/resize event for the target's current working-copy bounds.
    fn target_event(&self, is_final: bool) -> Option<TimelineEvent> {
        let id = self.committable_target()?;
        let segment = self.segment(&id)?;
        Some(self.bounds_event(
            id.clone(),
            (segment.start_time, segment.end_time),
            is_final,
        ))
    }

    fn bounds_event(
        &self,
        id: SegmentId,
        (start_time, end_time): (f64, f64),
        is_final: bool,
    ) -> TimelineEvent {
        let edge = match self.gesture.mode {
            GestureMode::ResizingStart => Some(ResizeEdge::Start),
            GestureMode::ResizingEnd => Some(ResizeEdge::End),
            _ => None,
        };
        match edge {
            Some(edge) => TimelineEvent::SegmentResize {
                id,
                start_time,
                end_time,
                edge,
                is_final,
            },
            None => TimelineEvent::SegmentMove {
                id,
                start_time,
                end_time,
                is_final,
            },
        }
    }
}
