use serde::Serialize;

use crate::gesture::{GestureMode, GestureState, PointerId};
use crate::models::{LabelCatalog, Segment, SegmentId};
use crate::packing::LabelOrder;
use crate::timeline::{
    events::{Effect, PointerInfo, TimelineEvent},
    input::EngineInput,
    TimelineConfig,
};

const ENABLE_LOGS: bool = true;

/// Rendering context. Not domain state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width_px: f64,
    pub duration_sec: f64,
    /// ≥ 1; multiplies ruler density, does not change the time→% mapping.
    pub zoom_level: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: 0.0,
            duration_sec: 0.0,
            zoom_level: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineState {
    pub(crate) config: TimelineConfig,
    pub(crate) catalog: LabelCatalog,
    /// Working copy: external segments plus in-flight gesture edits.
    pub(crate) segments: Vec<Segment>,
    /// Working copy as it was when the active gesture began.
    pub(crate) snapshot: Option<Vec<Segment>>,
    pub(crate) gesture: GestureState,
    pub(crate) captured: Option<PointerId>,
    pub(crate) current_time: f64,
    pub(crate) viewport: Viewport,
    pub(crate) selection_mode: bool,
    pub(crate) selected_label: Option<String>,
    pub(crate) active_segment: Option<SegmentId>,
    pub(crate) label_order: LabelOrder,
    /// Bumped whenever anything the layout depends on changes.
    pub(crate) revision: u64,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

/// Result of one reducer step.
#[derive(Debug)]
pub struct Reduced {
    pub state: EngineState,
    pub effects: Vec<Effect>,
}

/// Pure transition: consume a state and an input, return the next state and
/// the effects the host must carry out.
pub fn reduce(mut state: EngineState, input: EngineInput) -> Reduced {
    let effects = state.apply(input);
    Reduced { state, effects }
}

impl EngineState {
    pub fn new(config: TimelineConfig) -> Self {
        let catalog = LabelCatalog::with_translations(&config.label_translations);
        Self {
            config,
            catalog,
            segments: Vec::new(),
            snapshot: None,
            gesture: GestureState::idle(),
            captured: None,
            current_time: 0.0,
            viewport: Viewport::default(),
            selection_mode: false,
            selected_label: None,
            active_segment: None,
            label_order: LabelOrder::new(),
            revision: 0,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: &SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| &s.id == id)
    }

    pub(crate) fn segment_mut(&mut self, id: &SegmentId) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| &s.id == id)
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    pub fn active_segment(&self) -> Option<&SegmentId> {
        self.active_segment.as_ref()
    }

    pub fn label_order(&self) -> &LabelOrder {
        &self.label_order
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Advance by one input. All conditions are handled locally; nothing here fails.
    pub fn apply(&mut self, input: EngineInput) -> Vec<Effect> {
        match input {
            EngineInput::SetSegments { segments } => self.set_segments(segments),
            EngineInput::SetClock {
                current_time,
                duration,
            } => {
                self.viewport.duration_sec = duration;
                self.current_time = current_time;
                self.touch();
                Vec::new()
            }
            EngineInput::SetCurrentTime { current_time } => {
                self.current_time = current_time;
                self.touch();
                Vec::new()
            }
            EngineInput::SetTrackWidth { width_px } => {
                self.viewport.width_px = width_px;
                self.rebase_gesture(width_px);
                self.touch();
                Vec::new()
            }
            EngineInput::SetSelectionMode { enabled } => {
                self.selection_mode = enabled;
                Vec::new()
            }
            EngineInput::SetShowConfidence { enabled } => {
                self.config.show_confidence = enabled;
                self.touch();
                Vec::new()
            }
            EngineInput::SetActiveSegment { id } => {
                self.active_segment = id;
                self.touch();
                Vec::new()
            }
            EngineInput::Configure { config } => {
                self.catalog = LabelCatalog::with_translations(&config.label_translations);
                self.config = config;
                self.viewport.zoom_level = self.config.clamp_zoom(self.viewport.zoom_level);
                self.touch();
                Vec::new()
            }
            EngineInput::ZoomIn => {
                self.set_zoom(self.viewport.zoom_level + self.config.zoom_step);
                Vec::new()
            }
            EngineInput::ZoomOut => {
                self.set_zoom(self.viewport.zoom_level - self.config.zoom_step);
                Vec::new()
            }
            EngineInput::Wheel { delta_y } => {
                let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
                self.set_zoom(self.viewport.zoom_level * factor);
                Vec::new()
            }
            EngineInput::PointerDown {
                pointer_id,
                x_px,
                target,
            } => self.pointer_down(pointer_id, x_px, target),
            EngineInput::PointerMove { pointer_id, x_px } => self.pointer_move(pointer_id, x_px),
            EngineInput::PointerUp { pointer_id, x_px } => self.pointer_up(pointer_id, x_px),
            EngineInput::PointerCancel { pointer_id } => {
                if self.gesture.owns(pointer_id) {
                    self.cancel_gesture("pointercancel")
                } else {
                    Vec::new()
                }
            }
            EngineInput::PointerLeave { pointer_id } => {
                if self.gesture.owns(pointer_id) {
                    self.cancel_gesture("pointer left surface")
                } else {
                    Vec::new()
                }
            }
            EngineInput::TargetDetached { id } => {
                if self.gesture.targets(&id) {
                    self.cancel_gesture("target detached")
                } else {
                    Vec::new()
                }
            }
            EngineInput::SegmentClick { id } => self.select_segment(id),
            EngineInput::ContextMenu {
                id,
                client_x,
                client_y,
            } => self
                .outward_id(&id, "segment-contextmenu")
                .map(|id| {
                    vec![Effect::Emit(TimelineEvent::SegmentContextmenu {
                        id,
                        pointer: PointerInfo { client_x, client_y },
                    })]
                })
                .unwrap_or_default(),
            EngineInput::PlaySegment { id } => self.play_segment(&id),
            EngineInput::EditSegment { id } => self
                .outward_id(&id, "segment-edit")
                .map(|id| vec![Effect::Emit(TimelineEvent::SegmentEdit { id })])
                .unwrap_or_default(),
            EngineInput::DeleteSegment { id } => self.delete_segment(&id),
            EngineInput::DeleteSelected => self.delete_selected(),
            EngineInput::KeyDown {
                key,
                editable_target,
            } => {
                if editable_target {
                    return Vec::new();
                }
                match key.as_str() {
                    "Delete" | "Backspace" => self.delete_selected(),
                    _ => Vec::new(),
                }
            }
            EngineInput::PlayPause => vec![Effect::Emit(TimelineEvent::PlayPause)],
            EngineInput::Teardown => self.teardown(),
        }
    }

    fn set_zoom(&mut self, zoom: f64) {
        let clamped = self.config.clamp_zoom(zoom);
        if clamped != self.viewport.zoom_level {
            self.viewport.zoom_level = clamped;
            self.touch();
        }
    }

    /// Replace the working copy with a fresh list from the store.
    fn set_segments(&mut self, incoming: Vec<Segment>) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mode = self.gesture.mode;

        if mode.is_segment_gesture() {
            let target = self.gesture.target_segment_id.clone();
            let in_flight = target
                .as_ref()
                .and_then(|id| self.segment(id))
                .map(|s| (s.start_time, s.end_time));
            let still_present = target
                .as_ref()
                .map(|id| incoming.iter().any(|s| &s.id == id))
                .unwrap_or(false);

            if still_present {
                self.snapshot = Some(incoming.clone());
                self.segments = incoming;
                if let (Some(id), Some((start, end))) = (target, in_flight) {
                    if let Some(segment) = self.segment_mut(&id) {
                        segment.start_time = start;
                        segment.end_time = end;
                    }
                }
            } else {
                crate::log_debug!("Gesture target vanished from store update");
                effects = self.cancel_gesture("target lost");
                self.segments = incoming;
            }
        } else if mode == GestureMode::Selecting {
            let draft = self
                .gesture
                .target_segment_id
                .as_ref()
                .and_then(|id| self.segment(id))
                .cloned();
            self.snapshot = Some(incoming.clone());
            self.segments = incoming;
            self.segments.extend(draft);
        } else {
            self.segments = incoming;
        }

        if let Some(active) = &self.active_segment {
            if self.segment(active).is_none() {
                self.active_segment = None;
            }
        }

        self.label_order.observe(&self.segments);
        self.touch();
        effects
    }

    /// Returns the id if it may be emitted, logging and dropping it otherwise.
    pub(crate) fn outward_id(&self, id: &SegmentId, event: &str) -> Option<SegmentId> {
        if id.is_committable() {
            Some(id.clone())
        } else {
            crate::log_warn!("Dropping {} for unrecognised segment id {:?}", event, id);
            None
        }
    }

    fn select_segment(&mut self, id: SegmentId) -> Vec<Effect> {
        let Some(label) = self.segment(&id).map(|s| s.label.clone()) else {
            crate::log_debug!("Ignoring click on unknown segment {}", id);
            return Vec::new();
        };

        self.selected_label = Some(label);
        self.active_segment = Some(id.clone());
        self.touch();

        self.outward_id(&id, "segment-select")
            .map(|id| vec![Effect::Emit(TimelineEvent::SegmentSelect { id })])
            .unwrap_or_default()
    }

    fn play_segment(&mut self, id: &SegmentId) -> Vec<Effect> {
        let Some(start) = self.segment(id).map(|s| s.start_time) else {
            return Vec::new();
        };
        vec![
            Effect::Emit(TimelineEvent::Seek { time: start }),
            Effect::Emit(TimelineEvent::PlayPause),
        ]
    }

    fn delete_segment(&mut self, id: &SegmentId) -> Vec<Effect> {
        if self.segment(id).is_none() {
            return Vec::new();
        }
        self.outward_id(id, "segment-delete")
            .map(|id| vec![Effect::Emit(TimelineEvent::SegmentDelete { id })])
            .unwrap_or_default()
    }

    fn delete_selected(&mut self) -> Vec<Effect> {
        match self.active_segment.clone() {
            Some(id) => self.delete_segment(&id),
            None => Vec::new(),
        }
    }

    fn teardown(&mut self) -> Vec<Effect> {
        let mut effects = if self.gesture.is_idle() {
            Vec::new()
        } else {
            self.cancel_gesture("teardown")
        };
        if let Some(pointer) = self.captured.take() {
            effects.push(Effect::ReleaseCapture(pointer));
        }
        effects
    }
}
