use anyhow::{anyhow, Result};
use log::error;
use tokio::sync::mpsc::UnboundedSender;

use crate::gesture::{CaptureGuard, CaptureSurface, PointerId};
use crate::timeline::{
    compose, Effect, EngineInput, EngineState, TimelineConfig, TimelineEvent, TimelineLayout,
};

/// Receiver of outward events (store, media element, UI shell).
pub trait EventSink {
    fn emit(&mut self, event: TimelineEvent) -> Result<()>;
}

impl EventSink for Vec<TimelineEvent> {
    fn emit(&mut self, event: TimelineEvent) -> Result<()> {
        self.push(event);
        Ok(())
    }
}

impl EventSink for UnboundedSender<TimelineEvent> {
    fn emit(&mut self, event: TimelineEvent) -> Result<()> {
        let name = event.name();
        self.send(event)
            .map_err(|_| anyhow!("failed to emit {name}: receiver dropped"))
    }
}

/// Drives an [`EngineState`] and carries out the effects it asks for.
/// Dropping the session releases any pointer it still holds.
pub struct TimelineSession<S: CaptureSurface, E: EventSink> {
    state: EngineState,
    capture: CaptureGuard<S>,
    sink: E,
    layout: TimelineLayout,
    layout_revision: u64,
}

impl<S: CaptureSurface, E: EventSink> TimelineSession<S, E> {
    pub fn new(config: TimelineConfig, surface: S, sink: E) -> Self {
        let state = EngineState::new(config);
        let layout = compose(&state);
        let layout_revision = state.revision();
        Self {
            state,
            capture: CaptureGuard::new(surface),
            sink,
            layout,
            layout_revision,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    pub fn surface(&self) -> &S {
        self.capture.surface()
    }

    pub fn held_pointer(&self) -> Option<PointerId> {
        self.capture.held()
    }

    /// Feed one input, carry out its effects in order and refresh the layout.
    pub fn dispatch(&mut self, input: EngineInput) -> &TimelineLayout {
        let effects = self.state.apply(input);

        for effect in effects {
            match effect {
                Effect::AcquireCapture(pointer) => self.capture.acquire(pointer),
                Effect::ReleaseCapture(pointer) => self.capture.release(pointer),
                Effect::Emit(event) => {
                    let name = event.name();
                    if let Err(err) = self.sink.emit(event) {
                        error!("Failed to deliver {}: {:#}", name, err);
                    }
                }
            }
        }

        self.refresh_layout();
        &self.layout
    }

    pub fn dispatch_all<I>(&mut self, inputs: I) -> &TimelineLayout
    where
        I: IntoIterator<Item = EngineInput>,
    {
        for input in inputs {
            self.dispatch(input);
        }
        &self.layout
    }

    fn refresh_layout(&mut self) {
        if self.state.revision() != self.layout_revision {
            self.layout = compose(&self.state);
            self.layout_revision = self.state.revision();
        }
    }

    /// Cancel whatever is in flight and release capture, keeping the sink.
    pub fn teardown(mut self) -> E
    where
        E: Default,
    {
        self.dispatch(EngineInput::Teardown);
        self.capture.release_held();
        std::mem::take(&mut self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::capture::test_support::RecordingSurface;
    use crate::gesture::NoCapture;
    use crate::models::{Segment, SegmentId};
    use crate::timeline::PointerTarget;

    fn session(surface: RecordingSurface) -> TimelineSession<RecordingSurface, Vec<TimelineEvent>> {
        let mut session = TimelineSession::new(TimelineConfig::default(), surface, Vec::new());
        session.dispatch_all([
            EngineInput::SetClock {
                current_time: 0.0,
                duration: 120.0,
            },
            EngineInput::SetTrackWidth { width_px: 1200.0 },
            EngineInput::SetSegments {
                segments: vec![Segment::new(SegmentId::Persisted(1), "polyp", 10.0, 30.0)],
            },
        ]);
        session
    }

    fn down(id: i64) -> EngineInput {
        EngineInput::PointerDown {
            pointer_id: PointerId(1),
            x_px: 100.0,
            target: PointerTarget::SegmentBody {
                id: SegmentId::Persisted(id),
            },
        }
    }

    #[test]
    fn capture_is_held_only_during_the_gesture() {
        let surface = RecordingSurface::default();
        let mut session = session(surface.clone());

        session.dispatch(down(1));
        assert_eq!(session.held_pointer(), Some(PointerId(1)));
        assert!(session.layout().segment(&SegmentId::Persisted(1)).unwrap().flags.dragging);

        let layout = session.dispatch(EngineInput::PointerUp {
            pointer_id: PointerId(1),
            x_px: 340.0,
        });
        assert!(!layout.segment(&SegmentId::Persisted(1)).unwrap().flags.dragging);
        assert_eq!(session.held_pointer(), None);
        assert_eq!(surface.outstanding(), 0);
        assert_eq!(session.sink().len(), 1);
    }

    #[test]
    fn dropping_mid_gesture_releases_capture() {
        let surface = RecordingSurface::default();
        {
            let mut session = session(surface.clone());
            session.dispatch(down(1));
            assert_eq!(surface.outstanding(), 1);
        }
        assert_eq!(surface.outstanding(), 0);
    }

    #[test]
    fn teardown_returns_sink_without_commit() {
        let surface = RecordingSurface::default();
        let mut session = session(surface.clone());
        session.dispatch(down(1));
        session.dispatch(EngineInput::PointerMove {
            pointer_id: PointerId(1),
            x_px: 500.0,
        });
        let events = session.teardown();
        assert!(events.is_empty());
        assert_eq!(surface.outstanding(), 0);
    }

    #[test]
    fn layout_follows_working_copy() {
        let mut session = TimelineSession::new(TimelineConfig::default(), NoCapture, Vec::new());
        assert!(session.layout().rows.is_empty());
        session.dispatch(EngineInput::SetSegments {
            segments: vec![Segment::new(SegmentId::Persisted(1), "polyp", 10.0, 30.0)],
        });
        assert_eq!(session.layout().segment_count(), 1);
    }

    #[test]
    fn closed_channel_does_not_break_the_session() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let mut session = TimelineSession::new(TimelineConfig::default(), NoCapture, tx);
        session.dispatch(EngineInput::PlayPause);
        session.dispatch(EngineInput::ZoomIn);
        assert_eq!(session.state().viewport().zoom_level, 1.5);
    }
}
