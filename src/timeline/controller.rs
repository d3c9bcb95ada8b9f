use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    Mutex,
};

use crate::gesture::{CaptureSurface, NoCapture};
use crate::timeline::{
    EngineInput, TimelineConfig, TimelineEvent, TimelineLayout, TimelineSession,
};

type Session<S> = TimelineSession<S, UnboundedSender<TimelineEvent>>;

/// Cloneable async handle for hosts that receive input on a tokio runtime.
///
/// Inputs are applied one at a time under the lock, so a gesture's
/// down/move/up sequence is never reordered. Outward events arrive on the
/// receiver returned by [`TimelineController::new`].
pub struct TimelineController<S: CaptureSurface = NoCapture> {
    session: Arc<Mutex<Session<S>>>,
}

impl<S: CaptureSurface> Clone for TimelineController<S> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl TimelineController<NoCapture> {
    pub fn new(config: TimelineConfig) -> (Self, UnboundedReceiver<TimelineEvent>) {
        Self::with_surface(config, NoCapture)
    }
}

impl<S: CaptureSurface> TimelineController<S> {
    pub fn with_surface(
        config: TimelineConfig,
        surface: S,
    ) -> (Self, UnboundedReceiver<TimelineEvent>) {
        let (tx, rx) = unbounded_channel();
        let controller = Self {
            session: Arc::new(Mutex::new(TimelineSession::new(config, surface, tx))),
        };
        (controller, rx)
    }

    pub async fn dispatch(&self, input: EngineInput) -> TimelineLayout {
        let mut session = self.session.lock().await;
        session.dispatch(input).clone()
    }

    /// Parse one JSON-encoded input and apply it.
    pub async fn dispatch_json(&self, raw: &str) -> Result<TimelineLayout> {
        let input: EngineInput = serde_json::from_str(raw)
            .with_context(|| format!("failed to parse timeline input: {raw}"))?;
        Ok(self.dispatch(input).await)
    }

    pub async fn layout(&self) -> TimelineLayout {
        self.session.lock().await.layout().clone()
    }

    pub async fn reconfigure(&self, config: TimelineConfig) -> TimelineLayout {
        info!("Applying timeline configuration");
        self.dispatch(EngineInput::Configure { config }).await
    }

    /// Cancel any gesture in flight and release its capture.
    pub async fn teardown(&self) {
        self.dispatch(EngineInput::Teardown).await;
    }
}
