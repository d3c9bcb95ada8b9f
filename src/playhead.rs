use crate::coords;
use crate::timeline::events::{Effect, TimelineEvent};
use crate::timeline::EngineState;

const ENABLE_LOGS: bool = true;

/// Playhead offset in percent. 0 when either input is unusable, never NaN.
pub fn position_for_time(current_time: f64, duration: f64) -> f64 {
    if !current_time.is_finite() {
        crate::log_debug!("position_for_time: invalid current time {}", current_time);
        return 0.0;
    }
    coords::time_to_percent(current_time, duration).clamp(0.0, 100.0)
}

/// Time under an absolute pointer position on the track.
pub fn seek_time(x_px: f64, track_width_px: f64, duration: f64) -> f64 {
    coords::px_to_time(x_px, track_width_px, duration)
}

impl EngineState {
    pub fn playhead_percent(&self) -> f64 {
        position_for_time(self.current_time, self.viewport.duration_sec)
    }

    pub(crate) fn seek_from_track(&self, x_px: f64) -> Vec<Effect> {
        let duration = self.viewport.duration_sec;
        if !coords::valid_duration(duration) {
            crate::log_debug!("Ignoring track click while duration is unknown");
            return Vec::new();
        }
        let time = seek_time(x_px, self.viewport.width_px, duration);
        vec![Effect::Emit(TimelineEvent::Seek { time })]
    }

    /// Seek for the active scrub, or nothing while the duration is unknown.
    pub(crate) fn scrub_seek(&self) -> Option<Effect> {
        let g = &self.gesture;
        if !coords::valid_duration(g.duration_secs) {
            return None;
        }
        let time = seek_time(g.pointer_current_px, g.track_width_px, g.duration_secs);
        Some(Effect::Emit(TimelineEvent::Seek { time }))
    }
}
