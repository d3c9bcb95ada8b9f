use serde::Serialize;

const ENABLE_LOGS: bool = true;

/// Upper bound on ruler ticks. Past this the interval is widened.
pub const MAX_MARKERS: usize = 1000;

/// Media durations are only usable when finite and positive.
pub fn valid_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// `clamp(t / duration, 0, 1) * 100`, or 0 when either input is unusable.
pub fn time_to_percent(time: f64, duration: f64) -> f64 {
    if !valid_duration(duration) {
        crate::log_debug!("time_to_percent: invalid duration {}", duration);
        return 0.0;
    }
    if !time.is_finite() {
        return 0.0;
    }
    (time / duration).clamp(0.0, 1.0) * 100.0
}

/// Inverse of [`time_to_percent`], clamped to `[0, duration]`.
pub fn percent_to_time(percent: f64, duration: f64) -> f64 {
    if !valid_duration(duration) || !percent.is_finite() {
        return 0.0;
    }
    ((percent / 100.0) * duration).clamp(0.0, duration)
}

/// Convert a pointer delta in pixels into a time delta in seconds.
pub fn px_delta_to_time_delta(delta_px: f64, track_width_px: f64, duration: f64) -> f64 {
    if !valid_duration(duration) || !delta_px.is_finite() {
        return 0.0;
    }
    if !track_width_px.is_finite() || track_width_px <= 0.0 {
        return 0.0;
    }
    (delta_px / track_width_px) * duration
}

/// Absolute pointer position on the track to a time, clamped to `[0, duration]`.
pub fn px_to_time(x_px: f64, track_width_px: f64, duration: f64) -> f64 {
    if !track_width_px.is_finite() || track_width_px <= 0.0 || !x_px.is_finite() {
        return 0.0;
    }
    let percent = (x_px / track_width_px).clamp(0.0, 1.0) * 100.0;
    percent_to_time(percent, duration)
}

/// Unclamped left offset of a segment, 0 on invalid input.
pub fn segment_left_percent(start: f64, duration: f64) -> f64 {
    if !start.is_finite() || !valid_duration(duration) {
        return 0.0;
    }
    (start / duration) * 100.0
}

/// Unclamped width of a segment, 0 on invalid input or a reversed interval.
pub fn segment_width_percent(start: f64, end: f64, duration: f64) -> f64 {
    if !start.is_finite() || !end.is_finite() || !valid_duration(duration) || end <= start {
        return 0.0;
    }
    ((end - start) / duration) * 100.0
}

/// Render span of a segment as `(left%, width%)`.
///
/// Left is clamped into the track; width never drops below 0.1% so very short
/// segments stay clickable, and never runs past the right edge.
pub fn segment_span_percent(start: f64, end: f64, duration: f64) -> (f64, f64) {
    if !valid_duration(duration) {
        return (0.0, 0.0);
    }
    let raw_left = segment_left_percent(start, duration);
    let left = raw_left.clamp(0.0, 100.0);
    let width = segment_width_percent(start, end, duration)
        .min(100.0 - raw_left)
        .max(0.1);
    (left, width)
}

/// A tick on the time ruler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeMarker {
    pub time: f64,
    pub percent: f64,
}

/// Ruler ticks every `base_interval / zoom` seconds. Zoom only changes density.
pub fn time_markers(duration: f64, zoom: f64, base_interval_secs: f64) -> Vec<TimeMarker> {
    if !valid_duration(duration) || !base_interval_secs.is_finite() || base_interval_secs <= 0.0 {
        return Vec::new();
    }
    let zoom = if zoom.is_finite() && zoom >= 1.0 { zoom } else { 1.0 };
    let mut interval = base_interval_secs / zoom;
    if duration / interval > MAX_MARKERS as f64 {
        crate::log_debug!("time_markers: widening interval for {}s of media", duration);
        interval = duration / MAX_MARKERS as f64;
    }
    let count = ((duration / interval).floor() as usize).min(MAX_MARKERS);

    (0..=count)
        .map(|i| i as f64 * interval)
        .filter(|time| *time <= duration)
        .map(|time| TimeMarker {
            time,
            percent: (time / duration) * 100.0,
        })
        .collect()
}
