use crate::coords::{self, valid_duration};

/// Shortest interval a resize may produce: `min_px` at the current track
/// width, but never less than `min_secs` and never more than the duration.
pub fn min_segment_secs(min_px: f64, min_secs: f64, track_width_px: f64, duration: f64) -> f64 {
    let from_px = coords::px_delta_to_time_delta(min_px, track_width_px, duration);
    let floor = from_px.max(min_secs).max(0.0);
    if valid_duration(duration) {
        floor.min(duration)
    } else {
        floor
    }
}

/// Shift both bounds by `delta`, keeping the length and staying inside `[0, duration]`.
/// `delta` is the total since pointer-down, not a per-move step.
pub fn drag_bounds(start: f64, end: f64, delta: f64, duration: f64) -> (f64, f64) {
    if !valid_duration(duration) || !delta.is_finite() {
        return (start, end);
    }
    let length = end - start;
    let max_start = (duration - length).max(0.0);
    let new_start = (start + delta).clamp(0.0, max_start);
    (new_start, (new_start + length).min(duration))
}

/// Move only the start, never closer than `min_len` to the end.
pub fn resize_start_bounds(start: f64, end: f64, delta: f64, min_len: f64) -> (f64, f64) {
    if !delta.is_finite() {
        return (start, end);
    }
    let upper = (end - min_len).max(0.0);
    ((start + delta).max(0.0).min(upper), end)
}

/// Move only the end, never closer than `min_len` to the start nor past `duration`.
pub fn resize_end_bounds(
    start: f64,
    end: f64,
    delta: f64,
    min_len: f64,
    duration: f64,
) -> (f64, f64) {
    if !valid_duration(duration) || !delta.is_finite() {
        return (start, end);
    }
    let lower = (start + min_len).min(duration);
    (start, (end + delta).min(duration).max(lower))
}

/// Normalised selection between two pointer positions on the track.
pub fn selection_span(
    origin_px: f64,
    current_px: f64,
    track_width_px: f64,
    duration: f64,
) -> (f64, f64) {
    let a = coords::px_to_time(origin_px, track_width_px, duration);
    let b = coords::px_to_time(current_px, track_width_px, duration);
    (a.min(b), a.max(b))
}
