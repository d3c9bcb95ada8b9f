/// Format seconds as `MM:SS`. Invalid or negative input renders as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Human-readable segment length: `12.5s` under a minute, `M:SS` above.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0.0s".to_string();
    }

    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else {
        let mins = (seconds / 60.0).floor() as u64;
        let secs = (seconds % 60.0).floor() as u64;
        format!("{}:{:02}", mins, secs)
    }
}

/// Average model confidence (0..1) as a rounded percentage.
pub fn format_confidence(avg_confidence: f64) -> String {
    if !avg_confidence.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", (avg_confidence.clamp(0.0, 1.0) * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.9), "01:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn time_rejects_invalid_input() {
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn duration_switches_format_at_one_minute() {
        assert_eq!(format_duration(12.34), "12.3s");
        assert_eq!(format_duration(59.9), "59.9s");
        assert_eq!(format_duration(61.0), "1:01");
        assert_eq!(format_duration(125.0), "2:05");
    }

    #[test]
    fn confidence_rounds_to_percent() {
        assert_eq!(format_confidence(0.876), "88%");
        assert_eq!(format_confidence(1.4), "100%");
        assert_eq!(format_confidence(f64::NAN), "0%");
    }
}
