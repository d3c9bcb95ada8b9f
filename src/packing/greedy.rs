use crate::models::Segment;
use crate::packing::{config::PackingConfig, sorted_by_start, Row};

const ENABLE_LOGS: bool = true;

/// First-fit packing of mixed-label segments into at most `max_rows` rows.
///
/// Each segment, in start order, goes to the first row whose `max_end_time`
/// leaves at least `min_gap_secs` before it. When no row fits and the limit
/// is reached, the segment is forced into the row with the smallest
/// `max_end_time` (lowest index on ties) and will overlap visually there.
pub fn pack_greedy(segments: &[Segment], config: &PackingConfig) -> Vec<Row> {
    if segments.is_empty() {
        return Vec::new();
    }

    let max_rows = config.effective_max_rows();
    let min_gap = config.min_gap_secs;
    let mut rows: Vec<Row> = Vec::new();
    let mut forced = 0usize;

    for segment in sorted_by_start(segments) {
        let fitting = rows
            .iter()
            .position(|row| segment.start_time - row.max_end_time >= min_gap);

        let target = match fitting {
            Some(index) => index,
            None if rows.len() < max_rows => {
                let index = rows.len();
                rows.push(Row::new(index, format!("row-{}", index), None));
                index
            }
            None => {
                forced += 1;
                earliest_ending_row(&rows)
            }
        };

        rows[target].push(segment);
    }

    if forced > 0 {
        crate::log_info!(
            "Row limit {} reached: {} of {} segments placed with overlap",
            max_rows,
            forced,
            segments.len()
        );
    }

    rows
}

fn earliest_ending_row(rows: &[Row]) -> usize {
    let mut best = 0;
    for (index, row) in rows.iter().enumerate().skip(1) {
        if row.max_end_time < rows[best].max_end_time {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::test_support::{assert_no_overlap, ids, seg};

    fn config(max_rows: usize) -> PackingConfig {
        PackingConfig {
            max_rows,
            ..PackingConfig::default()
        }
    }

    #[test]
    fn reuses_first_row_with_room() {
        let segments = vec![
            seg(1, "a", 0.0, 10.0),
            seg(2, "b", 5.0, 15.0),
            seg(3, "c", 10.5, 12.0),
            seg(4, "a", 15.05, 20.0),
        ];
        let rows = pack_greedy(&segments, &config(20));

        assert_eq!(rows.len(), 2);
        assert_eq!(ids(&rows[0]), vec!["1", "3", "4"]);
        assert_eq!(ids(&rows[1]), vec!["2"]);
        assert_eq!(rows[0].max_end_time, 20.0);
        assert_no_overlap(&rows, 0.1);
    }

    #[test]
    fn gap_below_epsilon_needs_new_row() {
        let segments = vec![seg(1, "a", 0.0, 10.0), seg(2, "a", 10.05, 11.0)];
        let rows = pack_greedy(&segments, &config(20));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn forced_overlap_when_row_limit_reached() {
        let segments = vec![seg(1, "a", 0.0, 10.0), seg(2, "b", 5.0, 15.0)];
        let rows = pack_greedy(&segments, &config(1));

        assert_eq!(rows.len(), 1);
        assert_eq!(ids(&rows[0]), vec!["1", "2"]);
        assert_eq!(rows[0].max_end_time, 15.0);
    }

    #[test]
    fn forced_segment_goes_to_earliest_ending_row() {
        let segments = vec![
            seg(1, "a", 0.0, 30.0),
            seg(2, "b", 1.0, 8.0),
            seg(3, "c", 2.0, 20.0),
        ];
        let rows = pack_greedy(&segments, &config(2));

        assert_eq!(rows.len(), 2);
        assert_eq!(ids(&rows[1]), vec!["2", "3"]);
    }

    #[test]
    fn zero_max_rows_still_places_everything() {
        let segments = vec![seg(1, "a", 0.0, 10.0), seg(2, "b", 5.0, 15.0)];
        let rows = pack_greedy(&segments, &config(0));
        let placed: usize = rows.iter().map(|r| r.segments.len()).sum();
        assert_eq!(placed, 2);
    }

    #[test]
    fn no_overlap_without_limit_pressure() {
        let mut segments = Vec::new();
        for i in 0..40 {
            let start = (i * 7 % 50) as f64;
            segments.push(seg(i, "x", start, start + 3.0 + (i % 5) as f64));
        }
        let rows = pack_greedy(&segments, &config(100));
        assert_no_overlap(&rows, 0.1);
        let placed: usize = rows.iter().map(|r| r.segments.len()).sum();
        assert_eq!(placed, 40);

        assert_eq!(rows, pack_greedy(&segments, &config(100)));
    }
}
