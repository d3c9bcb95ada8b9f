use std::collections::HashMap;

use crate::models::Segment;
use crate::packing::{config::PackingConfig, label_order::LabelOrder, sorted_by_start, Row};

/// Bucket segments by label, then split each bucket into as many physical rows
/// as its own overlaps require.
///
/// Buckets follow `order`, with `selected_label` pulled to the front. A bucket
/// whose label is missing from `order` is appended after the known ones in
/// first-appearance order, so nothing is ever dropped.
pub fn pack_by_label(
    segments: &[Segment],
    order: &LabelOrder,
    selected_label: Option<&str>,
    config: &PackingConfig,
) -> Vec<Row> {
    if segments.is_empty() {
        return Vec::new();
    }

    let sorted = sorted_by_start(segments);
    let mut buckets: HashMap<&str, Vec<&Segment>> = HashMap::new();
    let mut appearance: Vec<&str> = Vec::new();
    for segment in &sorted {
        let label = segment.label.as_str();
        if !buckets.contains_key(label) {
            appearance.push(label);
        }
        buckets.entry(label).or_default().push(segment);
    }

    let mut labels = order.ordered_with_selection(selected_label);
    for label in appearance {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    let tolerance = config.label_overlap_tolerance_secs;
    let mut rows: Vec<Row> = Vec::new();

    for label in labels {
        let Some(bucket) = buckets.remove(label) else {
            continue;
        };

        let mut physical = 0usize;
        let mut current = Row::new(
            rows.len(),
            format!("{}-{}", label, physical),
            Some(label.to_string()),
        );

        for segment in bucket {
            let overlaps = segment.start_time < current.max_end_time - tolerance;
            if !current.segments.is_empty() && overlaps {
                physical += 1;
                let next = Row::new(
                    rows.len() + 1,
                    format!("{}-{}", label, physical),
                    Some(label.to_string()),
                );
                rows.push(std::mem::replace(&mut current, next));
            }
            current.push(segment.clone());
        }

        rows.push(current);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::test_support::{assert_no_overlap, ids, seg};

    fn order_of(segments: &[Segment]) -> LabelOrder {
        let mut order = LabelOrder::new();
        order.observe(segments);
        order
    }

    #[test]
    fn rows_never_mix_labels() {
        let segments = vec![
            seg(1, "polyp", 0.0, 10.0),
            seg(2, "blood", 2.0, 4.0),
            seg(3, "polyp", 12.0, 20.0),
        ];
        let rows = pack_by_label(&segments, &order_of(&segments), None, &PackingConfig::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label.as_deref(), Some("polyp"));
        assert_eq!(ids(&rows[0]), vec!["1", "3"]);
        assert_eq!(rows[1].label.as_deref(), Some("blood"));
        assert_eq!(rows[1].row_index, 1);
    }

    #[test]
    fn self_overlap_opens_new_physical_row() {
        let segments = vec![
            seg(1, "polyp", 0.0, 10.0),
            seg(2, "polyp", 5.0, 15.0),
            seg(3, "polyp", 16.0, 18.0),
        ];
        let rows = pack_by_label(&segments, &order_of(&segments), None, &PackingConfig::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "polyp-0");
        assert_eq!(ids(&rows[0]), vec!["1"]);
        assert_eq!(rows[1].key, "polyp-1");
        assert_eq!(ids(&rows[1]), vec!["2", "3"]);
        assert_eq!(rows[1].max_end_time, 18.0);
        assert_no_overlap(&rows, -1e-4);
    }

    #[test]
    fn touching_segments_share_a_row() {
        let segments = vec![seg(1, "nbi", 0.0, 10.0), seg(2, "nbi", 10.0, 12.0)];
        let rows = pack_by_label(&segments, &order_of(&segments), None, &PackingConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn selected_label_comes_first() {
        let segments = vec![seg(1, "a", 0.0, 1.0), seg(2, "b", 0.0, 1.0), seg(3, "c", 0.0, 1.0)];
        let order = order_of(&segments);
        let rows = pack_by_label(&segments, &order, Some("c"), &PackingConfig::default());
        let labels: Vec<_> = rows.iter().filter_map(|r| r.label.clone()).collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
        assert_eq!(rows[0].row_index, 0);
    }

    #[test]
    fn unknown_labels_are_appended_not_dropped() {
        let segments = vec![seg(1, "a", 0.0, 1.0), seg(2, "z", 0.0, 1.0)];
        let mut order = LabelOrder::new();
        order.observe(&segments[..1]);
        let rows = pack_by_label(&segments, &order, None, &PackingConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label.as_deref(), Some("z"));
    }

    #[test]
    fn repeated_packing_is_identical() {
        let segments = vec![
            seg(4, "b", 3.0, 9.0),
            seg(1, "a", 0.0, 10.0),
            seg(2, "a", 5.0, 6.0),
            seg(3, "b", 3.0, 4.0),
        ];
        let order = order_of(&segments);
        let first = pack_by_label(&segments, &order, None, &PackingConfig::default());
        let second = pack_by_label(&segments, &order, None, &PackingConfig::default());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
