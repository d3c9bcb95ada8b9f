pub mod config;
pub mod greedy;
pub mod label_grouped;
pub mod label_order;

use serde::Serialize;

use crate::coords;
use crate::models::Segment;

pub use config::{PackingConfig, PackingPolicy};
pub use greedy::pack_greedy;
pub use label_grouped::pack_by_label;
pub use label_order::LabelOrder;

const ENABLE_LOGS: bool = true;

/// A packing bucket. Segments are sorted by `start_time`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub row_index: usize,
    /// Stable render key, `<label>-<n>` for label rows and `row-<n>` otherwise.
    pub key: String,
    /// Shared label in label-grouped packing; `None` for mixed rows.
    pub label: Option<String>,
    pub segments: Vec<Segment>,
    pub max_end_time: f64,
    pub min_start_time: f64,
}

impl Row {
    fn new(row_index: usize, key: String, label: Option<String>) -> Self {
        Self {
            row_index,
            key,
            label,
            segments: Vec::new(),
            max_end_time: 0.0,
            min_start_time: f64::INFINITY,
        }
    }

    fn push(&mut self, segment: Segment) {
        self.max_end_time = self.max_end_time.max(segment.end_time);
        self.min_start_time = self.min_start_time.min(segment.start_time);
        self.segments.push(segment);
    }
}

/// Copy of `segments` ordered by start time; ties keep input order.
pub(crate) fn sorted_by_start(segments: &[Segment]) -> Vec<Segment> {
    let mut sorted = segments.to_vec();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    sorted
}

/// Pack with whichever policy the config selects.
pub fn pack(
    segments: &[Segment],
    config: &PackingConfig,
    order: &LabelOrder,
    selected_label: Option<&str>,
    duration: f64,
) -> Vec<Row> {
    let rows = match config.policy {
        PackingPolicy::LabelGrouped => pack_by_label(segments, order, selected_label, config),
        PackingPolicy::Greedy => pack_greedy(segments, config),
    };

    warn_zero_width(&rows, duration);
    rows
}

fn warn_zero_width(rows: &[Row], duration: f64) {
    if !coords::valid_duration(duration) {
        return;
    }
    for row in rows {
        // a selection draft starts out empty
        for segment in row.segments.iter().filter(|s| !s.is_draft()) {
            let (start, end) = (segment.start_time, segment.end_time);
            if coords::segment_width_percent(start, end, duration) == 0.0 {
                crate::log_warn!(
                    "Segment {} in row {} has zero width ({}..{})",
                    segment.id,
                    row.row_index,
                    start,
                    end
                );
            }
        }
    }
}
