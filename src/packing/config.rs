use serde::{Deserialize, Serialize};

/// How segments are distributed over display rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackingPolicy {
    /// One row group per label, split into extra rows where a label overlaps itself.
    LabelGrouped,
    /// Mixed labels, first-fit into at most `max_rows` rows.
    Greedy,
}

impl Default for PackingPolicy {
    fn default() -> Self {
        PackingPolicy::LabelGrouped
    }
}

/// Tunable thresholds for row packing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PackingConfig {
    pub policy: PackingPolicy,

    /// Greedy packing: maximum number of rows before forced placement kicks in
    pub max_rows: usize,

    /// Greedy packing: required gap between neighbours sharing a row
    pub min_gap_secs: f64,

    /// Label-grouped packing: overlap below this is treated as touching
    pub label_overlap_tolerance_secs: f64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            policy: PackingPolicy::LabelGrouped,
            max_rows: 20,
            min_gap_secs: 0.1,
            label_overlap_tolerance_secs: 1e-4,
        }
    }
}

impl PackingConfig {
    /// `max_rows` of zero would leave nowhere to put a segment.
    pub fn effective_max_rows(&self) -> usize {
        self.max_rows.max(1)
    }
}
