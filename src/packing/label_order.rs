use serde::{Deserialize, Serialize};

use crate::models::Segment;

/// First-seen order of labels, kept across packing passes so existing row
/// groups do not jump when a new label shows up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelOrder {
    labels: Vec<String>,
}

impl LabelOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append labels not seen before, in the order they appear in `segments`.
    /// Labels that disappear keep their slot for when they come back. Drafts
    /// are skipped; they are packed after the known labels until persisted.
    pub fn observe(&mut self, segments: &[Segment]) {
        for segment in segments.iter().filter(|s| !s.is_draft()) {
            if !self.labels.iter().any(|known| known == &segment.label) {
                self.labels.push(segment.label.clone());
            }
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Row-group order for one pass: the selected label first, the rest stable.
    pub fn ordered_with_selection<'a>(&'a self, selected: Option<&'a str>) -> Vec<&'a str> {
        let mut ordered = Vec::with_capacity(self.labels.len() + 1);
        if let Some(selected) = selected {
            ordered.push(selected);
        }
        ordered.extend(
            self.labels
                .iter()
                .map(String::as_str)
                .filter(|label| Some(*label) != selected),
        );
        ordered
    }
}
