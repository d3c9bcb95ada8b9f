use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

const ENABLE_LOGS: bool = true;

/// Identifier of a segment not yet persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DraftId {
    /// Created by a selection gesture on this timeline.
    Local(Uuid),
    /// A sentinel handed in by the store (`"draft"`, `"temp-3"`).
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentId {
    Persisted(i64),
    Draft(DraftId),
    /// Neither numeric nor a known draft sentinel. Rendered, never committed.
    Foreign(String),
}

impl SegmentId {
    pub fn new_local_draft() -> Self {
        SegmentId::Draft(DraftId::Local(Uuid::new_v4()))
    }

    /// Interpret an id exactly once, at the input boundary.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(numeric) = trimmed.parse::<i64>() {
            return SegmentId::Persisted(numeric);
        }
        if trimmed == "draft" || trimmed.starts_with("temp-") {
            return SegmentId::Draft(DraftId::External(trimmed.to_string()));
        }
        SegmentId::Foreign(trimmed.to_string())
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, SegmentId::Draft(_))
    }

    /// Whether a gesture result for this id may leave the engine.
    pub fn is_committable(&self) -> bool {
        !matches!(self, SegmentId::Foreign(_))
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentId::Persisted(id) => write!(f, "{}", id),
            SegmentId::Draft(DraftId::Local(uuid)) => write!(f, "temp-{}", uuid),
            SegmentId::Draft(DraftId::External(raw)) => f.write_str(raw),
            SegmentId::Foreign(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for SegmentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SegmentId::Persisted(id) => serializer.serialize_i64(*id),
            other => serializer.collect_str(other),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for SegmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Integer(id) => SegmentId::Persisted(id),
            RawId::Float(id) if id.is_finite() && id.fract() == 0.0 => {
                SegmentId::Persisted(id as i64)
            }
            RawId::Float(id) => SegmentId::Foreign(id.to_string()),
            RawId::Text(text) => SegmentId::parse(&text),
        })
    }
}

/// A segment as the store sends it, before normalisation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub id: SegmentId,
    #[serde(default, alias = "label_name")]
    pub label: Option<String>,
    #[serde(default, alias = "label_display")]
    pub label_display: Option<String>,
    #[serde(default, alias = "start_time", alias = "start")]
    pub start_time: Option<f64>,
    #[serde(default, alias = "end_time", alias = "end")]
    pub end_time: Option<f64>,
    #[serde(default, alias = "avg_confidence")]
    pub avg_confidence: Option<f64>,
}

/// A labelled `[start_time, end_time)` interval on the media timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub label: String,
    pub label_display: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub avg_confidence: Option<f64>,
}

impl Segment {
    pub fn new(id: SegmentId, label: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            id,
            label: label.into(),
            label_display: None,
            start_time,
            end_time,
            avg_confidence: None,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_draft()
    }

    /// Normalise one raw record. Returns `None` when the times are unusable.
    pub fn from_raw(raw: RawSegment) -> Option<Self> {
        let start = raw.start_time.unwrap_or(0.0);
        let end = raw.end_time.unwrap_or(0.0);

        if !start.is_finite() || !end.is_finite() {
            crate::log_warn!(
                "Dropping segment {} with non-finite bounds ({}, {})",
                raw.id,
                start,
                end
            );
            return None;
        }

        let (start, end) = if end < start { (end, start) } else { (start, end) };

        Some(Self {
            id: raw.id,
            label: raw.label.unwrap_or_default(),
            label_display: raw.label_display,
            start_time: start.max(0.0),
            end_time: end.max(0.0),
            avg_confidence: raw.avg_confidence.filter(|c| c.is_finite()),
        })
    }
}

/// Normalise a whole batch, dropping unusable records.
pub fn normalize_segments(raw: Vec<RawSegment>) -> Vec<Segment> {
    raw.into_iter().filter_map(Segment::from_raw).collect()
}

/// `deserialize_with` helper: accept raw records, yield canonical segments.
pub fn deserialize_normalized<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Segment>, D::Error> {
    let raw = Vec::<RawSegment>::deserialize(deserializer)?;
    Ok(normalize_segments(raw))
}
