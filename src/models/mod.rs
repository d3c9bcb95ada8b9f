pub mod label;
pub mod segment;

pub use label::LabelCatalog;
pub use segment::{normalize_segments, DraftId, RawSegment, Segment, SegmentId};
