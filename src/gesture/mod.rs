pub mod bounds;
pub mod capture;
pub mod machine;
pub mod state;

pub use capture::{CaptureGuard, CaptureSurface, NoCapture};
pub use machine::DRAFT_LABEL;
pub use state::{GestureMode, GestureState, PointerId, ResizeEdge};
