pub mod config;
pub mod controller;
pub mod engine;
pub mod events;
pub mod input;
pub mod layout;
pub mod session;

pub use config::{TimelineConfig, MIN_ROW_HEIGHT_PX};
pub use controller::TimelineController;
pub use engine::{reduce, EngineState, Reduced, Viewport};
pub use events::{Effect, PointerInfo, TimelineEvent};
pub use input::{EngineInput, PointerTarget};
pub use layout::{compose, RowLayout, SegmentLayout, SelectionOverlay, TimelineLayout, VisualFlags};
pub use session::{EventSink, TimelineSession};
