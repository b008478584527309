//! timeline-rs: lane-packing Gantt timeline engine.
//!
//! The crate splits into a pure calendar/layout core and a headless
//! interaction layer. [`layout::compute_layout`] turns date-ranged records
//! into non-overlapping lanes with pixel geometry for a zoom level;
//! [`api::TimelineEngine`] wraps it with zoom, drag/resize and rename state
//! for host UIs.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
pub use layout::{LayoutConfig, TimelineLayout, compute_layout, compute_layout_at};
