//! Headless interaction state: zoom presets, drag/resize gesture sessions
//! and inline rename.
//!
//! Nothing here touches the layout engine directly. Gestures and renames
//! produce mutations; the host applies them to its record set and lays the
//! new set out again.

pub mod edit;
pub mod gesture;
pub mod mutation;
pub mod zoom;

pub use edit::{EditSession, RenameMutation};
pub use gesture::{
    DateMutation, GestureController, GestureKind, GestureSession, PointerButton, PointerDown,
};
pub use mutation::{UNTITLED_LABEL, apply_date_mutation, apply_rename, display_name};
pub use zoom::{TimeframePreset, ZoomState};
