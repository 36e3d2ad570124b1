//! Widget state shared by screens and renderers.
//!
//! Widgets here hold state only; drawing is up to the host.

pub mod label;
pub mod loading_bar;
pub mod pressable;

pub use label::{LabelSet, LocalizedText};
pub use loading_bar::LoadingBar;
pub use pressable::PressFeedback;
