//! Screen transition and lifecycle engine for the GOLFIN startup flow.
//!
//! The flow is an ordered set of full-view screens:
//!
//! ```text
//! Logo ──3 s──→ Loading ──load complete──→ Splash ──START──→ Home ⇄ Settings
//! ```
//!
//! Every screen enters and exits through a timed crossfade. The crate
//! guarantees that exactly one screen is active at a time, that transitions
//! never overlap, and that a screen's timed work is cancelled the moment it
//! starts exiting.
//!
//! - [`timing`]: cancellable timed sequences with easing and overflow carry
//! - [`screen`]: screen base with visibility, interactivity, enter/exit hooks
//! - [`engine`]: current screen, serialized transitions, dropped requests
//! - [`bootstrap`]: the one-shot Logo → Loading → Splash sequence
//! - [`screens`]: the five concrete screens and their registry
//! - [`carousel`]: the pro tip carousel on the loading screen
//! - [`localization`]: CSV text table, fallback lookup, highlight markup
//! - [`widgets`]: localized labels, loading bar, press feedback
//! - [`journal`]: fixed-size record of lifecycle events
//! - [`app`]: host context tying it all together
//!
//! # Driving the Flow
//!
//! Nothing here owns a clock or a thread. A host calls [`App::tick`] with the
//! wall-clock time since the previous frame and [`App::press`] when a control
//! is activated; everything else follows from those two calls.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::struct_excessive_bools)]

pub mod app;
pub mod bootstrap;
pub mod carousel;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod journal;
pub mod localization;
pub mod screen;
pub mod screens;
pub mod timing;
pub mod widgets;

// Re-export commonly used items
pub use app::App;
pub use config::FlowConfig;
pub use engine::{Request, ScreenRegistry, TransitionEngine};
pub use error::{ConfigError, LocaleError};
pub use input::{Control, Intent};
pub use localization::{Localizer, TextLookup};
pub use screen::{AnyScreen, ScreenId, Visibility};
