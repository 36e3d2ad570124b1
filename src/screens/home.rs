//! Home screen: the hub after Splash, with a settings button and a
//! navigation bar.
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ GOLFIN                         [⚙] │
//! │                                    │
//! │                                    │
//! │────────────────────────────────────│
//! │  HOME    SHOP    PLAY    PROFILE   │
//! └────────────────────────────────────┘
//! ```
//!
//! The HOME tab is drawn as selected and is not bound.

use tracing::info;

use crate::input::{Bindings, Control, Intent};
use crate::localization::TextLookup;
use crate::screen::ScreenHooks;
use crate::widgets::LabelSet;

pub const HOME_LABELS: [&str; 4] = ["nav_home", "nav_shop", "nav_play", "nav_profile"];

/// Controls bound while Home is entered.
const HOME_BINDINGS: Bindings = Bindings::of(&[Control::Settings, Control::NavShop, Control::NavPlay, Control::NavProfile]);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeScreen {
    labels: LabelSet,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            labels: LabelSet::from_keys(&HOME_LABELS),
        }
    }
}

impl Default for HomeScreen {
    fn default() -> Self { Self::new() }
}

impl ScreenHooks for HomeScreen {
    fn on_enter(
        &mut self,
        _text: &dyn TextLookup,
    ) -> Bindings {
        HOME_BINDINGS
    }

    fn on_press(
        &mut self,
        control: Control,
        _text: &dyn TextLookup,
    ) -> Option<Intent> {
        let intent = match control {
            Control::Settings => Intent::OpenSettings,
            Control::NavShop => Intent::Shop,
            Control::NavPlay => Intent::Play,
            Control::NavProfile => Intent::Profile,
            _ => return None,
        };
        info!(control = %control, "Home button pressed");
        Some(intent)
    }

    fn labels(&self) -> Option<&LabelSet> { Some(&self.labels) }

    fn labels_mut(&mut self) -> Option<&mut LabelSet> { Some(&mut self.labels) }
}

// =============================================================================
// Unit Tests
// =============================================================================
