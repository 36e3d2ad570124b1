//! Splash screen: game art with START and CREATE ACCOUNT buttons.

use tracing::info;

use crate::input::{Bindings, Control, Intent};
use crate::localization::TextLookup;
use crate::screen::ScreenHooks;
use crate::widgets::LabelSet;

pub const SPLASH_LABELS: [&str; 2] = ["splash_start", "splash_create_account"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplashScreen {
    labels: LabelSet,
}

impl SplashScreen {
    pub fn new() -> Self {
        Self {
            labels: LabelSet::from_keys(&SPLASH_LABELS),
        }
    }
}

impl Default for SplashScreen {
    fn default() -> Self { Self::new() }
}

impl ScreenHooks for SplashScreen {
    fn on_enter(
        &mut self,
        _text: &dyn TextLookup,
    ) -> Bindings {
        Bindings::of(&[Control::Start, Control::CreateAccount])
    }

    fn on_press(
        &mut self,
        control: Control,
        _text: &dyn TextLookup,
    ) -> Option<Intent> {
        match control {
            Control::Start => {
                info!("START pressed");
                Some(Intent::Start)
            }
            Control::CreateAccount => {
                info!("CREATE ACCOUNT pressed");
                Some(Intent::CreateAccount)
            }
            _ => None,
        }
    }

    fn labels(&self) -> Option<&LabelSet> { Some(&self.labels) }

    fn labels_mut(&mut self) -> Option<&mut LabelSet> { Some(&mut self.labels) }
}

// =============================================================================
// Unit Tests
// =============================================================================
