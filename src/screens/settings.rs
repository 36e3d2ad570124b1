//! Settings screen: back arrow, three toggles, and the language selector.
//!
//! Toggle state lives in memory only and resets with the process. Each toggle
//! has an ON/OFF state label after the row labels; flipping the toggle points
//! it at the other key.

use tracing::info;

use crate::input::{Bindings, Control, Intent};
use crate::localization::TextLookup;
use crate::screen::ScreenHooks;
use crate::widgets::{LabelSet, LocalizedText};

pub const SETTINGS_LABELS: [&str; 5] = [
    "settings_title",
    "settings_sound",
    "settings_music",
    "settings_notifications",
    "settings_language",
];

/// Toggles in row order.
pub const SETTINGS_TOGGLES: [Control; 3] = [Control::SoundToggle, Control::MusicToggle, Control::NotificationsToggle];

const SETTINGS_BINDINGS: Bindings = Bindings::of(&[
    Control::Back,
    Control::SoundToggle,
    Control::MusicToggle,
    Control::NotificationsToggle,
    Control::Language,
]);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsScreen {
    sound: bool,
    music: bool,
    notifications: bool,
    labels: LabelSet,
}

impl SettingsScreen {
    /// Every toggle starts on.
    pub fn new() -> Self {
        Self {
            sound: true,
            music: true,
            notifications: true,
            labels: Self::initial_labels(),
        }
    }

    fn initial_labels() -> LabelSet {
        let mut labels = LabelSet::from_keys(&SETTINGS_LABELS);
        for _ in SETTINGS_TOGGLES {
            labels.push(LocalizedText::new(state_key(true)));
        }
        labels
    }

    /// Localized ON/OFF text of a toggle row.
    pub fn state_text(
        &self,
        control: Control,
    ) -> Option<&str> {
        self.labels.at(state_slot(control)?).map(LocalizedText::text)
    }

    #[inline]
    pub const fn sound(&self) -> bool { self.sound }

    #[inline]
    pub const fn music(&self) -> bool { self.music }

    #[inline]
    pub const fn notifications(&self) -> bool { self.notifications }
}

fn state_key(on: bool) -> &'static str { if on { "settings_on" } else { "settings_off" } }

/// Index of a toggle's state label in the screen's label set.
fn state_slot(control: Control) -> Option<usize> {
    SETTINGS_TOGGLES.iter().position(|c| *c == control).map(|row| SETTINGS_LABELS.len() + row)
}

impl Default for SettingsScreen {
    fn default() -> Self { Self::new() }
}

impl ScreenHooks for SettingsScreen {
    fn on_enter(
        &mut self,
        _text: &dyn TextLookup,
    ) -> Bindings {
        SETTINGS_BINDINGS
    }

    fn on_press(
        &mut self,
        control: Control,
        text: &dyn TextLookup,
    ) -> Option<Intent> {
        let (name, value) = match control {
            Control::Back => {
                info!("Back pressed, returning to Home");
                return Some(Intent::Back);
            }
            Control::Language => return Some(Intent::CycleLanguage),
            Control::SoundToggle => ("sound", &mut self.sound),
            Control::MusicToggle => ("music", &mut self.music),
            Control::NotificationsToggle => ("notifications", &mut self.notifications),
            _ => return None,
        };
        *value = !*value;
        let enabled = *value;
        if let Some(slot) = state_slot(control) {
            self.labels.set_key(slot, state_key(enabled), text);
        }
        info!(setting = name, enabled, "Setting toggled");
        None
    }

    fn labels(&self) -> Option<&LabelSet> { Some(&self.labels) }

    fn labels_mut(&mut self) -> Option<&mut LabelSet> { Some(&mut self.labels) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::Localizer;

    #[test]
    fn test_toggles_flip() {
        let text = Localizer::new("en");
        let mut settings = SettingsScreen::new();

        assert_eq!(settings.on_press(Control::SoundToggle, &text), None);
        assert!(!settings.sound());
        settings.on_press(Control::SoundToggle, &text);
        assert!(settings.sound());

        settings.on_press(Control::MusicToggle, &text);
        settings.on_press(Control::NotificationsToggle, &text);
        assert!(!settings.music());
        assert!(!settings.notifications());
    }

    #[test]
    fn test_state_labels_follow_toggles() {
        let mut text = Localizer::from_csv("key,en,es\nsettings_on,ON,SÍ\nsettings_off,OFF,NO\n", "en").unwrap();
        let mut settings = SettingsScreen::new();
        settings.labels_mut().unwrap().enable_all(&text);
        assert_eq!(settings.state_text(Control::SoundToggle), Some("ON"));

        settings.on_press(Control::SoundToggle, &text);
        assert_eq!(settings.state_text(Control::SoundToggle), Some("OFF"));
        assert_eq!(settings.state_text(Control::MusicToggle), Some("ON"));
        assert_eq!(settings.state_text(Control::Back), None);

        text.set_language("es");
        settings.labels_mut().unwrap().refresh(&text);
        assert_eq!(settings.state_text(Control::SoundToggle), Some("NO"));
        assert_eq!(settings.state_text(Control::MusicToggle), Some("SÍ"));
    }

    #[test]
    fn test_back_and_language_intents() {
        let text = Localizer::new("en");
        let mut settings = SettingsScreen::new();
        assert!(settings.on_enter(&text).contains(Control::Language));
        assert_eq!(settings.on_press(Control::Back, &text), Some(Intent::Back));
        assert_eq!(settings.on_press(Control::Language, &text), Some(Intent::CycleLanguage));
    }
}
