//! Press input: controls, listener bindings, and the intents presses resolve to.
//!
//! Input devices are out of scope. A host reports that an interactive element
//! was activated by calling [`crate::app::App::press`] with a [`Control`]; the
//! current screen turns it into an optional [`Intent`] for the host to act on.
//!
//! A screen only hears the controls it bound in its enter hook. Bindings are a
//! bit set, so binding the same control twice can't make it fire twice.

use core::fmt;

use crate::screen::ScreenId;

/// Interactive elements a screen can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Splash "START".
    Start,
    /// Splash "CREATE ACCOUNT".
    CreateAccount,
    /// Home gear button.
    Settings,
    /// Home navigation bar.
    NavHome,
    NavShop,
    NavPlay,
    NavProfile,
    /// Settings back arrow.
    Back,
    /// Settings toggles.
    SoundToggle,
    MusicToggle,
    NotificationsToggle,
    /// Settings language selector.
    Language,
    /// Loading screen pro tip card ("TAP FOR NEXT TIP").
    TipCard,
}

impl Control {
    /// Every control, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Start,
        Self::CreateAccount,
        Self::Settings,
        Self::NavHome,
        Self::NavShop,
        Self::NavPlay,
        Self::NavProfile,
        Self::Back,
        Self::SoundToggle,
        Self::MusicToggle,
        Self::NotificationsToggle,
        Self::Language,
        Self::TipCard,
    ];

    #[inline]
    const fn bit(self) -> u16 { 1 << (self as u16) }

    /// Short label for logs and overlays.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::CreateAccount => "create_account",
            Self::Settings => "settings",
            Self::NavHome => "nav_home",
            Self::NavShop => "nav_shop",
            Self::NavPlay => "nav_play",
            Self::NavProfile => "nav_profile",
            Self::Back => "back",
            Self::SoundToggle => "sound",
            Self::MusicToggle => "music",
            Self::NotificationsToggle => "notifications",
            Self::Language => "language",
            Self::TipCard => "tip_card",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of controls a screen listens to while entered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bindings(u16);

impl Bindings {
    /// No listeners.
    pub const NONE: Self = Self(0);

    /// Build a set from a list of controls.
    pub const fn of(controls: &[Control]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < controls.len() {
            bits |= controls[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Add a control to the set.
    #[inline]
    #[must_use]
    pub const fn with(
        self,
        control: Control,
    ) -> Self {
        Self(self.0 | control.bit())
    }

    #[inline]
    pub const fn contains(
        self,
        control: Control,
    ) -> bool {
        self.0 & control.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    #[inline]
    pub const fn len(self) -> usize { self.0.count_ones() as usize }

    /// Iterate the bound controls in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Control> { Control::ALL.into_iter().filter(move |c| self.contains(*c)) }
}

/// What a press means to the host.
///
/// Screens never navigate on their own; they raise intents and the host
/// decides which engine call, if any, follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Splash START pressed.
    Start,
    /// Splash CREATE ACCOUNT pressed.
    CreateAccount,
    /// Home settings button pressed.
    OpenSettings,
    /// Home navigation bar.
    Shop,
    Play,
    Profile,
    /// Settings back arrow pressed.
    Back,
    /// Settings language selector pressed.
    CycleLanguage,
}

impl Intent {
    /// Screen the host navigates to for this intent, if any.
    pub const fn destination(self) -> Option<ScreenId> {
        match self {
            Self::Start | Self::Back => Some(ScreenId::Home),
            Self::OpenSettings => Some(ScreenId::Settings),
            Self::CreateAccount | Self::Shop | Self::Play | Self::Profile | Self::CycleLanguage => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_contains() {
        let bindings = Bindings::of(&[Control::Start, Control::CreateAccount]);
        assert!(bindings.contains(Control::Start));
        assert!(bindings.contains(Control::CreateAccount));
        assert!(!bindings.contains(Control::Back));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_bindings_are_a_set() {
        let bindings = Bindings::NONE.with(Control::TipCard).with(Control::TipCard);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.iter().collect::<Vec<_>>(), vec![Control::TipCard]);
    }

    #[test]
    fn test_all_controls_fit_in_bitset() {
        let all = Bindings::of(&Control::ALL);
        assert_eq!(all.len(), Control::ALL.len());
        assert!(Bindings::NONE.is_empty());
    }

    #[test]
    fn test_intent_destinations() {
        assert_eq!(Intent::Start.destination(), Some(ScreenId::Home));
        assert_eq!(Intent::OpenSettings.destination(), Some(ScreenId::Settings));
        assert_eq!(Intent::Back.destination(), Some(ScreenId::Home));
        assert_eq!(Intent::Shop.destination(), None);
        assert_eq!(Intent::CycleLanguage.destination(), None);
    }
}
