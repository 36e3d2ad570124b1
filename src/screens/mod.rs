//! The five screens of the GOLFIN flow and the registry that owns them.
//!
//! # Navigation
//!
//! 1. **Logo** ([`logo`]): shown immediately at startup
//! 2. **Loading** ([`loading`]): simulated download, progress bar, pro tips
//! 3. **Splash** ([`splash`]): START / CREATE ACCOUNT
//! 4. **Home** ([`home`]): hub with navigation bar and settings button
//! 5. **Settings** ([`settings`]): toggles, language, back to Home
//!
//! Logo → Loading → Splash is driven by [`crate::bootstrap`]. Everything after
//! Splash is press-driven.
//!
//! # Registry
//!
//! [`Screens`] is created once at startup and lives for the whole process.
//! A slot left empty models an unset screen reference: the engine treats
//! requests for it as no-ops.

pub mod home;
pub mod loading;
pub mod logo;
pub mod settings;
pub mod splash;

pub use home::HomeScreen;
pub use loading::{LoadPhase, LoadingScreen};
pub use logo::LogoScreen;
pub use settings::SettingsScreen;
pub use splash::SplashScreen;

use core::time::Duration;

use crate::config::FlowConfig;
use crate::engine::ScreenRegistry;
use crate::localization::TextLookup;
use crate::screen::{AnyScreen, Screen, ScreenId};

/// Owner of every screen instance.
#[derive(Clone, Debug)]
pub struct Screens {
    logo: Option<Screen<LogoScreen>>,
    loading: Option<Screen<LoadingScreen>>,
    splash: Option<Screen<SplashScreen>>,
    home: Option<Screen<HomeScreen>>,
    settings: Option<Screen<SettingsScreen>>,
}

impl Screens {
    /// Register all five screens, hidden.
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            logo: Some(Screen::new(ScreenId::Logo, LogoScreen)),
            loading: Some(Screen::new(ScreenId::Loading, LoadingScreen::from_config(config))),
            splash: Some(Screen::new(ScreenId::Splash, SplashScreen::new())),
            home: Some(Screen::new(ScreenId::Home, HomeScreen::new())),
            settings: Some(Screen::new(ScreenId::Settings, SettingsScreen::new())),
        }
    }

    /// A registry with no screens.
    pub const fn empty() -> Self {
        Self {
            logo: None,
            loading: None,
            splash: None,
            home: None,
            settings: None,
        }
    }

    /// Drop the screen registered under `id`.
    #[must_use]
    pub fn without(
        mut self,
        id: ScreenId,
    ) -> Self {
        match id {
            ScreenId::Logo => self.logo = None,
            ScreenId::Loading => self.loading = None,
            ScreenId::Splash => self.splash = None,
            ScreenId::Home => self.home = None,
            ScreenId::Settings => self.settings = None,
        }
        self
    }

    /// Whether the loading screen reports completion. `false` if unregistered.
    pub fn is_loading_complete(&self) -> bool {
        self.loading.as_ref().is_some_and(|screen| screen.hooks().is_loading_complete())
    }

    /// Run per-tick behavior on every registered screen. Hidden screens skip it.
    pub fn update(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    ) {
        for id in ScreenId::ALL {
            if let Some(screen) = self.get_mut(id) {
                screen.update(dt, text);
            }
        }
    }

    /// Registered screens in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn AnyScreen> { ScreenId::ALL.into_iter().filter_map(|id| self.get(id)) }

    /// Ids of registered screens in navigation order.
    pub fn ids(&self) -> impl Iterator<Item = ScreenId> + '_ {
        ScreenId::ALL.into_iter().filter(|id| self.get(*id).is_some())
    }

    #[inline]
    pub const fn loading(&self) -> Option<&Screen<LoadingScreen>> { self.loading.as_ref() }

    #[inline]
    pub const fn splash(&self) -> Option<&Screen<SplashScreen>> { self.splash.as_ref() }

    #[inline]
    pub const fn home(&self) -> Option<&Screen<HomeScreen>> { self.home.as_ref() }

    #[inline]
    pub const fn settings(&self) -> Option<&Screen<SettingsScreen>> { self.settings.as_ref() }
}

impl ScreenRegistry for Screens {
    fn get(
        &self,
        id: ScreenId,
    ) -> Option<&dyn AnyScreen> {
        match id {
            ScreenId::Logo => self.logo.as_ref().map(|s| s as &dyn AnyScreen),
            ScreenId::Loading => self.loading.as_ref().map(|s| s as &dyn AnyScreen),
            ScreenId::Splash => self.splash.as_ref().map(|s| s as &dyn AnyScreen),
            ScreenId::Home => self.home.as_ref().map(|s| s as &dyn AnyScreen),
            ScreenId::Settings => self.settings.as_ref().map(|s| s as &dyn AnyScreen),
        }
    }

    fn get_mut(
        &mut self,
        id: ScreenId,
    ) -> Option<&mut dyn AnyScreen> {
        match id {
            ScreenId::Logo => self.logo.as_mut().map(|s| s as &mut dyn AnyScreen),
            ScreenId::Loading => self.loading.as_mut().map(|s| s as &mut dyn AnyScreen),
            ScreenId::Splash => self.splash.as_mut().map(|s| s as &mut dyn AnyScreen),
            ScreenId::Home => self.home.as_mut().map(|s| s as &mut dyn AnyScreen),
            ScreenId::Settings => self.settings.as_mut().map(|s| s as &mut dyn AnyScreen),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Visibility;

    #[test]
    fn test_all_screens_registered_and_hidden() {
        let screens = Screens::new(&FlowConfig::default());
        assert_eq!(screens.ids().collect::<Vec<_>>(), ScreenId::ALL.to_vec());
        assert!(screens.iter().all(|s| s.visibility() == Visibility::Hidden));
        for id in ScreenId::ALL {
            assert_eq!(screens.get(id).map(AnyScreen::id), Some(id));
        }
    }

    #[test]
    fn test_without_leaves_slot_empty() {
        let screens = Screens::new(&FlowConfig::default()).without(ScreenId::Settings);
        assert!(screens.get(ScreenId::Settings).is_none());
        assert!(screens.settings().is_none());
        assert_eq!(screens.iter().count(), 4);
    }

    #[test]
    fn test_loading_complete_false_when_missing() {
        assert!(!Screens::empty().is_loading_complete());
        assert!(!Screens::new(&FlowConfig::default()).is_loading_complete());
    }
}
