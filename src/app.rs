//! Host orchestration: the context object that ties the flow together.
//!
//! [`App`] owns the configuration, the localization table, the screens, the
//! transition engine, and the bootstrap. A host creates one at startup, calls
//! [`App::start`] once, then on every frame:
//!
//! ```ignore
//! app.tick(frame_dt);
//! if let Some(control) = poll_input() {
//!     app.press(control);
//! }
//! draw(&app);
//! ```
//!
//! # Tick Order
//!
//! 1. Screens run their per-tick behavior (loading ramp, carousel, labels)
//! 2. The engine advances the transition in flight
//! 3. The bootstrap checks its timer and the loading flag
//!
//! A screen entered during step 2 gets its first update on the next tick, so
//! the loading ramp starts counting from the moment Loading is fully visible.
//!
//! # Intent Dispatch
//!
//! | Intent          | Action                       |
//! |-----------------|------------------------------|
//! | `Start`         | transition to Home           |
//! | `OpenSettings`  | transition to Settings       |
//! | `Back`          | transition to Home           |
//! | `CycleLanguage` | switch to the next language  |
//! | others          | returned to the caller only  |

use core::time::Duration;

use tracing::{debug, info};

use crate::bootstrap::Bootstrap;
use crate::config::FlowConfig;
use crate::engine::{Request, ScreenRegistry, TransitionEngine};
use crate::input::{Control, Intent};
use crate::journal::Journal;
use crate::localization::Localizer;
use crate::screen::ScreenId;
use crate::screens::Screens;

pub struct App {
    config: FlowConfig,
    locale: Localizer,
    screens: Screens,
    engine: TransitionEngine,
    bootstrap: Bootstrap,
    /// Time since `start`.
    elapsed: Duration,
}

impl App {
    /// Build the flow with every screen registered.
    pub fn new(
        config: FlowConfig,
        locale: Localizer,
    ) -> Self {
        let screens = Screens::new(&config);
        Self::with_screens(config, locale, screens)
    }

    /// Build the flow around a prepared registry.
    pub fn with_screens(
        config: FlowConfig,
        locale: Localizer,
        screens: Screens,
    ) -> Self {
        Self {
            engine: TransitionEngine::new(config.fade_duration()),
            bootstrap: Bootstrap::from_config(&config),
            config,
            locale,
            screens,
            elapsed: Duration::ZERO,
        }
    }

    /// Run the bootstrap's first steps: hide everything and show Logo.
    pub fn start(&mut self) -> bool {
        self.elapsed = Duration::ZERO;
        self.bootstrap.start(&mut self.engine, &mut self.screens, &self.locale)
    }

    /// Advance the whole flow by `dt` of wall-clock time.
    pub fn tick(
        &mut self,
        dt: Duration,
    ) {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.screens.update(dt, &self.locale);
        self.engine.tick(dt, &mut self.screens, &self.locale);
        self.bootstrap.tick(dt, &mut self.engine, &mut self.screens, &self.locale);
    }

    /// Deliver a press to the current screen and act on the resulting intent.
    ///
    /// Returns the intent, if the screen raised one.
    pub fn press(
        &mut self,
        control: Control,
    ) -> Option<Intent> {
        let current = self.engine.current()?;
        let intent = self.screens.get_mut(current)?.press(control, &self.locale);

        let Some(intent) = intent else {
            debug!(control = %control, screen = %current, "Press not handled");
            return None;
        };

        if let Some(destination) = intent.destination() {
            let _ = self.navigate(destination);
        } else if intent == Intent::CycleLanguage {
            if let Some(language) = self.locale.cycle_language() {
                info!(language, "Language cycled");
            }
        } else {
            info!(intent = ?intent, "Intent raised");
        }
        Some(intent)
    }

    /// Crossfade to `id`. See [`TransitionEngine::transition_to`].
    pub fn navigate(
        &mut self,
        id: ScreenId,
    ) -> Request {
        self.engine.transition_to(id, &mut self.screens, &self.locale)
    }

    /// Switch the active language; enabled labels follow on the next tick.
    pub fn set_language(
        &mut self,
        code: &str,
    ) {
        self.locale.set_language(code);
    }

    #[inline]
    pub const fn config(&self) -> &FlowConfig { &self.config }

    #[inline]
    pub const fn locale(&self) -> &Localizer { &self.locale }

    #[inline]
    pub const fn screens(&self) -> &Screens { &self.screens }

    #[inline]
    pub const fn engine(&self) -> &TransitionEngine { &self.engine }

    #[inline]
    pub const fn bootstrap(&self) -> &Bootstrap { &self.bootstrap }

    #[inline]
    pub const fn journal(&self) -> &Journal { self.engine.journal() }

    #[inline]
    pub const fn current(&self) -> Option<ScreenId> { self.engine.current() }

    #[inline]
    pub const fn elapsed(&self) -> Duration { self.elapsed }
}

// =============================================================================
// Unit Tests
// =============================================================================
