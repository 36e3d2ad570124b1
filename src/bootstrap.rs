//! Startup sequence: Logo → Loading → Splash.
//!
//! ```text
//! start()
//!   hide every screen
//!   show Logo immediately          stage: ShowingLogo
//! tick() after logo display time
//!   transition_to(Loading)         stage: AwaitingLoading
//! tick() once Loading reports completion
//!   transition_to(Splash)          stage: Finished
//! ```
//!
//! The sequence runs once. It is not retried and cannot be restarted.
//!
//! There is no timeout on the wait for Loading. If Loading never completes,
//! the bootstrap stays in `AwaitingLoading` forever and the user stays on the
//! loading screen; nothing reports it except the absence of progress.

use core::time::Duration;

use tracing::{info, warn};

use crate::config::FlowConfig;
use crate::engine::{Request, TransitionEngine};
use crate::localization::TextLookup;
use crate::screen::ScreenId;
use crate::screens::Screens;
use crate::timing::{Easing, Sequence, Step};

/// Bootstrap progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    NotStarted,
    ShowingLogo,
    AwaitingLoading,
    Finished,
}

#[derive(Clone, Debug)]
pub struct Bootstrap {
    stage: Stage,
    logo_display_time: Duration,
    logo_timer: Sequence,
}

impl Bootstrap {
    pub const fn new(logo_display_time: Duration) -> Self {
        Self {
            stage: Stage::NotStarted,
            logo_display_time,
            logo_timer: Sequence::idle(),
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self { Self::new(config.logo_display_time()) }

    #[inline]
    pub const fn stage(&self) -> Stage { self.stage }

    #[inline]
    pub const fn is_finished(&self) -> bool { matches!(self.stage, Stage::Finished) }

    /// Hide every screen, show Logo, and start the logo timer.
    ///
    /// Returns `false` (and does nothing) if the bootstrap already started.
    pub fn start(
        &mut self,
        engine: &mut TransitionEngine,
        screens: &mut Screens,
        text: &dyn TextLookup,
    ) -> bool {
        if self.stage != Stage::NotStarted {
            warn!(stage = ?self.stage, "Bootstrap already started");
            return false;
        }

        engine.hide_all(screens);
        if engine.show_immediate(ScreenId::Logo, screens, text) != Request::Started {
            warn!("Logo screen unavailable, continuing without it");
        }
        self.logo_timer.start(self.logo_display_time, Easing::Linear);
        self.stage = Stage::ShowingLogo;
        info!(logo_display_time = ?self.logo_display_time, "Bootstrap started");
        true
    }

    /// Advance the sequence. Call after the engine and screens were ticked.
    pub fn tick(
        &mut self,
        dt: Duration,
        engine: &mut TransitionEngine,
        screens: &mut Screens,
        text: &dyn TextLookup,
    ) {
        match self.stage {
            Stage::ShowingLogo => {
                if let Step::Finished { overflow } = self.logo_timer.advance(dt) {
                    let request = engine.transition_to(ScreenId::Loading, screens, text);
                    Self::request(request, ScreenId::Loading);
                    self.stage = Stage::AwaitingLoading;
                    // The transition starts when the logo time ran out, not at the end of this tick.
                    if request.is_started() {
                        engine.tick(overflow, screens, text);
                    }
                }
            }
            Stage::AwaitingLoading => {
                if screens.is_loading_complete() {
                    Self::request(engine.transition_to(ScreenId::Splash, screens, text), ScreenId::Splash);
                    self.stage = Stage::Finished;
                    info!("Bootstrap finished");
                }
            }
            Stage::NotStarted | Stage::Finished => {}
        }
    }

    fn request(
        request: Request,
        target: ScreenId,
    ) {
        if !request.is_started() {
            warn!(screen = %target, outcome = ?request, "Bootstrap transition was not started");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
