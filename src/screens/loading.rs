//! Loading screen: simulated download with a progress bar and pro tips.
//!
//! # Visual Layout
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │            NOW LOADING             │
//! │  ┌──────────────────────────────┐  │
//! │  │ PRO TIP                      │  │  Tip card (press: next tip)
//! │  │ Use {gold}rare{/gold} clubs  │  │
//! │  │            TAP FOR NEXT TIP  │  │
//! │  └──────────────────────────────┘  │
//! │  ██████████████▌                   │  Loading bar
//! │  133.50 / 267 MB                   │  Download label
//! └────────────────────────────────────┘
//! ```
//!
//! # Sub-Flow
//!
//! ```text
//! enter ──→ Ramping ──(simulated load time)──→ Holding ──(hold)──→ Complete
//!             displayed = 1 - (1 - t/T)^2        displayed = 1
//! ```
//!
//! Exiting cancels the ramp, the hold, and the tip carousel. The bootstrap
//! polls [`LoadingScreen::is_loading_complete`].

use core::fmt::Write;
use core::time::Duration;

use heapless::String;
use tracing::{debug, info};

use crate::carousel::TipCarousel;
use crate::config::{FlowConfig, MAX_DOWNLOAD_MB};
use crate::input::{Bindings, Control, Intent};
use crate::localization::TextLookup;
use crate::screen::ScreenHooks;
use crate::timing::{Easing, Sequence, Step};
use crate::widgets::{LabelSet, LoadingBar};

/// Capacity of [`LoadingScreen::download_label`]. Fits "1000000.00 / 1000000 MB".
pub const DOWNLOAD_LABEL_LENGTH: usize = 32;

/// Label keys shown on the loading screen.
pub const LOADING_LABELS: [&str; 3] = ["loading_now", "tip_header", "tip_next"];

/// Where the simulated load is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Not entered yet, or exited before completion.
    #[default]
    Idle,
    Ramping,
    /// Ramp done, pausing at 100%.
    Holding,
    Complete,
}

/// Loading screen hooks.
#[derive(Clone, Debug)]
pub struct LoadingScreen {
    phase: LoadPhase,
    ramp: Sequence,
    hold: Sequence,
    load_time: Duration,
    hold_time: Duration,
    total_size_mb: f32,
    tip_keys: Vec<std::string::String>,
    bar: LoadingBar,
    carousel: TipCarousel,
    labels: LabelSet,
}

impl LoadingScreen {
    pub fn new(
        load_time: Duration,
        hold_time: Duration,
        total_size_mb: f32,
        tip_keys: Vec<std::string::String>,
        carousel: TipCarousel,
    ) -> Self {
        Self {
            phase: LoadPhase::Idle,
            ramp: Sequence::idle(),
            hold: Sequence::idle(),
            load_time,
            hold_time,
            total_size_mb: total_size_mb.clamp(0.0, MAX_DOWNLOAD_MB),
            tip_keys,
            bar: LoadingBar::new(),
            carousel,
            labels: LabelSet::from_keys(&LOADING_LABELS),
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(
            config.simulated_load_time(),
            config.load_complete_hold(),
            config.loading.total_size_mb,
            config.tips.keys.clone(),
            TipCarousel::from_config(config),
        )
    }

    /// True once the ramp and the hold at 100% have both elapsed.
    #[inline]
    pub const fn is_loading_complete(&self) -> bool { matches!(self.phase, LoadPhase::Complete) }

    #[inline]
    pub const fn phase(&self) -> LoadPhase { self.phase }

    /// Eased progress, `0.0..=1.0`.
    pub fn displayed_progress(&self) -> f32 {
        match self.phase {
            LoadPhase::Holding | LoadPhase::Complete => 1.0,
            LoadPhase::Idle | LoadPhase::Ramping => self.ramp.progress(),
        }
    }

    /// `"<current> / <total> MB"`, current with two decimals.
    pub fn download_label(&self) -> String<DOWNLOAD_LABEL_LENGTH> {
        let current = self.displayed_progress() * self.total_size_mb;
        let mut label = String::new();
        let _ = write!(label, "{current:.2} / {:.0} MB", self.total_size_mb);
        label
    }

    #[inline]
    pub const fn bar(&self) -> &LoadingBar { &self.bar }

    #[inline]
    pub const fn carousel(&self) -> &TipCarousel { &self.carousel }

    fn complete(&mut self) {
        self.phase = LoadPhase::Complete;
        info!("Loading complete");
    }

    fn start_hold(
        &mut self,
        overflow: Duration,
    ) {
        self.bar.set_progress(1.0);
        self.phase = LoadPhase::Holding;
        self.hold.start(self.hold_time, Easing::Linear);
        if let Step::Finished { .. } = self.hold.advance(overflow) {
            self.complete();
        }
    }
}

impl ScreenHooks for LoadingScreen {
    fn on_enter(
        &mut self,
        text: &dyn TextLookup,
    ) -> Bindings {
        self.phase = LoadPhase::Ramping;
        self.bar.set_immediate(0.0);
        self.hold = Sequence::idle();
        self.ramp.start(self.load_time, Easing::EaseOutQuad);
        self.carousel.initialize(&self.tip_keys, text);
        debug!(load_time = ?self.load_time, tips = self.tip_keys.len(), "Loading started");

        // A zero-length ramp completes without waiting for a tick.
        if let Step::Finished { overflow } = self.ramp.advance(Duration::ZERO) {
            self.start_hold(overflow);
        }

        Bindings::of(&[Control::TipCard])
    }

    fn on_exit(&mut self) {
        if !self.is_loading_complete() {
            debug!(progress = self.displayed_progress(), "Loading screen left before completion");
        }
    }

    fn cancel_tasks(&mut self) {
        self.ramp.cancel();
        self.hold.cancel();
        self.carousel.cancel();
        if self.phase != LoadPhase::Complete {
            self.phase = LoadPhase::Idle;
        }
    }

    fn update(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    ) {
        match self.phase {
            LoadPhase::Ramping => match self.ramp.advance(dt) {
                Step::Running(progress) => self.bar.set_progress(progress),
                Step::Finished { overflow } => self.start_hold(overflow),
                Step::Inactive => {}
            },
            LoadPhase::Holding => {
                if let Step::Finished { .. } = self.hold.advance(dt) {
                    self.complete();
                }
            }
            LoadPhase::Idle | LoadPhase::Complete => {}
        }

        self.bar.update(dt);
        self.carousel.tick(dt, text);
    }

    fn on_press(
        &mut self,
        control: Control,
        _text: &dyn TextLookup,
    ) -> Option<Intent> {
        if control == Control::TipCard {
            self.carousel.press();
        }
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
    use crate::config::{LOAD_COMPLETE_HOLD, SIMULATED_LOAD_TIME};
    use crate::localization::Localizer;

    const TICK: Duration = Duration::from_millis(100);

    fn text() -> Localizer {
        Localizer::from_csv("key,en\ntip_club_bag,Pack your {gold}bag{/gold}\nloading_now,NOW LOADING\n", "en").unwrap()
    }

    fn loading() -> LoadingScreen { LoadingScreen::from_config(&FlowConfig::default()) }

    fn run(
        screen: &mut LoadingScreen,
        text: &Localizer,
        ticks: u32,
    ) {
        for _ in 0..ticks {
            screen.update(TICK, text);
        }
    }

    #[test]
    fn test_enter_resets_and_binds_tip_card() {
        let text = text();
        let mut screen = loading();
        let bindings = screen.on_enter(&text);

        assert!(bindings.contains(Control::TipCard));
        assert_eq!(screen.phase(), LoadPhase::Ramping);
        assert!(!screen.is_loading_complete());
        assert!(screen.displayed_progress().abs() < 1e-6);
        assert_eq!(screen.carousel().index(), 0);
        assert_eq!(screen.carousel().text(), "Pack your {gold}bag{/gold}");
    }

    #[test]
    fn test_progress_at_half_time_is_three_quarters() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);

        run(&mut screen, &text, 40);
        assert!((screen.displayed_progress() - 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_progress_follows_ease_out_curve() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);

        let mut previous = 0.0;
        for tick in 1..=80 {
            screen.update(TICK, &text);
            let t = tick as f32 / 80.0;
            let expected = 1.0 - (1.0 - t) * (1.0 - t);
            let progress = screen.displayed_progress();
            assert!((progress - expected).abs() < 1e-3, "tick {tick}: {progress} vs {expected}");
            assert!(progress >= previous, "Progress must never decrease");
            previous = progress;
        }
    }

    #[test]
    fn test_complete_only_after_ramp_plus_hold() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);

        run(&mut screen, &text, 80);
        assert_eq!(screen.phase(), LoadPhase::Holding, "Ramp done at 8 s");
        assert!(!screen.is_loading_complete());

        run(&mut screen, &text, 4);
        assert!(!screen.is_loading_complete(), "Still holding at 8.4 s");

        run(&mut screen, &text, 1);
        assert!(screen.is_loading_complete(), "Complete at 8.5 s");
        assert!((screen.displayed_progress() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_large_tick_completes() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);
        screen.update(Duration::from_millis(8500), &text);
        assert!(screen.is_loading_complete());
    }

    #[test]
    fn test_exit_cancels_everything() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);
        run(&mut screen, &text, 20);
        let progress = screen.displayed_progress();

        screen.on_exit();
        screen.cancel_tasks();
        assert_eq!(screen.phase(), LoadPhase::Idle);
        assert!(!screen.carousel().is_running());

        run(&mut screen, &text, 200);
        assert!(!screen.is_loading_complete(), "Cancelled ramp never completes");
        assert!((screen.displayed_progress() - progress).abs() < 1e-6, "Partial progress kept");
    }

    #[test]
    fn test_re_enter_restarts_from_zero() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);
        screen.update(Duration::from_secs(9), &text);
        assert!(screen.is_loading_complete());

        screen.cancel_tasks();
        screen.on_enter(&text);
        assert!(!screen.is_loading_complete());
        assert!(screen.displayed_progress().abs() < 1e-6);
    }

    #[test]
    fn test_download_label() {
        let text = text();
        let mut screen = loading();
        assert_eq!(screen.download_label().as_str(), "0.00 / 267 MB");

        screen.on_enter(&text);
        run(&mut screen, &text, 40);
        assert_eq!(screen.download_label().as_str(), "200.25 / 267 MB");
    }

    #[test]
    fn test_download_label_fits_oversized_total() {
        let text = text();
        let config = FlowConfig::default();
        let carousel = TipCarousel::from_config(&config);
        let mut screen = LoadingScreen::new(SIMULATED_LOAD_TIME, LOAD_COMPLETE_HOLD, 1e20, config.tips.keys, carousel);
        assert_eq!(screen.download_label().as_str(), "0.00 / 1000000 MB");

        screen.on_enter(&text);
        run(&mut screen, &text, 90);
        assert_eq!(screen.download_label().as_str(), "1000000.00 / 1000000 MB");
    }

    #[test]
    fn test_tip_card_press_advances_carousel() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);

        assert_eq!(screen.on_press(Control::TipCard, &text), None);
        screen.update(Duration::from_secs(1), &text);
        assert_eq!(screen.carousel().index(), 1);
    }

    #[test]
    fn test_zero_load_time_skips_ramp() {
        let text = text();
        let mut config = FlowConfig::default();
        config.loading.simulated_load_secs = 0.0;
        config.loading.hold_secs = 0.0;

        let mut screen = LoadingScreen::from_config(&config);
        screen.on_enter(&text);
        assert!(screen.is_loading_complete());
    }

    #[test]
    fn test_bar_tracks_ramp() {
        let text = text();
        let mut screen = loading();
        screen.on_enter(&text);
        run(&mut screen, &text, 85);
        assert!((screen.bar().fill() - 1.0).abs() < 1e-4);
    }
}
