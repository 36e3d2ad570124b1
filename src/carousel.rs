//! Pro tip carousel shown on the loading screen.
//!
//! Cycles through a fixed list of localization keys. An auto-advance timer
//! moves to the next tip every cycle interval; pressing the tip card advances
//! immediately and restarts the timer so the user's pick isn't replaced a
//! moment later.
//!
//! # Crossfade
//!
//! ```text
//! advance()
//!   Out: opacity 1 → 0 over fade_duration
//!   swap: show_tip(target)
//!   In:  opacity 0 → 1 over fade_duration
//! ```
//!
//! Advancing again while a crossfade runs retargets it to the tip after the
//! pending one, fading out from wherever the opacity currently is. Presses
//! are never lost and the index never skips backwards.
//!
//! Tip text is raw localized text with `{gold}...{/gold}` markup; renderers
//! read [`TipCarousel::spans`] or [`TipCarousel::rich_text`].

use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;
use tracing::{debug, warn};

use crate::config::FlowConfig;
use crate::localization::TextLookup;
use crate::localization::highlight::{self, Span};
use crate::timing::{Easing, Sequence, Step, lerp};

/// Crossfade phase.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Crossfade {
    Idle,
    /// Fading the old tip out toward `target`, starting from opacity `from`.
    Out { target: usize, from: f32 },
    /// Fading the new tip in.
    In,
}

/// Rotating list of localized tips.
#[derive(Clone, Debug)]
pub struct TipCarousel {
    keys: Vec<String>,
    index: usize,
    /// Resolved text of the current tip, markup included.
    text: String,
    /// Revision the current text was resolved against.
    resolved_at: Option<u64>,
    /// Number of per-tip illustrations; illustration `i` belongs to tip `i`.
    illustrations: usize,
    opacity: f32,
    cycle_interval: Duration,
    fade_duration: Duration,
    timer: Sequence,
    fade: Sequence,
    crossfade: Crossfade,
}

impl TipCarousel {
    /// Create an empty carousel. Call [`TipCarousel::initialize`] to start it.
    pub const fn new(
        cycle_interval: Duration,
        fade_duration: Duration,
        illustrations: usize,
    ) -> Self {
        Self {
            keys: Vec::new(),
            index: 0,
            text: String::new(),
            resolved_at: None,
            illustrations,
            opacity: 1.0,
            cycle_interval,
            fade_duration,
            timer: Sequence::idle(),
            fade: Sequence::idle(),
            crossfade: Crossfade::Idle,
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(config.tip_cycle_interval(), config.tip_fade_duration(), config.tips.illustrations)
    }

    /// Store `keys`, show tip 0 at full opacity, and start the auto-advance
    /// timer. Any running crossfade is dropped.
    ///
    /// An empty list leaves the carousel inert.
    pub fn initialize<S: AsRef<str>>(
        &mut self,
        keys: &[S],
        text: &dyn TextLookup,
    ) {
        self.keys = keys.iter().map(|k| k.as_ref().to_string()).collect();
        self.index = 0;
        self.opacity = 1.0;
        self.fade.cancel();
        self.crossfade = Crossfade::Idle;
        self.text.clear();
        self.resolved_at = None;

        if self.keys.is_empty() {
            warn!("Tip carousel initialized with no keys");
            self.timer.cancel();
            return;
        }

        self.show_tip(0, text);
        self.timer.start(self.cycle_interval, Easing::Linear);
    }

    /// Show tip `index mod len` immediately, without a crossfade.
    pub fn show_tip(
        &mut self,
        index: usize,
        text: &dyn TextLookup,
    ) {
        if self.keys.is_empty() {
            return;
        }
        self.index = index % self.keys.len();
        self.resolve(text);
        debug!(index = self.index, tip = %highlight::plain(&self.text), "Tip shown");
    }

    /// Crossfade to the next tip.
    pub fn advance(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let target = match self.crossfade {
            Crossfade::Out { target, .. } => (target + 1) % self.keys.len(),
            Crossfade::Idle | Crossfade::In => (self.index + 1) % self.keys.len(),
        };
        self.crossfade = Crossfade::Out {
            target,
            from: self.opacity,
        };
        self.fade.start(self.fade_duration, Easing::Linear);
        debug!(from = self.index, to = target, "Tip advance");
    }

    /// Manual advance from a tip card press. Restarts the auto-advance timer.
    pub fn press(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        self.advance();
        self.timer.start(self.cycle_interval, Easing::Linear);
    }

    /// Stop the auto-advance timer and any crossfade. Visible state is kept.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.fade.cancel();
        self.crossfade = Crossfade::Idle;
    }

    /// Advance timers and the crossfade by `dt`.
    pub fn tick(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    ) {
        if self.keys.is_empty() {
            return;
        }

        if self.resolved_at != Some(text.revision()) {
            self.resolve(text);
        }

        self.tick_crossfade(dt, text);

        if let Step::Finished { overflow } = self.timer.advance(dt) {
            self.timer.restart();
            let mut fired: u128 = 1;
            if !self.cycle_interval.is_zero() {
                // A tick spanning several intervals fires once per interval and
                // keeps the remainder, so the timer never ends up finished.
                let interval = self.cycle_interval.as_nanos();
                fired += overflow.as_nanos() / interval;
                let remainder = Duration::from_nanos((overflow.as_nanos() % interval) as u64);
                let _ = self.timer.advance(remainder);
            }
            let advances = 1 + (fired - 1) % self.keys.len() as u128;
            for _ in 0..advances {
                self.advance();
            }
        }
    }

    fn tick_crossfade(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    ) {
        match (self.crossfade, self.fade.advance(dt)) {
            (_, Step::Inactive) | (Crossfade::Idle, _) => {}
            (Crossfade::Out { from, .. }, Step::Running(t)) => self.opacity = lerp(from, 0.0, t),
            (Crossfade::Out { target, .. }, Step::Finished { overflow }) => {
                self.show_tip(target, text);
                self.opacity = 0.0;
                self.crossfade = Crossfade::In;
                self.fade.start(self.fade_duration, Easing::Linear);
                self.tick_crossfade(overflow, text);
            }
            (Crossfade::In, Step::Running(t)) => self.opacity = t,
            (Crossfade::In, Step::Finished { .. }) => {
                self.opacity = 1.0;
                self.crossfade = Crossfade::Idle;
            }
        }
    }

    fn resolve(
        &mut self,
        text: &dyn TextLookup,
    ) {
        self.text = text.text(&self.keys[self.index]);
        self.resolved_at = Some(text.revision());
    }

    #[inline]
    pub const fn index(&self) -> usize { self.index }

    #[inline]
    pub fn len(&self) -> usize { self.keys.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    #[inline]
    pub fn keys(&self) -> &[String] { &self.keys }

    /// Key of the tip currently shown.
    pub fn key(&self) -> Option<&str> { self.keys.get(self.index).map(String::as_str) }

    /// Current tip text, markup included.
    #[inline]
    pub fn text(&self) -> &str { &self.text }

    /// Current tip split into highlighted and plain spans.
    pub fn spans(&self) -> Vec<Span<'_>> { highlight::spans(&self.text) }

    /// Current tip with highlights turned into `<color>` rich-text tags.
    pub fn rich_text(
        &self,
        color: Rgb888,
    ) -> String {
        highlight::rich_text(&self.text, color)
    }

    /// Tip text opacity, `0.0..=1.0`.
    #[inline]
    pub const fn opacity(&self) -> f32 { self.opacity }

    #[inline]
    pub fn is_crossfading(&self) -> bool { self.crossfade != Crossfade::Idle }

    /// Whether the auto-advance timer is running.
    #[inline]
    pub const fn is_running(&self) -> bool { self.timer.is_running() }

    /// Time until the next automatic advance, if the timer runs.
    pub fn time_to_next(&self) -> Option<Duration> {
        self.timer.is_running().then(|| self.timer.duration().saturating_sub(self.timer.elapsed()))
    }

    /// Whether illustration `i` is shown. Only the illustration matching the
    /// current tip is.
    #[inline]
    pub fn illustration_visible(
        &self,
        i: usize,
    ) -> bool {
        i < self.illustrations && i == self.index
    }

    /// Index of the visible illustration, if the current tip has one.
    pub fn active_illustration(&self) -> Option<usize> { (0..self.illustrations).find(|i| self.illustration_visible(*i)) }
}

// =============================================================================
// Unit Tests
// =============================================================================
