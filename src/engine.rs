//! Transition engine: owns the current screen and serializes transitions.
//!
//! # Transition Sequence
//!
//! ```text
//! transition_to(B) while A is current:
//!
//!   A.fade_out()   A exit hook runs, A not interactive
//!   ... ticks ...  A opacity 1 → 0
//!   A hidden       current = B, B.fade_in()
//!   ... ticks ...  B opacity 0 → 1
//!   B visible      B interactive, B enter hook runs, transition cleared
//! ```
//!
//! Fade-out and fade-in never overlap, so at most one screen is `Visible` or
//! `Entering` at any time. Time left over when one phase ends within a tick is
//! carried into the next phase.
//!
//! # Dropped Requests
//!
//! While a transition is in flight, further requests are dropped, not queued.
//! The caller gets [`Request::Busy`] and the drop is journaled. Rapid
//! double-taps therefore can't stack fades.
//!
//! Screens are not owned by the engine. Every call borrows them through a
//! [`ScreenRegistry`] and addresses them by [`ScreenId`].

use core::time::Duration;

use tracing::{debug, info, warn};

use crate::journal::{FlowEvent, Journal};
use crate::localization::TextLookup;
use crate::screen::{AnyScreen, FadeStep, ScreenId, Visibility};

// =============================================================================
// Registry Seam
// =============================================================================

/// Lookup of screens by id. A missing screen is an unset reference: engine
/// calls that target it are no-ops.
pub trait ScreenRegistry {
    fn get(
        &self,
        id: ScreenId,
    ) -> Option<&dyn AnyScreen>;

    fn get_mut(
        &mut self,
        id: ScreenId,
    ) -> Option<&mut dyn AnyScreen>;
}

// =============================================================================
// Transition State
// =============================================================================

/// Which half of a transition is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The previous screen is fading out. `current` is still the old screen.
    FadingOut,
    /// The target is fading in. `current` is already the target.
    FadingIn,
}

/// A transition in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Option<ScreenId>,
    pub to: ScreenId,
    pub phase: Phase,
}

/// What happened to a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Request {
    /// Accepted. For `transition_to` the fades are now running.
    Started,
    /// Dropped because a transition is in flight.
    Busy,
    /// Dropped because the target is already the current screen.
    AlreadyCurrent,
    /// Dropped because the target is not registered.
    Unavailable,
}

impl Request {
    #[inline]
    pub const fn is_started(self) -> bool { matches!(self, Self::Started) }
}

// =============================================================================
// Engine
// =============================================================================

/// Screen transition and lifecycle engine.
#[derive(Clone, Debug)]
pub struct TransitionEngine {
    current: Option<ScreenId>,
    transition: Option<Transition>,
    fade_duration: Duration,
    journal: Journal,
}

impl TransitionEngine {
    /// Create an engine with no current screen.
    pub const fn new(fade_duration: Duration) -> Self {
        Self {
            current: None,
            transition: None,
            fade_duration,
            journal: Journal::new(),
        }
    }

    #[inline]
    pub const fn current(&self) -> Option<ScreenId> { self.current }

    #[inline]
    pub const fn transition(&self) -> Option<Transition> { self.transition }

    #[inline]
    pub const fn is_transitioning(&self) -> bool { self.transition.is_some() }

    #[inline]
    pub const fn fade_duration(&self) -> Duration { self.fade_duration }

    #[inline]
    pub const fn journal(&self) -> &Journal { &self.journal }

    /// Hide every registered screen with no animation and forget the current
    /// screen. Entered screens run their exit hook. Any transition in flight
    /// is abandoned.
    pub fn hide_all(
        &mut self,
        screens: &mut dyn ScreenRegistry,
    ) {
        for id in ScreenId::ALL {
            self.hide_screen(screens, id);
        }
        self.current = None;
        self.transition = None;
    }

    /// Hide the current screen and show `id` with no animation, then run its
    /// enter hook. Refused while a transition is in flight.
    pub fn show_immediate(
        &mut self,
        id: ScreenId,
        screens: &mut dyn ScreenRegistry,
        text: &dyn TextLookup,
    ) -> Request {
        if let Some(transition) = self.transition {
            debug!(target_screen = %id, in_flight = %transition.to, "show_immediate refused during transition");
            self.journal.push(FlowEvent::TransitionDropped(id));
            return Request::Busy;
        }
        if screens.get(id).is_none() {
            warn!(screen = %id, "show_immediate on an unregistered screen");
            return Request::Unavailable;
        }

        if let Some(previous) = self.current
            && previous != id
        {
            self.hide_screen(screens, previous);
        }

        if let Some(screen) = screens.get_mut(id) {
            screen.show(text);
            self.journal.push(FlowEvent::Shown(id));
            if screen.enter(text) {
                self.journal.push(FlowEvent::Entered(id));
            }
        }
        self.current = Some(id);
        info!(screen = %id, "Screen shown");
        Request::Started
    }

    /// Crossfade from the current screen to `id`.
    ///
    /// Dropped if a transition is in flight, if `id` is already current, or if
    /// `id` is not registered. Zero-length fades complete before this returns;
    /// otherwise the fades advance with [`TransitionEngine::tick`].
    pub fn transition_to(
        &mut self,
        id: ScreenId,
        screens: &mut dyn ScreenRegistry,
        text: &dyn TextLookup,
    ) -> Request {
        if let Some(transition) = self.transition {
            debug!(target_screen = %id, in_flight = %transition.to, "Transition dropped, another is in flight");
            self.journal.push(FlowEvent::TransitionDropped(id));
            return Request::Busy;
        }
        if self.current == Some(id) {
            debug!(screen = %id, "Transition to the current screen ignored");
            return Request::AlreadyCurrent;
        }
        if screens.get(id).is_none() {
            warn!(screen = %id, "Transition to an unregistered screen");
            return Request::Unavailable;
        }

        let from = self.current;
        self.journal.push(FlowEvent::TransitionStarted { from, to: id });
        info!(from = ?from, to = %id, "Transition started");

        let outgoing = from.and_then(|previous| screens.get_mut(previous).map(|screen| (previous, screen)));
        match outgoing {
            Some((previous, screen)) => {
                if screen.fade_out(self.fade_duration) {
                    self.journal.push(FlowEvent::Exited(previous));
                }
                self.transition = Some(Transition {
                    from,
                    to: id,
                    phase: Phase::FadingOut,
                });
            }
            None => self.begin_fade_in(from, id, screens, text),
        }

        self.tick(Duration::ZERO, screens, text);
        Request::Started
    }

    /// Advance the transition in flight by `dt`.
    pub fn tick(
        &mut self,
        dt: Duration,
        screens: &mut dyn ScreenRegistry,
        text: &dyn TextLookup,
    ) {
        let mut remaining = dt;

        while let Some(transition) = self.transition {
            match transition.phase {
                Phase::FadingOut => {
                    let step = transition
                        .from
                        .and_then(|from| screens.get_mut(from))
                        .map_or(FadeStep::Idle, |screen| screen.tick_fade(remaining, text));

                    match step {
                        FadeStep::Fading => break,
                        FadeStep::FadedOut { overflow } => remaining = overflow,
                        // Outgoing screen vanished or was hidden directly.
                        FadeStep::Idle | FadeStep::FadedIn { .. } => {}
                    }
                    if let Some(from) = transition.from {
                        self.journal.push(FlowEvent::Hidden(from));
                    }
                    self.begin_fade_in(transition.from, transition.to, screens, text);
                }
                Phase::FadingIn => {
                    let step = screens
                        .get_mut(transition.to)
                        .map_or(FadeStep::Idle, |screen| screen.tick_fade(remaining, text));

                    match step {
                        FadeStep::Fading => break,
                        FadeStep::FadedIn { .. } => {
                            self.journal.push(FlowEvent::Entered(transition.to));
                        }
                        FadeStep::Idle | FadeStep::FadedOut { .. } => {
                            warn!(screen = %transition.to, "Incoming screen stopped fading, transition abandoned");
                        }
                    }
                    self.journal.push(FlowEvent::TransitionFinished(transition.to));
                    info!(screen = %transition.to, "Transition finished");
                    self.transition = None;
                }
            }
        }
    }

    fn begin_fade_in(
        &mut self,
        from: Option<ScreenId>,
        to: ScreenId,
        screens: &mut dyn ScreenRegistry,
        text: &dyn TextLookup,
    ) {
        self.current = Some(to);
        if let Some(screen) = screens.get_mut(to) {
            screen.fade_in(self.fade_duration, text);
        }
        self.transition = Some(Transition {
            from,
            to,
            phase: Phase::FadingIn,
        });
    }

    fn hide_screen(
        &mut self,
        screens: &mut dyn ScreenRegistry,
        id: ScreenId,
    ) {
        let Some(screen) = screens.get_mut(id) else {
            return;
        };
        let was_hidden = screen.visibility() == Visibility::Hidden;
        if screen.hide() {
            self.journal.push(FlowEvent::Exited(id));
        }
        if !was_hidden {
            self.journal.push(FlowEvent::Hidden(id));
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Bindings, Control};
    use crate::localization::Localizer;
    use crate::screen::{Screen, ScreenHooks};

    const FADE: Duration = Duration::from_millis(500);

    fn ms(value: u64) -> Duration { Duration::from_millis(value) }

    #[derive(Default)]
    struct Probe;

    impl ScreenHooks for Probe {
        fn on_enter(
            &mut self,
            _text: &dyn TextLookup,
        ) -> Bindings {
            Bindings::of(&[Control::Start])
        }
    }

    struct TestScreens {
        screens: Vec<Screen<Probe>>,
    }

    impl TestScreens {
        fn with(ids: &[ScreenId]) -> Self {
            Self {
                screens: ids.iter().map(|id| Screen::new(*id, Probe)).collect(),
            }
        }

        fn all() -> Self { Self::with(&ScreenId::ALL) }

        fn screen(
            &self,
            id: ScreenId,
        ) -> &dyn AnyScreen {
            self.get(id).unwrap()
        }

        fn active_count(&self) -> usize { self.screens.iter().filter(|s| s.visibility().is_active()).count() }
    }

    impl ScreenRegistry for TestScreens {
        fn get(
            &self,
            id: ScreenId,
        ) -> Option<&dyn AnyScreen> {
            self.screens.iter().find(|s| s.id() == id).map(|s| s as &dyn AnyScreen)
        }

        fn get_mut(
            &mut self,
            id: ScreenId,
        ) -> Option<&mut dyn AnyScreen> {
            self.screens.iter_mut().find(|s| s.id() == id).map(|s| s as &mut dyn AnyScreen)
        }
    }

    fn text() -> Localizer { Localizer::new("en") }

    fn at_logo(
        screens: &mut TestScreens,
        text: &Localizer,
    ) -> TransitionEngine {
        let mut engine = TransitionEngine::new(FADE);
        assert_eq!(engine.show_immediate(ScreenId::Logo, screens, text), Request::Started);
        engine
    }

    fn assert_only_visible(
        screens: &TestScreens,
        id: ScreenId,
    ) {
        for other in ScreenId::ALL {
            let screen = screens.screen(other);
            if other == id {
                assert_eq!(screen.visibility(), Visibility::Visible, "{other} should be visible");
                assert!(screen.is_interactive(), "{other} should be interactive");
            } else {
                assert_eq!(screen.visibility(), Visibility::Hidden, "{other} should be hidden");
                assert!(!screen.is_interactive(), "{other} should not be interactive");
            }
        }
    }

    // -------------------------------------------------------------------------
    // show_immediate
    // -------------------------------------------------------------------------

    #[test]
    fn test_show_immediate_shows_and_enters() {
        let text = text();
        let mut screens = TestScreens::all();
        let engine = at_logo(&mut screens, &text);

        assert_eq!(engine.current(), Some(ScreenId::Logo));
        assert!(screens.screen(ScreenId::Logo).is_entered());
        assert_only_visible(&screens, ScreenId::Logo);

        let events: Vec<_> = engine.journal().iter().copied().collect();
        assert_eq!(events, vec![FlowEvent::Shown(ScreenId::Logo), FlowEvent::Entered(ScreenId::Logo)]);
    }

    #[test]
    fn test_show_immediate_hides_previous() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        let _ = engine.show_immediate(ScreenId::Home, &mut screens, &text);
        assert!(!screens.screen(ScreenId::Logo).is_entered(), "Previous screen must exit");
        assert_only_visible(&screens, ScreenId::Home);
    }

    #[test]
    fn test_show_immediate_refused_while_transitioning() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        let _ = engine.transition_to(ScreenId::Loading, &mut screens, &text);
        assert_eq!(engine.show_immediate(ScreenId::Home, &mut screens, &text), Request::Busy);
        assert_eq!(screens.screen(ScreenId::Home).visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_show_immediate_unregistered_is_noop() {
        let text = text();
        let mut screens = TestScreens::with(&[ScreenId::Logo]);
        let mut engine = TransitionEngine::new(FADE);

        assert_eq!(engine.show_immediate(ScreenId::Home, &mut screens, &text), Request::Unavailable);
        assert_eq!(engine.current(), None);
    }

    // -------------------------------------------------------------------------
    // transition_to
    // -------------------------------------------------------------------------

    #[test]
    fn test_transition_runs_fade_out_then_fade_in() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        assert_eq!(engine.transition_to(ScreenId::Loading, &mut screens, &text), Request::Started);
        assert!(!screens.screen(ScreenId::Logo).is_entered(), "Exit hook runs when the fade-out starts");
        assert!(!screens.screen(ScreenId::Logo).is_interactive());
        assert_eq!(engine.current(), Some(ScreenId::Logo));

        engine.tick(ms(250), &mut screens, &text);
        assert_eq!(screens.screen(ScreenId::Logo).visibility(), Visibility::Exiting);
        assert_eq!(screens.screen(ScreenId::Loading).visibility(), Visibility::Hidden);

        engine.tick(ms(250), &mut screens, &text);
        assert_eq!(screens.screen(ScreenId::Logo).visibility(), Visibility::Hidden);
        assert_eq!(screens.screen(ScreenId::Loading).visibility(), Visibility::Entering);
        assert_eq!(engine.current(), Some(ScreenId::Loading));
        assert!(!screens.screen(ScreenId::Loading).is_interactive());

        engine.tick(ms(500), &mut screens, &text);
        assert!(!engine.is_transitioning());
        assert!(screens.screen(ScreenId::Loading).is_entered());
        assert_only_visible(&screens, ScreenId::Loading);
    }

    #[test]
    fn test_journal_orders_exit_before_enter() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        let _ = engine.transition_to(ScreenId::Loading, &mut screens, &text);
        engine.tick(ms(1000), &mut screens, &text);

        let events: Vec<_> = engine.journal().iter().skip(2).copied().collect();
        assert_eq!(
            events,
            vec![
                FlowEvent::TransitionStarted {
                    from: Some(ScreenId::Logo),
                    to: ScreenId::Loading,
                },
                FlowEvent::Exited(ScreenId::Logo),
                FlowEvent::Hidden(ScreenId::Logo),
                FlowEvent::Entered(ScreenId::Loading),
                FlowEvent::TransitionFinished(ScreenId::Loading),
            ]
        );
    }

    #[test]
    fn test_requests_in_flight_are_dropped() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        let _ = engine.transition_to(ScreenId::Loading, &mut screens, &text);
        for target in [ScreenId::Splash, ScreenId::Home, ScreenId::Settings, ScreenId::Splash] {
            assert_eq!(engine.transition_to(target, &mut screens, &text), Request::Busy);
            engine.tick(ms(100), &mut screens, &text);
        }
        engine.tick(ms(1000), &mut screens, &text);

        assert_only_visible(&screens, ScreenId::Loading);
        let dropped = engine
            .journal()
            .iter()
            .filter(|e| matches!(e, FlowEvent::TransitionDropped(_)))
            .count();
        assert_eq!(dropped, 4);
    }

    #[test]
    fn test_at_most_one_active_screen_every_tick() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        for target in [ScreenId::Loading, ScreenId::Splash, ScreenId::Home, ScreenId::Settings] {
            let _ = engine.transition_to(target, &mut screens, &text);
            for _ in 0..25 {
                engine.tick(ms(45), &mut screens, &text);
                assert!(screens.active_count() <= 1, "More than one active screen");
            }
            assert_only_visible(&screens, target);
        }
    }

    #[test]
    fn test_transition_to_current_is_noop() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        assert_eq!(engine.transition_to(ScreenId::Logo, &mut screens, &text), Request::AlreadyCurrent);
        assert!(!engine.is_transitioning());
        assert!(screens.screen(ScreenId::Logo).is_entered());
    }

    #[test]
    fn test_transition_to_unregistered_is_noop() {
        let text = text();
        let mut screens = TestScreens::with(&[ScreenId::Logo, ScreenId::Loading]);
        let mut engine = at_logo(&mut screens, &text);

        assert_eq!(engine.transition_to(ScreenId::Settings, &mut screens, &text), Request::Unavailable);
        assert!(!engine.is_transitioning());
        assert_eq!(engine.current(), Some(ScreenId::Logo));
        assert!(screens.screen(ScreenId::Logo).is_entered());
    }

    #[test]
    fn test_transition_without_current_fades_in_directly() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = TransitionEngine::new(FADE);

        let _ = engine.transition_to(ScreenId::Splash, &mut screens, &text);
        assert_eq!(engine.current(), Some(ScreenId::Splash));
        assert_eq!(engine.transition().map(|t| t.phase), Some(Phase::FadingIn));

        engine.tick(FADE, &mut screens, &text);
        assert_only_visible(&screens, ScreenId::Splash);
    }

    #[test]
    fn test_zero_fade_completes_immediately() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = TransitionEngine::new(Duration::ZERO);
        let _ = engine.show_immediate(ScreenId::Logo, &mut screens, &text);

        assert!(engine.transition_to(ScreenId::Home, &mut screens, &text).is_started());
        assert!(!engine.is_transitioning());
        assert_only_visible(&screens, ScreenId::Home);
        assert!(screens.screen(ScreenId::Home).is_entered());
    }

    #[test]
    fn test_single_long_tick_carries_overflow() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        let _ = engine.transition_to(ScreenId::Home, &mut screens, &text);
        engine.tick(ms(999), &mut screens, &text);
        assert!(engine.is_transitioning(), "1 ms of fade-in left");

        engine.tick(ms(1), &mut screens, &text);
        assert!(!engine.is_transitioning());
        assert_only_visible(&screens, ScreenId::Home);
    }

    #[test]
    fn test_hide_all_exits_entered_screens() {
        let text = text();
        let mut screens = TestScreens::all();
        let mut engine = at_logo(&mut screens, &text);

        engine.hide_all(&mut screens);
        assert_eq!(engine.current(), None);
        assert_eq!(screens.active_count(), 0);
        assert!(!screens.screen(ScreenId::Logo).is_entered());
        assert_eq!(engine.journal().last(), Some(&FlowEvent::Hidden(ScreenId::Logo)));
    }
}
