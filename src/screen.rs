//! Screen base: visibility, opacity, interactivity, and the enter/exit lifecycle.
//!
//! Every full-view UI state is a [`Screen`] wrapping screen-specific
//! [`ScreenHooks`]. The base owns everything the transition engine relies on:
//!
//! - **Visibility** (`Hidden`, `Entering`, `Visible`, `Exiting`) and the opacity
//!   used for fade bookkeeping.
//! - **Interactivity**, toggled together with visibility. A hidden or fading
//!   screen never receives presses.
//! - **Bindings**, the controls the screen listens to. They are returned by the
//!   enter hook and released by the base on exit, so a screen can't leak a
//!   listener into the next screen or hear the same press twice.
//! - **Labels**, enabled while the screen is visible or fading.
//!
//! # Lifecycle
//!
//! ```text
//!            fade_in()              fade finished
//! Hidden ─────────────→ Entering ─────────────────→ Visible + enter()
//!   ↑                                                   │
//!   │     fade finished                 fade_out()      │
//!   └─────────────────── Exiting ←──── exit() first ────┘
//! ```
//!
//! `show()` and `hide()` jump straight to `Visible` / `Hidden`. `hide()` on an
//! entered screen runs the exit hook so its tasks are cancelled.
//!
//! Exiting always runs [`ScreenHooks::on_exit`] then
//! [`ScreenHooks::cancel_tasks`] before anything visual changes.

use core::fmt;
use core::time::Duration;

use crate::input::{Bindings, Control, Intent};
use crate::localization::TextLookup;
use crate::timing::{Easing, Sequence, Step, lerp};
use crate::widgets::LabelSet;

// =============================================================================
// Identity and Visibility
// =============================================================================

/// The screens of the flow, in navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreenId {
    Logo,
    Loading,
    Splash,
    Home,
    Settings,
}

impl ScreenId {
    /// Every screen, in navigation order.
    pub const ALL: [Self; 5] = [Self::Logo, Self::Loading, Self::Splash, Self::Home, Self::Settings];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Loading => "loading",
            Self::Splash => "splash",
            Self::Home => "home",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visibility state of a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    /// Fading in. Not interactive.
    Entering,
    /// Fully shown.
    Visible,
    /// Fading out. Not interactive.
    Exiting,
}

impl Visibility {
    /// `Visible` or `Entering`: the states at most one screen may be in.
    #[inline]
    pub const fn is_active(self) -> bool { matches!(self, Self::Visible | Self::Entering) }
}

// =============================================================================
// Hooks
// =============================================================================

/// Screen-specific behavior plugged into the screen base.
///
/// Every method has a no-op default.
pub trait ScreenHooks {
    /// Called once the screen is fully visible and interactive.
    ///
    /// Returns the controls the screen listens to until it exits.
    fn on_enter(
        &mut self,
        _text: &dyn TextLookup,
    ) -> Bindings {
        Bindings::NONE
    }

    /// Called when the screen starts leaving, before any visual change.
    fn on_exit(&mut self) {}

    /// Cancel every timed sequence the screen owns. Called right after
    /// [`ScreenHooks::on_exit`]; a sequence left running here would keep
    /// firing against a hidden screen.
    fn cancel_tasks(&mut self) {}

    /// Per-tick behavior while the screen is entered and visible.
    fn update(
        &mut self,
        _dt: Duration,
        _text: &dyn TextLookup,
    ) {
    }

    /// A bound control was pressed.
    fn on_press(
        &mut self,
        _control: Control,
        _text: &dyn TextLookup,
    ) -> Option<Intent> {
        None
    }

    fn labels(&self) -> Option<&LabelSet> { None }

    fn labels_mut(&mut self) -> Option<&mut LabelSet> { None }
}

/// Outcome of advancing a screen's fade by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeStep {
    /// No fade running.
    Idle,
    /// Fade still running.
    Fading,
    /// Fade-in completed and the enter hook ran.
    FadedIn { overflow: Duration },
    /// Fade-out completed; the screen is hidden.
    FadedOut { overflow: Duration },
}

// =============================================================================
// Object-Safe Screen Interface
// =============================================================================

/// Lifecycle interface the engine drives. Implemented by every [`Screen`].
pub trait AnyScreen {
    fn id(&self) -> ScreenId;

    fn visibility(&self) -> Visibility;

    /// Opacity in `0.0..=1.0`.
    fn opacity(&self) -> f32;

    fn is_interactive(&self) -> bool;

    /// Whether the enter hook ran without a matching exit.
    fn is_entered(&self) -> bool;

    fn bindings(&self) -> Bindings;

    fn labels(&self) -> Option<&LabelSet>;

    /// Make the screen fully visible and interactive, with no animation.
    /// Does not run the enter hook.
    fn show(
        &mut self,
        text: &dyn TextLookup,
    );

    /// Hide the screen with no animation. Runs the exit hook first if the
    /// screen was entered; returns whether it did.
    fn hide(&mut self) -> bool;

    /// Start fading in from transparent. Interactivity stays off until done.
    fn fade_in(
        &mut self,
        duration: Duration,
        text: &dyn TextLookup,
    );

    /// Run the exit hook, then start fading out from the current opacity.
    /// Returns whether the exit hook ran.
    fn fade_out(
        &mut self,
        duration: Duration,
    ) -> bool;

    /// Advance the running fade, if any.
    fn tick_fade(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    ) -> FadeStep;

    /// Run the enter hook and attach its bindings. Returns `false` if the
    /// screen was already entered.
    fn enter(
        &mut self,
        text: &dyn TextLookup,
    ) -> bool;

    /// Run the exit hook, cancel the screen's tasks, release its bindings.
    /// Returns `false` if the screen was not entered.
    fn exit(&mut self) -> bool;

    /// Refresh labels and run per-tick behavior.
    fn update(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    );

    /// Deliver a press. Ignored unless the screen is interactive and bound
    /// to `control`.
    fn press(
        &mut self,
        control: Control,
        text: &dyn TextLookup,
    ) -> Option<Intent>;
}

// =============================================================================
// Screen
// =============================================================================

/// A screen: base lifecycle state plus screen-specific hooks.
#[derive(Clone, Debug)]
pub struct Screen<H> {
    id: ScreenId,
    visibility: Visibility,
    opacity: f32,
    interactive: bool,
    entered: bool,
    bindings: Bindings,
    fade: Sequence,
    /// Opacity at the start of the running fade-out.
    fade_from: f32,
    hooks: H,
}

impl<H: ScreenHooks> Screen<H> {
    /// Create a hidden screen.
    pub const fn new(
        id: ScreenId,
        hooks: H,
    ) -> Self {
        Self {
            id,
            visibility: Visibility::Hidden,
            opacity: 0.0,
            interactive: false,
            entered: false,
            bindings: Bindings::NONE,
            fade: Sequence::idle(),
            fade_from: 0.0,
            hooks,
        }
    }

    #[inline]
    pub const fn hooks(&self) -> &H { &self.hooks }

    #[inline]
    pub const fn hooks_mut(&mut self) -> &mut H { &mut self.hooks }

    fn enable_labels(
        &mut self,
        text: &dyn TextLookup,
    ) {
        if let Some(labels) = self.hooks.labels_mut() {
            labels.enable_all(text);
        }
    }

    fn disable_labels(&mut self) {
        if let Some(labels) = self.hooks.labels_mut() {
            labels.disable_all();
        }
    }
}

impl<H: ScreenHooks> AnyScreen for Screen<H> {
    #[inline]
    fn id(&self) -> ScreenId { self.id }

    #[inline]
    fn visibility(&self) -> Visibility { self.visibility }

    #[inline]
    fn opacity(&self) -> f32 { self.opacity }

    #[inline]
    fn is_interactive(&self) -> bool { self.interactive }

    #[inline]
    fn is_entered(&self) -> bool { self.entered }

    #[inline]
    fn bindings(&self) -> Bindings { self.bindings }

    fn labels(&self) -> Option<&LabelSet> { self.hooks.labels() }

    fn show(
        &mut self,
        text: &dyn TextLookup,
    ) {
        self.fade.cancel();
        self.visibility = Visibility::Visible;
        self.opacity = 1.0;
        self.interactive = true;
        self.enable_labels(text);
    }

    fn hide(&mut self) -> bool {
        let exited = self.exit();
        self.fade.cancel();
        self.visibility = Visibility::Hidden;
        self.opacity = 0.0;
        self.interactive = false;
        self.disable_labels();
        exited
    }

    fn fade_in(
        &mut self,
        duration: Duration,
        text: &dyn TextLookup,
    ) {
        self.visibility = Visibility::Entering;
        self.interactive = false;
        self.opacity = 0.0;
        self.fade.start(duration, Easing::Linear);
        self.enable_labels(text);
    }

    fn fade_out(
        &mut self,
        duration: Duration,
    ) -> bool {
        let exited = self.exit();
        self.interactive = false;
        self.visibility = Visibility::Exiting;
        self.fade_from = self.opacity;
        self.fade.start(duration, Easing::Linear);
        exited
    }

    fn tick_fade(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    ) -> FadeStep {
        let fading_in = match self.visibility {
            Visibility::Entering => true,
            Visibility::Exiting => false,
            Visibility::Hidden | Visibility::Visible => return FadeStep::Idle,
        };

        match self.fade.advance(dt) {
            Step::Inactive => FadeStep::Idle,
            Step::Running(t) => {
                self.opacity = if fading_in { t } else { lerp(self.fade_from, 0.0, t) };
                FadeStep::Fading
            }
            Step::Finished { overflow } if fading_in => {
                self.opacity = 1.0;
                self.interactive = true;
                self.visibility = Visibility::Visible;
                self.enter(text);
                FadeStep::FadedIn { overflow }
            }
            Step::Finished { overflow } => {
                self.opacity = 0.0;
                self.visibility = Visibility::Hidden;
                self.disable_labels();
                FadeStep::FadedOut { overflow }
            }
        }
    }

    fn enter(
        &mut self,
        text: &dyn TextLookup,
    ) -> bool {
        if self.entered {
            return false;
        }
        self.bindings = self.hooks.on_enter(text);
        self.entered = true;
        true
    }

    fn exit(&mut self) -> bool {
        if !self.entered {
            return false;
        }
        self.hooks.on_exit();
        self.hooks.cancel_tasks();
        self.bindings = Bindings::NONE;
        self.entered = false;
        true
    }

    fn update(
        &mut self,
        dt: Duration,
        text: &dyn TextLookup,
    ) {
        if self.visibility == Visibility::Hidden {
            return;
        }
        if let Some(labels) = self.hooks.labels_mut() {
            labels.refresh(text);
        }
        if self.entered && self.visibility == Visibility::Visible {
            self.hooks.update(dt, text);
        }
    }

    fn press(
        &mut self,
        control: Control,
        text: &dyn TextLookup,
    ) -> Option<Intent> {
        if !self.interactive || !self.bindings.contains(control) {
            return None;
        }
        self.hooks.on_press(control, text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
