//! Press feedback state for every on-screen control.

use core::time::Duration;

use golfin_screen_flow::Control;
use golfin_screen_flow::widgets::PressFeedback;

/// One [`PressFeedback`] per [`Control`].
#[derive(Clone, Debug, Default)]
pub struct Buttons {
    feedback: [PressFeedback; Control::ALL.len()],
}

impl Buttons {
    pub fn new() -> Self { Self::default() }

    pub fn press_down(
        &mut self,
        control: Control,
    ) {
        self.feedback[control as usize].press_down();
    }

    /// Returns `true` if the control was held, i.e. the release is a click.
    pub fn release(
        &mut self,
        control: Control,
    ) -> bool {
        self.feedback[control as usize].release()
    }

    /// Release everything without clicking. Used when the screen changes.
    pub fn release_all(&mut self) {
        for feedback in &mut self.feedback {
            feedback.release();
        }
    }

    pub fn update(
        &mut self,
        dt: Duration,
    ) {
        for feedback in &mut self.feedback {
            feedback.update(dt);
        }
    }

    #[inline]
    pub fn get(
        &self,
        control: Control,
    ) -> &PressFeedback {
        &self.feedback[control as usize]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
