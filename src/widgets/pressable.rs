//! Press feedback for buttons.
//!
//! While held, a button shrinks slightly and darkens. The visual eases toward
//! the pressed state at [`PRESS_TRANSITION_SPEED`] and back on release, so a
//! quick tap still shows a short dip. Releasing is the click: the host turns
//! it into a [`crate::input::Control`] press.

use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::scale_rgb888;
use crate::config::{PRESS_TRANSITION_SPEED, PRESSED_SCALE, PRESSED_TINT};
use crate::timing::{lerp, move_towards};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PressFeedback {
    held: bool,
    /// 0.0 = released look, 1.0 = pressed look.
    amount: f32,
}

impl PressFeedback {
    pub const fn new() -> Self {
        Self {
            held: false,
            amount: 0.0,
        }
    }

    pub const fn press_down(&mut self) { self.held = true; }

    /// Release the button. Returns `true` if it was held, i.e. a click.
    pub const fn release(&mut self) -> bool {
        let clicked = self.held;
        self.held = false;
        clicked
    }

    pub fn update(
        &mut self,
        dt: Duration,
    ) {
        let target = if self.held { 1.0 } else { 0.0 };
        self.amount = move_towards(self.amount, target, PRESS_TRANSITION_SPEED * dt.as_secs_f32());
    }

    #[inline]
    pub const fn is_held(&self) -> bool { self.held }

    /// Current scale factor, `1.0` released to [`PRESSED_SCALE`] pressed.
    #[inline]
    pub fn scale(&self) -> f32 { lerp(1.0, PRESSED_SCALE, self.amount) }

    /// `color` darkened by the current press amount.
    pub fn tint(
        &self,
        color: Rgb888,
    ) -> Rgb888 {
        scale_rgb888(color, lerp(1.0, PRESSED_TINT, self.amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_press_eases_toward_pressed() {
        let mut button = PressFeedback::new();
        button.press_down();
        button.update(Duration::from_millis(20));
        let partial = button.scale();
        assert!(partial < 1.0 && partial > PRESSED_SCALE);

        button.update(Duration::from_millis(100));
        assert!((button.scale() - PRESSED_SCALE).abs() < EPSILON);
    }

    #[test]
    fn test_release_is_click_once() {
        let mut button = PressFeedback::new();
        assert!(!button.release(), "Release without press is not a click");
        button.press_down();
        assert!(button.is_held());
        assert!(button.release());
        assert!(!button.release());
    }

    #[test]
    fn test_tint_when_pressed() {
        let mut button = PressFeedback::new();
        let white = Rgb888::new(200, 200, 200);
        assert_eq!(button.tint(white), white);

        button.press_down();
        button.update(Duration::from_secs(1));
        assert_eq!(button.tint(white), Rgb888::new(170, 170, 170));
    }

    #[test]
    fn test_release_returns_to_normal() {
        let mut button = PressFeedback::new();
        button.press_down();
        button.update(Duration::from_secs(1));
        button.release();
        button.update(Duration::from_secs(1));
        assert!((button.scale() - 1.0).abs() < EPSILON);
    }
}
