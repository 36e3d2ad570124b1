//! Loading bar fill state.
//!
//! The loading ramp sets a target; the displayed fill chases it at a fixed
//! speed so the bar never jumps, even if the target moves in large steps.
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │███████████████████▌                │  fill, color BAR_START → BAR_END
//! └────────────────────────────────────┘
//!                     ^ glow (only while 1% < fill < 99%)
//! ```

use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::{BAR_END, BAR_START, lerp_rgb888};
use crate::config::BAR_SMOOTH_SPEED;
use crate::timing::move_towards;

/// Below this fill the glow is hidden.
const GLOW_MIN_FILL: f32 = 0.01;

/// Above this fill the glow is hidden.
const GLOW_MAX_FILL: f32 = 0.99;

/// Smoothed progress bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadingBar {
    target: f32,
    fill: f32,
    /// Fill speed in full bars per second.
    smooth_speed: f32,
}

impl LoadingBar {
    pub const fn new() -> Self { Self::with_speed(BAR_SMOOTH_SPEED) }

    pub const fn with_speed(smooth_speed: f32) -> Self {
        Self {
            target: 0.0,
            fill: 0.0,
            smooth_speed,
        }
    }

    /// Set the fill target, clamped to `0.0..=1.0`.
    pub fn set_progress(
        &mut self,
        progress: f32,
    ) {
        self.target = progress.clamp(0.0, 1.0);
    }

    /// Jump the fill and target to `progress` with no smoothing.
    pub fn set_immediate(
        &mut self,
        progress: f32,
    ) {
        self.set_progress(progress);
        self.fill = self.target;
    }

    /// Move the fill toward the target.
    pub fn update(
        &mut self,
        dt: Duration,
    ) {
        self.fill = move_towards(self.fill, self.target, self.smooth_speed * dt.as_secs_f32());
    }

    #[inline]
    pub const fn fill(&self) -> f32 { self.fill }

    #[inline]
    pub const fn target(&self) -> f32 { self.target }

    /// Fill color for the current fill amount.
    pub fn color(&self) -> Rgb888 { lerp_rgb888(BAR_START, BAR_END, self.fill) }

    /// Whether the leading-edge glow is drawn.
    #[inline]
    pub fn glow_visible(&self) -> bool { self.fill > GLOW_MIN_FILL && self.fill < GLOW_MAX_FILL }

    /// Glow x position for a bar `width` pixels wide.
    #[inline]
    pub fn glow_offset(
        &self,
        width: u32,
    ) -> i32 {
        (self.fill * width as f32).round() as i32
    }
}

impl Default for LoadingBar {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
