//! Cancellable timed sequences driven by the host tick.
//!
//! Every time-based behavior in the flow (screen fades, the loading ramp,
//! the hold at 100%, the tip carousel timer and its crossfade) is a
//! [`Sequence`]. A sequence does not own a clock: the host passes the wall-clock
//! time elapsed since the previous tick to [`Sequence::advance`], so progress
//! is independent of frame cadence.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──start()──→ Running ──advance() past duration──→ Finished
//!                      │
//!                      └──cancel()──→ Cancelled (elapsed time is kept)
//! ```
//!
//! A cancelled sequence keeps whatever partial progress it had, so a visual
//! value derived from it stays where it was when the owner was torn down.
//!
//! # Overflow
//!
//! When a tick overshoots the end of a sequence, the excess time is returned in
//! [`Step::Finished`]. Owners chaining sequences (ramp → hold, fade-out →
//! fade-in) feed that excess into the next one so chained timings stay exact
//! regardless of tick size.

use core::time::Duration;

// =============================================================================
// Easing
// =============================================================================

/// Mapping from linear progress to displayed progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Displayed progress equals elapsed fraction.
    #[default]
    Linear,

    /// Quadratic ease-out: `1 - (1 - t)^2`. Fast start, gentle finish.
    EaseOutQuad,
}

impl Easing {
    /// Apply the curve to a linear fraction. Input is clamped to `0.0..=1.0`.
    #[inline]
    pub fn apply(
        self,
        t: f32,
    ) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
        }
    }
}

// =============================================================================
// Sequence
// =============================================================================

/// Where a sequence is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SequenceState {
    /// Never started.
    #[default]
    Idle,
    /// Advancing on each tick.
    Running,
    /// Reached its duration.
    Finished,
    /// Stopped before reaching its duration.
    Cancelled,
}

/// Result of advancing a sequence by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// The sequence is not running; nothing happened.
    Inactive,
    /// Still running. Carries the eased progress after this tick.
    Running(f32),
    /// Reached the end during this tick. `overflow` is the part of the tick
    /// that was not needed to finish.
    Finished { overflow: Duration },
}

/// A cancellable countdown with an easing curve.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Sequence {
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    state: SequenceState,
}

impl Sequence {
    /// Create an idle sequence. Call [`Sequence::start`] to run it.
    pub const fn idle() -> Self {
        Self {
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
            state: SequenceState::Idle,
        }
    }

    /// Start (or restart) the sequence from zero.
    pub const fn start(
        &mut self,
        duration: Duration,
        easing: Easing,
    ) {
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.easing = easing;
        self.state = SequenceState::Running;
    }

    /// Restart with the previous duration and easing.
    pub const fn restart(&mut self) { self.start(self.duration, self.easing) }

    /// Stop future progress. Returns `true` if the sequence was running.
    pub fn cancel(&mut self) -> bool {
        if self.state == SequenceState::Running {
            self.state = SequenceState::Cancelled;
            true
        } else {
            false
        }
    }

    /// Advance by `dt` of wall-clock time.
    ///
    /// A zero-length sequence finishes on its first advance, even with `dt == 0`.
    pub fn advance(
        &mut self,
        dt: Duration,
    ) -> Step {
        if self.state != SequenceState::Running {
            return Step::Inactive;
        }

        self.elapsed = self.elapsed.saturating_add(dt);

        if self.elapsed >= self.duration {
            let overflow = self.elapsed - self.duration;
            self.elapsed = self.duration;
            self.state = SequenceState::Finished;
            Step::Finished { overflow }
        } else {
            Step::Running(self.progress())
        }
    }

    /// Elapsed fraction of the duration, `0.0..=1.0`, before easing.
    pub fn linear(&self) -> f32 {
        if self.duration.is_zero() {
            return if self.state == SequenceState::Finished { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Eased progress, `0.0..=1.0`.
    #[inline]
    pub fn progress(&self) -> f32 { self.easing.apply(self.linear()) }

    #[inline]
    pub const fn state(&self) -> SequenceState { self.state }

    #[inline]
    pub const fn duration(&self) -> Duration { self.duration }

    #[inline]
    pub const fn elapsed(&self) -> Duration { self.elapsed }

    #[inline]
    pub const fn easing(&self) -> Easing { self.easing }

    #[inline]
    pub const fn is_running(&self) -> bool { matches!(self.state, SequenceState::Running) }

    #[inline]
    pub const fn is_finished(&self) -> bool { matches!(self.state, SequenceState::Finished) }
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(
    from: f32,
    to: f32,
    t: f32,
) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Move `current` toward `target` by at most `max_delta`, without overshooting.
#[inline]
pub fn move_towards(
    current: f32,
    target: f32,
    max_delta: f32,
) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn ms(value: u64) -> Duration { Duration::from_millis(value) }

    // -------------------------------------------------------------------------
    // Easing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_linear_easing_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((Easing::Linear.apply(t) - t).abs() < EPSILON);
        }
    }

    #[test]
    fn test_ease_out_quad_values() {
        assert!(Easing::EaseOutQuad.apply(0.0).abs() < EPSILON);
        assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < EPSILON);
        assert!((Easing::EaseOutQuad.apply(1.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::EaseOutQuad.apply(2.0) - 1.0).abs() < EPSILON);
        assert!(Easing::Linear.apply(-1.0).abs() < EPSILON);
    }

    #[test]
    fn test_ease_out_quad_monotonic() {
        let mut previous = 0.0;
        for i in 0..=100 {
            let value = Easing::EaseOutQuad.apply(i as f32 / 100.0);
            assert!(value >= previous, "Eased value should never decrease");
            previous = value;
        }
    }

    // -------------------------------------------------------------------------
    // Sequence Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_idle_sequence_does_not_advance() {
        let mut seq = Sequence::idle();
        assert_eq!(seq.advance(ms(100)), Step::Inactive);
        assert_eq!(seq.state(), SequenceState::Idle);
        assert_eq!(seq.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_sequence_runs_to_completion() {
        let mut seq = Sequence::idle();
        seq.start(ms(300), Easing::Linear);

        match seq.advance(ms(100)) {
            Step::Running(p) => assert!((p - 1.0 / 3.0).abs() < 1e-4),
            other => panic!("Expected running, got {other:?}"),
        }
        assert!(seq.is_running());

        assert!(matches!(seq.advance(ms(100)), Step::Running(_)));
        assert_eq!(seq.advance(ms(100)), Step::Finished { overflow: Duration::ZERO });
        assert!(seq.is_finished());
        assert!((seq.progress() - 1.0).abs() < EPSILON);

        // Further ticks are ignored
        assert_eq!(seq.advance(ms(100)), Step::Inactive);
    }

    #[test]
    fn test_sequence_reports_overflow() {
        let mut seq = Sequence::idle();
        seq.start(ms(250), Easing::Linear);
        assert_eq!(seq.advance(ms(400)), Step::Finished { overflow: ms(150) });
        assert_eq!(seq.elapsed(), ms(250));
    }

    #[test]
    fn test_zero_length_sequence_finishes_immediately() {
        let mut seq = Sequence::idle();
        seq.start(Duration::ZERO, Easing::Linear);
        assert!(seq.progress().abs() < EPSILON);
        assert_eq!(seq.advance(Duration::ZERO), Step::Finished { overflow: Duration::ZERO });
        assert!((seq.progress() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_cancel_keeps_partial_progress() {
        let mut seq = Sequence::idle();
        seq.start(ms(1000), Easing::Linear);
        seq.advance(ms(400));

        assert!(seq.cancel(), "Cancelling a running sequence should report true");
        assert_eq!(seq.state(), SequenceState::Cancelled);
        assert!((seq.progress() - 0.4).abs() < 1e-4, "Partial progress must survive cancel");

        assert_eq!(seq.advance(ms(1000)), Step::Inactive);
        assert!(!seq.cancel(), "Cancelling twice should report false");
    }

    #[test]
    fn test_restart_resets_elapsed() {
        let mut seq = Sequence::idle();
        seq.start(ms(500), Easing::EaseOutQuad);
        seq.advance(ms(500));
        seq.restart();

        assert!(seq.is_running());
        assert_eq!(seq.elapsed(), Duration::ZERO);
        assert_eq!(seq.duration(), ms(500));
        assert_eq!(seq.easing(), Easing::EaseOutQuad);
    }

    #[test]
    fn test_progress_independent_of_tick_size() {
        let mut coarse = Sequence::idle();
        let mut fine = Sequence::idle();
        coarse.start(ms(1000), Easing::EaseOutQuad);
        fine.start(ms(1000), Easing::EaseOutQuad);

        coarse.advance(ms(600));
        for _ in 0..60 {
            fine.advance(ms(10));
        }

        assert!((coarse.progress() - fine.progress()).abs() < EPSILON);
    }

    // -------------------------------------------------------------------------
    // Helper Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_lerp() {
        assert!((lerp(1.0, 0.0, 0.25) - 0.75).abs() < EPSILON);
        assert!((lerp(0.0, 10.0, 2.0) - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_move_towards_does_not_overshoot() {
        assert!((move_towards(0.0, 1.0, 0.3) - 0.3).abs() < EPSILON);
        assert!((move_towards(0.9, 1.0, 0.3) - 1.0).abs() < EPSILON);
        assert!((move_towards(1.0, 0.0, 0.25) - 0.75).abs() < EPSILON);
    }
}
