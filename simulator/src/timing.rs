//! Timing constants for the simulator.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Longest frame delta handed to the flow. A stalled window (dragging,
/// breakpoints) would otherwise skip whole fades in one tick.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);
