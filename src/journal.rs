//! Flow journal: a fixed-capacity record of lifecycle events.
//!
//! The engine and screens push a [`FlowEvent`] for every show, hide, enter,
//! exit, and transition decision. Only the most recent [`JOURNAL_CAPACITY`]
//! events are kept; older ones are dropped from the front.
//!
//! The simulator renders the tail of the journal as a debug overlay. Tests use
//! it to check hook ordering without instrumenting the screens.
//!
//! # Usage
//!
//! ```ignore
//! let mut journal = Journal::new();
//! journal.push(FlowEvent::Shown(ScreenId::Logo));
//!
//! for line in journal.lines() {
//!     draw_text(&line);
//! }
//! ```

use core::fmt::Write;

use heapless::{Deque, String};

use crate::screen::ScreenId;

// =============================================================================
// Journal Configuration
// =============================================================================

/// Maximum number of events kept.
pub const JOURNAL_CAPACITY: usize = 32;

/// Maximum characters per rendered journal line.
pub const JOURNAL_LINE_LENGTH: usize = 40;

// =============================================================================
// Flow Events
// =============================================================================

/// One lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    /// Screen made visible without animation.
    Shown(ScreenId),
    /// Screen hidden without animation.
    Hidden(ScreenId),
    /// Enter hook ran.
    Entered(ScreenId),
    /// Exit hook ran.
    Exited(ScreenId),
    /// A transition was accepted.
    TransitionStarted { from: Option<ScreenId>, to: ScreenId },
    /// The target of a transition finished fading in.
    TransitionFinished(ScreenId),
    /// A transition request arrived while another was in flight.
    TransitionDropped(ScreenId),
}

impl FlowEvent {
    /// Render the event as a short overlay line.
    pub fn describe(&self) -> String<JOURNAL_LINE_LENGTH> {
        let mut line = String::new();
        // Longest line is well under the capacity; overflow only truncates.
        let _ = match *self {
            Self::Shown(id) => write!(line, "show {id}"),
            Self::Hidden(id) => write!(line, "hide {id}"),
            Self::Entered(id) => write!(line, "enter {id}"),
            Self::Exited(id) => write!(line, "exit {id}"),
            Self::TransitionStarted { from: Some(from), to } => write!(line, "{from} -> {to}"),
            Self::TransitionStarted { from: None, to } => write!(line, "-> {to}"),
            Self::TransitionFinished(id) => write!(line, "at {id}"),
            Self::TransitionDropped(id) => write!(line, "drop -> {id}"),
        };
        line
    }
}

// =============================================================================
// Journal Ring Buffer
// =============================================================================

/// Ring buffer of the most recent flow events.
#[derive(Clone, Debug)]
pub struct Journal {
    events: Deque<FlowEvent, JOURNAL_CAPACITY>,
}

impl Journal {
    /// Create an empty journal.
    pub const fn new() -> Self { Self { events: Deque::new() } }

    /// Record an event. If the buffer is full, the oldest event is dropped.
    pub fn push(
        &mut self,
        event: FlowEvent,
    ) {
        if self.events.is_full() {
            self.events.pop_front();
        }
        // Cannot fail: a slot was just freed if needed.
        let _ = self.events.push_back(event);
    }

    /// Iterate over events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FlowEvent> { self.events.iter() }

    /// Rendered lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = String<JOURNAL_LINE_LENGTH>> + '_ { self.events.iter().map(FlowEvent::describe) }

    #[inline]
    pub fn last(&self) -> Option<&FlowEvent> { self.events.back() }

    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }

    pub fn clear(&mut self) { self.events.clear() }
}

impl Default for Journal {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iter_order() {
        let mut journal = Journal::new();
        assert!(journal.is_empty());

        journal.push(FlowEvent::Shown(ScreenId::Logo));
        journal.push(FlowEvent::Entered(ScreenId::Logo));

        let events: Vec<_> = journal.iter().copied().collect();
        assert_eq!(events, vec![FlowEvent::Shown(ScreenId::Logo), FlowEvent::Entered(ScreenId::Logo)]);
        assert_eq!(journal.last(), Some(&FlowEvent::Entered(ScreenId::Logo)));
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut journal = Journal::new();
        journal.push(FlowEvent::Shown(ScreenId::Logo));
        for _ in 0..JOURNAL_CAPACITY {
            journal.push(FlowEvent::Hidden(ScreenId::Home));
        }

        assert_eq!(journal.len(), JOURNAL_CAPACITY);
        assert!(
            journal.iter().all(|e| *e == FlowEvent::Hidden(ScreenId::Home)),
            "The first event should have been dropped"
        );
    }

    #[test]
    fn test_describe() {
        let started = FlowEvent::TransitionStarted {
            from: Some(ScreenId::Logo),
            to: ScreenId::Loading,
        };
        assert_eq!(started.describe().as_str(), "logo -> loading");
        assert_eq!(
            FlowEvent::TransitionStarted { from: None, to: ScreenId::Home }.describe().as_str(),
            "-> home"
        );
        assert_eq!(FlowEvent::TransitionDropped(ScreenId::Settings).describe().as_str(), "drop -> settings");
    }

    #[test]
    fn test_clear() {
        let mut journal = Journal::new();
        journal.push(FlowEvent::Exited(ScreenId::Splash));
        journal.clear();
        assert!(journal.is_empty());
        assert_eq!(journal.lines().count(), 0);
    }
}
