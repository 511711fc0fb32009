//! Pointer events in surface coordinates.

use serde::{Deserialize, Serialize};

/// Pointer event from a mouse or touch source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Pointer pressed (mouse down, touch start)
    Down {
        /// Surface-local x
        x: f64,
        /// Surface-local y
        y: f64,
    },
    /// Pointer moved
    Move {
        /// Surface-local x
        x: f64,
        /// Surface-local y
        y: f64,
    },
    /// Pointer released (mouse up, touch end)
    Up,
    /// Pointer left the surface
    Leave,
    /// Touch cancelled by the platform
    Cancel,
}

impl PointerEvent {
    /// Check if this event ends a stroke
    #[must_use]
    pub const fn ends_stroke(&self) -> bool {
        matches!(self, Self::Up | Self::Leave | Self::Cancel)
    }
}

/// Source of pointer events, pulled until exhausted
pub trait InputSource {
    /// Next event, or `None` when the source is drained
    fn next_event(&mut self) -> Option<PointerEvent>;
}

impl<I: Iterator<Item = PointerEvent>> InputSource for I {
    fn next_event(&mut self) -> Option<PointerEvent> {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_stroke() {
        assert!(PointerEvent::Up.ends_stroke());
        assert!(PointerEvent::Leave.ends_stroke());
        assert!(PointerEvent::Cancel.ends_stroke());
        assert!(!PointerEvent::Down { x: 0.0, y: 0.0 }.ends_stroke());
        assert!(!PointerEvent::Move { x: 0.0, y: 0.0 }.ends_stroke());
    }

    #[test]
    fn test_iterator_source() {
        let mut source = vec![PointerEvent::Down { x: 1.0, y: 2.0 }, PointerEvent::Up].into_iter();
        assert_eq!(source.next_event(), Some(PointerEvent::Down { x: 1.0, y: 2.0 }));
        assert_eq!(source.next_event(), Some(PointerEvent::Up));
        assert_eq!(source.next_event(), None);
    }
}
