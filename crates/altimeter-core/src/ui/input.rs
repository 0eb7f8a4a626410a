//! Touch sampling
//!
//! Touch controllers are polled: each poll reports either the current finger
//! position or nothing. [`TouchTracker`] remembers the previous poll and turns
//! the stream into edge events.

use crate::ui::core::{TouchEvent, TouchPoint};

#[derive(Debug, Default)]
pub struct TouchTracker {
    last: Option<TouchPoint>,
}

impl TouchTracker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed one poll result.
    ///
    /// - first contact yields `Press`
    /// - a moved contact yields `Drag`, an unmoved one yields nothing
    /// - losing contact yields `Release` at the last known point
    pub fn update(&mut self, sample: Option<TouchPoint>) -> Option<TouchEvent> {
        let event = match (self.last, sample) {
            (None, Some(point)) => Some(TouchEvent::Press(point)),
            (Some(previous), Some(point)) if previous != point => Some(TouchEvent::Drag(point)),
            (Some(_), Some(_)) => None,
            (Some(previous), None) => Some(TouchEvent::Release(previous)),
            (None, None) => None,
        };
        self.last = sample;
        event
    }

    pub fn is_touching(&self) -> bool {
        self.last.is_some()
    }
}
