use rampart_core::Tick;
use std::collections::VecDeque;

/// Position in an event stream for cursor-based retrieval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EventCursor(pub u64);

/// An engine event stamped with the tick it happened on and a sequence
/// number for cursor tracking.
#[derive(Clone, Debug)]
pub struct LoggedEvent<E> {
    pub sequence: u64,
    pub tick: Tick,
    pub event: E,
}

/// Bounded log of recent engine events.
///
/// Old entries are dropped once capacity is exceeded; a cursor older than
/// the retained window resumes from the oldest retained event.
pub struct EventLog<E> {
    entries: VecDeque<LoggedEvent<E>>,
    capacity: usize,
    next_sequence: u64,
}

impl<E: Clone> EventLog<E> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, tick: Tick, event: E) {
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(LoggedEvent {
            sequence: self.next_sequence,
            tick,
            event,
        });
        self.next_sequence += 1;
    }

    /// Returns all retained events at or after the cursor, and a cursor
    /// pointing past the last returned event.
    pub fn read_from(&self, cursor: EventCursor) -> (Vec<LoggedEvent<E>>, EventCursor) {
        let events: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.sequence >= cursor.0)
            .cloned()
            .collect();
        (events, EventCursor(self.next_sequence))
    }

    pub fn current_sequence(&self) -> u64 {
        self.next_sequence
    }
}
