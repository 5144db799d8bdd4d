use std::collections::VecDeque;

use super::Event;

/// Unbounded FIFO of translated events.
///
/// Backends push in native delivery order; the window pops from the front.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Take the oldest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;

    #[test]
    fn pops_in_push_order() {
        let mut queue = EventQueue::new();
        queue.push(Event::key_pressed(Key::A));
        queue.extend([Event::mouse_wheel(1), Event::window_closed()]);
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pop(), Some(Event::key_pressed(Key::A)));
        assert_eq!(queue.pop(), Some(Event::mouse_wheel(1)));
        assert_eq!(queue.pop(), Some(Event::window_closed()));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }
}
