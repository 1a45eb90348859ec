//! Timer queue for delayed game steps
//!
//! Replaces callback chains with plain data: each entry says what should
//! happen, when, and for which scene generation. The controller drains due
//! entries once per frame and discards any whose generation is no longer
//! current.

use std::time::{Duration, Instant};

/// A delayed step in the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Feeding delay elapsed for this target
    FeedingSettled { target: usize },
    /// Next step of the win count-up
    WinTick,
    /// Count-up finished; show the final message and completion mark
    WinReveal,
}

/// An entry that has come due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueEvent {
    pub generation: u64,
    pub event: TimerEvent,
}

#[derive(Debug)]
struct Scheduled {
    due: Instant,
    sequence: u64,
    generation: u64,
    event: TimerEvent,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_sequence: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `event` to fire `delay` after `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, generation: u64, event: TimerEvent) {
        self.pending.push(Scheduled {
            due: now + delay,
            sequence: self.next_sequence,
            generation,
            event,
        });
        self.next_sequence += 1;
    }

    /// Removes and returns every entry due at `now`
    ///
    /// Entries come out in due order; entries due at the same instant keep
    /// the order they were scheduled in.
    pub fn drain_due(&mut self, now: Instant) -> Vec<DueEvent> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|entry| entry.due <= now);
        self.pending = pending;

        due.sort_by_key(|entry| (entry.due, entry.sequence));
        due.into_iter()
            .map(|entry| DueEvent {
                generation: entry.generation,
                event: entry.event,
            })
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_delay() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        scheduler.schedule(start, Duration::from_millis(200), 1, TimerEvent::WinTick);

        assert!(scheduler.drain_due(start + Duration::from_millis(199)).is_empty());
        assert_eq!(scheduler.len(), 1);

        let due = scheduler.drain_due(start + Duration::from_millis(200));
        assert_eq!(
            due,
            vec![DueEvent {
                generation: 1,
                event: TimerEvent::WinTick
            }]
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        scheduler.schedule(start, Duration::from_millis(500), 1, TimerEvent::WinReveal);
        scheduler.schedule(start, Duration::from_millis(100), 1, TimerEvent::FeedingSettled { target: 1 });
        scheduler.schedule(start, Duration::from_millis(100), 1, TimerEvent::FeedingSettled { target: 0 });

        let events: Vec<_> = scheduler
            .drain_due(start + Duration::from_secs(1))
            .into_iter()
            .map(|due| due.event)
            .collect();
        assert_eq!(
            events,
            vec![
                TimerEvent::FeedingSettled { target: 1 },
                TimerEvent::FeedingSettled { target: 0 },
                TimerEvent::WinReveal,
            ]
        );
    }
}
