use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Deferred work a round asks its host to run later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundTask {
    Tick,
    HideMismatch,
}

/// Identifies one scheduled task. Handles are never reused by a scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: RoundTask) -> TaskHandle;

    /// Returns `false` when the task already fired or was never scheduled here.
    fn cancel(&mut self, handle: TaskHandle) -> bool;

    /// Removes and returns the earliest task that is due.
    fn pop_due(&mut self) -> Option<(TaskHandle, RoundTask)>;

    /// Time elapsed since the scheduler was created.
    fn now(&self) -> Duration;

    fn pending(&self) -> usize;
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Scheduled {
    due: Duration,
    handle: TaskHandle,
    task: RoundTask,
}

/// Deterministic scheduler driven by [`VirtualClock::advance`].
///
/// Due tasks are handed out in deadline order and the clock steps to each deadline as it goes, so
/// a task scheduled while another one fires is timed from the firing task rather than from the end
/// of the advanced window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VirtualClock {
    now: Duration,
    horizon: Duration,
    next_id: u64,
    queue: Vec<Scheduled>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.horizon = self.horizon.max(self.now) + by;
        if self.next_due().is_none_or(|due| due > self.horizon) {
            self.now = self.horizon;
        }
    }

    /// Earliest pending deadline, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.iter().map(|entry| entry.due).min()
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&mut self, delay: Duration, task: RoundTask) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.queue.push(Scheduled {
            due: self.now + delay,
            handle,
            task,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|entry| entry.handle != handle);
        self.queue.len() != before
    }

    fn pop_due(&mut self) -> Option<(TaskHandle, RoundTask)> {
        let next = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= self.horizon)
            .min_by_key(|(_, entry)| (entry.due, entry.handle))
            .map(|(pos, _)| pos);

        match next {
            Some(pos) => {
                let entry = self.queue.swap_remove(pos);
                self.now = self.now.max(entry.due);
                Some((entry.handle, entry.task))
            }
            None => {
                self.now = self.now.max(self.horizon);
                None
            }
        }
    }

    fn now(&self) -> Duration {
        self.now
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_deadline_order() {
        let mut clock = VirtualClock::new();
        let slow = clock.schedule(Duration::from_secs(1), RoundTask::Tick);
        let fast = clock.schedule(Duration::from_millis(700), RoundTask::HideMismatch);

        assert_eq!(clock.pop_due(), None);
        clock.advance(Duration::from_secs(2));

        assert_eq!(clock.pop_due(), Some((fast, RoundTask::HideMismatch)));
        assert_eq!(clock.now(), Duration::from_millis(700));
        assert_eq!(clock.pop_due(), Some((slow, RoundTask::Tick)));
        assert_eq!(clock.pop_due(), None);
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn rescheduling_while_draining_is_timed_from_the_fired_task() {
        let mut clock = VirtualClock::new();
        clock.schedule(Duration::from_secs(1), RoundTask::Tick);
        clock.advance(Duration::from_secs(3));

        let mut fired = 0;
        while let Some((_, task)) = clock.pop_due() {
            assert_eq!(clock.now(), Duration::from_secs(fired + 1));
            fired += 1;
            clock.schedule(Duration::from_secs(1), task);
        }

        assert_eq!(fired, 3);
        assert_eq!(clock.next_due(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut clock = VirtualClock::new();
        let handle = clock.schedule(Duration::from_millis(700), RoundTask::HideMismatch);

        assert!(clock.cancel(handle));
        assert!(!clock.cancel(handle));
        clock.advance(Duration::from_secs(1));

        assert_eq!(clock.pop_due(), None);
        assert_eq!(clock.pending(), 0);
    }
}
