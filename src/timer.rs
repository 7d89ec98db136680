use std::time::Duration;

/// What a scheduled timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Randomized wait is over: show the signal
    Signal,
    /// Pause between rounds is over: start the next round
    NextRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Cancellable one-shot timers keyed by absolute deadlines
pub trait Scheduler {
    fn schedule(&mut self, deadline: Duration, timer: Timer) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
    /// Remove and return the earliest timer whose deadline is at or before `now`
    fn pop_due(&mut self, now: Duration) -> Option<(TimerHandle, Timer)>;
    fn next_deadline(&self) -> Option<Duration>;
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: TimerHandle,
    deadline: Duration,
    timer: Timer,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn scheduled(&self) -> Vec<Timer> {
        self.entries.iter().map(|e| e.timer).collect()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, deadline: Duration, timer: Timer) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            deadline,
            timer,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    fn pop_due(&mut self, now: Duration) -> Option<(TimerHandle, Timer)> {
        // ties fire in scheduling order
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.handle.0))
            .map(|(idx, _)| idx)?;
        let entry = self.entries.remove(idx);
        Some((entry.handle, entry.timer))
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(1000), Timer::Signal);
        assert_eq!(queue.pop_due(ms(999)), None);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.next_deadline(), Some(ms(1000)));
    }

    #[test]
    fn fires_at_deadline_and_only_once() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(ms(600), Timer::NextRound);
        assert_eq!(queue.pop_due(ms(600)), Some((handle, Timer::NextRound)));
        assert_eq!(queue.pop_due(ms(10_000)), None);
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn earliest_deadline_fires_first() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(ms(900), Timer::Signal);
        let early = queue.schedule(ms(300), Timer::NextRound);
        assert_eq!(queue.pop_due(ms(1000)), Some((early, Timer::NextRound)));
        assert_eq!(queue.pop_due(ms(1000)), Some((late, Timer::Signal)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(ms(100), Timer::Signal);
        queue.cancel(handle);
        assert!(!queue.contains(handle));
        assert_eq!(queue.pop_due(ms(1000)), None);

        // cancelling twice is harmless
        queue.cancel(handle);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(ms(1), Timer::Signal);
        queue.cancel(first);
        let second = queue.schedule(ms(1), Timer::Signal);
        assert_ne!(first, second);
    }
}
