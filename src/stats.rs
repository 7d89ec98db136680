use std::collections::VecDeque;

use crate::presenter::Scoreboard;
use crate::util::{mean, round_ms, std_dev};

/// How many recent results feed the rolling average
pub const RECENT_CAPACITY: usize = 5;

/// Results of the current series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionStats {
    last: Option<u32>,
    best: Option<u32>,
    recent: VecDeque<u32>,
    rounds_done: u32,
}

impl ReactionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful round
    pub fn record(&mut self, ms: u32) {
        self.last = Some(ms);
        self.best = Some(self.best.map_or(ms, |best| best.min(ms)));
        self.recent.push_back(ms);
        while self.recent.len() > RECENT_CAPACITY {
            self.recent.pop_front();
        }
        self.rounds_done = self.rounds_done.saturating_add(1);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn last(&self) -> Option<u32> {
        self.last
    }

    pub fn best(&self) -> Option<u32> {
        self.best
    }

    /// Oldest first
    pub fn recent(&self) -> Vec<u32> {
        self.recent.iter().copied().collect()
    }

    pub fn rounds_done(&self) -> u32 {
        self.rounds_done
    }

    pub(crate) fn set_rounds_done(&mut self, rounds_done: u32) {
        self.rounds_done = rounds_done;
    }

    /// Rounded mean of the recent results
    pub fn average(&self) -> Option<u32> {
        mean(&self.recent()).map(round_ms)
    }

    pub fn spread(&self) -> Option<f64> {
        std_dev(&self.recent())
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let recent = self.recent();
        Scoreboard {
            last: self.last,
            best: self.best,
            average: mean(&recent).map(round_ms),
            trials: self.rounds_done,
            spread: std_dev(&recent),
            recent,
        }
    }
}
