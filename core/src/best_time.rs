use alloc::collections::BTreeMap;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Persistence collaborator for the fastest winning time per difficulty.
pub trait BestTimeStore {
    fn best_time(&self, difficulty: Difficulty) -> Option<Duration>;

    fn set_best_time(&mut self, difficulty: Difficulty, time: Duration);

    /// Stores `time` only when it beats the current best, returns whether it did.
    fn offer(&mut self, difficulty: Difficulty, time: Duration) -> bool {
        match self.best_time(difficulty) {
            Some(best) if best <= time => false,
            _ => {
                self.set_best_time(difficulty, time);
                true
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryBestTimes {
    times: BTreeMap<Difficulty, Duration>,
}

impl MemoryBestTimes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestTimeStore for MemoryBestTimes {
    fn best_time(&self, difficulty: Difficulty) -> Option<Duration> {
        self.times.get(&difficulty).copied()
    }

    fn set_best_time(&mut self, difficulty: Difficulty, time: Duration) {
        self.times.insert(difficulty, time);
    }
}
