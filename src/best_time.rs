//! Storage for the fastest completion time.
//!
//! The best time outlives individual games but is never written to disk, so
//! it resets whenever the process restarts. Sessions take the store as a
//! type parameter so tests can start from a known best.

pub trait BestTimeStore {
    fn best(&self) -> Option<u32>;

    /// Offers a completion time. Returns `true` when it is a new best, i.e.
    /// there was no previous best or it is strictly lower. Equal times are
    /// neither stored nor reported.
    fn record(&mut self, secs: u32) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryBestTime {
    best: Option<u32>,
}

impl MemoryBestTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(secs: u32) -> Self {
        Self { best: Some(secs) }
    }
}

impl BestTimeStore for MemoryBestTime {
    fn best(&self) -> Option<u32> {
        self.best
    }

    fn record(&mut self, secs: u32) -> bool {
        let improved = self.best.map_or(true, |best| secs < best);
        if improved {
            self.best = Some(secs);
        }
        improved
    }
}
