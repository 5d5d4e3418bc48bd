//! Shared generation progress counter polled by display code.

use std::sync::atomic::{AtomicU32, Ordering};

/// Completion percentage of a terrain generation run, `0..=100`.
///
/// Written by the generation pipeline (including parallel octave tasks) and
/// read concurrently by whatever displays progress. `fetch_max` keeps the
/// counter monotone no matter how writers interleave; reads use relaxed
/// ordering since they are display-only. Reaching 100 is the sole
/// completion signal.
#[derive(Debug, Default)]
pub struct Progress(AtomicU32);

impl Progress {
    pub fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Current percentage.
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Raise the counter to `pct` if it is currently below it.
    pub fn advance_to(&self, pct: u32) {
        self.0.fetch_max(pct.min(100), Ordering::Relaxed);
    }

    pub fn is_complete(&self) -> bool {
        self.get() == 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let progress = Progress::new();
        assert_eq!(progress.get(), 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_never_decreases() {
        let progress = Progress::new();
        progress.advance_to(40);
        progress.advance_to(10);
        assert_eq!(progress.get(), 40);
        progress.advance_to(90);
        assert_eq!(progress.get(), 90);
    }

    #[test]
    fn test_caps_at_one_hundred() {
        let progress = Progress::new();
        progress.advance_to(250);
        assert_eq!(progress.get(), 100);
        assert!(progress.is_complete());
    }
}
