//! Instrumentation for concurrently active product lookups.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts product lookups currently in flight and remembers the peak.
///
/// Each lookup holds an [`InFlightGuard`] for the duration of its simulated
/// wait. The gauge is shared by reference across worker threads, so both
/// counters are atomics.
#[derive(Debug, Default)]
pub struct InFlightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlightGauge {
    /// Creates a gauge with both counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Marks one lookup as started. The lookup ends when the guard drops.
    #[must_use = "the lookup is counted only while the guard is alive"]
    pub fn enter(&self) -> InFlightGuard<'_> {
        let now = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(now, Ordering::AcqRel);
        InFlightGuard { gauge: self }
    }

    /// Lookups in flight right now.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    /// Highest number of simultaneous lookups since creation or the last
    /// [`reset_peak`](Self::reset_peak).
    #[must_use]
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    /// Resets the peak to the current level.
    pub fn reset_peak(&self) {
        self.peak.store(self.current(), Ordering::Release);
    }
}

/// RAII marker for one in-flight lookup.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    gauge: &'a InFlightGauge,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gauge.current.fetch_sub(1, Ordering::AcqRel);
    }
}
