//! Level history tracking.
//!
//! A [`Querier`] keeps the running hierarchical counter for a stream of
//! heading levels. Besides the counter vector it records the highest value
//! each level ever reached, which is what [`Querier::query`] uses to work out
//! how many leading levels only ever held a single heading.

use super::{MAX_LEVEL, is_valid_level};

/// Hierarchical counter over heading levels 1-6.
///
/// # Examples
///
/// ```
/// # use heading_decorator::decorator::Querier;
/// let mut querier = Querier::new(false, 6);
/// assert_eq!(querier.observe(1), &[1]);
/// assert_eq!(querier.observe(3), &[1, 1, 1]);
/// assert_eq!(querier.observe(2), &[1, 2]);
/// assert_eq!(querier.observe(7), &[] as &[u32]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Querier {
    counters: [u32; MAX_LEVEL],
    peaks: [u32; MAX_LEVEL],
    deepest: usize,
    allow_zero_level: bool,
    max_rec_level: usize,
}

impl Default for Querier {
    fn default() -> Self {
        Self::new(false, MAX_LEVEL)
    }
}

impl Querier {
    /// Create a tracker.
    ///
    /// With `allow_zero_level`, levels skipped over before they were ever
    /// seen stay at 0; otherwise they count as 1. Levels deeper than
    /// `max_rec_level` are ignored entirely.
    pub fn new(allow_zero_level: bool, max_rec_level: usize) -> Self {
        Self {
            counters: [0; MAX_LEVEL],
            peaks: [0; MAX_LEVEL],
            deepest: 0,
            allow_zero_level,
            max_rec_level,
        }
    }

    /// Record a heading at `level` and return the counter vector up to it.
    ///
    /// Returns an empty slice without touching any state when `level` is not
    /// in 1-6 or lies beyond the configured ceiling.
    pub fn observe(&mut self, level: usize) -> &[u32] {
        if !is_valid_level(level) || level > self.max_rec_level {
            tracing::trace!(level, ceiling = self.max_rec_level, "level ignored");
            return &[];
        }

        let idx = level - 1;
        for i in 0..idx {
            if self.counters[i] == 0 && !self.allow_zero_level {
                self.counters[i] = 1;
            }
            self.peaks[i] = self.peaks[i].max(self.counters[i]);
        }

        self.counters[idx] += 1;
        self.peaks[idx] = self.peaks[idx].max(self.counters[idx]);

        for counter in &mut self.counters[level..] {
            *counter = 0;
        }

        self.deepest = self.deepest.max(level);
        &self.counters[..level]
    }

    /// Number of leading levels whose numbering can be suppressed.
    ///
    /// Counts levels from level 1 downwards that have only ever held a single
    /// heading, stopping at one above the deepest level seen so far. With
    /// `ignore_single`, `ignore_maximum` is returned until some level has
    /// held a second heading, since until then the document may still turn
    /// out to have a single top-level heading.
    pub fn query(&self, ignore_single: bool, ignore_maximum: usize) -> usize {
        if ignore_single && !self.peaks.iter().any(|&peak| peak >= 2) {
            return ignore_maximum.min(MAX_LEVEL);
        }

        let cap = self.deepest.saturating_sub(1);
        self.peaks[..cap]
            .iter()
            .take_while(|&&peak| peak == 1)
            .count()
    }

    /// [`query`](Self::query) with `ignore_single` off.
    pub fn query_default(&self) -> usize {
        self.query(false, MAX_LEVEL)
    }

    /// Current counter vector, all six levels.
    pub fn counters(&self) -> &[u32; MAX_LEVEL] {
        &self.counters
    }

    /// Deepest level observed so far, 0 before any heading.
    pub fn deepest(&self) -> usize {
        self.deepest
    }
}
