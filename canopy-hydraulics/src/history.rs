use std::collections::VecDeque;

/// Ordered record of system conductance, one entry per critical-flow solve.
///
/// The newest entry is the current maximum conductance of the system.
/// When the capacity is reached the oldest entry is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductanceHistory {
    entries: VecDeque<f64>,
    capacity: usize,
}

impl ConductanceHistory {
    /// Creates an empty history holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one so the latest value is always kept.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a conductance, dropping the oldest entry if full.
    pub fn push(&mut self, conductance: f64) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(conductance);
    }

    /// Returns the most recent conductance.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.entries.back().copied()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().copied()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
