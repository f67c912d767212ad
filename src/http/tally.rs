use std::collections::BTreeMap;

/// Status code to occurrence count.
///
/// Counts are plain commutative increments, so the final tally does not
/// depend on the order outcomes are folded in. The dispatcher only mutates a
/// tally from a single task after the completion barrier; no lock is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    counts: BTreeMap<u16, u64>,
}

impl OutcomeTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: u16) {
        let count = self.counts.entry(status).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Adds every count from `other` into `self`.
    pub fn merge(&mut self, other: &OutcomeTally) {
        for (status, count) in &other.counts {
            let entry = self.counts.entry(*status).or_insert(0);
            *entry = entry.saturating_add(*count);
        }
    }

    #[must_use]
    pub fn count(&self, status: u16) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Sum over all buckets.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Buckets in ascending status-code order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }
}

impl Extend<u16> for OutcomeTally {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, statuses: I) {
        for status in statuses {
            self.record(status);
        }
    }
}

impl FromIterator<u16> for OutcomeTally {
    fn from_iter<I: IntoIterator<Item = u16>>(statuses: I) -> Self {
        let mut tally = Self::new();
        tally.extend(statuses);
        tally
    }
}
