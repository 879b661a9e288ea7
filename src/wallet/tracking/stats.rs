//! Fetch accounting for the tracking store.
//!
//! `FetchStats` counts every fetch round the store issues and what became of each
//! completion: applied as a success, applied as a failure, or discarded because the
//! entry had moved on or disappeared. The counters make discarded work observable
//! even though it never changes visible state.

use crate::wallet::types::DiscardReason;

/// Counters for fetch rounds issued and completed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Fetch rounds handed out (adds plus refreshes)
    pub issued: usize,
    /// Completions applied as `Ready`
    pub applied: usize,
    /// Completions applied as `Failed`
    pub failed: usize,
    /// Completions dropped because a newer epoch was current
    pub discarded_stale: usize,
    /// Completions dropped because the entry no longer existed
    pub discarded_orphaned: usize,
}

impl FetchStats {
    pub fn record_issued(&mut self) {
        self.issued += 1;
    }

    pub fn record_applied(&mut self) {
        self.applied += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn record_discarded(&mut self, reason: DiscardReason) {
        match reason {
            DiscardReason::Stale => self.discarded_stale += 1,
            DiscardReason::Orphaned => self.discarded_orphaned += 1,
        }
    }

    /// Completions of any kind seen so far
    pub fn completed(&self) -> usize {
        self.applied + self.failed + self.discarded_stale + self.discarded_orphaned
    }

    /// Rounds issued whose completion has not arrived yet
    pub fn in_flight(&self) -> usize {
        self.issued.saturating_sub(self.completed())
    }

    /// Get a human-readable summary of the counters
    pub fn summary(&self) -> String {
        let discarded = self.discarded_stale + self.discarded_orphaned;
        format!(
            "{} fetches issued: {} ready, {} failed, {} in flight{}",
            self.issued,
            self.applied,
            self.failed,
            self.in_flight(),
            if discarded == 0 {
                String::new()
            } else {
                format!(
                    " ({} discarded: {} stale, {} orphaned)",
                    discarded, self.discarded_stale, self.discarded_orphaned
                )
            }
        )
    }
}
