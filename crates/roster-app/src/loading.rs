// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;

use crate::{Company, CompanySummary};

/// Coalesces level-triggered load-more requests to one per data length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreLatch {
    coalesce: bool,
    fired_at: Option<usize>,
}

impl Default for LoadMoreLatch {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LoadMoreLatch {
    /// With `coalesce` off every request passes through.
    pub const fn new(coalesce: bool) -> Self {
        Self {
            coalesce,
            fired_at: None,
        }
    }

    pub fn request(&mut self, len: usize) -> bool {
        if !self.coalesce {
            return true;
        }
        if self.fired_at == Some(len) {
            return false;
        }
        self.fired_at = Some(len);
        true
    }

    /// Rearms the latch. Called when rows arrive, so a later shrink back to
    /// a length that already fired still gets its request through.
    pub fn reset(&mut self) {
        self.fired_at = None;
    }
}

/// Tracks how many companies have already had employees generated for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompanyGrowth {
    seen: usize,
}

impl CompanyGrowth {
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Summaries of the rows past the last observed length, or `None` when
    /// the collection did not grow. The observed length is updated either
    /// way, so shrinking lowers the baseline.
    pub fn observe(&mut self, companies: &[Company]) -> Option<Vec<CompanySummary>> {
        let previous = std::mem::replace(&mut self.seen, companies.len());
        if companies.len() <= previous {
            return None;
        }
        Some(companies[previous..].iter().map(Company::summary).collect())
    }
}

/// Employee batches waiting for their delay to elapse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingSeeds {
    next_token: u64,
    pending: HashMap<u64, Vec<CompanySummary>>,
}

impl PendingSeeds {
    pub fn schedule(&mut self, pool: Vec<CompanySummary>) -> u64 {
        self.next_token = self.next_token.wrapping_add(1);
        self.pending.insert(self.next_token, pool);
        self.next_token
    }

    /// Claims a batch. Unknown and cancelled tokens yield `None`.
    pub fn take(&mut self, token: u64) -> Option<Vec<CompanySummary>> {
        self.pending.remove(&token)
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CompanyGrowth, LoadMoreLatch, PendingSeeds};
    use crate::{Company, CompanyId};

    fn companies(count: u8) -> Vec<Company> {
        (0..count)
            .map(|seed| Company {
                id: CompanyId::from_random_bytes([seed; 16]),
                name: format!("Company {seed}"),
                employees_count: None,
                address: String::new(),
            })
            .collect()
    }

    #[test]
    fn latch_fires_once_per_length() {
        let mut latch = LoadMoreLatch::default();
        assert!(latch.request(40));
        assert!(!latch.request(40));
        assert!(!latch.request(40));
        assert!(latch.request(60));
        assert!(!latch.request(60));
    }

    #[test]
    fn latch_rearms_after_rows_arrive() {
        let mut latch = LoadMoreLatch::default();
        assert!(latch.request(40));
        // 20 rows arrive, then 20 get deleted before the next bottom scroll.
        latch.reset();
        assert!(latch.request(40));
        assert!(!latch.request(40));
    }

    #[test]
    fn disabled_latch_passes_everything() {
        let mut latch = LoadMoreLatch::new(false);
        assert!(latch.request(40));
        assert!(latch.request(40));
    }

    #[test]
    fn growth_returns_only_new_tail() {
        let rows = companies(5);
        let mut growth = CompanyGrowth::default();

        let first = growth.observe(&rows[..3]).expect("initial batch");
        assert_eq!(first.len(), 3);

        let tail = growth.observe(&rows).expect("appended batch");
        let ids = tail.iter().map(|summary| summary.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![rows[3].id, rows[4].id]);
        assert_eq!(tail[0].name, "Company 3");

        assert_eq!(growth.observe(&rows), None);
        assert_eq!(growth.seen(), 5);
    }

    #[test]
    fn shrinking_resets_the_baseline() {
        let rows = companies(4);
        let mut growth = CompanyGrowth::default();
        growth.observe(&rows);

        assert_eq!(growth.observe(&rows[..2]), None);
        assert_eq!(growth.seen(), 2);
        let tail = growth.observe(&rows[..3]).expect("grown again");
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].id, rows[2].id);
    }

    #[test]
    fn pending_seeds_ignore_cancelled_tokens() {
        let rows = companies(2);
        let mut seeds = PendingSeeds::default();
        let first = seeds.schedule(vec![rows[0].summary()]);
        let second = seeds.schedule(vec![rows[1].summary()]);
        assert_ne!(first, second);

        assert_eq!(seeds.take(first), Some(vec![rows[0].summary()]));
        assert_eq!(seeds.take(first), None);

        assert_eq!(seeds.cancel_all(), 1);
        assert_eq!(seeds.take(second), None);
        assert!(seeds.is_empty());
        assert_eq!(seeds.take(999), None);
    }
}
