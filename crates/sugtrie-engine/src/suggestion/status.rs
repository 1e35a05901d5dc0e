// Per-query search status: bounded candidate sink, cost budget, deadline.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use sugtrie_core::Candidate;

use super::rank::compare_candidates;
use crate::options::SearchOptions;

/// How many charges pass between two clock reads when a deadline is set.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// A held candidate. The heap's greatest entry is the worst-ranked one, so
/// it is the one evicted when a better candidate arrives.
#[derive(Debug)]
struct Held {
    /// Arrival order, used to hand candidates back in traversal order.
    seq: usize,
    candidate: Candidate,
}

impl Ord for Held {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_candidates(&self.candidate, &other.candidate).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Held {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Held {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Held {}

/// Tracks the state of one query: collected candidates, how much work has
/// been spent, and whether the search must stop.
///
/// Every node visited by either traversal calls [`charge`](Self::charge)
/// once. Traversals poll [`should_abort`](Self::should_abort) before each
/// visit and call [`mark_truncated`](Self::mark_truncated) when they stop
/// with work left.
///
/// The sink holds at most `candidate_limit` candidates, keeping the
/// best-ranked ones: once full, a better candidate evicts the worst held
/// one. The limit applies between two [`take_candidates`](Self::take_candidates)
/// calls, so each query phase gets the full limit.
#[derive(Debug)]
pub struct SearchStatus {
    candidate_limit: usize,
    /// Maximum number of node visits.
    cost_limit: usize,
    cost: usize,
    deadline: Option<Instant>,
    timed_out: bool,
    truncated: bool,
    /// Candidates offered so far, including dropped and taken ones.
    offered: usize,
    held: BinaryHeap<Held>,
}

impl SearchStatus {
    pub fn new(candidate_limit: usize, cost_limit: usize, timeout: Option<Duration>) -> Self {
        Self {
            candidate_limit,
            cost_limit,
            cost: 0,
            deadline: timeout.and_then(|t| Instant::now().checked_add(t)),
            timed_out: false,
            truncated: false,
            offered: 0,
            held: BinaryHeap::new(),
        }
    }

    /// Budget taken from the query options; the deadline starts now.
    pub fn from_options(options: &SearchOptions) -> Self {
        Self::new(options.candidate_limit, options.cost_limit, options.timeout)
    }

    /// A status with no practical limits.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX, usize::MAX, None)
    }

    /// Returns `true` if no more nodes should be visited.
    pub fn should_abort(&self) -> bool {
        self.cost >= self.cost_limit || self.timed_out
    }

    /// Account for one node visit.
    pub fn charge(&mut self) {
        self.cost += 1;
        if let Some(deadline) = self.deadline {
            if self.cost % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.timed_out = true;
            }
        }
    }

    /// Offer a candidate. Returns `true` if it is held.
    ///
    /// When the sink is full the candidate replaces the worst held one if it
    /// ranks ahead of it, and is dropped otherwise. Either way the status
    /// becomes truncated.
    pub fn push(&mut self, candidate: Candidate) -> bool {
        self.offered += 1;
        let entry = Held {
            seq: self.offered,
            candidate,
        };
        if self.held.len() < self.candidate_limit {
            self.held.push(entry);
            return true;
        }
        self.truncated = true;
        match self.held.peek_mut() {
            Some(mut worst) if entry < *worst => {
                *worst = entry;
                true
            }
            _ => false,
        }
    }

    /// Note that a traversal stopped before exhausting its worklist.
    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// Returns `true` if the budget cut a traversal short or the sink had
    /// to drop a candidate.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Node visits so far.
    pub fn cost(&self) -> usize {
        self.cost
    }

    /// Candidates offered over the lifetime of this status.
    pub fn offered(&self) -> usize {
        self.offered
    }

    /// Candidates currently held.
    pub fn held(&self) -> usize {
        self.held.len()
    }

    /// Move out the held candidates in the order they were offered. The
    /// cost budget keeps counting across takes; the sink starts empty.
    pub fn take_candidates(&mut self) -> Vec<Candidate> {
        let mut held = std::mem::take(&mut self.held).into_vec();
        held.sort_unstable_by_key(|h| h.seq);
        held.into_iter().map(|h| h.candidate).collect()
    }

    pub fn into_candidates(mut self) -> Vec<Candidate> {
        self.take_candidates()
    }
}
