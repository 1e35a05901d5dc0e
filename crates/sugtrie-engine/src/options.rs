// Build and search configuration.
//
// All tunables are plain values passed explicitly to the build and query
// entry points; nothing is read from global state.

use std::time::Duration;

use crate::EngineError;

/// Confidence multiplier applied once per level a completion lies below the
/// node it was started from.
pub const DEFAULT_DECAY: f64 = 0.6;

/// Confidence multiplier applied per substituted query character.
pub const DEFAULT_SUBSTITUTION_PENALTY: f64 = 0.1;

/// Minimum `confidence * branch_weight` for a correction branch to be explored.
pub const DEFAULT_PRUNE_THRESHOLD: f64 = 1.0;

/// Maximum number of raw candidates a single query may produce.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10_000;

/// Maximum number of node visits a single query may spend.
pub const DEFAULT_COST_LIMIT: usize = 1_000_000;

/// Number of suggestions shown to a user after ranking.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 50;

/// What the correction search does when an alternate is pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Drop only the pruned alternate; later siblings are still tried.
    #[default]
    SkipBranch,
    /// Drop the pruned alternate and every later sibling at the same
    /// position. Results then depend on sibling order (ascending character).
    StopSiblings,
}

/// When a query runs if its literal prefix is not fully present in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrectionScope {
    /// The whole literal prefix must exist; otherwise the result is empty,
    /// and no correction is attempted.
    #[default]
    ExactPath,
    /// Run correction search over the full query and complete from the
    /// deepest literally matched node. Empty only when not even the first
    /// character matches.
    DeepestMatch,
}

/// Which numbers of a word-count document become word weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightSource {
    #[default]
    Counts,
    /// Relative frequencies. These are below 1, so a prune threshold of 1
    /// rejects every correction branch; lower the threshold accordingly.
    Probabilities,
}

/// Options for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Per-level completion decay, in `(0, 1]`.
    pub decay: f64,
    /// Per-substitution penalty, in `[0, 1]`.
    pub substitution_penalty: f64,
    /// Pruning threshold, finite and non-negative.
    pub prune_threshold: f64,
    pub prune_mode: PruneMode,
    pub scope: CorrectionScope,
    /// Upper bound on substituted characters per correction. `None` leaves
    /// the bound to pruning alone.
    pub max_substitutions: Option<usize>,
    /// Raw candidates per query before ranking.
    pub candidate_limit: usize,
    /// Node visits per query.
    pub cost_limit: usize,
    /// Wall-clock budget per query.
    pub timeout: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            decay: DEFAULT_DECAY,
            substitution_penalty: DEFAULT_SUBSTITUTION_PENALTY,
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
            prune_mode: PruneMode::default(),
            scope: CorrectionScope::default(),
            max_substitutions: None,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            cost_limit: DEFAULT_COST_LIMIT,
            timeout: None,
        }
    }
}

impl SearchOptions {
    /// Reject values the traversal arithmetic cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(EngineError::InvalidOption(format!(
                "decay must be in (0, 1], got {}",
                self.decay
            )));
        }
        if !(0.0..=1.0).contains(&self.substitution_penalty) {
            return Err(EngineError::InvalidOption(format!(
                "substitution penalty must be in [0, 1], got {}",
                self.substitution_penalty
            )));
        }
        if !self.prune_threshold.is_finite() || self.prune_threshold < 0.0 {
            return Err(EngineError::InvalidOption(format!(
                "prune threshold must be finite and non-negative, got {}",
                self.prune_threshold
            )));
        }
        if self.candidate_limit == 0 {
            return Err(EngineError::InvalidOption(
                "candidate limit must be positive".to_string(),
            ));
        }
        if self.cost_limit == 0 {
            return Err(EngineError::InvalidOption(
                "cost limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for building a tree from a vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Log load progress at `info` level.
    pub verbose: bool,
    /// Entries between progress events when `verbose` is set.
    pub progress_interval: usize,
    /// Lowercase words while loading.
    pub lowercase: bool,
    pub weight_source: WeightSource,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            progress_interval: 10_000,
            lowercase: true,
            weight_source: WeightSource::default(),
        }
    }
}
