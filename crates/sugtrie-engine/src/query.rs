// QueryEngine: prefix lookup + correction search + completion ranking.
//
// The engine owns an immutable tree. Queries only take `&self`, so one
// engine can be shared between threads behind an `Arc`; a rebuilt
// vocabulary means building a new engine and swapping it in.

use tracing::{debug, warn};

use sugtrie_core::Candidate;
use sugtrie_trie::WeightedTree;

use crate::EngineError;
use crate::options::{BuildOptions, CorrectionScope, SearchOptions};
use crate::suggestion::{CompletionRanker, CorrectionSearch, SearchStatus, rank_candidates};
use crate::vocabulary::Vocabulary;

/// Result of one query with its budget accounting.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Corrections followed by completions, unsorted.
    pub candidates: Vec<Candidate>,
    /// Query characters found literally in the tree.
    pub matched: usize,
    /// `true` if the search budget cut a traversal short.
    pub truncated: bool,
    /// Node visits spent.
    pub cost: usize,
}

impl QueryOutcome {
    fn empty(matched: usize) -> Self {
        Self {
            candidates: Vec::new(),
            matched,
            truncated: false,
            cost: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Phases {
    corrections: bool,
    completions: bool,
}

/// Answers completion and correction queries over a built tree.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    tree: WeightedTree,
    options: SearchOptions,
    ranker: CompletionRanker,
    corrector: CorrectionSearch,
}

impl QueryEngine {
    /// Wrap a built tree. Fails if `options` do not validate.
    pub fn new(tree: WeightedTree, options: SearchOptions) -> Result<Self, EngineError> {
        options.validate()?;
        Ok(Self {
            ranker: CompletionRanker::new(options.decay),
            corrector: CorrectionSearch::from_options(&options),
            tree,
            options,
        })
    }

    /// Build the tree from `vocabulary` and wrap it.
    pub fn from_vocabulary(
        vocabulary: &Vocabulary,
        build: &BuildOptions,
        options: SearchOptions,
    ) -> Result<Self, EngineError> {
        let tree = vocabulary.build(build)?;
        Self::new(tree, options)
    }

    pub fn tree(&self) -> &WeightedTree {
        &self.tree
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Corrections followed by completions for `prefix`, unsorted.
    ///
    /// `prefix` is expected to be case-normalized already. See
    /// [`CorrectionScope`] for what happens when it is not literally in the
    /// tree.
    pub fn query(&self, prefix: &str) -> Vec<Candidate> {
        self.query_outcome(prefix).candidates
    }

    /// [`query`](Self::query) with budget accounting.
    pub fn query_outcome(&self, prefix: &str) -> QueryOutcome {
        self.run(
            prefix,
            Phases {
                corrections: true,
                completions: true,
            },
        )
    }

    /// Literal completions only.
    pub fn complete(&self, prefix: &str) -> Vec<Candidate> {
        self.run(
            prefix,
            Phases {
                corrections: false,
                completions: true,
            },
        )
        .candidates
    }

    /// Corrections only.
    pub fn correct(&self, prefix: &str) -> Vec<Candidate> {
        self.run(
            prefix,
            Phases {
                corrections: true,
                completions: false,
            },
        )
        .candidates
    }

    /// Query, then rank and truncate to `limit` distinct words.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Candidate> {
        rank_candidates(self.query(prefix), limit)
    }

    fn run(&self, prefix: &str, phases: Phases) -> QueryOutcome {
        let target: Vec<char> = prefix.chars().collect();
        let path = self.tree.lookup_path(&target);
        let matched = path.matched();

        if !path.is_complete(target.len()) {
            let proceed = match self.options.scope {
                CorrectionScope::ExactPath => false,
                CorrectionScope::DeepestMatch => matched > 0,
            };
            if !proceed {
                debug!(prefix, matched, "prefix not found");
                return QueryOutcome::empty(matched);
            }
        }

        let mut status = SearchStatus::from_options(&self.options);

        // Completions run first so they get the cost budget before
        // corrections, but are reported after them. Each phase gets its own
        // candidate cap.
        let mut completions = Vec::new();
        if phases.completions {
            let stem: String = target[..matched.saturating_sub(1)].iter().collect();
            self.ranker.collect(path.last(), &stem, 1.0, &mut status);
            completions = status.take_candidates();
        }

        let mut candidates = Vec::new();
        if phases.corrections {
            self.corrector
                .search(self.tree.root(), &target, &self.ranker, &mut status);
            candidates = status.take_candidates();
        }
        candidates.extend(completions);

        if status.is_truncated() {
            warn!(
                prefix,
                cost = status.cost(),
                offered = status.offered(),
                timed_out = status.timed_out(),
                "query truncated by search budget"
            );
        }
        debug!(
            prefix,
            matched,
            candidates = candidates.len(),
            cost = status.cost(),
            "query finished"
        );

        QueryOutcome {
            candidates,
            matched,
            truncated: status.is_truncated(),
            cost: status.cost(),
        }
    }
}
