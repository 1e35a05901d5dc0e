//! Completion and correction engine over a [`WeightedTree`].
//!
//! - [`options`] -- tunable constants and build/search configuration
//! - [`suggestion`] -- completion ranking, correction search, search budget,
//!   final ranking
//! - [`query`] -- [`QueryEngine`], the entry point tying the pieces together
//! - [`vocabulary`] -- loading word lists and word-count documents
//! - [`wordfreq`] -- counting word frequencies in raw text
//!
//! [`WeightedTree`]: sugtrie_trie::WeightedTree

use std::path::PathBuf;

pub mod options;
pub mod query;
pub mod suggestion;
pub mod vocabulary;
pub mod wordfreq;

pub use options::{BuildOptions, CorrectionScope, PruneMode, SearchOptions, WeightSource};
pub use query::{QueryEngine, QueryOutcome};
pub use suggestion::{CompletionRanker, CorrectionSearch, SearchStatus, rank_candidates};
pub use sugtrie_core::{Candidate, CandidateKind};
pub use sugtrie_trie::{TrieError, WeightedTree};
pub use vocabulary::{Vocabulary, VocabularyEntry, VocabularyFormat};
pub use wordfreq::{FrequencyDocument, WordCounts};

/// Error type for building and configuring the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Trie(#[from] TrieError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read vocabulary: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid word-count document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("entry {word:?}: {reason}")]
    MalformedEntry { word: String, reason: String },

    #[error("word-count document has no {0:?} section")]
    MissingSection(&'static str),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}
