// Suggestion candidates: the result unit returned by a query.

use serde::Serialize;

/// How a candidate was reached from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// Extension of the literal prefix to a word end.
    Completion,
    /// Word reached after substituting zero or more characters of the query
    /// during correction search, then completing.
    Correction,
}

/// A scored suggestion.
///
/// `score` is `word_weight * confidence`. Higher scores are better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// The suggested word.
    pub word: String,
    /// Ranking score (higher is better).
    pub score: f64,
    /// Accumulated multiplier in `[0, 1]` from substitution penalties and
    /// depth decay.
    pub confidence: f64,
    /// Number of levels below the start node of the completion walk.
    pub depth: usize,
    /// Number of substituted query characters.
    pub substitutions: usize,
    pub kind: CandidateKind,
}

impl Candidate {
    /// Create a pure completion candidate.
    pub fn completion(
        word: impl Into<String>,
        word_weight: f64,
        confidence: f64,
        depth: usize,
    ) -> Self {
        Self {
            word: word.into(),
            score: word_weight * confidence,
            confidence,
            depth,
            substitutions: 0,
            kind: CandidateKind::Completion,
        }
    }

    /// Create a correction candidate.
    pub fn correction(
        word: impl Into<String>,
        word_weight: f64,
        confidence: f64,
        depth: usize,
        substitutions: usize,
    ) -> Self {
        Self {
            word: word.into(),
            score: word_weight * confidence,
            confidence,
            depth,
            substitutions,
            kind: CandidateKind::Correction,
        }
    }
}
