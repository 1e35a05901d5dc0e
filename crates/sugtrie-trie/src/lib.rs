//! Weighted prefix tree.
//!
//! Every node carries the weight of the word ending at it (if any) and the
//! aggregate weight of every word in its subtree. The aggregate is what the
//! correction search prunes on.
//!
//! # Architecture
//!
//! - [`node`] -- a single character position and its owned children
//! - [`tree`] -- the root owner: insertion, prefix lookup, verification, dump
//! - [`walk`] -- deterministic pre-order traversal (explicit stack)

pub mod node;
pub mod tree;
pub mod walk;

pub use node::Node;
pub use tree::{PrefixPath, WeightedTree};
pub use walk::Walk;

/// Error type for tree construction and verification.
#[derive(Debug, thiserror::Error)]
pub enum TrieError {
    #[error("cannot insert an empty word")]
    EmptyWord,
    #[error("invalid weight {weight} for word {word:?}: weights must be finite and positive")]
    InvalidWeight { word: String, weight: f64 },
    #[error("branch weight mismatch at {prefix:?}: stored {stored}, expected {expected}")]
    BranchWeightMismatch {
        prefix: String,
        stored: f64,
        expected: f64,
    },
}

/// Relative tolerance used when comparing aggregated floating-point weights.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Compare two aggregated weights with [`WEIGHT_TOLERANCE`].
pub fn weights_match(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= WEIGHT_TOLERANCE * scale
}
