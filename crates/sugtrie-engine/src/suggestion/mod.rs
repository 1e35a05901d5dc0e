// Suggestion generation over the weighted prefix tree.
//
// Architecture:
//   - `completion`: enumerates word ends below a node with per-level decay
//   - `correction`: substitution search along the query positions, pruned by
//     confidence * branch weight, completing through `completion`
//   - `status`: per-query budget (node-visit cost, deadline) and the
//     candidate sink, which keeps the best `candidate_limit` per phase
//   - `rank`: final sort, deduplication and truncation

pub mod completion;
pub mod correction;
pub mod rank;
pub mod status;

pub use completion::CompletionRanker;
pub use correction::CorrectionSearch;
pub use rank::{compare_candidates, rank_candidates};
pub use status::SearchStatus;
