// Correction search: single-character substitutions along the query,
// pruned by confidence * branch weight, completed by the ranker.

use sugtrie_trie::Node;

use super::completion::CompletionRanker;
use super::status::SearchStatus;
use crate::options::{PruneMode, SearchOptions};

/// Substitution search over the positions of a query.
///
/// Position 0 is the root; position `i` is any child of the node chosen for
/// position `i - 1`. A child whose character differs from query character
/// `i - 1` costs one substitution and multiplies the running confidence by
/// the substitution penalty. A child survives only while
/// `confidence * branch_weight >= prune_threshold`. Once every query
/// position is filled, the reached node is handed to the
/// [`CompletionRanker`] with the accumulated confidence, so per-level decay
/// continues from it rather than restarting at 1.
///
/// The unsubstituted path is one of the explored branches, so literal
/// completions are also reported here, as zero-substitution corrections.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionSearch {
    substitution_penalty: f64,
    prune_threshold: f64,
    prune_mode: PruneMode,
    max_substitutions: Option<usize>,
}

struct Frame<'a> {
    node: &'a Node,
    /// Word up to but excluding `node`'s character.
    prefix: String,
    /// Query position `node` occupies; equals the number of query
    /// characters consumed.
    position: usize,
    confidence: f64,
    substitutions: usize,
}

impl CorrectionSearch {
    pub fn new(substitution_penalty: f64, prune_threshold: f64, prune_mode: PruneMode) -> Self {
        Self {
            substitution_penalty,
            prune_threshold,
            prune_mode,
            max_substitutions: None,
        }
    }

    pub fn from_options(options: &SearchOptions) -> Self {
        Self::new(
            options.substitution_penalty,
            options.prune_threshold,
            options.prune_mode,
        )
        .with_max_substitutions(options.max_substitutions)
    }

    pub fn with_max_substitutions(mut self, max: Option<usize>) -> Self {
        self.max_substitutions = max;
        self
    }

    /// Returns `true` if a branch with `confidence` rooted at `node` is kept.
    #[inline]
    pub fn passes(&self, confidence: f64, node: &Node) -> bool {
        confidence * node.branch_weight() >= self.prune_threshold
    }

    /// Search corrections of `target` starting at `root`, pushing
    /// candidates into `status`.
    pub fn search(
        &self,
        root: &Node,
        target: &[char],
        ranker: &CompletionRanker,
        status: &mut SearchStatus,
    ) {
        if !self.passes(1.0, root) {
            return;
        }
        let mut stack = vec![Frame {
            node: root,
            prefix: String::new(),
            position: 0,
            confidence: 1.0,
            substitutions: 0,
        }];

        while let Some(frame) = stack.pop() {
            if status.should_abort() {
                status.mark_truncated();
                return;
            }

            // The ranker charges the node it starts from.
            if frame.position == target.len() {
                ranker.collect_corrections(
                    frame.node,
                    &frame.prefix,
                    frame.confidence,
                    frame.substitutions,
                    status,
                );
                continue;
            }
            status.charge();

            let expected = target[frame.position];
            let mut child_prefix = frame.prefix;
            if let Some(c) = frame.node.character() {
                child_prefix.push(c);
            }

            let mut alternates = Vec::new();
            for child in frame.node.sorted_children() {
                let (confidence, substitutions) = if child.character() == Some(expected) {
                    (frame.confidence, frame.substitutions)
                } else {
                    (
                        frame.confidence * self.substitution_penalty,
                        frame.substitutions + 1,
                    )
                };
                if self.max_substitutions.is_some_and(|max| substitutions > max) {
                    continue;
                }
                if !self.passes(confidence, child) {
                    match self.prune_mode {
                        PruneMode::SkipBranch => continue,
                        PruneMode::StopSiblings => break,
                    }
                }
                alternates.push(Frame {
                    node: child,
                    prefix: child_prefix.clone(),
                    position: frame.position + 1,
                    confidence,
                    substitutions,
                });
            }
            // Reversed so the smallest character is explored first.
            stack.extend(alternates.into_iter().rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sugtrie_core::Candidate;
    use sugtrie_trie::WeightedTree;

    fn tree(words: &[(&str, f64)]) -> WeightedTree {
        let mut tree = WeightedTree::new();
        for &(w, weight) in words {
            tree.insert(w, weight).unwrap();
        }
        tree
    }

    fn corrections(tree: &WeightedTree, query: &str, search: CorrectionSearch) -> Vec<Candidate> {
        let target: Vec<char> = query.chars().collect();
        let mut status = SearchStatus::unbounded();
        search.search(tree.root(), &target, &CompletionRanker::new(0.6), &mut status);
        status.into_candidates()
    }

    fn default_search() -> CorrectionSearch {
        CorrectionSearch::from_options(&SearchOptions::default())
    }

    fn find<'a>(found: &'a [Candidate], word: &str) -> Option<&'a Candidate> {
        found.iter().find(|c| c.word == word)
    }

    #[test]
    fn heavy_substitution_survives_pruning() {
        let t = tree(&[("cat", 10.0), ("cot", 1.0)]);
        let found = corrections(&t, "cot", default_search());
        let cat = find(&found, "cat").expect("cat should be suggested");
        assert_eq!(cat.substitutions, 1);
        assert!((cat.confidence - 0.1).abs() < 1e-12);
        assert!((cat.score - 1.0).abs() < 1e-12);
        let cot = find(&found, "cot").unwrap();
        assert_eq!(cot.substitutions, 0);
        assert!((cot.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn light_substitution_is_pruned() {
        let t = tree(&[("cat", 5.0), ("cot", 1.0)]);
        let found = corrections(&t, "cot", default_search());
        assert!(find(&found, "cat").is_none());
        assert!(find(&found, "cot").is_some());
    }

    #[test]
    fn literal_path_not_required() {
        let t = tree(&[("cat", 10.0)]);
        let found = corrections(&t, "cot", default_search());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].word, "cat");
    }

    #[test]
    fn completion_after_substitution_keeps_decaying() {
        let t = tree(&[("cats", 100.0), ("cot", 1.0)]);
        let found = corrections(&t, "cot", default_search());
        let cats = find(&found, "cats").unwrap();
        assert_eq!(cats.depth, 1);
        assert!((cats.confidence - 0.1 * 0.6).abs() < 1e-12);
        assert!((cats.score - 100.0 * 0.06).abs() < 1e-9);
    }

    #[test]
    fn multiple_substitutions_compound() {
        let t = tree(&[("dog", 1000.0), ("cat", 1.0)]);
        let found = corrections(&t, "cat", default_search());
        let dog = find(&found, "dog").unwrap();
        assert_eq!(dog.substitutions, 3);
        assert!((dog.confidence - 0.001).abs() < 1e-12);
        assert!((dog.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn max_substitutions_caps_edits() {
        let t = tree(&[("dog", 1000.0), ("cat", 1.0), ("cot", 500.0)]);
        let search = default_search().with_max_substitutions(Some(1));
        let found = corrections(&t, "cat", search);
        assert!(find(&found, "dog").is_none());
        assert!(find(&found, "cot").is_some());
        assert!(found.iter().all(|c| c.substitutions <= 1));
    }

    #[test]
    fn stop_siblings_cuts_later_alternates() {
        // At position 2 the alternates are 'a' (weight 5, pruned at 0.5)
        // then 'i' (weight 50, kept at 5.0).
        let t = tree(&[("cat", 5.0), ("cit", 50.0), ("cot", 1.0)]);

        let skip = corrections(&t, "cot", default_search());
        assert!(find(&skip, "cit").is_some());
        assert!(find(&skip, "cat").is_none());

        let stop = CorrectionSearch::new(0.1, 1.0, PruneMode::StopSiblings);
        let stopped = corrections(&t, "cot", stop);
        assert!(find(&stopped, "cit").is_none());
        assert!(find(&stopped, "cat").is_none());
    }

    #[test]
    fn every_kept_branch_passes_threshold() {
        let words = [
            ("cat", 12.0),
            ("car", 3.0),
            ("cot", 2.0),
            ("bat", 40.0),
            ("cut", 9.0),
            ("dot", 100.0),
        ];
        let t = tree(&words);
        let query: Vec<char> = "cot".chars().collect();
        let found = corrections(&t, "cot", default_search());
        assert!(!found.is_empty());
        for c in &found {
            let chars: Vec<char> = c.word.chars().collect();
            let mut node = t.root();
            let mut confidence = 1.0;
            assert!(confidence * node.branch_weight() >= 1.0);
            for (i, &q) in query.iter().enumerate() {
                node = node.child(chars[i]).unwrap();
                if chars[i] != q {
                    confidence *= 0.1;
                }
                assert!(
                    confidence * node.branch_weight() >= 1.0,
                    "{} kept below threshold at position {}",
                    c.word,
                    i + 1
                );
            }
        }
    }

    #[test]
    fn each_node_is_charged_once() {
        // Root and 'c' are charged by the search, 'a' and 't' by the
        // completion walk started at the last query position.
        let t = tree(&[("cat", 10.0)]);
        let target: Vec<char> = "ca".chars().collect();
        let mut status = SearchStatus::unbounded();
        default_search().search(t.root(), &target, &CompletionRanker::new(0.6), &mut status);
        assert_eq!(status.cost(), 4);
        assert_eq!(status.held(), 1);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let t = WeightedTree::new();
        assert!(corrections(&t, "cat", default_search()).is_empty());
    }

    #[test]
    fn query_longer_than_every_word_yields_nothing() {
        let t = tree(&[("cat", 1000.0)]);
        assert!(corrections(&t, "catsx", default_search()).is_empty());
    }
}
