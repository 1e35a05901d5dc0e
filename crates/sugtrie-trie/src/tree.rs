// WeightedTree: owns the root node; insertion, lookup, verification, dump.

use std::fmt;

use crate::node::Node;
use crate::walk::{Walk, WalkEntry};
use crate::{TrieError, weights_match};

/// Grow-only weighted prefix tree.
///
/// Built once by a single writer, then queried through shared references.
#[derive(Debug, Clone)]
pub struct WeightedTree {
    root: Node,
    word_count: usize,
    /// Number of nodes, root included.
    node_count: usize,
}

/// The deepest path of a query that exists in the tree.
///
/// `nodes[0]` is always the root; `nodes[i]` is the node for the `i`-th
/// query character.
#[derive(Debug, Clone)]
pub struct PrefixPath<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> PrefixPath<'a> {
    /// Number of query characters that matched.
    pub fn matched(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if all `query_len` characters matched.
    pub fn is_complete(&self, query_len: usize) -> bool {
        self.matched() == query_len
    }

    /// The deepest matched node (the root when nothing matched).
    pub fn last(&self) -> &'a Node {
        self.nodes[self.nodes.len() - 1]
    }

    /// All nodes from the root to the deepest match.
    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }
}

impl Default for WeightedTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedTree {
    /// Create an empty tree holding only the root.
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            word_count: 0,
            node_count: 1,
        }
    }

    /// Insert `word` with `weight`.
    ///
    /// Adds `weight` to the branch weight of every node on the path (root
    /// included) and to the word weight of the terminal node. Inserting the
    /// same word twice accumulates both, so the aggregation invariant holds
    /// for any insertion sequence.
    pub fn insert(&mut self, word: &str, weight: f64) -> Result<(), TrieError> {
        if word.is_empty() {
            return Err(TrieError::EmptyWord);
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(TrieError::InvalidWeight {
                word: word.to_string(),
                weight,
            });
        }

        let mut curr = &mut self.root;
        curr.add_branch_weight(weight);
        for c in word.chars() {
            if curr.child(c).is_none() {
                self.node_count += 1;
            }
            curr = curr.upsert_child(c);
            curr.add_branch_weight(weight);
        }
        if !curr.is_word_end() {
            self.word_count += 1;
        }
        curr.add_word_weight(weight);
        Ok(())
    }

    /// Walk children by character. Returns `None` at the first missing one.
    pub fn lookup_prefix_node(&self, prefix: &str) -> Option<&Node> {
        let mut curr = &self.root;
        for c in prefix.chars() {
            curr = curr.child(c)?;
        }
        Some(curr)
    }

    /// Like [`lookup_prefix_node`](Self::lookup_prefix_node) but keeps the
    /// path and stops at the deepest match instead of failing.
    pub fn lookup_path(&self, prefix: &[char]) -> PrefixPath<'_> {
        let mut nodes = Vec::with_capacity(prefix.len() + 1);
        let mut curr = &self.root;
        nodes.push(curr);
        for &c in prefix {
            match curr.child(c) {
                Some(next) => {
                    curr = next;
                    nodes.push(curr);
                }
                None => break,
            }
        }
        PrefixPath { nodes }
    }

    /// Returns `true` if `word` was inserted.
    pub fn contains(&self, word: &str) -> bool {
        self.lookup_prefix_node(word)
            .is_some_and(Node::is_word_end)
    }

    /// Accumulated weight of `word`, if it was inserted.
    pub fn word_weight(&self, word: &str) -> Option<f64> {
        self.lookup_prefix_node(word)
            .filter(|n| n.is_word_end())
            .map(Node::word_weight)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Total weight of all words (the root's branch weight).
    pub fn total_weight(&self) -> f64 {
        self.root.branch_weight()
    }

    /// Pre-order walk of the whole tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.root)
    }

    /// All words with their weights, in ascending order.
    pub fn words(&self) -> Vec<(String, f64)> {
        self.walk()
            .filter(|e| e.node.is_word_end())
            .map(|e| (e.prefix, e.node.word_weight()))
            .collect()
    }

    /// Check the branch-weight invariant at every node.
    pub fn verify_branch_weights(&self) -> Result<(), TrieError> {
        for WalkEntry { prefix, node, .. } in self.walk() {
            let expected = node.expected_branch_weight();
            if !weights_match(node.branch_weight(), expected) {
                return Err(TrieError::BranchWeightMismatch {
                    prefix,
                    stored: node.branch_weight(),
                    expected,
                });
            }
        }
        Ok(())
    }
}

/// Indented dump, one node per line; word ends are marked with `$`.
impl fmt::Display for WeightedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.walk() {
            let node = entry.node;
            match node.character() {
                None => writeln!(f, "<root> branch={}", node.branch_weight())?,
                Some(c) => {
                    let indent = "  ".repeat(entry.depth - 1);
                    if node.is_word_end() {
                        writeln!(
                            f,
                            "{indent}{c}$ word={} branch={}",
                            node.word_weight(),
                            node.branch_weight()
                        )?;
                    } else {
                        writeln!(f, "{indent}{c} branch={}", node.branch_weight())?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn sample() -> WeightedTree {
        let mut tree = WeightedTree::new();
        tree.insert("cat", 5.0).unwrap();
        tree.insert("car", 3.0).unwrap();
        tree.insert("cap", 1.0).unwrap();
        tree
    }

    #[test]
    fn insert_aggregates_branch_weights() {
        let tree = sample();
        assert_eq!(tree.total_weight(), 9.0);
        assert_eq!(tree.lookup_prefix_node("c").unwrap().branch_weight(), 9.0);
        assert_eq!(tree.lookup_prefix_node("ca").unwrap().branch_weight(), 9.0);
        assert_eq!(tree.lookup_prefix_node("cat").unwrap().branch_weight(), 5.0);
        tree.verify_branch_weights().unwrap();
    }

    #[test]
    fn word_end_inside_another_word() {
        let mut tree = WeightedTree::new();
        tree.insert("car", 2.0).unwrap();
        tree.insert("cart", 4.0).unwrap();
        let car = tree.lookup_prefix_node("car").unwrap();
        assert!(car.is_word_end());
        assert_eq!(car.word_weight(), 2.0);
        assert_eq!(car.branch_weight(), 6.0);
        tree.verify_branch_weights().unwrap();
    }

    #[test]
    fn duplicate_insert_is_additive() {
        let mut tree = WeightedTree::new();
        tree.insert("cat", 2.0).unwrap();
        tree.insert("cat", 3.0).unwrap();
        assert_eq!(tree.word_weight("cat"), Some(5.0));
        assert_eq!(tree.total_weight(), 5.0);
        assert_eq!(tree.word_count(), 1);
        tree.verify_branch_weights().unwrap();
    }

    #[test]
    fn rejects_empty_word() {
        let mut tree = WeightedTree::new();
        assert!(matches!(tree.insert("", 1.0), Err(TrieError::EmptyWord)));
        assert!(tree.is_empty());
    }

    #[test]
    fn rejects_bad_weights() {
        let mut tree = WeightedTree::new();
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                tree.insert("cat", w),
                Err(TrieError::InvalidWeight { .. })
            ));
        }
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.total_weight(), 0.0);
    }

    #[test]
    fn counts_words_and_nodes() {
        let tree = sample();
        assert_eq!(tree.word_count(), 3);
        // root, c, a, t, r, p
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn lookup_missing_prefix() {
        let tree = sample();
        assert!(tree.lookup_prefix_node("co").is_none());
        assert!(tree.lookup_prefix_node("cats").is_none());
        assert!(tree.lookup_prefix_node("").is_some());
    }

    #[test]
    fn lookup_path_stops_at_deepest_match() {
        let tree = sample();
        let query = chars("caxt");
        let path = tree.lookup_path(&query);
        assert_eq!(path.matched(), 2);
        assert!(!path.is_complete(query.len()));
        assert_eq!(path.last().character(), Some('a'));
        assert_eq!(path.nodes()[0].character(), None);

        let full = tree.lookup_path(&chars("cat"));
        assert!(full.is_complete(3));
    }

    #[test]
    fn contains_only_word_ends() {
        let tree = sample();
        assert!(tree.contains("cat"));
        assert!(!tree.contains("ca"));
        assert!(!tree.contains("dog"));
    }

    #[test]
    fn words_in_ascending_order() {
        let tree = sample();
        let words: Vec<String> = tree.words().into_iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["cap", "car", "cat"]);
    }

    #[test]
    fn rebuild_is_identical() {
        let a = sample();
        let b = sample();
        let wa: Vec<(String, f64, f64)> = a
            .walk()
            .map(|e| (e.prefix, e.node.word_weight(), e.node.branch_weight()))
            .collect();
        let wb: Vec<(String, f64, f64)> = b
            .walk()
            .map(|e| (e.prefix, e.node.word_weight(), e.node.branch_weight()))
            .collect();
        assert_eq!(wa, wb);
    }

    #[test]
    fn display_marks_word_ends() {
        let mut tree = WeightedTree::new();
        tree.insert("ab", 2.0).unwrap();
        let dump = tree.to_string();
        assert_eq!(dump, "<root> branch=2\na branch=2\n  b$ word=2 branch=2\n");
    }

    #[test]
    fn unicode_characters_are_single_levels() {
        let mut tree = WeightedTree::new();
        tree.insert("\u{00E4}iti", 1.0).unwrap();
        assert_eq!(tree.node_count(), 5);
        assert!(tree.contains("\u{00E4}iti"));
    }
}
