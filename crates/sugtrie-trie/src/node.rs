// Tree node: one character position with exclusively owned children.

use hashbrown::HashMap;

/// A single character position in the weighted prefix tree.
///
/// The root has no character. Every other node is reachable through exactly
/// one parent, which owns it.
#[derive(Debug, Clone, Default)]
pub struct Node {
    character: Option<char>,
    is_word_end: bool,
    /// Weight of the word ending here. Zero unless `is_word_end`.
    word_weight: f64,
    /// Own word weight plus the branch weight of every child.
    branch_weight: f64,
    children: HashMap<char, Node>,
}

impl Node {
    /// Create the root sentinel.
    pub fn root() -> Self {
        Self::default()
    }

    fn with_char(c: char) -> Self {
        Self {
            character: Some(c),
            ..Self::default()
        }
    }

    /// The character at this position, `None` for the root.
    #[inline]
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Returns `true` iff some inserted word terminates here.
    #[inline]
    pub fn is_word_end(&self) -> bool {
        self.is_word_end
    }

    /// Weight of the word ending here, or 0.0 when this is not a word end.
    #[inline]
    pub fn word_weight(&self) -> f64 {
        if self.is_word_end { self.word_weight } else { 0.0 }
    }

    /// Aggregate weight of every word end in this subtree, including this node.
    #[inline]
    pub fn branch_weight(&self) -> f64 {
        self.branch_weight
    }

    /// Look up a direct child by character.
    #[inline]
    pub fn child(&self, c: char) -> Option<&Node> {
        self.children.get(&c)
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Children sorted by ascending character.
    ///
    /// Every traversal in the workspace goes through this so that output
    /// order does not depend on hash iteration order.
    pub fn sorted_children(&self) -> Vec<&Node> {
        let mut children: Vec<&Node> = self.children.values().collect();
        children.sort_unstable_by_key(|n| n.character);
        children
    }

    /// Return the child for `c`, creating it if missing.
    pub(crate) fn upsert_child(&mut self, c: char) -> &mut Node {
        self.children.entry(c).or_insert_with(|| Node::with_char(c))
    }

    pub(crate) fn add_branch_weight(&mut self, weight: f64) {
        self.branch_weight += weight;
    }

    /// Mark this node as a word end and add `weight` to its word weight.
    pub(crate) fn add_word_weight(&mut self, weight: f64) {
        self.is_word_end = true;
        self.word_weight += weight;
    }

    /// Own weight plus the stored branch weights of the direct children.
    ///
    /// Equals [`branch_weight`](Self::branch_weight) whenever the
    /// aggregation invariant holds.
    pub fn expected_branch_weight(&self) -> f64 {
        self.word_weight() + self.children.values().map(Node::branch_weight).sum::<f64>()
    }
}
