// Deterministic pre-order traversal with an explicit stack.

use crate::node::Node;

/// One visited node: its depth below the walk start, the characters on the
/// path from the start down to and including the node, and the node itself.
#[derive(Debug)]
pub struct WalkEntry<'a> {
    pub depth: usize,
    pub prefix: String,
    pub node: &'a Node,
}

/// Pre-order iterator over a subtree, children in ascending character order.
///
/// Depth is bounded only by the longest word, so the walk keeps its own
/// stack instead of recursing.
pub struct Walk<'a> {
    stack: Vec<(usize, String, &'a Node)>,
}

impl<'a> Walk<'a> {
    /// Start a walk at `start`. The start node's own character is included
    /// in the reported prefixes (the root contributes nothing).
    pub fn new(start: &'a Node) -> Self {
        let mut prefix = String::new();
        if let Some(c) = start.character() {
            prefix.push(c);
        }
        Self {
            stack: vec![(0, prefix, start)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEntry<'a>;

    fn next(&mut self) -> Option<WalkEntry<'a>> {
        let (depth, prefix, node) = self.stack.pop()?;
        // Reversed push so the smallest character is popped first.
        for child in node.sorted_children().into_iter().rev() {
            let mut child_prefix = prefix.clone();
            if let Some(c) = child.character() {
                child_prefix.push(c);
            }
            self.stack.push((depth + 1, child_prefix, child));
        }
        Some(WalkEntry {
            depth,
            prefix,
            node,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::WeightedTree;

    #[test]
    fn walk_visits_in_preorder() {
        let mut tree = WeightedTree::new();
        for w in ["cat", "car", "cap", "b"] {
            tree.insert(w, 1.0).unwrap();
        }
        let prefixes: Vec<String> = tree.walk().map(|e| e.prefix).collect();
        assert_eq!(
            prefixes,
            vec!["", "b", "c", "ca", "cap", "car", "cat"]
        );
    }

    #[test]
    fn walk_reports_depth_relative_to_start() {
        let mut tree = WeightedTree::new();
        tree.insert("cat", 1.0).unwrap();
        let start = tree.lookup_prefix_node("ca").unwrap();
        let entries: Vec<(usize, String)> = super::Walk::new(start)
            .map(|e| (e.depth, e.prefix))
            .collect();
        assert_eq!(entries, vec![(0, "a".to_string()), (1, "at".to_string())]);
    }
}
