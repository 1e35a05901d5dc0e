// Completion ranking: every word end below a node, decayed per level.

use sugtrie_core::Candidate;
use sugtrie_trie::Node;

use super::status::SearchStatus;

/// Enumerates the word ends reachable from a start node.
///
/// A word `d` levels below the start node scores
/// `word_weight * confidence * decay^d`, where `confidence` is the value the
/// walk was started with. Candidates come out in pre-order with ascending
/// characters; ranking is left to the caller.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRanker {
    decay: f64,
}

struct Frame<'a> {
    node: &'a Node,
    /// Word up to and including `node`.
    word: String,
    depth: usize,
    confidence: f64,
}

impl CompletionRanker {
    pub fn new(decay: f64) -> Self {
        Self { decay }
    }

    /// Emit completions below `start` as [`Completion`] candidates.
    ///
    /// `prefix` is the word up to but excluding `start`'s own character.
    ///
    /// [`Completion`]: sugtrie_core::CandidateKind::Completion
    pub fn collect(&self, start: &Node, prefix: &str, confidence: f64, status: &mut SearchStatus) {
        self.walk(start, prefix, confidence, None, status);
    }

    /// Emit completions below `start` as corrections carrying
    /// `substitutions`.
    pub fn collect_corrections(
        &self,
        start: &Node,
        prefix: &str,
        confidence: f64,
        substitutions: usize,
        status: &mut SearchStatus,
    ) {
        self.walk(start, prefix, confidence, Some(substitutions), status);
    }

    fn walk(
        &self,
        start: &Node,
        prefix: &str,
        confidence: f64,
        substitutions: Option<usize>,
        status: &mut SearchStatus,
    ) {
        let mut word = prefix.to_string();
        if let Some(c) = start.character() {
            word.push(c);
        }
        let mut stack = vec![Frame {
            node: start,
            word,
            depth: 0,
            confidence,
        }];

        while let Some(frame) = stack.pop() {
            if status.should_abort() {
                status.mark_truncated();
                return;
            }
            status.charge();

            let node = frame.node;
            if node.is_word_end() {
                let candidate = match substitutions {
                    None => Candidate::completion(
                        frame.word.clone(),
                        node.word_weight(),
                        frame.confidence,
                        frame.depth,
                    ),
                    Some(subs) => Candidate::correction(
                        frame.word.clone(),
                        node.word_weight(),
                        frame.confidence,
                        frame.depth,
                        subs,
                    ),
                };
                status.push(candidate);
            }

            let child_confidence = frame.confidence * self.decay;
            for child in node.sorted_children().into_iter().rev() {
                let mut word = frame.word.clone();
                if let Some(c) = child.character() {
                    word.push(c);
                }
                stack.push(Frame {
                    node: child,
                    word,
                    depth: frame.depth + 1,
                    confidence: child_confidence,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sugtrie_core::CandidateKind;
    use sugtrie_trie::WeightedTree;

    fn tree(words: &[(&str, f64)]) -> WeightedTree {
        let mut tree = WeightedTree::new();
        for &(w, weight) in words {
            tree.insert(w, weight).unwrap();
        }
        tree
    }

    fn complete(tree: &WeightedTree, prefix: &str) -> Vec<Candidate> {
        let node = tree.lookup_prefix_node(prefix).unwrap();
        let stem: String = {
            let mut chars: Vec<char> = prefix.chars().collect();
            chars.pop();
            chars.into_iter().collect()
        };
        let mut status = SearchStatus::unbounded();
        CompletionRanker::new(0.6).collect(node, &stem, 1.0, &mut status);
        status.into_candidates()
    }

    #[test]
    fn completions_decay_once_per_level() {
        let t = tree(&[("cat", 5.0), ("car", 3.0), ("cap", 1.0)]);
        let found = complete(&t, "ca");
        let words: Vec<&str> = found.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["cap", "car", "cat"]);
        for c in &found {
            assert_eq!(c.depth, 1);
            assert!((c.confidence - 0.6).abs() < 1e-12);
            assert_eq!(c.kind, CandidateKind::Completion);
        }
        let cat = found.iter().find(|c| c.word == "cat").unwrap();
        assert!((cat.score - 3.0).abs() < 1e-12);
    }

    #[test]
    fn start_node_word_end_is_undecayed() {
        let t = tree(&[("car", 2.0), ("cart", 4.0), ("carton", 8.0)]);
        let found = complete(&t, "car");
        assert_eq!(found[0].word, "car");
        assert_eq!(found[0].depth, 0);
        assert!((found[0].score - 2.0).abs() < 1e-12);
        let cart = &found[1];
        assert_eq!(cart.word, "cart");
        assert!((cart.score - 4.0 * 0.6).abs() < 1e-12);
        let carton = &found[2];
        assert_eq!(carton.depth, 3);
        assert!((carton.score - 8.0 * 0.6f64.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn confidence_non_increasing_with_depth() {
        let t = tree(&[("a", 1.0), ("ab", 1.0), ("abc", 1.0), ("abcd", 1.0), ("b", 1.0)]);
        let mut status = SearchStatus::unbounded();
        CompletionRanker::new(0.6).collect(t.root(), "", 1.0, &mut status);
        let found = status.into_candidates();
        assert_eq!(found.len(), 5);
        for c in &found {
            let expected = 0.6f64.powi(c.depth as i32);
            assert!((c.confidence - expected).abs() < 1e-12);
            assert_eq!(c.depth, c.word.chars().count());
        }
    }

    #[test]
    fn every_completion_extends_the_prefix_and_is_a_word() {
        let t = tree(&[("cat", 1.0), ("cattle", 2.0), ("dog", 3.0), ("cab", 1.0)]);
        for c in complete(&t, "ca") {
            assert!(c.word.starts_with("ca"));
            assert!(t.contains(&c.word));
        }
    }

    #[test]
    fn starting_confidence_scales_scores() {
        let t = tree(&[("cat", 10.0)]);
        let node = t.lookup_prefix_node("cat").unwrap();
        let mut status = SearchStatus::unbounded();
        CompletionRanker::new(0.6).collect_corrections(node, "ca", 0.1, 1, &mut status);
        let found = status.into_candidates();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, CandidateKind::Correction);
        assert_eq!(found[0].substitutions, 1);
        assert!((found[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn full_sink_keeps_heaviest_words() {
        let t = tree(&[("a", 1.0), ("b", 3.0), ("c", 2.0)]);
        let mut status = SearchStatus::new(2, usize::MAX, None);
        CompletionRanker::new(0.6).collect(t.root(), "", 1.0, &mut status);
        assert!(status.is_truncated());
        let found = status.into_candidates();
        let words: Vec<&str> = found.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["b", "c"]);
    }

    #[test]
    fn stops_at_cost_limit() {
        let t = tree(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]);
        let mut status = SearchStatus::new(usize::MAX, 2, None);
        CompletionRanker::new(0.6).collect(t.root(), "", 1.0, &mut status);
        assert_eq!(status.held(), 1);
        assert!(status.is_truncated());
    }
}
