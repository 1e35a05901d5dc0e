// Final ranking of raw query candidates.

use std::cmp::Ordering;

use hashbrown::HashSet;
use sugtrie_core::Candidate;

/// Ranking order: descending score, then fewer substitutions, then word.
/// `Less` means `a` ranks ahead of `b`.
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.substitutions.cmp(&b.substitutions))
        .then_with(|| a.word.cmp(&b.word))
}

/// Sort candidates by descending score, keep the best entry per word and
/// truncate to `limit`.
///
/// Ties are broken by fewer substitutions, then by word, so the output is
/// fully deterministic.
pub fn rank_candidates(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    candidates.sort_by(compare_candidates);
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates.retain(|c| seen.insert(c.word.clone()));
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ranked: &[Candidate]) -> Vec<&str> {
        ranked.iter().map(|c| c.word.as_str()).collect()
    }

    #[test]
    fn sorts_by_descending_score() {
        let ranked = rank_candidates(
            vec![
                Candidate::completion("cap", 1.0, 0.6, 1),
                Candidate::completion("cat", 5.0, 0.6, 1),
                Candidate::completion("car", 3.0, 0.6, 1),
            ],
            10,
        );
        assert_eq!(words(&ranked), vec!["cat", "car", "cap"]);
    }

    #[test]
    fn keeps_best_duplicate() {
        let ranked = rank_candidates(
            vec![
                Candidate::correction("cat", 10.0, 0.1, 0, 1),
                Candidate::completion("cat", 10.0, 1.0, 0),
            ],
            10,
        );
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 10.0).abs() < 1e-12);
    }

    #[test]
    fn ties_prefer_fewer_substitutions_then_word() {
        let ranked = rank_candidates(
            vec![
                Candidate::correction("bat", 1.0, 1.0, 0, 1),
                Candidate::correction("cat", 1.0, 1.0, 0, 0),
                Candidate::correction("at", 1.0, 1.0, 0, 1),
            ],
            10,
        );
        assert_eq!(words(&ranked), vec!["cat", "at", "bat"]);
    }

    #[test]
    fn truncates_to_limit() {
        let candidates: Vec<Candidate> = (0..100)
            .map(|i| Candidate::completion(format!("w{i}"), i as f64 + 1.0, 1.0, 0))
            .collect();
        let ranked = rank_candidates(candidates, 50);
        assert_eq!(ranked.len(), 50);
        assert_eq!(ranked[0].word, "w99");
    }

    #[test]
    fn empty_input() {
        assert!(rank_candidates(Vec::new(), 5).is_empty());
    }
}
