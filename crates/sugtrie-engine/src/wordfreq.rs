// Word frequency counting over raw text.
//
// Text is lowercased and split into runs of ASCII letters; each run counts
// as one occurrence. The result can be written as the JSON word-count
// document that `Vocabulary::parse_counts_json` reads back.

use std::collections::BTreeMap;

use serde::Serialize;

use sugtrie_core::character::word_runs;

use crate::EngineError;
use crate::options::WeightSource;
use crate::vocabulary::Vocabulary;

/// Occurrence counts per word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: BTreeMap<String, u64>,
    total: u64,
}

/// Serialized form: raw counts plus relative frequencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyDocument {
    pub counts: BTreeMap<String, u64>,
    pub probabilities: BTreeMap<String, f64>,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut counts = Self::new();
        counts.add_text(text);
        counts
    }

    /// Count every word of `text` on top of the existing counts.
    pub fn add_text(&mut self, text: &str) {
        for word in word_runs(text) {
            *self.counts.entry(word).or_insert(0) += 1;
            self.total += 1;
        }
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Total number of word occurrences.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Words with their counts, sorted by word.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &n)| (w.as_str(), n))
    }

    /// `count / total` per word. Empty when nothing was counted.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|(w, &n)| (w.clone(), n as f64 / total))
            .collect()
    }

    pub fn to_document(&self) -> FrequencyDocument {
        FrequencyDocument {
            counts: self.counts.clone(),
            probabilities: self.probabilities(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, EngineError> {
        let document = self.to_document();
        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    /// Turn the counts into a vocabulary weighted by `source`.
    pub fn to_vocabulary(&self, source: WeightSource) -> Result<Vocabulary, EngineError> {
        match source {
            WeightSource::Counts => {
                Vocabulary::from_pairs(self.counts.iter().map(|(w, &n)| (w.clone(), n as f64)))
            }
            WeightSource::Probabilities => Vocabulary::from_pairs(self.probabilities()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BuildOptions;

    #[test]
    fn counts_lowercase_runs() {
        let counts = WordCounts::from_text("The cat and THE dog; the END.");
        assert_eq!(counts.count("the"), 3);
        assert_eq!(counts.count("cat"), 1);
        assert_eq!(counts.count("end"), 1);
        assert_eq!(counts.count("missing"), 0);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn add_text_accumulates() {
        let mut counts = WordCounts::from_text("a b");
        counts.add_text("b c");
        assert_eq!(counts.count("b"), 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let counts = WordCounts::from_text("x x x y");
        let p = counts.probabilities();
        assert_eq!(p["x"], 0.75);
        assert_eq!(p["y"], 0.25);
        let sum: f64 = p.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_text() {
        let counts = WordCounts::from_text("123 ... !!!");
        assert!(counts.is_empty());
        assert!(counts.probabilities().is_empty());
        let json = counts.to_json(false).unwrap();
        assert_eq!(json, r#"{"counts":{},"probabilities":{}}"#);
    }

    #[test]
    fn json_reads_back_as_vocabulary() {
        let counts = WordCounts::from_text("cat cat car");
        let json = counts.to_json(true).unwrap();
        let v = Vocabulary::parse_counts_json(&json, &BuildOptions::default()).unwrap();
        let tree = v.build(&BuildOptions::default()).unwrap();
        assert_eq!(tree.word_weight("cat"), Some(2.0));
        assert_eq!(tree.word_weight("car"), Some(1.0));
    }

    #[test]
    fn to_vocabulary_by_source() {
        let counts = WordCounts::from_text("a a b b");
        let v = counts.to_vocabulary(WeightSource::Counts).unwrap();
        assert_eq!(v.entries()[0].weight, 2.0);
        let v = counts.to_vocabulary(WeightSource::Probabilities).unwrap();
        assert_eq!(v.entries()[0].weight, 0.5);
    }
}
