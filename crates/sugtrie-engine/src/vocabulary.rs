// Vocabulary loading: word lists and word-count documents.
//
// Two input shapes are supported:
//   - a word list, one word per line, each occurrence weighing 1;
//   - a JSON word-count document, either a flat `{"word": count}` object or
//     the `{"counts": {...}, "probabilities": {...}}` document produced by
//     `WordCounts::to_json`.
// Malformed entries are rejected, never skipped.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use sugtrie_core::character::{has_whitespace, lowercase};
use sugtrie_trie::WeightedTree;

use crate::EngineError;
use crate::options::{BuildOptions, WeightSource};

/// Input format of a vocabulary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VocabularyFormat {
    /// Word-count JSON for `.json` files, word list otherwise.
    #[default]
    Auto,
    WordList,
    Counts,
}

impl VocabularyFormat {
    fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => {
                let is_json = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json { Self::Counts } else { Self::WordList }
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntry {
    pub word: String,
    pub weight: f64,
}

/// Validated `(word, weight)` pairs in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountsDocument {
    Frequencies {
        counts: BTreeMap<String, f64>,
        #[serde(default)]
        probabilities: Option<BTreeMap<String, f64>>,
    },
    Flat(BTreeMap<String, f64>),
}

fn check_entry(word: &str, weight: f64) -> Result<(), String> {
    if word.is_empty() {
        return Err("empty word".to_string());
    }
    if has_whitespace(word) {
        return Err("word contains whitespace".to_string());
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(format!("weight must be finite and positive, got {weight}"));
    }
    Ok(())
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry after validating it.
    pub fn push(&mut self, word: impl Into<String>, weight: f64) -> Result<(), EngineError> {
        let word = word.into();
        check_entry(&word, weight).map_err(|reason| EngineError::MalformedEntry {
            word: word.clone(),
            reason,
        })?;
        self.entries.push(VocabularyEntry { word, weight });
        Ok(())
    }

    /// Collect validated entries from `(word, weight)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut vocabulary = Self::new();
        for (word, weight) in pairs {
            vocabulary.push(word, weight)?;
        }
        Ok(vocabulary)
    }

    /// Parse a word list: one word per line, surrounding whitespace trimmed,
    /// blank lines ignored. Every line weighs 1; repeated words accumulate
    /// when the tree is built.
    pub fn parse_word_list<R: BufRead>(
        reader: R,
        options: &BuildOptions,
    ) -> Result<Self, EngineError> {
        let mut vocabulary = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            let word = if options.lowercase {
                lowercase(word)
            } else {
                word.to_string()
            };
            check_entry(&word, 1.0).map_err(|reason| EngineError::MalformedLine {
                line: index + 1,
                reason: format!("{reason}: {word:?}"),
            })?;
            vocabulary.entries.push(VocabularyEntry { word, weight: 1.0 });
        }
        Ok(vocabulary)
    }

    /// Parse a JSON word-count document. Entries come out sorted by word.
    pub fn parse_counts_json(text: &str, options: &BuildOptions) -> Result<Self, EngineError> {
        let document: CountsDocument = serde_json::from_str(text)?;
        let weights = match (document, options.weight_source) {
            (CountsDocument::Frequencies { counts, .. }, WeightSource::Counts) => counts,
            (CountsDocument::Frequencies { probabilities, .. }, WeightSource::Probabilities) => {
                probabilities.ok_or(EngineError::MissingSection("probabilities"))?
            }
            (CountsDocument::Flat(counts), WeightSource::Counts) => counts,
            (CountsDocument::Flat(_), WeightSource::Probabilities) => {
                return Err(EngineError::MissingSection("probabilities"));
            }
        };

        let mut vocabulary = Self::new();
        for (word, weight) in weights {
            let word = if options.lowercase { lowercase(&word) } else { word };
            vocabulary.push(word, weight)?;
        }
        Ok(vocabulary)
    }

    /// Read and parse a vocabulary file.
    pub fn load(
        path: &Path,
        format: VocabularyFormat,
        options: &BuildOptions,
    ) -> Result<Self, EngineError> {
        let io_error = |source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        };
        let format = format.resolve(path);
        if options.verbose {
            info!(path = %path.display(), ?format, "loading vocabulary");
        }
        let vocabulary = match format {
            VocabularyFormat::Counts => {
                let text = std::fs::read_to_string(path).map_err(io_error)?;
                Self::parse_counts_json(&text, options)?
            }
            _ => {
                let file = std::fs::File::open(path).map_err(io_error)?;
                Self::parse_word_list(std::io::BufReader::new(file), options)?
            }
        };
        debug!(path = %path.display(), entries = vocabulary.len(), "vocabulary loaded");
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Insert every entry into a fresh tree.
    pub fn build(&self, options: &BuildOptions) -> Result<WeightedTree, EngineError> {
        let mut tree = WeightedTree::new();
        let interval = options.progress_interval.max(1);
        for (i, entry) in self.entries.iter().enumerate() {
            tree.insert(&entry.word, entry.weight)?;
            if options.verbose && (i + 1) % interval == 0 {
                info!(
                    loaded = i + 1,
                    total = self.entries.len(),
                    word = %entry.word,
                    "building tree"
                );
            }
        }
        if options.verbose {
            info!(words = tree.word_count(), nodes = tree.node_count(), "tree built");
        }
        debug!(
            entries = self.entries.len(),
            words = tree.word_count(),
            nodes = tree.node_count(),
            total_weight = tree.total_weight(),
            "tree built"
        );
        Ok(tree)
    }
}
