// Character helpers and the lowercase word tokenizer.

/// Returns `true` for the characters the word-frequency tokenizer keeps:
/// ASCII `a` through `z` after lowercasing.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// Lowercase a single code point.
///
/// Characters whose lowercase form expands to several code points are
/// returned unchanged, so a word keeps one tree level per input character.
pub fn simple_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Lowercase a string one code point at a time (see [`simple_lower`]).
pub fn lowercase(s: &str) -> String {
    s.chars().map(simple_lower).collect()
}

/// Returns `true` if the string contains any whitespace character.
pub fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Split raw text into lowercase words.
///
/// The text is lowercased and every maximal run of ASCII letters becomes one
/// word; everything else (digits, punctuation, non-ASCII letters) separates
/// words.
pub fn word_runs(text: &str) -> WordRuns<'_> {
    WordRuns {
        chars: text.chars(),
    }
}

/// Iterator returned by [`word_runs`].
pub struct WordRuns<'a> {
    chars: std::str::Chars<'a>,
}

impl Iterator for WordRuns<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut word = String::new();
        for c in self.chars.by_ref() {
            let c = simple_lower(c);
            if is_word_char(c) {
                word.push(c);
            } else if !word.is_empty() {
                return Some(word);
            }
        }
        if word.is_empty() { None } else { Some(word) }
    }
}
