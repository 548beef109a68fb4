//! Whitespace tokenization with byte offsets for highlight alignment.
//!
//! Tokens are whitespace-delimited, not linguistic words: punctuation glued
//! to a word stays part of its token. Offsets index the original string, so
//! re-slicing `&text[token.start..token.end]` reproduces the token text.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// A whitespace-delimited unit of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub text: String,
    /// Byte offset of the first character, inclusive.
    pub start: usize,
    /// Byte offset past the last character, exclusive.
    pub end: usize,
}

/// Split `text` into ordered tokens. Empty or all-whitespace input yields an
/// empty sequence. Pure and idempotent.
pub fn tokenize(text: &str) -> Vec<Token> {
    RE_TOKEN
        .find_iter(text)
        .enumerate()
        .map(|(index, hit)| Token {
            index,
            text: hit.as_str().to_string(),
            start: hit.start(),
            end: hit.end(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sample_sentence_with_slicable_offsets() {
        let text = "Le chat mange une pomme.";
        let tokens = tokenize(text);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Le", "chat", "mange", "une", "pomme."]);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n  ").is_empty());
    }

    #[test]
    fn collapses_whitespace_runs_without_losing_offsets() {
        let text = "un  deux\t\ttrois\nquatre";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].text, "deux");
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[3].text, "quatre");
        assert_eq!(&text[tokens[3].start..tokens[3].end], "quatre");
    }

    #[test]
    fn punctuation_stays_glued_to_its_word() {
        let tokens = tokenize("Bonjour, monde !");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Bonjour,", "monde", "!"]);
    }

    #[test]
    fn indices_are_sequential_and_ranges_ordered() {
        let tokens = tokenize("  a bb  ccc ");
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.index, i);
        }
        for pair in tokens.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let text = "Même entrée, même sortie.";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
