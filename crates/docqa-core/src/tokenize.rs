//! Lexical tokenizer for mixed Latin and CJK text.
//!
//! Produces a [`TokenSet`] of unique normalized tokens:
//!
//! - maximal runs of ASCII letters and digits, lowercased (`"Score99"` → `"score99"`);
//! - single CJK unified ideographs (U+4E00..=U+9FFF), one token each,
//!   since CJK text has no whitespace word boundaries.
//!
//! Every other character is a separator and never appears in a token.
//!
//! # Example
//!
//! ```rust
//! use docqa_core::tokenize::tokenize;
//!
//! let tokens = tokenize("Rust 编程 v2");
//! assert!(tokens.contains("rust"));
//! assert!(tokens.contains("编"));
//! assert!(tokens.contains("v2"));
//! ```

use std::collections::BTreeSet;

/// A set of unique tokens. Ordered so debug output and serialization are stable.
pub type TokenSet = BTreeSet<String>;

/// Tokenize `text` into a [`TokenSet`].
pub fn tokenize(text: &str) -> TokenSet {
    let mut tokens = TokenSet::new();
    let mut word = String::new();

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            word.push(c.to_ascii_lowercase());
            continue;
        }
        if !word.is_empty() {
            tokens.insert(std::mem::take(&mut word));
        }
        if is_cjk_ideograph(c) {
            tokens.insert(c.to_string());
        }
    }
    if !word.is_empty() {
        tokens.insert(word);
    }

    tokens
}

/// Number of distinct tokens shared by two sets.
pub fn overlap(a: &TokenSet, b: &TokenSet) -> usize {
    a.intersection(b).count()
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> TokenSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_latin_words_lowercased() {
        assert_eq!(tokenize("Hello, World!"), set(&["hello", "world"]));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(tokenize("ABC"), tokenize("abc"));
    }

    #[test]
    fn test_digits_join_words() {
        assert_eq!(tokenize("score99"), set(&["score99"]));
        assert_eq!(tokenize("v1.2"), set(&["v1", "2"]));
    }

    #[test]
    fn test_cjk_one_token_per_ideograph() {
        assert_eq!(tokenize("检索增强"), set(&["检", "索", "增", "强"]));
    }

    #[test]
    fn test_mixed_scripts() {
        let tokens = tokenize("RAG是检索");
        assert_eq!(tokens, set(&["rag", "是", "检", "索"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(tokenize("cat CAT cat"), set(&["cat"]));
    }

    #[test]
    fn test_punctuation_and_whitespace_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n").is_empty());
        assert!(tokenize("?!... --- ，。").is_empty());
    }

    #[test]
    fn test_non_ascii_latin_is_separator() {
        assert_eq!(tokenize("café"), set(&["caf"]));
    }

    #[test]
    fn test_deterministic() {
        let text = "Alpha beta 伽马 Delta42";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn test_overlap_counts_distinct_tokens() {
        let q = tokenize("cats dogs birds");
        let t = tokenize("cats and dogs and cats");
        assert_eq!(overlap(&q, &t), 2);
        assert_eq!(overlap(&TokenSet::new(), &t), 0);
    }
}
