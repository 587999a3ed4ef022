//! Operator method names and the words used for them in test method names.
//!
//! `def [](i)` cannot be tested by a method called `test_[]`, so operator
//! methods are spelled out (`test_index`). The table is symmetric: looking up
//! either side yields the other.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const OPERATOR_WORDS: &[(&str, &str)] = &[
    ("[]", "index"),
    ("[]=", "index_equals"),
    ("<<", "append"),
    ("*", "times"),
    ("+", "plus"),
    ("==", "equals"),
];

static OPERATOR_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    OPERATOR_WORDS
        .iter()
        .flat_map(|&(symbol, word)| [(symbol, word), (word, symbol)])
        .collect()
});

/// Returns the partner of `name` in the operator table, or `name` itself.
pub fn translate(name: &str) -> &str {
    OPERATOR_MAP.get(name).copied().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_translate_to_words() {
        assert_eq!(translate("[]"), "index");
        assert_eq!(translate("[]="), "index_equals");
        assert_eq!(translate("<<"), "append");
        assert_eq!(translate("*"), "times");
        assert_eq!(translate("+"), "plus");
        assert_eq!(translate("=="), "equals");
    }

    #[test]
    fn test_words_translate_back_to_symbols() {
        assert_eq!(translate("index"), "[]");
        assert_eq!(translate("append"), "<<");
    }

    #[test]
    fn test_translate_is_an_involution() {
        for &(symbol, word) in OPERATOR_WORDS {
            assert_eq!(translate(translate(symbol)), symbol);
            assert_eq!(translate(translate(word)), word);
        }
    }

    #[test]
    fn test_unmapped_names_pass_through() {
        assert_eq!(translate("push"), "push");
        assert_eq!(translate(translate("<=>")), "<=>");
        assert_eq!(translate("-"), "-");
    }
}
