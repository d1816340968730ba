//! Lexical normalisation of raw catalog and query text.
//!
//! The catalog's text columns mix prose with JSON-like fragments such as
//! `[{'id': 28, 'name': 'Action'}]`. Normalisation removes the structural
//! characters, the `id`/`name` key artifacts and all digits, lowercases what
//! is left and splits it on single spaces.

/// Structural punctuation removed before the key artifacts
const LEADING_PUNCTUATION: &[char] = &['[', '{', '"'];

/// Structural punctuation removed after the key artifacts
const TRAILING_PUNCTUATION: &[char] = &[':', '}', '\'', ',', ']'];

/// Convert a raw text blob into an ordered list of lowercase tokens.
///
/// Removal happens in a fixed order: leading punctuation, the substring
/// `id`, ASCII digits, the substring `name`, trailing punctuation. Only the
/// exact lowercase substrings are stripped, and they are stripped wherever
/// they occur, including inside words.
///
/// Empty tokens and bare newline tokens are dropped.
///
/// # Example
/// ```
/// use data_loader::normalize;
///
/// let tokens = normalize(r#"{"id": 7, "name": "Test", "genre": "Action"}"#);
/// assert_eq!(tokens, vec!["test", "genre", "action"]);
/// ```
pub fn normalize(raw: &str) -> Vec<String> {
    let cleaned = raw.replace(LEADING_PUNCTUATION, "");
    let cleaned = cleaned.replace("id", "");
    let cleaned = cleaned.replace(|c: char| c.is_ascii_digit(), "");
    let cleaned = cleaned.replace("name", "");
    let cleaned = cleaned.replace(TRAILING_PUNCTUATION, "").to_lowercase();

    cleaned
        .split(' ')
        .filter(|word| !word.is_empty() && *word != "\n")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_json_artifacts() {
        let tokens = normalize(r#"{"id": 7, "name": "Test", "genre": "Action"}"#);
        assert_eq!(tokens, vec!["test", "genre", "action"]);
    }

    #[test]
    fn test_genre_list_from_catalog() {
        let raw = "[{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': 'Comedy'}]";
        assert_eq!(normalize(raw), vec!["animation", "comedy"]);
    }

    #[test]
    fn test_preserves_duplicates_and_order() {
        let tokens = normalize("Space war space");
        assert_eq!(tokens, vec!["space", "war", "space"]);
    }

    #[test]
    fn test_digit_only_tokens_are_dropped() {
        // "1995" and "42," become empty after stripping
        let tokens = normalize("released 1995 with 42, sequels");
        assert_eq!(tokens, vec!["released", "with", "sequels"]);
    }

    #[test]
    fn test_key_substrings_removed_inside_words() {
        // Key substrings are removed wherever they appear
        assert_eq!(normalize("video"), vec!["veo"]);
        assert_eq!(normalize("unnamed"), vec!["und"]);
    }

    #[test]
    fn test_uppercase_keys_survive() {
        // Substrings are stripped before lowercasing
        assert_eq!(normalize("Name ID"), vec!["name", "id"]);
    }

    #[test]
    fn test_newline_token_dropped() {
        assert_eq!(normalize("end \n"), vec!["end"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
        assert!(normalize("{[]}, 123").is_empty());
    }

    proptest! {
        #[test]
        fn prop_tokens_are_clean(raw in "[ -~]{0,64}") {
            for token in normalize(&raw) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.contains(' '));
                prop_assert!(!token.chars().any(|c| c.is_ascii_digit()));
                prop_assert!(
                    !token.chars().any(|c| "[{}]\"',:".contains(c)),
                    "token {:?} contains a stripped punctuation character",
                    token
                );
                prop_assert!(!token.chars().any(|c| c.is_uppercase()));
            }
        }
    }
}
