//! Comparisons applied to recognizer output. A mismatch is an ordinary
//! "try again", never an error.

/// Uppercase and keep only the letters A-Z.
pub fn normalize_letters(text: &str) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// Concatenate the substrings returned by the handwriting recognizer.
pub fn join_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    fragments.into_iter().collect()
}

pub fn handwriting_matches<'a>(expected: &str, fragments: impl IntoIterator<Item = &'a str>) -> bool {
    let expected = normalize_letters(expected);
    !expected.is_empty() && normalize_letters(&join_fragments(fragments)) == expected
}

/// Speech passes when the transcript contains the target word, ignoring case.
pub fn speech_matches(expected: &str, recognized: &str) -> bool {
    let expected = expected.trim().to_lowercase();
    !expected.is_empty() && recognized.to_lowercase().contains(&expected)
}

/// Worth asking the dictionary about: non-empty and purely alphabetic.
pub fn is_candidate_word(word: &str) -> bool {
    let word = word.trim();
    !word.is_empty() && word.chars().all(|c| c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_letters() {
        assert_eq!(normalize_letters("c a-t!"), "CAT");
        assert_eq!(normalize_letters("Hello, World 42"), "HELLOWORLD");
        assert_eq!(normalize_letters("123"), "");
    }

    #[test]
    fn test_handwriting_matches_across_fragments() {
        assert!(handwriting_matches("apple", ["AP", "p le"]));
        assert!(handwriting_matches("Apple", ["a.p.p.l.e"]));
        assert!(!handwriting_matches("apple", ["APPLY"]));
        assert!(!handwriting_matches("", Vec::<&str>::new()));
    }

    #[test]
    fn test_speech_matches_containment() {
        assert!(speech_matches("Cat", "I think it is a cat"));
        assert!(speech_matches("dog", "DOG"));
        assert!(!speech_matches("dog", "a frog"));
        assert!(!speech_matches("  ", "anything"));
    }

    #[test]
    fn test_candidate_words() {
        assert!(is_candidate_word("house"));
        assert!(is_candidate_word(" house "));
        assert!(!is_candidate_word(""));
        assert!(!is_candidate_word("hous3"));
        assert!(!is_candidate_word("two words"));
        assert!(!is_candidate_word("re-do"));
    }
}
