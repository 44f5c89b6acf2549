//! Language detection for the system prompt.
//!
//! The bot answers in the language of the user's latest message; the only
//! distinction that matters here is Russian vs. everything else.

/// Detected language of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Russian,
    Other,
}

/// Detects the message language by scanning the lowercase-folded text for
/// Cyrillic letters ('а'..='я', plus 'ё' which sits outside that range).
pub fn detect(text: &str) -> Language {
    for ch in text.to_lowercase().chars() {
        if ('а'..='я').contains(&ch) || ch == 'ё' {
            return Language::Russian;
        }
    }
    Language::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cyrillic_text() {
        assert_eq!(detect("привет"), Language::Russian);
        assert_eq!(detect("ПРИВЕТ"), Language::Russian);
    }

    #[test]
    fn detects_single_cyrillic_char_in_latin_text() {
        assert_eq!(detect("hello ё world"), Language::Russian);
        assert_eq!(detect("hello Ё world"), Language::Russian);
    }

    #[test]
    fn latin_text_is_other() {
        assert_eq!(detect("hello world"), Language::Other);
        assert_eq!(detect(""), Language::Other);
    }

    #[test]
    fn digits_and_punctuation_are_other() {
        assert_eq!(detect("1234 !? ..."), Language::Other);
    }
}
