//! Conversation title derivation.
//!
//! Two rules are applied over a conversation's life:
//! - [`initial_title`] when a chat turn implicitly creates the conversation;
//! - [`opening_title`] once the opening exchange succeeds, replacing the
//!   character prefix with a word-based summary.

use ochat_types::conversation::MAX_TITLE_CHARS;

/// Characters kept by [`initial_title`].
pub const INITIAL_TITLE_CHARS: usize = 50;

/// Words kept by [`opening_title`].
pub const OPENING_TITLE_WORDS: usize = 5;

const ELLIPSIS: &str = "...";

const TRAILING_PUNCTUATION: &[char] = &['?', '!', '.', ',', ';', ':'];

/// First 50 characters of the message, with `...` appended iff it was longer.
pub fn initial_title(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(INITIAL_TITLE_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

/// First five whitespace-separated words of the message.
///
/// `...` is appended when words were dropped. A five-word message whose last
/// word ends in sentence punctuation also gets the ellipsis in place of that
/// punctuation, so the title never reads as a complete sentence.
pub fn opening_title(message: &str) -> String {
    let words: Vec<&str> = message.split_whitespace().collect();

    let title = if words.len() > OPENING_TITLE_WORDS {
        format!("{}{ELLIPSIS}", words[..OPENING_TITLE_WORDS].join(" "))
    } else {
        let joined = words.join(" ");
        let stripped = joined.trim_end_matches(TRAILING_PUNCTUATION).trim_end();
        if words.len() == OPENING_TITLE_WORDS && stripped.len() != joined.len() {
            format!("{stripped}{ELLIPSIS}")
        } else {
            joined
        }
    };

    clamp_title(&title)
}

/// Trim surrounding whitespace and cut to the maximum stored title length.
pub fn clamp_title(title: &str) -> String {
    title.trim().chars().take(MAX_TITLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_title_short_message_unchanged() {
        assert_eq!(initial_title("Hello there"), "Hello there");
    }

    #[test]
    fn test_initial_title_exactly_fifty_chars() {
        let msg = "a".repeat(50);
        assert_eq!(initial_title(&msg), msg);
    }

    #[test]
    fn test_initial_title_truncates_with_ellipsis() {
        let msg = "b".repeat(51);
        let title = initial_title(&msg);
        assert_eq!(title, format!("{}...", "b".repeat(50)));
    }

    #[test]
    fn test_initial_title_counts_characters_not_bytes() {
        let msg = "é".repeat(60);
        let title = initial_title(&msg);
        assert_eq!(title.chars().count(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_opening_title_more_than_five_words() {
        assert_eq!(
            opening_title("Can you explain how borrow checking works in Rust?"),
            "Can you explain how borrow..."
        );
    }

    #[test]
    fn test_opening_title_five_words_with_question_mark() {
        assert_eq!(
            opening_title("Hello there, how are you?"),
            "Hello there, how are you..."
        );
    }

    #[test]
    fn test_opening_title_five_plain_words_unchanged() {
        assert_eq!(opening_title("tell me about rust lifetimes"), "tell me about rust lifetimes");
    }

    #[test]
    fn test_opening_title_fewer_words_unchanged() {
        assert_eq!(opening_title("Hi!"), "Hi!");
        assert_eq!(opening_title("What is Rust?"), "What is Rust?");
    }

    #[test]
    fn test_opening_title_collapses_whitespace() {
        assert_eq!(opening_title("  one\n two\tthree  "), "one two three");
    }

    #[test]
    fn test_clamp_title_limits_length() {
        let long = "x".repeat(300);
        assert_eq!(clamp_title(&long).chars().count(), MAX_TITLE_CHARS);
        assert_eq!(clamp_title("  padded  "), "padded");
    }
}
