//! Greedy line filling for caption text.

/// Display width of a string in characters.
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Soft-wrap `text` so each line holds at most `max_chars` characters.
///
/// Words are never split: a word longer than the budget gets a line of its
/// own. Runs of whitespace collapse to a single space.
pub fn wrap(text: &str, max_chars: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if text_width(&current) + 1 + text_width(word) <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_short_text_on_one_line() {
        assert_eq!(wrap("Hello world", 28), "Hello world");
    }

    #[test]
    fn breaks_at_budget() {
        // "the quick brown fox" is 19 chars, adding " jumps" would make 25
        assert_eq!(wrap("the quick brown fox jumps", 20), "the quick brown fox\njumps");
    }

    #[test]
    fn line_may_fill_budget_exactly() {
        assert_eq!(wrap("abcd efgh", 9), "abcd efgh");
        assert_eq!(wrap("abcd efghi", 9), "abcd\nefghi");
    }

    #[test]
    fn long_word_gets_its_own_line() {
        assert_eq!(
            wrap("a supercalifragilistic word", 10),
            "a\nsupercalifragilistic\nword"
        );
    }

    #[test]
    fn empty_text_stays_empty() {
        assert_eq!(wrap("", 28), "");
        assert_eq!(wrap("   ", 28), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 5 + 1 + 5 = 11 chars, 13 bytes
        assert_eq!(wrap("héllo wörld", 11), "héllo wörld");
    }
}
