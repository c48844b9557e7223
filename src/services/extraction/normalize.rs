//! Line normalization for verification views.

use crate::models::NormalizedText;

/// Characters treated as line boundaries.
///
/// Covers `\n`, `\r` (and therefore `\r\n`), vertical tab, form feed, the
/// ASCII file/group/record separators, NEL and the Unicode line/paragraph
/// separators.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{b}'
            | '\u{c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Characters separating words within a line.
///
/// Unicode whitespace plus the ASCII unit separator, which Unicode does not
/// class as whitespace but which is never part of a word.
fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{1f}'
}

/// Split `text` into trimmed, whitespace-collapsed, non-empty lines.
pub fn normalize(text: &str) -> NormalizedText {
    let lines = text
        .split(is_line_boundary)
        .filter_map(|raw_line| {
            let mut words = raw_line
                .split(is_word_separator)
                .filter(|word| !word.is_empty());
            let first = words.next()?;
            let mut cleaned = String::from(first);
            for word in words {
                cleaned.push(' ');
                cleaned.push_str(word);
            }
            Some(cleaned)
        })
        .collect();

    NormalizedText { lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  a   b\tc  ").lines, vec!["a b c"]);
    }

    #[test]
    fn test_drops_empty_lines() {
        assert_eq!(normalize("x\n\n\n   \ny").lines, vec!["x", "y"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("\n \t\r\n").is_empty());
    }

    #[test]
    fn test_line_boundaries() {
        let text = "one\r\ntwo\rthree\u{c}four\u{2028}five";
        assert_eq!(
            normalize(text).lines,
            vec!["one", "two", "three", "four", "five"]
        );
    }

    #[test]
    fn test_preserves_order() {
        let text = "Revenue:   $5M\n\n  Net income: $1M  \nDividends:\t\t$0.10";
        assert_eq!(
            normalize(text).lines,
            vec!["Revenue: $5M", "Net income: $1M", "Dividends: $0.10"]
        );
    }

    #[test]
    fn test_unit_separator_splits_words() {
        assert_eq!(normalize("a\u{1f}b").lines, vec!["a b"]);
        assert_eq!(normalize("\u{1f} x \u{1f}\u{1f} y\u{1f}").lines, vec!["x y"]);
        assert!(normalize("\u{1f}\u{1f}").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "  a   b\tc  ",
            "x\n\n\n   \ny",
            "\u{c}page  one\r\n\r\n\tpage\u{a0}two \u{b} tail\u{c}",
            "already clean\nlines here",
            "\r\r\n\n\r",
            "a\u{1f}\u{1f}b\u{1e}c\u{1d}d\u{1c}e",
            "\u{3000}wide\u{2003}space\u{205f}\u{85}next",
            "\u{2028}\u{2029}\u{85}",
        ];
        for input in inputs {
            assert_idempotent(input);
        }
    }

    #[test]
    fn test_idempotent_over_generated_inputs() {
        let fragments = [
            "", "a", "b c", " ", "\t", "\n", "\r", "\r\n", "\u{b}", "\u{c}", "\u{1c}",
            "\u{1f}", "\u{85}", "\u{a0}", "\u{2028}", "\u{3000}",
        ];
        for first in fragments {
            for second in fragments {
                for third in fragments {
                    assert_idempotent(&format!("{}{}{}", first, second, third));
                }
            }
        }
    }

    fn assert_idempotent(input: &str) {
        let once = normalize(input);
        for line in &once.lines {
            assert!(!line.is_empty(), "empty line for {:?}", input);
            assert!(!line.contains(is_line_boundary), "boundary kept for {:?}", input);
            assert_eq!(line.trim(), line, "untrimmed line for {:?}", input);
            assert!(!line.contains("  "), "whitespace run kept for {:?}", input);
        }
        let twice = normalize(&once.to_text());
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }
}
