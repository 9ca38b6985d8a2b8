//! Text cleanup for extracted book text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that carry no visible text and only confuse layout.
const INVISIBLE_CHARS: &[char] = &[
    '\u{200b}', // Zero-width space
    '\u{200c}', // Zero-width non-joiner
    '\u{200d}', // Zero-width joiner
    '\u{2060}', // Word joiner
    '\u{feff}', // BOM
    '\u{00ad}', // Soft hyphen
];

/// A line holding nothing but a page number: `12`, `- 12 -`, `Page 12`, `[12]`.
static PAGE_NUMBER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:page\s+\d{1,4}|[-–—]?\s*\d{1,4}\s*[-–—]?|\[\s*\d{1,4}\s*\])\s*$")
        .expect("page number pattern is valid")
});

/// Clean extracted text before chapter detection.
///
/// This function:
/// - Unifies line endings
/// - Drops invisible and control characters (except newlines and tabs)
/// - Collapses runs of spaces and tabs
/// - Collapses three or more newlines into a paragraph break
pub fn clean_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut result = String::with_capacity(unified.len());

    for c in unified.chars() {
        if c == '\u{00a0}' {
            result.push(' ');
        } else if is_allowed_char(c) {
            result.push(c);
        }
    }

    normalize_whitespace(&result)
}

fn is_allowed_char(c: char) -> bool {
    if c == '\n' || c == '\t' {
        return true;
    }
    !c.is_control() && !INVISIBLE_CHARS.contains(&c)
}

fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = false;
    let mut newline_count = 0;

    for c in text.chars() {
        if c == '\n' {
            // Trailing spaces before a newline are noise.
            while result.ends_with(' ') {
                result.pop();
            }
            newline_count += 1;
            prev_was_space = false;
            if newline_count <= 2 {
                result.push('\n');
            }
        } else if c == ' ' || c == '\t' {
            if !prev_was_space && newline_count == 0 {
                result.push(' ');
            }
            prev_was_space = true;
        } else {
            newline_count = 0;
            prev_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}

/// Whether `line` is only a page number.
pub fn is_page_number(line: &str) -> bool {
    !line.trim().is_empty() && PAGE_NUMBER_LINE.is_match(line)
}

/// Drop lines that consist solely of a page number.
pub fn strip_page_numbers(text: &str) -> String {
    text.lines()
        .filter(|line| !is_page_number(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_whitespace() {
        let text = "Hello   world\n\n\n\nNew paragraph";
        assert_eq!(clean_text(text), "Hello world\n\nNew paragraph");
    }

    #[test]
    fn test_clean_line_endings() {
        assert_eq!(clean_text("one\r\ntwo\rthree"), "one\ntwo\nthree");
    }

    #[test]
    fn test_clean_drops_leading_indent_and_trailing_spaces() {
        assert_eq!(clean_text("first  \n\t  second"), "first\nsecond");
    }

    #[test]
    fn test_clean_control_chars() {
        assert_eq!(clean_text("Hello\x00World\x07Test"), "HelloWorldTest");
    }

    #[test]
    fn test_clean_invisible_chars() {
        assert_eq!(clean_text("Hello\u{200b}World\u{feff}Te\u{00ad}st"), "HelloWorldTest");
    }

    #[test]
    fn test_clean_keeps_typography() {
        let text = "\u{201c}Hello,\u{201d} she said\u{2026} and left \u{2014} quietly.";
        assert_eq!(clean_text(text), text);
    }

    #[test]
    fn test_non_breaking_space_becomes_space() {
        assert_eq!(clean_text("Mr.\u{00a0}Smith"), "Mr. Smith");
    }

    #[test]
    fn test_page_number_lines() {
        for line in ["12", "  7  ", "- 12 -", "Page 3", "PAGE 104", "[42]"] {
            assert!(is_page_number(line), "{line:?} should be a page number");
        }
        for line in ["", "12 Angry Men", "Chapter 3", "1984 was a year", "civil"] {
            assert!(!is_page_number(line), "{line:?} is not a page number");
        }
    }

    #[test]
    fn test_strip_page_numbers() {
        let text = "The end of a page.\n17\nThe next page begins.";
        assert_eq!(
            strip_page_numbers(text),
            "The end of a page.\nThe next page begins."
        );
    }
}
