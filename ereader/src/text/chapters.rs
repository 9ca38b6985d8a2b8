//! Chapter detection for raw extracted book text.

use once_cell::sync::Lazy;
use regex::Regex;
use reflow::Chapter;

use super::cleaner::{clean_text, strip_page_numbers};

/// Upper bound on words per section when no chapter headings are found.
pub const MAX_SECTION_WORDS: usize = 1500;

/// Heading lines longer than this are prose, not headings.
const MAX_HEADING_LEN: usize = 80;

/// Title for text that precedes the first chapter heading.
pub const FRONT_MATTER_TITLE: &str = "Front Matter";

/// `CHAPTER IV`, `Chapter 12`, `C H A P T E R  I`, optionally followed by a title.
static CHAPTER_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*c\s*h\s*a\s*p\s*t\s*e\s*r[\s.:]+(?:[ivxlcdm]+|\d+)\b")
        .expect("chapter heading pattern is valid")
});

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));

/// Whether `line` looks like a chapter heading.
pub fn is_chapter_heading(line: &str) -> bool {
    line.trim().chars().count() <= MAX_HEADING_LEN && CHAPTER_HEADING.is_match(line)
}

/// Split raw document text into chapters.
///
/// With at least two `CHAPTER <numeral>` headings each heading opens a
/// chapter; otherwise paragraphs are grouped into sections of at most
/// [`MAX_SECTION_WORDS`] words.
pub fn split_chapters(raw: &str) -> Vec<Chapter> {
    let text = clean_text(&strip_page_numbers(raw));
    let lines: Vec<&str> = text.lines().collect();
    let headings: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_chapter_heading(line))
        .map(|(idx, _)| idx)
        .collect();

    if headings.len() >= 2 {
        log::debug!("found {} chapter headings", headings.len());
        split_on_headings(&lines, &headings)
    } else {
        log::debug!(
            "found {} chapter headings; grouping paragraphs into sections",
            headings.len()
        );
        split_into_sections(&text, MAX_SECTION_WORDS)
    }
}

fn split_on_headings(lines: &[&str], headings: &[usize]) -> Vec<Chapter> {
    let mut chapters = Vec::new();

    let preamble = lines[..headings[0]].join("\n");
    let preamble = preamble.trim();
    if !preamble.is_empty() {
        chapters.push(Chapter::new(FRONT_MATTER_TITLE, preamble));
    }

    // Headings whose chapter had no text; they move into the next chapter's body.
    let mut carried: Vec<String> = Vec::new();

    for (n, &start) in headings.iter().enumerate() {
        let end = headings.get(n + 1).copied().unwrap_or(lines.len());
        let title = collapse_whitespace(lines[start]);
        let body = lines[start + 1..end].join("\n");
        let body = body.trim();

        if body.is_empty() {
            log::warn!("heading {title:?} has no text; keeping it with the following chapter");
            carried.push(title);
            continue;
        }

        let content = if carried.is_empty() {
            body.to_string()
        } else {
            let mut merged = carried.drain(..).collect::<Vec<_>>().join("\n\n");
            merged.push_str("\n\n");
            merged.push_str(body);
            merged
        };
        chapters.push(Chapter::new(title, content));
    }

    if !carried.is_empty() {
        match chapters.last_mut() {
            Some(last) => {
                for heading in carried {
                    last.content.push_str("\n\n");
                    last.content.push_str(&heading);
                }
            }
            None => {
                let title = carried.remove(0);
                chapters.push(Chapter::new(title, carried.join("\n\n")));
            }
        }
    }

    chapters
}

/// Greedily group paragraphs until the next one would push a section past `max_words`.
fn split_into_sections(text: &str, max_words: usize) -> Vec<Chapter> {
    let mut sections: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut words = 0;

    for paragraph in PARAGRAPH_BREAK.split(text) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        let count = paragraph.split_whitespace().count();
        if words + count > max_words && !current.is_empty() {
            sections.push(current.join("\n\n"));
            current.clear();
            words = 0;
        }
        current.push(paragraph);
        words += count;
    }

    if !current.is_empty() {
        sections.push(current.join("\n\n"));
    }

    sections
        .into_iter()
        .enumerate()
        .map(|(i, content)| Chapter::new(format!("Section {}", i + 1), content))
        .collect()
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
