//! Measurement-driven pagination.
//!
//! Paragraphs are packed onto a page while the rendered line count stays
//! within the width class limit. A paragraph that does not fit is split at
//! word boundaries, using binary search over its words to find the longest
//! prefix the measurement surface accepts. The result is checked for lost
//! or under-split content and replaced by character chunks when suspicious.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::fallback;
use crate::layout::LayoutParams;
use crate::metrics::{ScratchSurface, TextMetrics};

/// Separator between paragraphs in chapter text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Tolerance when turning a pixel height into whole lines.
const LINE_EPSILON: f32 = 0.01;

/// Any run of blank (or whitespace-only) lines.
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("blank-line pattern is valid"));

/// A slice of normalized chapter text that fits on one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub text: String,
    /// Byte range of `text` within the normalized chapter text.
    pub byte_range: Range<usize>,
}

impl Page {
    pub(crate) fn from_range(text: &str, byte_range: Range<usize>) -> Self {
        Self {
            text: text[byte_range.clone()].to_string(),
            byte_range,
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// How a result was produced. Informational; callers treat all the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Pages fitted against the measurement surface.
    Measured,
    /// Fixed-size character chunks after a failed sanity check.
    CharacterChunks,
    /// Whole chapter on one page while measurement is unavailable.
    Unsplit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationResult {
    pub pages: Vec<Page>,
    pub strategy: Strategy,
}

impl PaginationResult {
    /// The whole (normalized) chapter as a single page.
    pub fn unsplit(content: &str) -> Self {
        let normalized = normalize(content);
        Self {
            pages: vec![Page::from_range(&normalized, 0..normalized.len())],
            strategy: Strategy::Unsplit,
        }
    }

    fn empty() -> Self {
        Self {
            pages: vec![Page::from_range("", 0..0)],
            strategy: Strategy::Measured,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Pages joined back together with the paragraph separator.
    pub fn reconstruct(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }
}

/// Normalize line endings and collapse runs of blank lines into one paragraph break.
pub fn normalize(content: &str) -> String {
    let unified = content.replace("\r\n", "\n").replace('\r', "\n");
    BLANK_LINES
        .replace_all(&unified, PARAGRAPH_SEPARATOR)
        .into_owned()
}

/// Split `content` into pages that fit the layout.
///
/// Fails only when the layout is invalid or cannot be measured yet; both
/// deferral cases are reported through [`LayoutError::is_deferral`].
pub fn paginate(
    content: &str,
    params: &LayoutParams,
    metrics: &dyn TextMetrics,
) -> Result<PaginationResult> {
    params.validate()?;

    let normalized = normalize(content);
    if normalized.trim().is_empty() {
        return Ok(PaginationResult::empty());
    }

    let pages = {
        let mut surface = metrics.open_surface(&params.text_style())?;
        let line_height_px = surface.line_height().resolve_px(params.font_size_px);
        let mut fitter = PageFitter::new(
            &normalized,
            surface.as_mut(),
            line_height_px,
            params.max_lines(),
        );
        fitter.run();
        fitter.into_pages()
    };

    let budget = fallback::chars_per_page(params);
    if let Some(reason) = fallback::check(&normalized, &pages, budget) {
        log::warn!(
            "{} ({} metrics); using {}-character pages",
            reason,
            metrics.name(),
            budget
        );
        return Ok(PaginationResult {
            pages: fallback::chunk_by_chars(&normalized, budget),
            strategy: Strategy::CharacterChunks,
        });
    }

    log::debug!(
        "paginated {} chars into {} pages ({} lines/page, {} metrics)",
        normalized.len(),
        pages.len(),
        params.max_lines(),
        metrics.name()
    );

    Ok(PaginationResult {
        pages,
        strategy: Strategy::Measured,
    })
}

/// Incremental page builder over one scratch surface.
struct PageFitter<'a> {
    text: &'a str,
    surface: &'a mut dyn ScratchSurface,
    line_height_px: f32,
    max_lines: u32,
    /// Fragments (byte ranges) on the page being built.
    buffer: Vec<Range<usize>>,
    pages: Vec<Page>,
}

impl<'a> PageFitter<'a> {
    fn new(
        text: &'a str,
        surface: &'a mut dyn ScratchSurface,
        line_height_px: f32,
        max_lines: u32,
    ) -> Self {
        Self {
            text,
            surface,
            line_height_px,
            max_lines,
            buffer: Vec::new(),
            pages: Vec::new(),
        }
    }

    fn run(&mut self) {
        for paragraph in paragraph_ranges(self.text) {
            if self.fits(paragraph.clone()) {
                self.buffer.push(paragraph);
                continue;
            }

            let words = word_ranges(self.text, paragraph.clone());
            if words.is_empty() {
                // Whitespace-only: renders nothing, keep it for the byte range.
                self.buffer.push(paragraph);
                continue;
            }
            self.split_words(&words);
        }
        self.flush();
    }

    /// Place a paragraph's words over as many pages as needed.
    fn split_words(&mut self, words: &[Range<usize>]) {
        let mut rest = words;
        while !rest.is_empty() {
            let mut take = self.longest_fitting_prefix(rest);
            if take == 0 {
                if !self.buffer.is_empty() {
                    self.flush();
                    continue;
                }
                log::debug!(
                    "word {:?} does not fit an empty page; giving it its own page",
                    &self.text[rest[0].clone()]
                );
                take = 1;
            }

            self.buffer.push(rest[0].start..rest[take - 1].end);
            rest = &rest[take..];
            if !rest.is_empty() {
                self.flush();
            }
        }
    }

    /// Binary search for the most words of `words` that still fit on the current page.
    fn longest_fitting_prefix(&mut self, words: &[Range<usize>]) -> usize {
        let (mut lo, mut hi) = (0, words.len());
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            if self.fits(words[0].start..words[mid - 1].end) {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }

    /// Whether the buffer plus `candidate` as one more paragraph stays within the line limit.
    fn fits(&mut self, candidate: Range<usize>) -> bool {
        let text = self.text;
        let mut paragraphs: Vec<&str> = self.buffer.iter().map(|r| &text[r.clone()]).collect();
        paragraphs.push(&text[candidate]);
        let height = self.surface.rendered_height(&paragraphs);
        lines_for(height, self.line_height_px) <= self.max_lines
    }

    fn flush(&mut self) {
        let (Some(first), Some(last)) = (self.buffer.first(), self.buffer.last()) else {
            return;
        };
        let range = first.start..last.end;
        self.pages.push(Page::from_range(self.text, range));
        self.buffer.clear();
    }

    fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

/// Convert a rendered height to whole lines.
fn lines_for(height_px: f32, line_height_px: f32) -> u32 {
    if !(height_px > 0.0) || !(line_height_px > 0.0) {
        return 0;
    }
    (height_px / line_height_px - LINE_EPSILON).ceil().max(0.0) as u32
}

/// Byte ranges of the paragraphs of normalized text.
fn paragraph_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(PARAGRAPH_SEPARATOR) {
        ranges.push(start..idx);
        start = idx + PARAGRAPH_SEPARATOR.len();
    }
    ranges.push(start..text.len());
    ranges
}

/// Byte ranges of the whitespace-separated words inside `within`.
fn word_ranges(text: &str, within: Range<usize>) -> Vec<Range<usize>> {
    let offset = within.start;
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, c) in text[within.clone()].char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push(offset + s..offset + idx);
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push(offset + s..within.end);
    }
    words
}

/// Re-paginates on demand and keeps the last good result.
///
/// Mirrors how a reading view recomputes pages whenever the chapter or layout
/// changes: identical input is served from the previous pass, and a pass that
/// cannot measure keeps showing what was there before.
pub struct Paginator<M: TextMetrics> {
    metrics: M,
    last: Option<Pass>,
}

struct Pass {
    content: String,
    params: LayoutParams,
    result: PaginationResult,
    /// False while showing a stand-in because measurement was unavailable.
    settled: bool,
}

impl<M: TextMetrics> Paginator<M> {
    pub fn new(metrics: M) -> Self {
        Self {
            metrics,
            last: None,
        }
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Last result handed out, if any.
    pub fn current(&self) -> Option<&PaginationResult> {
        self.last.as_ref().map(|pass| &pass.result)
    }

    /// Pages for `content` under `params`.
    ///
    /// Deferral conditions never surface as errors: the previous pages for
    /// the same chapter stay in place, or the chapter is shown unsplit.
    pub fn paginate(&mut self, content: &str, params: &LayoutParams) -> Result<&PaginationResult> {
        if !self.is_current(content, params) {
            if let Some(pass) = self.run_pass(content, params)? {
                self.last = Some(pass);
            }
        }
        match &self.last {
            Some(pass) => Ok(&pass.result),
            None => Err(LayoutError::LayoutPending),
        }
    }

    fn is_current(&self, content: &str, params: &LayoutParams) -> bool {
        self.last
            .as_ref()
            .is_some_and(|pass| pass.settled && pass.content == content && pass.params == *params)
    }

    fn run_pass(&self, content: &str, params: &LayoutParams) -> Result<Option<Pass>> {
        match paginate(content, params, &self.metrics) {
            Ok(result) => Ok(Some(Pass {
                content: content.to_string(),
                params: params.clone(),
                result,
                settled: true,
            })),
            Err(err) if err.is_deferral() => {
                let same_chapter = self
                    .last
                    .as_ref()
                    .is_some_and(|pass| pass.content == content);
                if same_chapter {
                    log::debug!("{err}; keeping previous pages");
                    return Ok(None);
                }
                log::debug!("{err}; showing chapter unsplit for now");
                Ok(Some(Pass {
                    content: content.to_string(),
                    params: params.clone(),
                    result: PaginationResult::unsplit(content),
                    settled: false,
                }))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WidthClass;
    use crate::providers::mock::MOCK_LINE_HEIGHT_PX;
    use crate::providers::{EstimatedMetrics, MockMetrics};

    fn words(n: usize) -> String {
        (0..n)
            .map(|i| format!("w{}", i % 10))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn all_words(result: &PaginationResult) -> Vec<String> {
        result
            .pages
            .iter()
            .flat_map(|p| p.text.split_whitespace().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n  \n\t\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\nb"), "a\nb");
    }

    #[test]
    fn test_paragraph_and_word_ranges() {
        let text = "one two\n\n  three";
        let paragraphs = paragraph_ranges(text);
        assert_eq!(paragraphs, vec![0..7, 9..16]);
        assert_eq!(word_ranges(text, 0..7), vec![0..3, 4..7]);
        assert_eq!(word_ranges(text, 9..16), vec![11..16]);
    }

    #[test]
    fn test_lines_for() {
        assert_eq!(lines_for(0.0, 20.0), 0);
        assert_eq!(lines_for(60.0, 20.0), 3);
        assert_eq!(lines_for(60.5, 20.0), 4);
        assert_eq!(lines_for(f32::NAN, 20.0), 0);
    }

    #[test]
    fn test_short_text_is_one_page() {
        let content = "Alpha beta gamma.\n\ndelta epsilon.";
        let params = LayoutParams::new(16.0, WidthClass::Wide, 1200);
        let result = paginate(content, &params, &EstimatedMetrics::new()).unwrap();
        assert_eq!(result.page_count(), 1);
        assert_eq!(result.pages[0].text, content);
        assert_eq!(result.strategy, Strategy::Measured);
    }

    #[test]
    fn test_empty_content_is_one_empty_page() {
        let params = LayoutParams::default();
        for content in ["", "   ", "\n\n\n"] {
            let result = paginate(content, &params, &MockMetrics::new(40)).unwrap();
            assert_eq!(result.page_count(), 1);
            assert!(result.pages[0].is_empty());
        }
    }

    #[test]
    fn test_long_paragraph_splits_on_words() {
        let content = words(5000);
        let params = LayoutParams::new(20.0, WidthClass::Narrow, 300);
        let metrics = EstimatedMetrics::new();
        let result = paginate(&content, &params, &metrics).unwrap();

        assert!(result.page_count() > 1);
        assert_eq!(result.strategy, Strategy::Measured);
        assert_eq!(all_words(&result).len(), 5000);
        // Pages are exact slices of the source and never cut a word.
        for page in &result.pages {
            assert_eq!(&content[page.byte_range.clone()], page.text);
            assert!(!page.text.starts_with(' ') && !page.text.ends_with(' '));
        }
        // Full pages first, the leftover last.
        let counts: Vec<usize> = result.pages.iter().map(Page::word_count).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_paragraph_groups_match_hand_count() {
        // 10 chars per line, 24 lines per page (narrow).
        let metrics = MockMetrics::new(10);
        let paragraph = |n: usize| vec!["abcd"; n].join(" "); // two words per line
        let paras = [paragraph(24), paragraph(24), paragraph(24), paragraph(24)];
        let lines: Vec<u32> = paras.iter().map(|p| metrics.count_lines(&[p.as_str()])).collect();
        assert_eq!(lines, vec![12, 12, 12, 12]);

        let content = paras.join("\n\n");
        let params = LayoutParams::new(16.0, WidthClass::Narrow, 400);
        let result = paginate(&content, &params, &metrics).unwrap();

        // 12 + 12 fills a 24-line page exactly; no words of the third fit after it.
        assert_eq!(result.page_count(), 2);
        assert_eq!(result.pages[0].text, paras[..2].join("\n\n"));
        assert_eq!(result.pages[1].text, paras[2..].join("\n\n"));
    }

    #[test]
    fn test_split_paragraph_fills_page_before_breaking() {
        let metrics = MockMetrics::new(10);
        let first = vec!["abcd"; 40].join(" "); // 20 lines
        let second = vec!["abcd"; 20].join(" "); // 10 lines, only 4 fit after the first
        let content = format!("{first}\n\n{second}");
        let params = LayoutParams::new(16.0, WidthClass::Narrow, 400);
        let result = paginate(&content, &params, &metrics).unwrap();

        assert_eq!(result.page_count(), 2);
        assert_eq!(result.pages[0].word_count(), 48);
        assert_eq!(result.pages[1].word_count(), 12);
        for page in &result.pages {
            let paragraphs: Vec<&str> = page.text.split(PARAGRAPH_SEPARATOR).collect();
            assert!(metrics.count_lines(&paragraphs) <= 24);
        }
    }

    #[test]
    fn test_oversized_word_gets_its_own_page() {
        // 5 chars per line: a 200-char word needs 40 lines, more than any page holds.
        let metrics = MockMetrics::new(5);
        let giant = "x".repeat(200);
        let content = format!("small words here\n\n{giant}\n\nafter it");
        let params = LayoutParams::new(16.0, WidthClass::Narrow, 400);
        let result = paginate(&content, &params, &metrics).unwrap();

        let texts: Vec<&str> = result.pages.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["small words here", giant.as_str(), "after it"]);
    }

    #[test]
    fn test_collapsed_surface_falls_back_to_character_chunks() {
        let content = words(2000);
        let params = LayoutParams::new(20.0, WidthClass::Narrow, 300);
        let result = paginate(&content, &params, &MockMetrics::collapsed()).unwrap();

        assert_eq!(result.strategy, Strategy::CharacterChunks);
        let budget = fallback::chars_per_page(&params);
        assert_eq!(result.page_count(), content.len().div_ceil(budget));
        assert_eq!(result.pages.concat_text(), content);
    }

    #[test]
    fn test_wide_word_gaps_lost_at_page_breaks_fall_back() {
        // One column per line: each six-letter word takes six lines, four words
        // per narrow page, and the 100-space gap at each break lands on no page.
        let content = vec!["abcdef"; 40].join(&" ".repeat(100));
        let params = LayoutParams::new(20.0, WidthClass::Narrow, 300);
        let metrics = MockMetrics::new(1);

        let normalized = normalize(&content);
        let mut surface = metrics.open_surface(&params.text_style()).unwrap();
        let mut fitter = PageFitter::new(
            &normalized,
            surface.as_mut(),
            MOCK_LINE_HEIGHT_PX,
            params.max_lines(),
        );
        fitter.run();
        let measured = fitter.into_pages();
        drop(surface);
        assert_eq!(measured.len(), 10);
        assert!(matches!(
            fallback::check(&normalized, &measured, fallback::chars_per_page(&params)),
            Some(fallback::FallbackReason::ContentLoss { .. })
        ));

        let result = paginate(&content, &params, &metrics).unwrap();
        assert_eq!(result.strategy, Strategy::CharacterChunks);
        assert_eq!(result.pages.concat_text(), content);
    }

    #[test]
    fn test_surface_released_after_each_pass() {
        let metrics = MockMetrics::new(30);
        let params = LayoutParams::default();
        paginate(&words(3000), &params, &metrics).unwrap();
        paginate("short", &params, &metrics).unwrap();
        assert_eq!(metrics.surfaces_opened(), 2);
        assert_eq!(metrics.surfaces_closed(), 2);
    }

    #[test]
    fn test_layout_errors() {
        let metrics = MockMetrics::new(30);
        let pending = LayoutParams::new(16.0, WidthClass::Comfort, 0);
        assert_eq!(
            paginate("text", &pending, &metrics),
            Err(LayoutError::LayoutPending)
        );

        metrics.set_available(false);
        let err = paginate("text", &LayoutParams::default(), &metrics).unwrap_err();
        assert!(err.is_deferral());
    }

    #[test]
    fn test_paginator_reuses_identical_pass() {
        let mut paginator = Paginator::new(MockMetrics::new(20));
        let params = LayoutParams::default();
        let content = words(800);

        let first = paginator.paginate(&content, &params).unwrap().clone();
        let calls = paginator.metrics().measurements();
        let second = paginator.paginate(&content, &params).unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(paginator.metrics().measurements(), calls);
    }

    #[test]
    fn test_paginator_keeps_previous_pages_when_measurement_unavailable() {
        let mut paginator = Paginator::new(MockMetrics::new(20));
        let content = words(800);
        let narrow = LayoutParams::new(18.0, WidthClass::Narrow, 500);
        let before = paginator.paginate(&content, &narrow).unwrap().clone();

        paginator.metrics().set_available(false);
        let wide = LayoutParams::new(18.0, WidthClass::Wide, 500);
        let during = paginator.paginate(&content, &wide).unwrap().clone();
        assert_eq!(before, during);

        paginator.metrics().set_available(true);
        let after = paginator.paginate(&content, &wide).unwrap();
        assert!(after.page_count() < before.page_count());
    }

    #[test]
    fn test_paginator_shows_new_chapter_unsplit_until_measurable() {
        let mut paginator = Paginator::new(MockMetrics::new(20));
        paginator.metrics().set_available(false);
        let content = words(800);
        let params = LayoutParams::default();

        let result = paginator.paginate(&content, &params).unwrap();
        assert_eq!(result.strategy, Strategy::Unsplit);
        assert_eq!(result.page_count(), 1);

        paginator.metrics().set_available(true);
        let result = paginator.paginate(&content, &params).unwrap();
        assert_eq!(result.strategy, Strategy::Measured);
        assert!(result.page_count() > 1);
    }

    #[test]
    fn test_paginator_propagates_invalid_font() {
        let mut paginator = Paginator::new(MockMetrics::new(20));
        let params = LayoutParams::new(-1.0, WidthClass::Comfort, 400);
        assert!(matches!(
            paginator.paginate("text", &params),
            Err(LayoutError::InvalidFontSize(_))
        ));
    }

    trait ConcatText {
        fn concat_text(&self) -> String;
    }

    impl ConcatText for Vec<Page> {
        fn concat_text(&self) -> String {
            self.iter().map(|p| p.text.as_str()).collect()
        }
    }

    mod properties {
        use super::*;
        use crate::paginator::Strategy as PageStrategy;
        use proptest::prelude::*;
        use proptest::strategy::Strategy;

        fn word() -> impl Strategy<Value = String> {
            "[a-z]{1,12}"
        }

        fn paragraph() -> impl Strategy<Value = String> {
            prop::collection::vec(word(), 1..120).prop_map(|w| w.join(" "))
        }

        fn chapter() -> impl Strategy<Value = String> {
            prop::collection::vec(paragraph(), 1..8).prop_map(|p| p.join("\n\n"))
        }

        fn width_class() -> impl Strategy<Value = WidthClass> {
            prop_oneof![
                Just(WidthClass::Narrow),
                Just(WidthClass::Comfort),
                Just(WidthClass::Wide),
            ]
        }

        proptest! {
            #[test]
            fn keeps_every_word_in_order(
                content in chapter(),
                chars_per_line in 15usize..60,
                class in width_class(),
            ) {
                let metrics = MockMetrics::new(chars_per_line);
                let params = LayoutParams::new(16.0, class, 2000);
                let result = paginate(&content, &params, &metrics).unwrap();

                let expected: Vec<&str> = content.split_whitespace().collect();
                let actual: Vec<String> = all_words(&result);
                prop_assert_eq!(actual, expected);
                prop_assert!(result.reconstruct().len() * 10 >= content.len() * 9);
            }

            #[test]
            fn pages_stay_within_line_limit(
                content in chapter(),
                chars_per_line in 15usize..60,
                class in width_class(),
            ) {
                let metrics = MockMetrics::new(chars_per_line);
                let params = LayoutParams::new(16.0, class, 2000);
                let result = paginate(&content, &params, &metrics).unwrap();
                prop_assert_eq!(result.strategy, PageStrategy::Measured);

                for page in &result.pages {
                    let paragraphs: Vec<&str> = page.text.split(PARAGRAPH_SEPARATOR).collect();
                    prop_assert!(metrics.count_lines(&paragraphs) <= class.max_lines());
                    prop_assert_eq!(&content[page.byte_range.clone()], page.text.as_str());
                }
            }

            #[test]
            fn same_input_same_pages(content in chapter(), font in 12.0f32..24.0) {
                let metrics = EstimatedMetrics::new();
                let params = LayoutParams::new(font, WidthClass::Comfort, 640);
                let first = paginate(&content, &params, &metrics).unwrap();
                let second = paginate(&content, &params, &metrics).unwrap();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn narrower_container_never_reduces_pages(
                content in chapter(),
                font in 10.0f32..24.0,
                width in 500u32..1200,
                shrink in 0u32..200,
            ) {
                let metrics = EstimatedMetrics::new();
                let wide = LayoutParams::new(font, WidthClass::Comfort, width);
                let narrow = LayoutParams::new(font, WidthClass::Comfort, width - shrink);
                let wide_pages = paginate(&content, &wide, &metrics).unwrap().page_count();
                let narrow_pages = paginate(&content, &narrow, &metrics).unwrap().page_count();
                prop_assert!(narrow_pages >= wide_pages);
            }

            #[test]
            fn larger_font_never_reduces_pages(
                content in chapter(),
                font in 10.0f32..20.0,
                grow in 0.0f32..4.0,
            ) {
                let metrics = EstimatedMetrics::new();
                let small = LayoutParams::new(font, WidthClass::Narrow, 800);
                let large = LayoutParams::new(font + grow, WidthClass::Narrow, 800);
                let small_pages = paginate(&content, &small, &metrics).unwrap().page_count();
                let large_pages = paginate(&content, &large, &metrics).unwrap().page_count();
                prop_assert!(large_pages >= small_pages);
            }
        }
    }
}
