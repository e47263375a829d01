//! Table-of-contents derivation from recorded heading coordinates.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::model::FontSpec;
use crate::parser::is_exhibit_reference;

use super::paginate::{HeadingCoordinate, PageMetrics};
use super::wrap::{wrap_text, TextMeasure};

/// Drop headings that fall inside the exhibit body region.
///
/// The first exhibit reference opens a suppression window: every heading
/// after it is dropped until one whose trimmed text equals
/// `SPECIAL EXHIBITS` (case-insensitive). That heading is kept and closes
/// the window for good; everything after it passes through unchanged,
/// later exhibit references included.
pub fn filter_for_toc(headings: &[HeadingCoordinate]) -> Vec<HeadingCoordinate> {
    let mut kept = Vec::with_capacity(headings.len());
    let mut found_exhibit = false;
    let mut in_special = false;
    for heading in headings {
        if in_special {
            kept.push(heading.clone());
            continue;
        }
        if found_exhibit {
            if heading.text.trim().eq_ignore_ascii_case("SPECIAL EXHIBITS") {
                in_special = true;
                kept.push(heading.clone());
            }
            continue;
        }
        kept.push(heading.clone());
        if is_exhibit_reference(&heading.text) {
            found_exhibit = true;
        }
    }
    kept
}

/// One wrapped line of a table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// The line text
    pub text: String,

    /// Page the heading landed on
    pub page: u32,

    /// Line within that page; `None` on continuation lines
    pub line: Option<u32>,

    /// Font for this line
    pub font: FontSpec,

    /// Whether this line starts a new entry
    pub is_entry_start: bool,
}

impl TocEntry {
    /// The right-aligned page locator, absent on continuation lines.
    pub fn label(&self) -> Option<String> {
        self.line.map(|line| format!("{}:{}", self.page, line))
    }
}

/// The packed table of contents: entry lines and their page ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TocLayout {
    /// Entry lines in order
    pub entries: Vec<TocEntry>,

    /// Half-open entry ranges, one per index page
    pub pages: Vec<Range<usize>>,
}

impl TocLayout {
    /// Number of index pages.
    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Point size of a section entry line.
const ENTRY_SIZE: f32 = 10.0;

/// Point size of a subsection entry line.
const SUB_ENTRY_SIZE: f32 = 9.0;

/// Build the table of contents from already-filtered headings.
///
/// Each heading wraps to the index column width in its entry font, bold
/// for sections and regular at the reduced size for subsections. Only the
/// first wrapped line carries the page locator. Entry lines pack strictly
/// in order, filling each index page to capacity; a wrapped entry may
/// split across an index-page boundary.
pub fn build_toc<M: TextMeasure + ?Sized>(
    measure: &M,
    headings: &[HeadingCoordinate],
    metrics: &PageMetrics,
) -> TocLayout {
    let width = metrics.toc_entry_width();
    let per_page = metrics.toc_lines_per_page().max(1);

    let mut entries: Vec<TocEntry> = Vec::new();
    let mut pages: Vec<Range<usize>> = Vec::new();
    let mut page_start = 0usize;
    let mut lines_used = 0usize;

    for heading in headings {
        let font = if heading.is_subheading {
            FontSpec::regular(SUB_ENTRY_SIZE)
        } else {
            FontSpec::bold(ENTRY_SIZE)
        };
        let wrapped = wrap_text(measure, &heading.text, &font, width);

        for (i, line) in wrapped.into_iter().enumerate() {
            if lines_used == per_page {
                pages.push(page_start..entries.len());
                page_start = entries.len();
                lines_used = 0;
            }
            entries.push(TocEntry {
                text: line.text,
                page: heading.page,
                line: (i == 0).then_some(heading.line),
                font,
                is_entry_start: i == 0,
            });
            lines_used += 1;
        }
    }
    if lines_used > 0 {
        pages.push(page_start..entries.len());
    }

    log::debug!(
        "index of {} entry lines over {} pages",
        entries.len(),
        pages.len()
    );
    TocLayout { entries, pages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CharCellMeasure;

    fn coord(text: &str, page: u32, line: u32, sub: bool) -> HeadingCoordinate {
        HeadingCoordinate {
            text: text.to_string(),
            page,
            line,
            is_subheading: sub,
        }
    }

    #[test]
    fn test_filter_suppresses_after_exhibit_reference() {
        let headings = vec![
            coord("I. Intro", 1, 1, false),
            coord("EXHIBIT 1: Photo", 2, 1, false),
            coord("II. Random", 2, 5, false),
            coord("SPECIAL EXHIBITS", 3, 1, false),
            coord("III. Ledger", 3, 4, false),
        ];
        let kept = filter_for_toc(&headings);
        let texts: Vec<&str> = kept.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "I. Intro",
                "EXHIBIT 1: Photo",
                "SPECIAL EXHIBITS",
                "III. Ledger",
            ]
        );
    }

    #[test]
    fn test_filter_never_suppresses_after_special_exhibits() {
        let headings = vec![
            coord("I. Intro", 1, 1, false),
            coord("EXHIBIT 1: Photo", 2, 1, false),
            coord("II. Random", 2, 5, false),
            coord("SPECIAL EXHIBITS", 3, 1, false),
            coord("EXHIBIT 2: Ledger", 3, 4, false),
            coord("III. Closing", 4, 1, false),
        ];
        let kept = filter_for_toc(&headings);
        let texts: Vec<&str> = kept.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "I. Intro",
                "EXHIBIT 1: Photo",
                "SPECIAL EXHIBITS",
                "EXHIBIT 2: Ledger",
                "III. Closing",
            ]
        );
    }

    #[test]
    fn test_filter_without_exhibits_keeps_everything() {
        let headings = vec![coord("I. One", 1, 1, false), coord("II. Two", 1, 5, false)];
        assert_eq!(filter_for_toc(&headings).len(), 2);
    }

    #[test]
    fn test_special_exhibits_matches_case_insensitively() {
        let headings = vec![
            coord("EXHIBIT 2: Map", 1, 1, false),
            coord("dropped", 1, 2, false),
            coord("  special exhibits  ", 2, 1, false),
        ];
        let kept = filter_for_toc(&headings);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].text, "  special exhibits  ");
    }

    #[test]
    fn test_entry_fonts_and_labels() {
        let headings = vec![
            coord("I INTRODUCTION", 2, 3, false),
            coord("1.2.3 Deep claim", 4, 10, true),
        ];
        let toc = build_toc(&CharCellMeasure::new(), &headings, &PageMetrics::letter());
        assert_eq!(toc.entries.len(), 2);

        let section = &toc.entries[0];
        assert_eq!(section.font, FontSpec::bold(10.0));
        assert_eq!(section.label().as_deref(), Some("2:3"));
        assert!(section.is_entry_start);

        let sub = &toc.entries[1];
        assert_eq!(sub.font, FontSpec::regular(9.0));
        assert_eq!(sub.label().as_deref(), Some("4:10"));
    }

    #[test]
    fn test_continuation_lines_have_no_label() {
        // 432pt at 5pt cells is 86 chars; a long heading wraps.
        let long = "A ".repeat(80) + "END";
        let headings = vec![coord(&long, 1, 1, false)];
        let toc = build_toc(&CharCellMeasure::new(), &headings, &PageMetrics::letter());
        assert!(toc.entries.len() > 1);
        assert!(toc.entries[0].is_entry_start);
        assert!(toc.entries[0].label().is_some());
        for cont in &toc.entries[1..] {
            assert!(!cont.is_entry_start);
            assert!(cont.label().is_none());
        }
    }

    #[test]
    fn test_packs_into_index_pages() {
        let headings: Vec<HeadingCoordinate> = (0..40)
            .map(|i| coord(&format!("H{}", i), 1, i + 1, false))
            .collect();
        let toc = build_toc(&CharCellMeasure::new(), &headings, &PageMetrics::letter());
        assert_eq!(toc.total_pages(), 2);
        assert_eq!(toc.pages[0], 0..32);
        assert_eq!(toc.pages[1], 32..40);
    }

    #[test]
    fn test_wrapped_entry_splits_across_index_pages() {
        let mut headings: Vec<HeadingCoordinate> = (0..31)
            .map(|i| coord(&format!("H{}", i), 1, i + 1, false))
            .collect();
        // 432pt at 5pt cells is 86 chars; this entry wraps to two lines.
        let long = "A ".repeat(80) + "END";
        headings.push(coord(&long, 2, 1, false));

        let toc = build_toc(&CharCellMeasure::new(), &headings, &PageMetrics::letter());
        assert_eq!(toc.entries.len(), 33);
        // The first wrapped line fills page 1; the continuation opens page 2.
        assert_eq!(toc.pages[0], 0..32);
        assert_eq!(toc.pages[1], 32..33);
        assert!(toc.entries[31].is_entry_start);
        assert!(!toc.entries[32].is_entry_start);
    }

    #[test]
    fn test_empty_headings_empty_index() {
        let toc = build_toc(&CharCellMeasure::new(), &[], &PageMetrics::letter());
        assert!(toc.is_empty());
        assert_eq!(toc.total_pages(), 0);
    }
}
