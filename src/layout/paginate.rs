//! Page geometry and the two-phase paginator.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Segment;

/// Page geometry in points, US Letter by default.
///
/// All derived quantities (line budget, column width) are computed from
/// these fields so that a single adjustment, say a looser line spacing,
/// propagates consistently through pagination and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Page width
    pub page_width: f32,

    /// Page height
    pub page_height: f32,

    /// Top margin
    pub margin_top: f32,

    /// Bottom margin
    pub margin_bottom: f32,

    /// Right margin
    pub margin_right: f32,

    /// Left edge of the text column, past the firm rule and gutter numbers
    pub text_offset_left: f32,

    /// Clearance kept between the text column and the right margin
    pub text_inset_right: f32,

    /// Baseline-to-baseline line spacing
    pub line_spacing: f32,
}

/// Horizontal margin on each side of a table-of-contents entry.
const TOC_SIDE_MARGINS: f32 = 180.0;

/// Vertical space reserved for the index title and footer.
const TOC_RESERVED_HEIGHT: f32 = 216.0;

impl PageMetrics {
    /// US Letter at quarter-inch line spacing.
    pub fn letter() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_right: 36.0,
            text_offset_left: 86.4,
            text_inset_right: 14.4,
            line_spacing: 18.0,
        }
    }

    /// Override the line spacing.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Text lines that fit between the margins at the current spacing.
    pub fn max_lines_per_page(&self) -> usize {
        let usable = self.page_height - self.margin_top - self.margin_bottom;
        (usable / self.line_spacing).floor() as usize
    }

    /// Width available to wrapped body text.
    pub fn max_text_width(&self) -> f32 {
        self.page_width - self.margin_right - self.text_offset_left - self.text_inset_right
    }

    /// Width available to a table-of-contents entry.
    pub fn toc_entry_width(&self) -> f32 {
        self.page_width - TOC_SIDE_MARGINS
    }

    /// Entry lines that fit on one table-of-contents page.
    pub fn toc_lines_per_page(&self) -> usize {
        let usable = self.page_height - TOC_RESERVED_HEIGHT;
        (usable / self.line_spacing).floor() as usize
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::letter()
    }
}

/// One planned page: a half-open range into the segment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: u32,

    /// Segment indices placed on this page
    pub range: Range<usize>,

    /// Whether the page is owned by a single title block
    pub is_title_page: bool,
}

/// Where a heading line landed: 1-based page and document-wide line.
///
/// The line number is the gutter number printed beside the heading, a
/// running count over every placed line in the document, not a page-local
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCoordinate {
    /// Heading text as placed (one wrapped line)
    pub text: String,

    /// 1-based page number
    pub page: u32,

    /// 1-based document-wide line number
    pub line: u32,

    /// Whether the heading is a subsection heading
    pub is_subheading: bool,
}

/// The complete pagination result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagePlan {
    /// Planned pages in order
    pub pages: Vec<Page>,

    /// Heading coordinates in placement order
    pub headings: Vec<HeadingCoordinate>,

    /// Total page count, equal to `pages.len()`
    pub total_pages: u32,
}

impl PagePlan {
    /// Check whether no pages were produced.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Packs segments onto fixed-height pages.
///
/// Pagination runs as two phases over the same placement routine: an
/// estimating pass that only counts pages, and a recording pass that also
/// captures heading coordinates. Both phases place segments identically,
/// so the estimate always matches the recorded plan.
#[derive(Debug, Clone)]
pub struct Paginator {
    metrics: PageMetrics,
}

impl Paginator {
    /// Create a paginator over the given geometry.
    pub fn new(metrics: PageMetrics) -> Self {
        Self { metrics }
    }

    /// The geometry this paginator places against.
    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    /// Phase one: total page count without recording coordinates.
    pub fn estimate(&self, segments: &[Segment]) -> Result<u32> {
        let (pages, _) = self.place(segments, false)?;
        Ok(pages.len() as u32)
    }

    /// Phase two: full plan with heading coordinates.
    pub fn plan(&self, segments: &[Segment]) -> Result<PagePlan> {
        let (pages, headings) = self.place(segments, true)?;
        let total_pages = pages.len() as u32;
        log::debug!(
            "planned {} pages, {} headings",
            total_pages,
            headings.len()
        );
        Ok(PagePlan {
            pages,
            headings,
            total_pages,
        })
    }

    /// Shared placement routine behind both phases.
    ///
    /// A title block closes the current page if it holds anything, then
    /// takes a whole page for itself. Every other segment occupies one line;
    /// a full page closes before the next line is placed. No segment is
    /// ever split across pages.
    fn place(
        &self,
        segments: &[Segment],
        record: bool,
    ) -> Result<(Vec<Page>, Vec<HeadingCoordinate>)> {
        let max_lines = self.metrics.max_lines_per_page();
        if max_lines == 0 {
            return Err(Error::Layout(format!(
                "line spacing {} leaves no room between margins",
                self.metrics.line_spacing
            )));
        }

        let mut pages: Vec<Page> = Vec::new();
        let mut headings: Vec<HeadingCoordinate> = Vec::new();
        let mut page_start = 0usize;
        let mut lines_used = 0usize;
        let mut doc_line = 0u32;

        let close = |pages: &mut Vec<Page>, start: usize, end: usize, title: bool| {
            pages.push(Page {
                number: pages.len() as u32 + 1,
                range: start..end,
                is_title_page: title,
            });
        };

        for (idx, segment) in segments.iter().enumerate() {
            if segment.forces_page_break() {
                if lines_used > 0 {
                    close(&mut pages, page_start, idx, false);
                }
                close(&mut pages, idx, idx + 1, true);
                page_start = idx + 1;
                lines_used = 0;
                continue;
            }

            if lines_used == max_lines {
                close(&mut pages, page_start, idx, false);
                page_start = idx;
                lines_used = 0;
            }

            doc_line += 1;
            if record {
                if let Some((text, is_subheading)) = segment.heading() {
                    headings.push(HeadingCoordinate {
                        text: text.to_string(),
                        page: pages.len() as u32 + 1,
                        line: doc_line,
                        is_subheading,
                    });
                }
            }
            lines_used += 1;
        }
        if lines_used > 0 {
            close(&mut pages, page_start, segments.len(), false);
        }

        Ok((pages, headings))
    }
}
