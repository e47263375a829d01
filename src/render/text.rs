//! Plain-text proof-sheet rendering of a page plan.
//!
//! The proof sheet reproduces the printed filing in fixed-width
//! characters: a caption and rule on each body page, gutter line numbers
//! running across the whole document, boxed title pages, and `Page X of N`
//! footers. It is the character-only stand-in for a byte-level page
//! renderer and shares all placement decisions with the paginator.

use crate::error::{Error, Result};
use crate::layout::{PagePlan, TocLayout};
use crate::model::{Alignment, Filing, Segment};

/// Narrowest usable text column in characters.
const MIN_COLUMN: usize = 10;

/// Options for proof-sheet rendering.
#[derive(Debug, Clone)]
pub struct TextRenderOptions {
    /// Total sheet width in characters
    pub sheet_width: usize,

    /// Characters reserved for the gutter line number
    pub gutter_width: usize,

    /// Append the index pages after the body pages
    pub include_index: bool,
}

impl TextRenderOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sheet width in characters.
    pub fn with_sheet_width(mut self, width: usize) -> Self {
        self.sheet_width = width;
        self
    }

    /// Set the gutter width in characters.
    pub fn with_gutter_width(mut self, width: usize) -> Self {
        self.gutter_width = width;
        self
    }

    /// Enable or disable the appended index.
    pub fn with_index(mut self, include: bool) -> Self {
        self.include_index = include;
        self
    }

    /// Character width left for segment content.
    fn column_width(&self) -> usize {
        self.sheet_width.saturating_sub(self.gutter_width + 1)
    }
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self {
            sheet_width: 96,
            gutter_width: 4,
            include_index: true,
        }
    }
}

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

/// Render the body pages of a plan as a proof sheet.
///
/// Gutter numbers count every placed non-title-block segment across the
/// whole document; title pages carry no gutter numbers. Each page ends
/// with a centered `Page X of N` footer.
pub fn render_plan(
    filing: &Filing,
    segments: &[Segment],
    plan: &PagePlan,
    options: &TextRenderOptions,
) -> Result<String> {
    let column = options.column_width();
    if column < MIN_COLUMN {
        return Err(Error::Render(format!(
            "sheet width {} leaves a column under {} characters",
            options.sheet_width, MIN_COLUMN
        )));
    }

    let caption = filing.metadata.caption();
    let has_caption =
        !filing.metadata.firm_name.is_empty() || !filing.metadata.case_name.is_empty();

    let mut out: Vec<String> = Vec::new();
    let mut gutter = 0u32;

    for page in &plan.pages {
        if page.is_title_page {
            render_title_page(segments, page.range.clone(), options, &mut out)?;
        } else {
            if has_caption {
                out.push(caption.clone());
            }
            out.push("=".repeat(options.sheet_width));
            for segment in &segments[page.range.clone()] {
                gutter += 1;
                let number = format!("{:>width$} ", gutter, width = options.gutter_width);
                let body = match segment {
                    Segment::Text(t) => match t.alignment {
                        Alignment::Center => centered(&t.text, column),
                        Alignment::Left => t.text.clone(),
                    },
                    Segment::Blank { .. } => String::new(),
                    Segment::Delimiter { .. } => "-".repeat(column),
                    Segment::TitleBlock { .. } => {
                        return Err(Error::Render(
                            "title block placed on a shared page".to_string(),
                        ))
                    }
                };
                out.push(format!("{}{}", number, body).trim_end().to_string());
            }
        }
        out.push(centered(
            &format!("Page {} of {}", page.number, plan.total_pages),
            options.sheet_width,
        ));
        out.push(String::new());
    }

    Ok(out.join("\n"))
}

/// A title page is a border box holding the block's centered lines.
fn render_title_page(
    segments: &[Segment],
    range: std::ops::Range<usize>,
    options: &TextRenderOptions,
    out: &mut Vec<String>,
) -> Result<()> {
    let inner = options.sheet_width.saturating_sub(2);
    let lines = match segments.get(range.start) {
        Some(Segment::TitleBlock { lines }) => lines,
        _ => {
            return Err(Error::Render(
                "title page does not start with a title block".to_string(),
            ))
        }
    };

    let border = format!("+{}+", "-".repeat(inner));
    out.push(border.clone());
    if lines.is_empty() {
        out.push(format!("|{}|", " ".repeat(inner)));
    }
    for line in lines {
        let mut row = centered(line, inner);
        let pad = inner.saturating_sub(row.chars().count());
        row.push_str(&" ".repeat(pad));
        out.push(format!("|{}|", row));
    }
    out.push(border);
    Ok(())
}

/// Render the index pages: entry text left, `page:line` label right.
pub fn render_index(toc: &TocLayout, options: &TextRenderOptions) -> Result<String> {
    if options.sheet_width < MIN_COLUMN {
        return Err(Error::Render(format!(
            "sheet width {} is under {} characters",
            options.sheet_width, MIN_COLUMN
        )));
    }

    let total = toc.total_pages();
    let mut out: Vec<String> = Vec::new();
    for (i, range) in toc.pages.iter().enumerate() {
        out.push(centered("INDEX", options.sheet_width));
        out.push("=".repeat(options.sheet_width));
        for entry in &toc.entries[range.clone()] {
            match entry.label() {
                Some(label) => {
                    let used = entry.text.chars().count() + label.chars().count();
                    let pad = options.sheet_width.saturating_sub(used).max(1);
                    out.push(format!("{}{}{}", entry.text, " ".repeat(pad), label));
                }
                None => out.push(entry.text.clone()),
            }
        }
        out.push(centered(
            &format!("Index Page {} of {}", i + 1, total),
            options.sheet_width,
        ));
        out.push(String::new());
    }

    Ok(out.join("\n"))
}

/// Render body pages and, when enabled and non-empty, the index after them.
pub fn to_proof_sheet(
    filing: &Filing,
    segments: &[Segment],
    plan: &PagePlan,
    toc: &TocLayout,
    options: &TextRenderOptions,
) -> Result<String> {
    let mut output = render_plan(filing, segments, plan, options)?;
    if options.include_index && !toc.is_empty() {
        output.push('\n');
        output.push_str(&render_index(toc, options)?);
    }
    Ok(output.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CharCellMeasure, PageMetrics, Paginator, SegmentBuilder, TocEntry};
    use crate::model::FontSpec;
    use crate::parser::FilingParser;

    fn fixture() -> (Filing, Vec<Segment>, PagePlan) {
        let filing = FilingParser::new()
            .with_firm_name("PDFSage Inc.")
            .with_case_name("Doe v. Roe")
            .parse("counsel of record\nI. INTRODUCTION\nWe allege the following.");
        let measure = CharCellMeasure::new();
        let segments = SegmentBuilder::new(&measure, 10_000.0).build(&filing);
        let plan = Paginator::new(PageMetrics::letter()).plan(&segments).unwrap();
        (filing, segments, plan)
    }

    #[test]
    fn test_render_plan_basics() {
        let (filing, segments, plan) = fixture();
        let sheet = render_plan(&filing, &segments, &plan, &TextRenderOptions::new()).unwrap();

        assert!(sheet.contains("PDFSage Inc. | Doe v. Roe"));
        assert!(sheet.contains("I INTRODUCTION"));
        assert!(sheet.contains("Page 1 of 1"));
        // First placed line carries gutter number 1.
        assert!(sheet.lines().any(|l| l.starts_with("   1 ")));
    }

    #[test]
    fn test_gutter_numbers_run_across_pages() {
        let raw = (0..40).map(|i| format!("line {}", i)).collect::<Vec<_>>();
        let mut f = Filing::new();
        f.header = crate::model::Header::new(raw.join("\n"));
        let measure = CharCellMeasure::new();
        let segments = SegmentBuilder::new(&measure, 10_000.0).build(&f);
        let plan = Paginator::new(PageMetrics::letter()).plan(&segments).unwrap();
        assert_eq!(plan.total_pages, 2);

        let sheet = render_plan(&f, &segments, &plan, &TextRenderOptions::new()).unwrap();
        // Line 37 is the first line of page 2, numbered continuously.
        assert!(sheet.lines().any(|l| l.starts_with("  37 line 36")));
        assert!(sheet.contains("Page 2 of 2"));
    }

    #[test]
    fn test_title_page_is_boxed_and_unnumbered() {
        let filing = FilingParser::new().parse("before\n=====\nIn re Doe\n=====\nafter");
        let measure = CharCellMeasure::new();
        let segments = SegmentBuilder::new(&measure, 10_000.0).build(&filing);
        let plan = Paginator::new(PageMetrics::letter()).plan(&segments).unwrap();

        let sheet = render_plan(&filing, &segments, &plan, &TextRenderOptions::new()).unwrap();
        assert!(sheet.contains("In re Doe"));
        assert!(sheet.contains("+---"));
        let boxed = sheet
            .lines()
            .find(|l| l.contains("In re Doe"))
            .unwrap();
        assert!(boxed.starts_with('|') && boxed.ends_with('|'));
    }

    #[test]
    fn test_narrow_sheet_is_an_error() {
        let (filing, segments, plan) = fixture();
        let options = TextRenderOptions::new().with_sheet_width(8);
        assert!(render_plan(&filing, &segments, &plan, &options).is_err());
    }

    #[test]
    fn test_render_index_labels_right_aligned() {
        let toc = TocLayout {
            entries: vec![TocEntry {
                text: "I INTRODUCTION".to_string(),
                page: 2,
                line: Some(14),
                font: FontSpec::bold(10.0),
                is_entry_start: true,
            }],
            pages: vec![0..1],
        };
        let options = TextRenderOptions::new().with_sheet_width(40);
        let sheet = render_index(&toc, &options).unwrap();
        let entry = sheet
            .lines()
            .find(|l| l.starts_with("I INTRODUCTION"))
            .unwrap();
        assert_eq!(entry.chars().count(), 40);
        assert!(entry.ends_with("2:14"));
        assert!(sheet.contains("Index Page 1 of 1"));
    }

    #[test]
    fn test_proof_sheet_appends_index() {
        let (filing, segments, plan) = fixture();
        let measure = CharCellMeasure::new();
        let toc = crate::layout::build_toc(&measure, &plan.headings, &PageMetrics::letter());
        let sheet =
            to_proof_sheet(&filing, &segments, &plan, &toc, &TextRenderOptions::new()).unwrap();
        assert!(sheet.contains("INDEX"));
        assert!(sheet.contains("Page 1 of 1"));
    }
}
