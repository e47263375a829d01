//! # courtpress
//!
//! Structural parsing and print layout for plain-text legal filings.
//!
//! This library reads an unstructured filing, recovers its latent
//! structure (header, numbered sections, exhibits, delimited
//! sub-documents), and lays the result out as fixed-height pages with
//! court conventions: forced title-block pages, gutter line numbers, and
//! a page:line-referenced table of contents.
//!
//! ## Quick Start
//!
//! ```
//! use courtpress::Typesetter;
//!
//! fn main() -> courtpress::Result<()> {
//!     let raw = "Law Offices of J. Doe\n\
//!                I. INTRODUCTION\n\
//!                Plaintiff alleges as follows.";
//!
//!     let sheet = Typesetter::new()
//!         .with_firm_name("Law Offices of J. Doe")
//!         .with_case_name("Doe v. Roe")
//!         .typeset(raw)?
//!         .to_proof_sheet()?;
//!     println!("{}", sheet);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Graceful parsing**: malformed structure degrades, never errors
//! - **Two-phase pagination**: page counts agree between estimate and placement
//! - **Heading coordinates**: every heading records its page and gutter line
//! - **Multiple outputs**: text proof sheet, JSON

pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::detect_case_numbers;
pub use error::{Error, Result};
pub use layout::{
    build_toc, filter_for_toc, wrap_text, CharCellMeasure, HeadingCoordinate, Page, PageMetrics,
    PagePlan, Paginator, SegmentBuilder, TextMeasure, TocEntry, TocLayout, WrappedLine,
};
pub use model::{
    Alignment, Exhibit, Filing, FontFamily, FontSpec, FontWeight, Header, HeadingStyle, Metadata,
    Section, Segment, SubDocument, TextSegment,
};
pub use parser::FilingParser;
pub use render::{to_json, JsonFormat, TextRenderOptions};

use std::path::Path;

/// Parse raw filing text into the document model.
///
/// # Example
///
/// ```
/// let filing = courtpress::parse_str("I. INTRODUCTION\nPlaintiff alleges.");
/// assert_eq!(filing.section_count(), 1);
/// ```
pub fn parse_str(raw_text: &str) -> Filing {
    FilingParser::new().parse(raw_text)
}

/// Parse a filing from a text file.
///
/// # Example
///
/// ```no_run
/// let filing = courtpress::parse_file("complaint.txt").unwrap();
/// println!("Sections: {}", filing.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Filing> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_str(&raw))
}

/// Lay out a filing file and render the proof sheet with defaults.
///
/// # Example
///
/// ```no_run
/// let sheet = courtpress::proof_sheet_file("complaint.txt").unwrap();
/// std::fs::write("complaint.proof.txt", sheet).unwrap();
/// ```
pub fn proof_sheet_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let raw = std::fs::read_to_string(path)?;
    Typesetter::new().typeset(&raw)?.to_proof_sheet()
}

/// Builder for parsing, laying out, and rendering a filing.
///
/// # Example
///
/// ```
/// use courtpress::{PageMetrics, Typesetter};
///
/// let result = Typesetter::new()
///     .with_firm_name("PDFSage Inc.")
///     .with_case_name("Doe v. Roe")
///     .with_metrics(PageMetrics::letter())
///     .typeset("I. INTRODUCTION\nPlaintiff alleges.")?;
/// assert_eq!(result.plan().total_pages, 1);
/// # Ok::<(), courtpress::Error>(())
/// ```
pub struct Typesetter {
    parser: FilingParser,
    metrics: PageMetrics,
    render_options: TextRenderOptions,
    measure: CharCellMeasure,
}

impl Typesetter {
    /// Create a typesetter with Letter geometry and default rendering.
    pub fn new() -> Self {
        Self {
            parser: FilingParser::new(),
            metrics: PageMetrics::letter(),
            render_options: TextRenderOptions::default(),
            measure: CharCellMeasure::new(),
        }
    }

    /// Set the firm name printed in the page caption.
    pub fn with_firm_name(mut self, name: impl Into<String>) -> Self {
        self.parser = self.parser.with_firm_name(name);
        self
    }

    /// Set the case name printed in the page caption.
    pub fn with_case_name(mut self, name: impl Into<String>) -> Self {
        self.parser = self.parser.with_case_name(name);
        self
    }

    /// Set the document title header field.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.parser = self.parser.with_title(title);
        self
    }

    /// Set the court header field.
    pub fn with_court(mut self, court: impl Into<String>) -> Self {
        self.parser = self.parser.with_court(court);
        self
    }

    /// Set the filing date header field.
    pub fn with_date_filed(mut self, date: chrono::NaiveDate) -> Self {
        self.parser = self.parser.with_date_filed(date);
        self
    }

    /// Attach exhibit image paths, assigned positionally after renumbering.
    pub fn with_exhibit_images<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parser = self.parser.with_exhibit_images(paths);
        self
    }

    /// Set the page geometry.
    pub fn with_metrics(mut self, metrics: PageMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the proof-sheet rendering options.
    pub fn with_render_options(mut self, options: TextRenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Parse, build segments, and paginate the raw text.
    ///
    /// Runs the estimating pass first, then the recording pass, as the
    /// renderer's footers require the total before placement output is
    /// consumed.
    pub fn typeset(self, raw_text: &str) -> Result<TypesetResult> {
        let filing = self.parser.parse(raw_text);

        let builder = SegmentBuilder::new(&self.measure, self.metrics.max_text_width());
        let segments = builder.build(&filing);

        let paginator = Paginator::new(self.metrics);
        let estimated = paginator.estimate(&segments)?;
        let plan = paginator.plan(&segments)?;
        debug_assert_eq!(estimated, plan.total_pages);
        log::debug!("typeset {} pages (estimated {})", plan.total_pages, estimated);

        let kept = filter_for_toc(&plan.headings);
        let toc = build_toc(&self.measure, &kept, &self.metrics);

        Ok(TypesetResult {
            filing,
            segments,
            plan,
            toc,
            render_options: self.render_options,
        })
    }
}

impl Default for Typesetter {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of typesetting a filing.
pub struct TypesetResult {
    /// The parsed filing
    pub filing: Filing,
    segments: Vec<Segment>,
    plan: PagePlan,
    toc: TocLayout,
    render_options: TextRenderOptions,
}

impl TypesetResult {
    /// The placed segment sequence.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The page plan with heading coordinates.
    pub fn plan(&self) -> &PagePlan {
        &self.plan
    }

    /// The table of contents.
    pub fn toc(&self) -> &TocLayout {
        &self.toc
    }

    /// Render the proof sheet (body pages plus index).
    pub fn to_proof_sheet(&self) -> Result<String> {
        render::to_proof_sheet(
            &self.filing,
            &self.segments,
            &self.plan,
            &self.toc,
            &self.render_options,
        )
    }

    /// Serialize the filing to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.filing, format)
    }

    /// Plain text of the parsed filing.
    pub fn plain_text(&self) -> String {
        self.filing.plain_text()
    }
}
