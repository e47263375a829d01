//! Filing-level types.

use super::{Exhibit, Section, SubDocument};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed legal filing.
///
/// Built once by the structural parser and immutable afterwards. Section
/// keys are unique at the moment of insertion: a later heading with an
/// already-seen key replaces the earlier body but keeps the original
/// position in the map. That overwrite is intentional, observed behavior of
/// the filing format, not a defect to repair here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filing {
    /// Filing metadata (firm, case, court, dates)
    pub metadata: Metadata,

    /// Free-text header preceding the first section heading
    pub header: Header,

    /// Ordered sections keyed by normalized heading
    pub sections: IndexMap<String, Section>,

    /// Exhibits renumbered 1..N in ascending source-number order
    pub exhibits: Vec<Exhibit>,

    /// Sub-documents found between delimiter rule pairs
    pub documents: Vec<SubDocument>,
}

impl Filing {
    /// Create a new empty filing.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            header: Header::default(),
            sections: IndexMap::new(),
            exhibits: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Number of sections (subsections included).
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check whether the filing holds no sections and no header text.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.header.content.trim().is_empty()
    }

    /// Attach image paths to exhibits positionally, in renumbered order.
    ///
    /// The first path goes to exhibit 1, the second to exhibit 2, and so
    /// on; surplus paths are ignored.
    pub fn attach_exhibit_images<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (exhibit, path) in self.exhibits.iter_mut().zip(paths) {
            exhibit.image_path = Some(path.into());
        }
    }

    /// Plain text of the whole filing: header, then each heading and body.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::with_capacity(1 + self.sections.len());
        if !self.header.content.trim().is_empty() {
            parts.push(self.header.content.clone());
        }
        for (key, section) in &self.sections {
            parts.push(format!("{}\n{}", key, section.body));
        }
        parts.join("\n\n")
    }
}

impl Default for Filing {
    fn default() -> Self {
        Self::new()
    }
}

/// The free-text header region above the first section heading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Header {
    /// Verbatim newline-joined header lines
    pub content: String,

    /// Ordered named fields attached to the header (title, court, ...)
    pub fields: IndexMap<String, String>,
}

impl Header {
    /// Create a header from its content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            fields: IndexMap::new(),
        }
    }

    /// Set a named field, keeping insertion order on first write.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Header lines, split on newlines.
    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }
}

/// Filing metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Law firm name printed on the vertical rule
    pub firm_name: String,

    /// Case name printed in the page caption
    pub case_name: String,

    /// Document title
    pub title: Option<String>,

    /// Court of filing
    pub court: Option<String>,

    /// Filing date
    pub date_filed: Option<NaiveDate>,

    /// Case numbers detected in the raw text
    pub detected_case_numbers: Vec<String>,
}

impl Metadata {
    /// Create metadata with firm and case names.
    pub fn new(firm_name: impl Into<String>, case_name: impl Into<String>) -> Self {
        Self {
            firm_name: firm_name.into(),
            case_name: case_name.into(),
            ..Default::default()
        }
    }

    /// The "FIRM | CASE" caption line for page headers.
    pub fn caption(&self) -> String {
        format!("{} | {}", self.firm_name, self.case_name)
    }
}
