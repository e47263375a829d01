//! Section, exhibit, and sub-document types.

use serde::{Deserialize, Serialize};

/// Heading classification for a section key.
///
/// Derived from the dot count of the key's leading number token: more than
/// one dot means a subsection ("1.2.3"), anything else is a section. Keys
/// without a number token classify as sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    /// Top- or second-level heading (bold, body size)
    #[default]
    Section,
    /// Third-level or deeper heading (plain, reduced size)
    Subsection,
}

impl HeadingStyle {
    /// Classify a section key by its leading number token.
    ///
    /// The token is everything before the first whitespace; a key with no
    /// whitespace is treated as being all number token. The trailing dot has
    /// already been stripped during key normalization, so "1.2" counts one
    /// dot and stays a section while "1.2.3" counts two and becomes a
    /// subsection.
    pub fn classify(key: &str) -> Self {
        let number = key.split_whitespace().next().unwrap_or(key);
        if number.matches('.').count() > 1 {
            HeadingStyle::Subsection
        } else {
            HeadingStyle::Section
        }
    }

    /// Whether this is the subsection style.
    pub fn is_subsection(&self) -> bool {
        matches!(self, HeadingStyle::Subsection)
    }
}

/// A section of the filing body.
///
/// The key is the normalized heading ("1.2 Damages", an ALL-CAPS line, or a
/// bare "4." token) and lives in the filing's ordered section map; the body
/// is the newline-joined text accumulated under that heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Newline-joined body text under the heading
    pub body: String,

    /// Heading classification
    pub style: HeadingStyle,
}

impl Section {
    /// Create a section with a body, classified from its key.
    pub fn new(key: &str, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            style: HeadingStyle::classify(key),
        }
    }

    /// Body lines, split on newlines.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines()
    }

    /// Check if the section body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// An exhibit extracted from the text after the first `EXHIBIT 1:` marker.
///
/// Numbers are a contiguous 1..N renumbering of first-seen source exhibits
/// in ascending source-number order; duplicated source numbers are dropped
/// during parsing and never reach this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exhibit {
    /// Renumbered exhibit number (1-indexed, contiguous)
    pub number: u32,

    /// Caption text accumulated under the exhibit marker
    pub caption: String,

    /// Optional path to an attached image
    pub image_path: Option<String>,
}

impl Exhibit {
    /// Create an exhibit with no image attached.
    pub fn new(number: u32, caption: impl Into<String>) -> Self {
        Self {
            number,
            caption: caption.into(),
            image_path: None,
        }
    }

    /// The printed label, e.g. "EXHIBIT 2:".
    pub fn label(&self) -> String {
        format!("EXHIBIT {}:", self.number)
    }
}

/// A content block found strictly between two delimiter rule lines.
///
/// Produced by the independent document-splitting pass; a delimiter with no
/// matching closer before end of text terminates the scan and the trailing
/// content is dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubDocument {
    /// Newline-joined content between the delimiters
    pub content: String,
}

impl SubDocument {
    /// Create a sub-document from its content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Check if the sub-document holds no visible text.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
