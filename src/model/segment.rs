//! Layout segment types.
//!
//! A segment is the atomic, pre-styled unit the paginator places: one
//! wrapped line of text, one blank line, one horizontal rule, or a title
//! block that always owns a whole page. Segments are derived from the
//! filing model and are immutable once built.

use serde::{Deserialize, Serialize};

/// Font family available to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// The filing face used throughout court output
    #[default]
    Helvetica,
}

/// Font weight/slant variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Regular,
    /// Bold weight
    Bold,
    /// Oblique slant (footers)
    Oblique,
}

/// A concrete font selection: family, weight, and size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font family
    pub family: FontFamily,

    /// Weight/slant variant
    pub weight: FontWeight,

    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// Regular Helvetica at the given size.
    pub fn regular(size: f32) -> Self {
        Self {
            family: FontFamily::Helvetica,
            weight: FontWeight::Regular,
            size,
        }
    }

    /// Bold Helvetica at the given size.
    pub fn bold(size: f32) -> Self {
        Self {
            family: FontFamily::Helvetica,
            weight: FontWeight::Bold,
            size,
        }
    }

    /// The PostScript name a PDF renderer would select.
    pub fn postscript_name(&self) -> &'static str {
        match self.weight {
            FontWeight::Regular => "Helvetica",
            FontWeight::Bold => "Helvetica-Bold",
            FontWeight::Oblique => "Helvetica-Oblique",
        }
    }
}

/// Horizontal alignment of a text segment within the text column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
}

/// One wrapped line of styled text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSegment {
    /// The line text (already wrapped to the column width)
    pub text: String,

    /// Font selection
    pub font: FontSpec,

    /// Horizontal alignment
    pub alignment: Alignment,

    /// Whether this line is a section heading
    pub is_heading: bool,

    /// Whether this line is a subsection heading
    pub is_subheading: bool,
}

impl TextSegment {
    /// A plain left-aligned body line.
    pub fn body(text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            text: text.into(),
            font,
            alignment: Alignment::Left,
            is_heading: false,
            is_subheading: false,
        }
    }

    /// A centered line.
    pub fn centered(text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            alignment: Alignment::Center,
            ..Self::body(text, font)
        }
    }
}

/// The atomic unit the paginator places.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// One wrapped line of text
    Text(TextSegment),

    /// A blank line at a given body size
    Blank {
        /// Font governing the blank line's height
        font: FontSpec,
    },

    /// A horizontal rule occupying one line
    Delimiter {
        /// Point size governing the rule's line height
        size: f32,
    },

    /// A bounded title block; always starts a new page and owns it entirely
    TitleBlock {
        /// Trimmed content lines between the delimiters
        lines: Vec<String>,
    },
}

impl Segment {
    /// Whether this segment forces a page break and consumes the page.
    pub fn forces_page_break(&self) -> bool {
        matches!(self, Segment::TitleBlock { .. })
    }

    /// Heading text and subheading flag, if this segment is a heading line.
    pub fn heading(&self) -> Option<(&str, bool)> {
        match self {
            Segment::Text(t) if t.is_heading || t.is_subheading => {
                Some((t.text.as_str(), t.is_subheading))
            }
            _ => None,
        }
    }

    /// Visible text of the segment, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Segment::Text(t) => Some(t.text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postscript_names() {
        assert_eq!(FontSpec::regular(10.0).postscript_name(), "Helvetica");
        assert_eq!(FontSpec::bold(10.0).postscript_name(), "Helvetica-Bold");
    }

    #[test]
    fn test_heading_accessor() {
        let mut seg = TextSegment::centered("I INTRODUCTION", FontSpec::bold(10.0));
        seg.is_heading = true;
        let seg = Segment::Text(seg);
        assert_eq!(seg.heading(), Some(("I INTRODUCTION", false)));

        let plain = Segment::Text(TextSegment::body("body", FontSpec::regular(10.0)));
        assert!(plain.heading().is_none());
    }

    #[test]
    fn test_forces_page_break() {
        let block = Segment::TitleBlock {
            lines: vec!["SUPERIOR COURT".to_string()],
        };
        assert!(block.forces_page_break());
        assert!(!Segment::Delimiter { size: 10.0 }.forces_page_break());
    }
}
