//! Segment building: from the filing model to a flat layout sequence.

use crate::model::{Filing, FontSpec, FontWeight, Section, Segment, TextSegment};
use crate::parser::{is_all_caps, is_exhibit_reference, scan_title_blocks, ScanItem};

use super::wrap::{wrap_text, TextMeasure};

/// Body point size for header content and section bodies.
const BODY_SIZE: f32 = 10.0;

/// Body and heading point size inside subsections.
const SUBSECTION_SIZE: f32 = 9.0;

/// Builds the ordered segment sequence for a filing.
///
/// Walks the header and each section body through the title-block scanner,
/// interleaving forced title blocks and delimiter rules with wrapped text.
/// Content is flushed at clearly defined points (title block, delimiter,
/// end of body) by a pure function; there is no shared accumulator state
/// between flushes.
pub struct SegmentBuilder<'a> {
    measure: &'a dyn TextMeasure,
    max_width: f32,
}

impl<'a> SegmentBuilder<'a> {
    /// Create a builder wrapping at `max_width` under `measure`.
    pub fn new(measure: &'a dyn TextMeasure, max_width: f32) -> Self {
        Self { measure, max_width }
    }

    /// Build the full segment sequence: header content, then every section
    /// preceded by one blank line and its centered heading.
    pub fn build(&self, filing: &Filing) -> Vec<Segment> {
        let mut segments = Vec::new();

        let header_font = FontSpec::regular(BODY_SIZE);
        let header_lines: Vec<&str> = filing.header.content.lines().collect();
        self.emit_scanned(&header_lines, header_font, &mut segments);

        for (key, section) in &filing.sections {
            self.emit_section(key, section, &mut segments);
        }

        log::debug!("built {} segments", segments.len());
        segments
    }

    /// Emit one section: leading blank, centered heading, scanned body.
    fn emit_section(&self, key: &str, section: &Section, segments: &mut Vec<Segment>) {
        let is_sub = section.style.is_subsection();
        let body_font = if is_sub {
            FontSpec::regular(SUBSECTION_SIZE)
        } else {
            FontSpec::regular(BODY_SIZE)
        };
        // Exhibit-reference headings are bold at body size even when the
        // key classifies as a subsection.
        let heading_font = if is_exhibit_reference(key) {
            FontSpec::bold(BODY_SIZE)
        } else if is_sub {
            FontSpec::regular(SUBSECTION_SIZE)
        } else {
            FontSpec::bold(BODY_SIZE)
        };

        segments.push(Segment::Blank { font: body_font });

        for line in wrap_text(self.measure, key, &heading_font, self.max_width) {
            segments.push(Segment::Text(TextSegment {
                text: line.text,
                font: heading_font,
                alignment: crate::model::Alignment::Center,
                is_heading: !is_sub,
                is_subheading: is_sub,
            }));
        }

        let body_lines: Vec<&str> = section.body.lines().collect();
        self.emit_scanned(&body_lines, body_font, segments);
    }

    /// Scan a line range and emit title blocks, delimiters, and buffered
    /// content in order. Buffered content is flushed through
    /// [`Self::emit_content`] at each structural boundary.
    fn emit_scanned(&self, lines: &[&str], body_font: FontSpec, segments: &mut Vec<Segment>) {
        let mut buffer: Vec<&str> = Vec::new();
        for item in scan_title_blocks(lines) {
            match item {
                ScanItem::TitleBlock(block_lines) => {
                    segments.extend(self.emit_content(&buffer, body_font));
                    buffer.clear();
                    segments.push(Segment::TitleBlock {
                        lines: block_lines.iter().map(|l| l.trim().to_string()).collect(),
                    });
                }
                ScanItem::Delimiter(_) => {
                    segments.extend(self.emit_content(&buffer, body_font));
                    buffer.clear();
                    segments.push(Segment::Delimiter {
                        size: body_font.size,
                    });
                }
                ScanItem::Line(line) => buffer.push(line),
            }
        }
        segments.extend(self.emit_content(&buffer, body_font));
    }

    /// Convert buffered ordinary lines into segments.
    ///
    /// Blank lines become one blank segment each. ALL-CAPS lines wrap
    /// centered, everything else left; exhibit references render bold
    /// regardless of case. Pure: the buffer is read, never mutated.
    fn emit_content(&self, buffer: &[&str], body_font: FontSpec) -> Vec<Segment> {
        let mut out = Vec::new();
        for line in buffer {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                out.push(Segment::Blank { font: body_font });
                continue;
            }
            let alignment = if is_all_caps(trimmed) {
                crate::model::Alignment::Center
            } else {
                crate::model::Alignment::Left
            };
            let font = if is_exhibit_reference(trimmed) {
                FontSpec {
                    weight: FontWeight::Bold,
                    ..body_font
                }
            } else {
                body_font
            };
            for wrapped in wrap_text(self.measure, trimmed, &font, self.max_width) {
                out.push(Segment::Text(TextSegment {
                    text: wrapped.text,
                    font,
                    alignment,
                    is_heading: false,
                    is_subheading: false,
                }));
            }
        }
        out
    }
}
