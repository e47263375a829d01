//! Structural parser: header, sections, exhibits, and sub-documents.
//!
//! The parser recognizes the latent structure inside a flat line stream.
//! Three triggers, tested in fixed priority order, open a new section:
//!
//! 1. a numbered heading (`I. Title`, `1.2. Damages`, roman or decimal),
//! 2. an ALL-CAPS line,
//! 3. a bare number token (`4.`).
//!
//! Everything before the first trigger is the filing header. No input is a
//! parse error; malformed structure degrades per the scanner rules.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::detect::detect_case_numbers;
use crate::model::{Exhibit, Filing, Header, HeadingStyle, Metadata, Section, SubDocument};

use super::scan::{is_all_caps, is_rule_of_dashes, is_rule_of_equals};

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^((?:[IVXLCDM]+\.|[0-9]+\.)+)\s+(.*)$").unwrap())
}

fn bare_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\.\s*$").unwrap())
}

fn exhibit_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*EXHIBIT\s+(\d+)\s*:\s*(.*)$").unwrap())
}

fn exhibit_one_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*EXHIBIT\s+1\s*:").unwrap())
}

/// Normalized key for a numbered heading: trailing dot stripped from the
/// number, single space, trimmed title.
fn heading_key(number: &str, title: &str) -> String {
    let number = number.trim().trim_end_matches('.');
    format!("{} {}", number, title.trim())
}

/// Flush the accumulating section body at a trigger boundary.
///
/// Joins and drains the buffer, returning the committed `(key, body)` pair
/// when a key is open. The buffer drains even with no open key; lines
/// before the first heading never surface as a section.
fn take_section(key: &mut Option<String>, body: &mut Vec<&str>) -> Option<(String, String)> {
    let content = body.join("\n");
    body.clear();
    key.take().map(|k| (k, content))
}

/// Split raw text into the header region and the ordered section map.
///
/// Pass 1 scans from the top until a line matches one of the three section
/// triggers; the preceding lines become the header content, stored
/// verbatim. Pass 2 segments the rest: each trigger commits the currently
/// accumulating body under the current key and opens a new one. Lines
/// before the first heading that are not themselves triggers are discarded
/// (a body with no key never surfaces). Re-using a key overwrites the
/// earlier body but keeps its original position in the map.
pub fn parse_header_and_sections(raw_text: &str) -> (String, IndexMap<String, String>) {
    let lines: Vec<&str> = raw_text.lines().collect();
    let mut sections: IndexMap<String, String> = IndexMap::new();

    let mut idx = 0;
    let mut header_lines: Vec<&str> = Vec::new();
    while idx < lines.len() {
        let line = lines[idx];
        let trimmed = line.trim();
        if heading_regex().is_match(line)
            || is_all_caps(trimmed)
            || bare_number_regex().is_match(trimmed)
        {
            break;
        }
        header_lines.push(line);
        idx += 1;
    }
    let header = header_lines.join("\n");

    let mut current_key: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in &lines[idx..] {
        let trimmed = line.trim();
        if let Some(caps) = heading_regex().captures(line) {
            if let Some((key, content)) = take_section(&mut current_key, &mut body) {
                sections.insert(key, content);
            }
            current_key = Some(heading_key(&caps[1], &caps[2]));
        } else if is_all_caps(trimmed) {
            if let Some((key, content)) = take_section(&mut current_key, &mut body) {
                sections.insert(key, content);
            }
            current_key = Some(trimmed.to_string());
        } else if bare_number_regex().is_match(trimmed) {
            if let Some((key, content)) = take_section(&mut current_key, &mut body) {
                sections.insert(key, content);
            }
            current_key = Some(trimmed.to_string());
        } else {
            body.push(line);
        }
    }
    if let Some((key, content)) = take_section(&mut current_key, &mut body) {
        sections.insert(key, content);
    }

    log::debug!(
        "parsed {} header lines, {} sections",
        header_lines.len(),
        sections.len()
    );
    (header, sections)
}

/// Classify every section key by the dot count of its number token.
pub fn classify_headings(sections: &IndexMap<String, String>) -> IndexMap<String, HeadingStyle> {
    sections
        .keys()
        .map(|key| (key.clone(), HeadingStyle::classify(key)))
        .collect()
}

/// Parse exhibits from the text after the first `EXHIBIT 1:` marker.
///
/// A marker line closes the previously accumulating exhibit and opens a new
/// one seeded with the marker's trailing text. Re-encountering a source
/// number that was already seen voids the new accumulator entirely: its
/// content, including the trigger line's trailing text, is discarded until
/// the next recognized marker. The surviving exhibits are renumbered 1..N
/// in ascending order of their source numbers.
pub fn parse_exhibits(raw_text: &str) -> Vec<Exhibit> {
    let mut by_source: BTreeMap<u32, String> = BTreeMap::new();
    let mut current: Option<(u32, Vec<&str>)> = None;

    for line in raw_text.lines() {
        if let Some(caps) = exhibit_marker_regex().captures(line) {
            if let Some((number, content)) = current.take() {
                by_source.entry(number).or_insert_with(|| content.join("\n"));
            }
            // Leading zeros collapse: "01" and "1" are the same exhibit.
            let number: u32 = match caps[1].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            if by_source.contains_key(&number) {
                log::debug!("duplicate exhibit {} dropped", number);
                current = None;
                continue;
            }
            let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let seed = if rest.is_empty() { vec![] } else { vec![rest] };
            current = Some((number, seed));
        } else if let Some((_, content)) = current.as_mut() {
            content.push(line);
        }
    }
    if let Some((number, content)) = current {
        by_source.entry(number).or_insert_with(|| content.join("\n"));
    }

    by_source
        .into_values()
        .enumerate()
        .map(|(i, caption)| Exhibit::new(i as u32 + 1, caption))
        .collect()
}

/// Split raw text at the first `EXHIBIT 1:` line.
///
/// Returns `(main_text, exhibit_text)` where the exhibit text begins with
/// the marker line itself. With no marker, everything is main text.
pub fn split_at_first_exhibit(raw_text: &str) -> (String, String) {
    let lines: Vec<&str> = raw_text.lines().collect();
    match lines.iter().position(|l| exhibit_one_regex().is_match(l)) {
        Some(pos) => (lines[..pos].join("\n"), lines[pos..].join("\n")),
        None => (raw_text.to_string(), String::new()),
    }
}

/// Split raw text into sub-documents bounded by delimiter rule lines.
///
/// Each sub-document is the content strictly between two consecutive
/// delimiter lines (`=`-rule or `-`-rule). A delimiter with no closer
/// before end of text terminates the scan; the trailing undelimited
/// content is dropped, matching the observed source behavior.
pub fn parse_sub_documents(raw_text: &str) -> Vec<SubDocument> {
    let lines: Vec<&str> = raw_text.lines().collect();
    let is_delimiter = |l: &str| is_rule_of_equals(l) || is_rule_of_dashes(l);

    let mut docs = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if is_delimiter(lines[i]) {
            let mut j = i + 1;
            while j < lines.len() && !is_delimiter(lines[j]) {
                j += 1;
            }
            if j < lines.len() {
                docs.push(SubDocument::new(lines[i + 1..j].join("\n")));
                i = j + 1;
            } else {
                break;
            }
        } else {
            i += 1;
        }
    }
    docs
}

/// Parser turning raw filing text into a [`Filing`].
///
/// Configure metadata through the builder methods, then call
/// [`FilingParser::parse`]. Parsing never fails: malformed structure
/// degrades per the scanner and section rules.
#[derive(Debug, Clone, Default)]
pub struct FilingParser {
    metadata: Metadata,
    exhibit_images: Vec<String>,
}

impl FilingParser {
    /// Create a parser with empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the firm name.
    pub fn with_firm_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.firm_name = name.into();
        self
    }

    /// Set the case name.
    pub fn with_case_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.case_name = name.into();
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Set the court of filing.
    pub fn with_court(mut self, court: impl Into<String>) -> Self {
        self.metadata.court = Some(court.into());
        self
    }

    /// Set the filing date.
    pub fn with_date_filed(mut self, date: chrono::NaiveDate) -> Self {
        self.metadata.date_filed = Some(date);
        self
    }

    /// Attach exhibit image paths, assigned positionally after renumbering.
    pub fn with_exhibit_images<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exhibit_images = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Parse raw filing text into the document model.
    pub fn parse(&self, raw_text: &str) -> Filing {
        let mut metadata = self.metadata.clone();
        metadata.detected_case_numbers = detect_case_numbers(raw_text);

        let (main_text, exhibit_text) = split_at_first_exhibit(raw_text);
        let (header_content, bodies) = parse_header_and_sections(&main_text);
        let styles = classify_headings(&bodies);

        let mut header = Header::new(header_content);
        if let Some(ref title) = metadata.title {
            header.set_field("DocumentTitle", title.clone());
        }
        if let Some(ref court) = metadata.court {
            header.set_field("Court", court.clone());
        }
        if let Some(date) = metadata.date_filed {
            header.set_field("DateFiled", date.format("%Y-%m-%d").to_string());
        }

        let sections = bodies
            .into_iter()
            .map(|(key, body)| {
                let style = styles.get(&key).copied().unwrap_or_default();
                (key, Section { body, style })
            })
            .collect();

        let mut filing = Filing {
            metadata,
            header,
            sections,
            exhibits: parse_exhibits(&exhibit_text),
            documents: parse_sub_documents(raw_text),
        };
        filing.attach_exhibit_images(self.exhibit_images.clone());
        filing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_stops_at_numbered_heading() {
        let text = "John Doe\n123 Main St\nI. INTRODUCTION\nBody line.";
        let (header, sections) = parse_header_and_sections(text);
        assert_eq!(header, "John Doe\n123 Main St");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("I INTRODUCTION").unwrap(), "Body line.");
    }

    #[test]
    fn test_header_stops_at_all_caps() {
        let text = "preamble\nCOMPLAINT\nbody";
        let (header, sections) = parse_header_and_sections(text);
        assert_eq!(header, "preamble");
        assert_eq!(sections.get("COMPLAINT").unwrap(), "body");
    }

    #[test]
    fn test_key_normalization_strips_trailing_dot() {
        let text = "1.2. Damages\nclaims here";
        let (_, sections) = parse_header_and_sections(text);
        assert_eq!(sections.get("1.2 Damages").unwrap(), "claims here");
    }

    #[test]
    fn test_bare_number_heading() {
        let text = "intro\n4.\nbody under four";
        let (header, sections) = parse_header_and_sections(text);
        assert_eq!(header, "intro");
        assert_eq!(sections.get("4.").unwrap(), "body under four");
    }

    #[test]
    fn test_pre_heading_body_lines_discarded() {
        // All-caps first line becomes the (empty) header boundary; the
        // lowercase line before any heading would be header content, but a
        // line after the header boundary with no open key is dropped.
        let text = "I. ONE\nkept\nII. TWO\nalso kept";
        let (_, sections) = parse_header_and_sections(text);
        assert_eq!(sections.get("I ONE").unwrap(), "kept");
        assert_eq!(sections.get("II TWO").unwrap(), "also kept");
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let text = "I. ONE\nfirst body\nII. TWO\nsecond\nI. ONE\nreplacement";
        let (_, sections) = parse_header_and_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("I ONE").unwrap(), "replacement");
        // Original slot kept: "I ONE" still precedes "II TWO".
        let keys: Vec<&String> = sections.keys().collect();
        assert_eq!(keys, vec!["I ONE", "II TWO"]);
    }

    #[test]
    fn test_classify_headings_boundaries() {
        let mut sections = IndexMap::new();
        sections.insert("1 Intro".to_string(), String::new());
        sections.insert("1.2 Damages".to_string(), String::new());
        sections.insert("1.2.3 Sub".to_string(), String::new());
        let styles = classify_headings(&sections);
        assert_eq!(styles["1 Intro"], HeadingStyle::Section);
        assert_eq!(styles["1.2 Damages"], HeadingStyle::Section);
        assert_eq!(styles["1.2.3 Sub"], HeadingStyle::Subsection);
    }

    #[test]
    fn test_empty_input() {
        let (header, sections) = parse_header_and_sections("");
        assert!(header.is_empty());
        assert!(sections.is_empty());
    }

    #[test]
    fn test_exhibit_renumbering() {
        let text = "EXHIBIT 3: C\nEXHIBIT 1: A\nEXHIBIT 1: A-dup\nEXHIBIT 5: E";
        let exhibits = parse_exhibits(text);
        let got: Vec<(u32, &str)> = exhibits
            .iter()
            .map(|e| (e.number, e.caption.as_str()))
            .collect();
        assert_eq!(got, vec![(1, "A"), (2, "C"), (3, "E")]);
    }

    #[test]
    fn test_duplicate_exhibit_content_discarded() {
        let text = "EXHIBIT 1: A\nkept line\nEXHIBIT 1: dup\ndropped line\nEXHIBIT 2: B";
        let exhibits = parse_exhibits(text);
        assert_eq!(exhibits.len(), 2);
        assert_eq!(exhibits[0].caption, "A\nkept line");
        assert_eq!(exhibits[1].caption, "B");
    }

    #[test]
    fn test_exhibit_multiline_caption() {
        let text = "EXHIBIT 2: first\nsecond line\nthird";
        let exhibits = parse_exhibits(text);
        assert_eq!(exhibits[0].caption, "first\nsecond line\nthird");
    }

    #[test]
    fn test_split_at_first_exhibit() {
        let text = "header\nI. ONE\nbody\nEXHIBIT 1: start\nmore";
        let (main, exhibits) = split_at_first_exhibit(text);
        assert_eq!(main, "header\nI. ONE\nbody");
        assert_eq!(exhibits, "EXHIBIT 1: start\nmore");
    }

    #[test]
    fn test_split_without_marker() {
        let (main, exhibits) = split_at_first_exhibit("no exhibits here");
        assert_eq!(main, "no exhibits here");
        assert!(exhibits.is_empty());
    }

    #[test]
    fn test_sub_documents() {
        // The scan resumes after each closing delimiter, so "between" sits
        // outside any pair and the final rule is left unclosed.
        let text = "skip\n=====\ndoc one\n-----\nbetween\n-----\ntrailing dropped";
        let docs = parse_sub_documents(text);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "doc one");
    }

    #[test]
    fn test_sub_documents_consecutive_pairs() {
        let text = "=====\nfirst\n-----\n=====\nsecond\n-----";
        let docs = parse_sub_documents(text);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "first");
        assert_eq!(docs[1].content, "second");
    }

    #[test]
    fn test_sub_documents_trailing_unclosed_dropped() {
        let docs = parse_sub_documents("=====\nnever closed");
        assert!(docs.is_empty());
    }

    #[test]
    fn test_filing_parser_end_to_end() {
        let text = "Law Offices\nI. INTRO\nWe allege case AB 12-345.\n\
                    EXHIBIT 1: The photo\nEXHIBIT 2: The ledger";
        let filing = FilingParser::new()
            .with_firm_name("PDFSage Inc.")
            .with_case_name("Doe v. Roe")
            .with_title("Complaint for Tort")
            .with_exhibit_images(["photo.png"])
            .parse(text);

        assert_eq!(filing.metadata.firm_name, "PDFSage Inc.");
        assert_eq!(filing.header.content, "Law Offices");
        assert_eq!(filing.section_count(), 1);
        assert_eq!(filing.exhibits.len(), 2);
        assert_eq!(filing.exhibits[0].image_path.as_deref(), Some("photo.png"));
        assert!(filing.exhibits[1].image_path.is_none());
        assert_eq!(
            filing.header.fields.get("DocumentTitle").unwrap(),
            "Complaint for Tort"
        );
        assert_eq!(filing.metadata.detected_case_numbers, vec!["AB 12-345"]);
    }
}
