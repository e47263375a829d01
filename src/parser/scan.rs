//! Line predicates and the title-block scanner.
//!
//! Court filings mark structure with rule lines: a matched pair of
//! `=`-rules bounds a title block that must be forced onto its own page,
//! while `-`-rules (and unmatched `=`-rules) are plain horizontal
//! delimiters. The scanner classifies a line range into those three kinds
//! without ever failing; an unterminated title block degrades to a bare
//! delimiter.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum repeated-character run for a line to count as a rule.
const MIN_RULE_LEN: usize = 5;

fn exhibit_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bEXHIBIT\s+\d+:").unwrap())
}

/// Check if the trimmed line is a run of a single character, length >= 5.
fn is_rule_of(line: &str, ch: char) -> bool {
    let s = line.trim();
    s.chars().count() >= MIN_RULE_LEN && s.chars().all(|c| c == ch)
}

/// Check if the line is a rule of `=` characters (title-block delimiter).
pub fn is_rule_of_equals(line: &str) -> bool {
    is_rule_of(line, '=')
}

/// Check if the line is a rule of `-` characters (plain delimiter).
pub fn is_rule_of_dashes(line: &str) -> bool {
    is_rule_of(line, '-')
}

/// Check if a line is ALL CAPS: at least one Latin letter, none lowercase.
///
/// Non-letter characters are ignored, so "PRAYER FOR RELIEF (2024)" counts
/// while "12345" does not.
pub fn is_all_caps(line: &str) -> bool {
    let mut has_upper = false;
    for c in line.chars() {
        if c.is_ascii_lowercase() {
            return false;
        }
        if c.is_ascii_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

/// Check if a line references an exhibit (`EXHIBIT <n>:` anywhere,
/// case-insensitive).
pub fn is_exhibit_reference(line: &str) -> bool {
    exhibit_ref_regex().is_match(line)
}

/// One classified item from a title-block scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem<'a> {
    /// Content strictly between a matched pair of `=`-rules
    TitleBlock(Vec<&'a str>),

    /// A lone horizontal rule (`-`-rule, or an unmatched `=`-rule)
    Delimiter(&'a str),

    /// An ordinary content line
    Line(&'a str),
}

/// Classify a line range into title blocks, delimiters, and content lines.
///
/// When an `=`-rule is found, the scan looks ahead for the closing
/// `=`-rule; everything strictly between becomes one [`ScanItem::TitleBlock`]
/// and the scan resumes after the closer. If no closer exists before the
/// range ends, the opening rule is reclassified as a bare delimiter and
/// scanning resumes at the next line. A `-`-rule is always a bare
/// delimiter, never block-forming.
pub fn scan_title_blocks<'a>(lines: &[&'a str]) -> Vec<ScanItem<'a>> {
    let mut items = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if is_rule_of_equals(line) {
            match lines[i + 1..].iter().position(|l| is_rule_of_equals(l)) {
                Some(offset) => {
                    let inner = lines[i + 1..i + 1 + offset].to_vec();
                    log::debug!("title block of {} lines at line {}", inner.len(), i);
                    items.push(ScanItem::TitleBlock(inner));
                    i += offset + 2;
                }
                None => {
                    // Unterminated block: the opener degrades to a rule.
                    items.push(ScanItem::Delimiter(line));
                    i += 1;
                }
            }
        } else if is_rule_of_dashes(line) {
            items.push(ScanItem::Delimiter(line));
            i += 1;
        } else {
            items.push(ScanItem::Line(line));
            i += 1;
        }
    }
    items
}
