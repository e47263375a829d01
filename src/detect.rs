//! Case-number detection over raw filing text.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

fn case_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b([A-Z]{1,5}\s*\d+-\d+)\b").unwrap())
}

/// Detect docket-style case numbers (e.g. "CV 23-1234") anywhere in the
/// text. Returns a deduplicated, sorted list.
pub fn detect_case_numbers(text: &str) -> Vec<String> {
    let set: BTreeSet<String> = case_number_regex()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect();
    set.into_iter().collect()
}
