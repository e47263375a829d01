//! Structural parsing module.

mod scan;
mod structure;

pub use scan::{
    is_all_caps, is_exhibit_reference, is_rule_of_dashes, is_rule_of_equals, scan_title_blocks,
    ScanItem,
};
pub use structure::{
    classify_headings, parse_exhibits, parse_header_and_sections, parse_sub_documents,
    split_at_first_exhibit, FilingParser,
};
