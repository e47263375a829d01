//! Document model types for legal filings.
//!
//! This module defines the intermediate representation that bridges
//! structural parsing and physical layout. The model is built once from raw
//! input and is immutable thereafter; layout segments are derived from it.

mod document;
mod section;
mod segment;

pub use document::{Filing, Header, Metadata};
pub use section::{Exhibit, HeadingStyle, Section, SubDocument};
pub use segment::{Alignment, FontFamily, FontSpec, FontWeight, Segment, TextSegment};
