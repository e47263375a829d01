//! Text layout and pagination engine.
//!
//! Converts the parsed filing into a flat segment sequence, packs the
//! segments onto fixed-height pages, and derives table-of-contents entries
//! from the recorded heading coordinates.

mod paginate;
mod segments;
mod toc;
mod wrap;

pub use paginate::{HeadingCoordinate, Page, PageMetrics, PagePlan, Paginator};
pub use segments::SegmentBuilder;
pub use toc::{build_toc, filter_for_toc, TocEntry, TocLayout};
pub use wrap::{wrap_text, CharCellMeasure, TextMeasure, WrappedLine};
