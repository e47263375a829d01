//! Rendering module for converting layouts to output formats.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{render_index, render_plan, to_proof_sheet, TextRenderOptions};
