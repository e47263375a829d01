//! Greedy word wrapping against an abstract width measure.

use crate::model::FontSpec;

/// Capability to measure the rendered width of a string.
///
/// Implementations must be deterministic and total: any string maps to a
/// finite non-negative width for a given font. Real renderers back this
/// with font metrics; tests and the proof-sheet renderer use
/// [`CharCellMeasure`].
pub trait TextMeasure {
    /// Rendered width of `text` in the given font, in points.
    fn width(&self, text: &str, font: &FontSpec) -> f32;
}

/// Width measure that treats every character as a fixed fraction of the
/// font size. Close enough to Helvetica body text for layout purposes and
/// exactly reproducible across passes.
#[derive(Debug, Clone, Copy)]
pub struct CharCellMeasure {
    /// Character advance as a fraction of the font size
    pub em_fraction: f32,
}

impl CharCellMeasure {
    /// The conventional half-em advance.
    pub fn new() -> Self {
        Self { em_fraction: 0.5 }
    }
}

impl Default for CharCellMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for CharCellMeasure {
    fn width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.em_fraction
    }
}

/// One output line of a wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    /// The line text
    pub text: String,

    /// True when the line was flushed because the next word would not fit
    pub wrapped: bool,
}

/// Greedily wrap a paragraph into width-constrained lines.
///
/// Embedded newlines are hard breaks: each newline-separated piece wraps
/// independently, and an empty piece yields exactly one empty line. Words
/// accumulate onto a line while the measured candidate stays within
/// `max_width`; when the next word would exceed it, the line is flushed
/// (marked wrapped) and the word starts a new line. A single word wider
/// than `max_width` is still placed alone on its line, never split; the
/// width ceiling is a soft target, not a hard constraint.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut words = paragraph.split_whitespace();
        let Some(first) = words.next() else {
            lines.push(WrappedLine {
                text: String::new(),
                wrapped: false,
            });
            continue;
        };
        let mut current = first.to_string();
        for word in words {
            let candidate = format!("{} {}", current, word);
            if measure.width(&candidate, font) <= max_width {
                current = candidate;
            } else {
                lines.push(WrappedLine {
                    text: std::mem::replace(&mut current, word.to_string()),
                    wrapped: true,
                });
            }
        }
        lines.push(WrappedLine {
            text: current,
            wrapped: false,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> FontSpec {
        FontSpec::regular(10.0)
    }

    // 10pt half-em cells: one char is 5pt wide.
    fn measure() -> CharCellMeasure {
        CharCellMeasure::new()
    }

    #[test]
    fn test_narrow_line_is_identity() {
        let lines = wrap_text(&measure(), "short line", &body(), 1000.0);
        assert_eq!(
            lines,
            vec![WrappedLine {
                text: "short line".to_string(),
                wrapped: false
            }]
        );
    }

    #[test]
    fn test_wrap_coverage() {
        let text = "the quick brown fox jumps over the lazy dog";
        for max_width in [20.0, 45.0, 80.0, 200.0] {
            let lines = wrap_text(&measure(), text, &body(), max_width);
            let rejoined = lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            assert_eq!(rejoined, text, "coverage broken at width {}", max_width);
        }
    }

    #[test]
    fn test_wrap_marks_flushed_lines() {
        // 12 chars = 60pt; "aaaa bbbb" = 45pt fits, adding "cccc" would not.
        let lines = wrap_text(&measure(), "aaaa bbbb cccc", &body(), 50.0);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].wrapped);
        assert!(!lines[1].wrapped);
        assert_eq!(lines[0].text, "aaaa bbbb");
        assert_eq!(lines[1].text, "cccc");
    }

    #[test]
    fn test_oversized_word_placed_alone() {
        let lines = wrap_text(&measure(), "supercalifragilistic", &body(), 10.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "supercalifragilistic");
    }

    #[test]
    fn test_oversized_word_after_content() {
        let lines = wrap_text(&measure(), "ab supercalifragilistic cd", &body(), 30.0);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "supercalifragilistic", "cd"]);
    }

    #[test]
    fn test_empty_paragraph_yields_one_empty_line() {
        let lines = wrap_text(&measure(), "", &body(), 100.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
    }

    #[test]
    fn test_embedded_newlines_are_hard_breaks() {
        let lines = wrap_text(&measure(), "one\n\ntwo", &body(), 1000.0);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "", "two"]);
    }

    #[test]
    fn test_whitespace_collapses_to_single_spaces() {
        let lines = wrap_text(&measure(), "a   b\tc", &body(), 1000.0);
        assert_eq!(lines[0].text, "a b c");
    }
}
