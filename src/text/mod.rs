//! # Text Flow
//!
//! Paragraph wrapping and flowing emission. Wrapping is greedy over UAX#14
//! break opportunities (`unicode-linebreak`), measured with real font
//! metrics. A single word wider than the column is emitted unbroken (no
//! hyphenation); that is an accepted edge case, not an error.

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::font::{FontContext, FontId};
use crate::layout::{Cursor, DrawOp};

pub struct TextFlow<'a> {
    fonts: &'a FontContext,
}

impl<'a> TextFlow<'a> {
    pub fn new(fonts: &'a FontContext) -> Self {
        Self { fonts }
    }

    /// Break `text` into lines that fit within `max_width` points.
    ///
    /// Greedy fitting: each line takes as many UAX#14 segments as fit. When
    /// no break opportunity has been seen yet, the segment is kept whole even
    /// if it overflows.
    pub fn wrap(&self, text: &str, max_width: f64, font: FontId, size: f64) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        let mut start = 0usize;
        // Byte offset of the last allowed break seen within the current line.
        let mut last_break = 0usize;

        // linebreaks() yields (offset, opportunity) where `offset` is the
        // byte position after the break point; the final yield is always a
        // mandatory break at text.len(), which flushes the last line.
        for (offset, opportunity) in linebreaks(text) {
            while self
                .fonts
                .measure_str(text[start..offset].trim_end(), font, size)
                > max_width
                && last_break > start
            {
                lines.push(text[start..last_break].trim_end().to_string());
                start = last_break;
            }
            if opportunity == BreakOpportunity::Mandatory {
                lines.push(text[start..offset].trim_end().to_string());
                start = offset;
            }
            last_break = offset;
        }

        lines
    }

    /// Flow paragraphs down the page at `x`, wrapped to `max_width`.
    ///
    /// Every line asks the cursor for space before writing, so paragraphs
    /// reflow across page boundaries line by line. An inter-paragraph gap is
    /// added after the last line of each paragraph.
    #[allow(clippy::too_many_arguments)]
    pub fn emit(
        &self,
        cursor: &mut Cursor,
        paragraphs: &[String],
        x: f64,
        max_width: f64,
        font: FontId,
        size: f64,
        line_height: f64,
        paragraph_gap: f64,
    ) {
        for paragraph in paragraphs {
            for line in self.wrap(paragraph, max_width, font, size) {
                cursor.ensure_space(line_height);
                cursor.push(DrawOp::Text {
                    x,
                    y: cursor.y(),
                    text: line,
                    font,
                    size,
                });
                cursor.advance(line_height);
            }
            cursor.advance(paragraph_gap);
        }
    }
}
