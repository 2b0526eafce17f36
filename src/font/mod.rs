//! # Font Metrics
//!
//! Text measurement for the two standard PDF fonts the documents use:
//! Helvetica and Helvetica-Bold. These are base-14 fonts, so no embedding is
//! needed, only AFM advance widths for accurate line breaking and centering.
//!
//! Accented Latin glyphs (the Portuguese clause text is full of them) share
//! the advance width of their base letter in the AFM tables, so widths are
//! looked up after folding the accent away.

/// One of the standard fonts available to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Helvetica,
    HelveticaBold,
}

impl FontId {
    /// The PDF BaseFont name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            FontId::Helvetica => "Helvetica",
            FontId::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// The resource name used in content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontId::Helvetica => "F1",
            FontId::HelveticaBold => "F2",
        }
    }
}

/// Advance widths in 1/1000 em for chars 0x20..=0x7E, Helvetica.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths in 1/1000 em for chars 0x20..=0x7E, Helvetica-Bold.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Fold an accented Latin letter to its base letter for width lookup.
fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => ch,
    }
}

/// Shared font context used by layout, composition, and PDF serialization.
///
/// Stateless, but passed explicitly so the measurement seam matches the
/// places that consume it (and can be swapped in tests if ever needed).
#[derive(Debug, Default, Clone, Copy)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: FontId, size: f64) -> f64 {
        let table = match font {
            FontId::Helvetica => &HELVETICA_WIDTHS,
            FontId::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        let folded = fold_accent(ch);
        let millis = match folded as u32 {
            0x20..=0x7E => table[folded as usize - 0x20],
            // Unknown glyph: assume an average-width letter.
            _ => 556,
        };
        millis as f64 / 1000.0 * size
    }

    /// Width of a string in points.
    pub fn measure_str(&self, text: &str, font: FontId, size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font, size)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        let ctx = FontContext::new();
        let w = ctx.char_width(' ', FontId::Helvetica, 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_bold_wider() {
        let ctx = FontContext::new();
        let regular = ctx.measure_str("Total", FontId::Helvetica, 10.0);
        let bold = ctx.measure_str("Total", FontId::HelveticaBold, 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_accent_folds_to_base_width() {
        let ctx = FontContext::new();
        let a = ctx.char_width('a', FontId::Helvetica, 12.0);
        let a_tilde = ctx.char_width('ã', FontId::Helvetica, 12.0);
        assert_eq!(a, a_tilde);
    }

    #[test]
    fn test_measure_is_sum_of_chars() {
        let ctx = FontContext::new();
        let whole = ctx.measure_str("ab", FontId::Helvetica, 12.0);
        let parts = ctx.char_width('a', FontId::Helvetica, 12.0)
            + ctx.char_width('b', FontId::Helvetica, 12.0);
        assert!((whole - parts).abs() < 1e-9);
    }
}
