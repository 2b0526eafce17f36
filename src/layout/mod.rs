//! # Page-Aware Layout Cursor
//!
//! The page is the fundamental unit of layout. The cursor tracks the current
//! vertical write position on a page of known geometry and owns the one
//! page-break decision point: [`Cursor::ensure_space`]. Every component that
//! consumes vertical space routes through it; nothing else computes page
//! breaks, so pagination has a single source of truth and unit tests can
//! assert page counts directly.
//!
//! Each render owns its own cursor and page sequence exclusively; nothing is
//! shared across renders, so concurrent renders need no locking.

use crate::font::FontId;
use crate::image_loader::LoadedImage;

/// One millimeter in points. The page rhythm (margins, row heights, line
/// heights) is specified in millimeters; output coordinates are points.
pub const MM: f64 = 72.0 / 25.4;

/// Fixed page geometry for one render.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PageGeometry {
    /// A4 with 20mm margins.
    fn default() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin: 20.0 * MM,
        }
    }
}

impl PageGeometry {
    /// Horizontal space between the margins.
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }
}

/// A drawn primitive on a page. This is the render target handed to the PDF
/// serializer, and what tests inspect directly.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// A text run. `y` is the baseline, measured from the top of the page.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: FontId,
        size: f64,
    },
    /// A straight line segment.
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// An unfilled rectangle outline. `y` is the top edge.
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// A raster image. `y` is the top edge.
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: LoadedImage,
    },
}

/// A fully composed page: an ordered sequence of drawn primitives.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

/// Tracks the vertical write position and owns the page-break decision.
///
/// Created at the start of one render, consumed by [`Cursor::into_pages`] at
/// the end. Never shared.
#[derive(Debug)]
pub struct Cursor {
    geom: PageGeometry,
    pages: Vec<Page>,
    y: f64,
}

impl Cursor {
    pub fn new(geom: PageGeometry) -> Self {
        Self {
            geom,
            pages: vec![Page {
                width: geom.width,
                height: geom.height,
                ops: Vec::new(),
            }],
            y: geom.margin,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geom
    }

    /// Current vertical write position, measured from the top of the page.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Start a new page if `needed` points of vertical space would run past
    /// the bottom margin; otherwise a no-op. Never fails: overflow is always
    /// resolved by adding a page.
    pub fn ensure_space(&mut self, needed: f64) {
        if self.y + needed > self.geom.height - self.geom.margin {
            self.pages.push(Page {
                width: self.geom.width,
                height: self.geom.height,
                ops: Vec::new(),
            });
            self.y = self.geom.margin;
        }
    }

    /// Move the write position down by `dy` points.
    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Append a primitive to the current page.
    pub fn push(&mut self, op: DrawOp) {
        self.pages
            .last_mut()
            .expect("cursor always has an open page")
            .ops
            .push(op);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Finish the render and hand over the page sequence.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(height: f64, margin: f64) -> PageGeometry {
        PageGeometry {
            width: 595.28,
            height,
            margin,
        }
    }

    #[test]
    fn test_starts_at_top_margin() {
        let cursor = Cursor::new(PageGeometry::default());
        assert_eq!(cursor.page_count(), 1);
        assert_eq!(cursor.y(), PageGeometry::default().margin);
    }

    #[test]
    fn test_ensure_space_noop_when_it_fits() {
        let mut cursor = Cursor::new(geom(800.0, 50.0));
        cursor.ensure_space(100.0);
        assert_eq!(cursor.page_count(), 1);
        assert_eq!(cursor.y(), 50.0);
    }

    #[test]
    fn test_ensure_space_breaks_page() {
        let mut cursor = Cursor::new(geom(800.0, 50.0));
        cursor.advance(680.0); // y = 730, bottom limit = 750
        cursor.ensure_space(30.0);
        assert_eq!(cursor.page_count(), 2);
        assert_eq!(cursor.y(), 50.0);
    }

    #[test]
    fn test_ensure_space_exact_fit_stays() {
        let mut cursor = Cursor::new(geom(800.0, 50.0));
        cursor.advance(650.0); // y = 700
        cursor.ensure_space(50.0); // 700 + 50 = 750, not past the limit
        assert_eq!(cursor.page_count(), 1);
    }

    #[test]
    fn test_ops_land_on_current_page() {
        let mut cursor = Cursor::new(geom(800.0, 50.0));
        cursor.push(DrawOp::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
        });
        cursor.advance(700.0);
        cursor.ensure_space(100.0);
        cursor.push(DrawOp::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
        });
        let pages = cursor.into_pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].ops.len(), 1);
        assert_eq!(pages[1].ops.len(), 1);
    }

    #[test]
    fn test_unbounded_page_count() {
        let mut cursor = Cursor::new(geom(100.0, 10.0));
        for _ in 0..500 {
            cursor.ensure_space(85.0);
            cursor.advance(85.0);
        }
        assert!(cursor.page_count() > 400);
    }
}
