//! # Minuta
//!
//! A page-native generator for service contracts and price quotes.
//!
//! Most generators treat a document as an infinite vertical canvas and slice
//! it into pages afterwards, which is how table rows end up split across
//! page boundaries. Minuta does the opposite: **the page is the fundamental
//! unit of layout.** A single cursor owns the vertical write position and
//! the one page-break decision point; every section asks it for space before
//! drawing, so content flows *into* pages.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — client fields, ordered service lines, document kind
//!   [money]    — subtotal / discounts / net total (pure)
//!   [clauses]  — static legal reference data (contracts only)
//!       ↓
//!   [compose]  — linear section walk over a page-aware cursor
//!       ↓
//!   [pdf]      — serialize the page/primitive sequence to PDF bytes
//! ```
//!
//! Persistence (`store`) is a collaborator behind a trait; rendering never
//! touches it.

pub mod clauses;
pub mod compose;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod money;
pub mod pdf;
pub mod store;
pub mod text;

use compose::Composer;
use error::MinutaError;
use font::FontContext;
use model::{display_title, DocumentRecord, Metadata};
use pdf::PdfWriter;

/// Render a document record to PDF bytes.
///
/// This is the primary entry point: default branding, the standard clause
/// set, and today's date on the signature line. Infallible: the record is
/// assumed valid (see [`DocumentRecord::validate`]) and all asset failures
/// are absorbed.
pub fn render(record: &DocumentRecord) -> Vec<u8> {
    let fonts = FontContext::new();
    let composer = Composer::new(&fonts);
    let pages = composer.compose(
        record,
        clauses::standard_clauses(),
        chrono::Local::now().date_naive(),
    );
    let metadata = Metadata {
        title: Some(display_title(record)),
        ..Metadata::default()
    };
    PdfWriter::new().write(&pages, &metadata)
}

/// Render a document record described as JSON to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>, MinutaError> {
    let record: DocumentRecord = serde_json::from_str(json)?;
    Ok(render(&record))
}
