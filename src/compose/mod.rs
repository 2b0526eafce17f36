//! # Document Composer
//!
//! Walks the record through a strictly linear section order and produces the
//! output page sequence:
//!
//! ```text
//! Header → Title → ClientBlock → [ClauseBlock, contracts only]
//!        → ServicesTable → SignatureBlock
//! ```
//!
//! The composer owns the cursor for the duration of one render and discards
//! it afterwards; nothing is ambient or global, so renders can run on
//! parallel threads with independent `Composer` instances.

pub(crate) mod table;

use chrono::NaiveDate;
use tracing::debug;

use crate::clauses::LegalClause;
use crate::font::{FontContext, FontId};
use crate::image_loader::brand_mark;
use crate::layout::{Cursor, DrawOp, Page, PageGeometry, MM};
use crate::model::{DocumentKind, DocumentRecord};
use crate::text::TextFlow;

const BODY_LINE: f64 = 5.0 * MM;
const PARAGRAPH_GAP: f64 = 3.0 * MM;
const LABEL_ROW: f64 = 8.0 * MM;
const MARK_WIDTH: f64 = 40.0 * MM;
const MARK_HEIGHT: f64 = 20.0 * MM;
const SIGNATURE_WIDTH: f64 = 70.0 * MM;

/// Provider identity rendered into every document.
#[derive(Debug, Clone)]
pub struct Branding {
    /// Name printed in the header and under the provider signature line.
    pub provider_name: String,
    /// Role label under the provider signature.
    pub signer_role: String,
    /// Header mark source (path, data URI, or base64). Best-effort.
    pub header_mark: Option<String>,
    /// Closing mark source. Best-effort.
    pub footer_mark: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            provider_name: "MARKET HOST".to_string(),
            signer_role: "Responsável".to_string(),
            header_mark: Some("/logo1.png".to_string()),
            footer_mark: Some("/logo2.png".to_string()),
        }
    }
}

/// Composes one record into a page sequence of draw primitives.
pub struct Composer<'a> {
    fonts: &'a FontContext,
    branding: Branding,
    geometry: PageGeometry,
}

impl<'a> Composer<'a> {
    pub fn new(fonts: &'a FontContext) -> Self {
        Self {
            fonts,
            branding: Branding::default(),
            geometry: PageGeometry::default(),
        }
    }

    pub fn with_branding(fonts: &'a FontContext, branding: Branding) -> Self {
        Self {
            fonts,
            branding,
            geometry: PageGeometry::default(),
        }
    }

    /// Render the record into pages. Infallible: asset failures are absorbed
    /// and pagination overflow always resolves by adding pages.
    ///
    /// `render_date` is the date printed in the signature block; it is the
    /// only input besides the record and clauses, so rendering the same
    /// arguments twice yields identical pages.
    pub fn compose(
        &self,
        record: &DocumentRecord,
        clauses: &[LegalClause],
        render_date: NaiveDate,
    ) -> Vec<Page> {
        let mut cursor = Cursor::new(self.geometry);

        self.header(&mut cursor);
        self.title(&mut cursor, record.document_kind);
        self.client_block(&mut cursor, record);
        if record.document_kind == DocumentKind::Contract {
            self.clause_block(&mut cursor, clauses);
        }
        table::render(self.fonts, &mut cursor, &record.services);
        self.signature_block(&mut cursor, render_date);

        debug!(
            kind = record.document_kind.tag(),
            pages = cursor.page_count(),
            services = record.services.len(),
            "document composed"
        );
        cursor.into_pages()
    }

    /// Push `text` with its horizontal center at `center_x`.
    fn centered_at(
        &self,
        cursor: &mut Cursor,
        center_x: f64,
        y: f64,
        text: &str,
        font: FontId,
        size: f64,
    ) {
        let x = center_x - self.fonts.measure_str(text, font, size) / 2.0;
        cursor.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font,
            size,
        });
    }

    /// Brand mark at the top-left plus the provider name, centered. The
    /// vertical advance is fixed whether or not the mark loaded, keeping the
    /// page rhythm identical either way.
    fn header(&self, cursor: &mut Cursor) {
        let geom = cursor.geometry();

        if let Some(src) = &self.branding.header_mark {
            if let Some(image) = brand_mark(src) {
                cursor.push(DrawOp::Image {
                    x: geom.margin,
                    y: cursor.y(),
                    width: MARK_WIDTH,
                    height: MARK_HEIGHT,
                    image,
                });
            }
        }

        let name_y = cursor.y() + 15.0 * MM;
        self.centered_at(
            cursor,
            geom.width / 2.0,
            name_y,
            &self.branding.provider_name,
            FontId::HelveticaBold,
            20.0,
        );
        cursor.advance(35.0 * MM);
    }

    fn title(&self, cursor: &mut Cursor, kind: DocumentKind) {
        cursor.ensure_space(30.0 * MM);
        let title = match kind {
            DocumentKind::Contract => "CONTRATO DE PRESTAÇÃO DE SERVIÇOS",
            DocumentKind::Quote => "ORÇAMENTO",
        };
        let center = cursor.geometry().width / 2.0;
        let y = cursor.y();
        self.centered_at(cursor, center, y, title, FontId::HelveticaBold, 16.0);
        cursor.advance(20.0 * MM);
    }

    /// Label/value pairs in fixed order. Absent optional fields print as
    /// empty values, not omitted lines.
    fn client_block(&self, cursor: &mut Cursor, record: &DocumentRecord) {
        let margin = cursor.geometry().margin;
        cursor.ensure_space(60.0 * MM);

        cursor.push(DrawOp::Text {
            x: margin,
            y: cursor.y(),
            text: "DADOS DO CONTRATANTE:".to_string(),
            font: FontId::HelveticaBold,
            size: 12.0,
        });
        cursor.advance(10.0 * MM);

        let fields = [
            ("Nome", record.client_name.as_str()),
            ("Documento", record.client_document.as_str()),
            ("Endereço", record.client_address.as_str()),
            ("Telefone", record.client_phone.as_str()),
            ("E-mail", record.client_email.as_str()),
        ];
        let last = fields.len() - 1;
        for (i, (label, value)) in fields.iter().enumerate() {
            cursor.ensure_space(LABEL_ROW);
            cursor.push(DrawOp::Text {
                x: margin,
                y: cursor.y(),
                text: format!("{}: {}", label, value),
                font: FontId::Helvetica,
                size: 12.0,
            });
            cursor.advance(if i == last { 15.0 * MM } else { LABEL_ROW });
        }
    }

    /// The legal terms, contracts only. Clause order and wording come from
    /// the static reference data and are reproduced verbatim.
    fn clause_block(&self, cursor: &mut Cursor, clauses: &[LegalClause]) {
        let geom = cursor.geometry();
        let flow = TextFlow::new(self.fonts);

        cursor.ensure_space(30.0 * MM);
        let y = cursor.y();
        self.centered_at(
            cursor,
            geom.width / 2.0,
            y,
            "TERMOS E CONDIÇÕES",
            FontId::HelveticaBold,
            14.0,
        );
        cursor.advance(15.0 * MM);

        for clause in clauses {
            cursor.ensure_space(40.0 * MM);

            cursor.push(DrawOp::Text {
                x: geom.margin,
                y: cursor.y(),
                text: clause.heading.clone(),
                font: FontId::HelveticaBold,
                size: 10.0,
            });
            cursor.advance(LABEL_ROW);

            flow.emit(
                cursor,
                &clause.paragraphs,
                geom.margin + 5.0 * MM,
                geom.content_width(),
                FontId::Helvetica,
                10.0,
                BODY_LINE,
                PARAGRAPH_GAP,
            );
            cursor.advance(5.0 * MM);
        }
    }

    /// Date line, the two signature rules side by side with centered labels,
    /// and the closing brand mark.
    fn signature_block(&self, cursor: &mut Cursor, render_date: NaiveDate) {
        let geom = cursor.geometry();
        cursor.ensure_space(80.0 * MM);

        cursor.advance(20.0 * MM);
        cursor.push(DrawOp::Text {
            x: geom.margin,
            y: cursor.y(),
            text: format!("Data: {}", render_date.format("%d/%m/%Y")),
            font: FontId::Helvetica,
            size: 10.0,
        });
        cursor.advance(30.0 * MM);

        let signature_y = cursor.y();

        // Provider signature, left.
        let provider_center = geom.margin + SIGNATURE_WIDTH / 2.0;
        cursor.push(DrawOp::Line {
            x1: geom.margin,
            y1: signature_y,
            x2: geom.margin + SIGNATURE_WIDTH,
            y2: signature_y,
        });
        self.centered_at(
            cursor,
            provider_center,
            signature_y + 8.0 * MM,
            &self.branding.provider_name,
            FontId::Helvetica,
            10.0,
        );
        self.centered_at(
            cursor,
            provider_center,
            signature_y + 15.0 * MM,
            &self.branding.signer_role,
            FontId::Helvetica,
            10.0,
        );

        // Client signature, right.
        let client_x = geom.width - geom.margin - SIGNATURE_WIDTH;
        cursor.push(DrawOp::Line {
            x1: client_x,
            y1: signature_y,
            x2: client_x + SIGNATURE_WIDTH,
            y2: signature_y,
        });
        self.centered_at(
            cursor,
            client_x + SIGNATURE_WIDTH / 2.0,
            signature_y + 8.0 * MM,
            "Contratante",
            FontId::Helvetica,
            10.0,
        );

        cursor.advance(25.0 * MM);

        if let Some(src) = &self.branding.footer_mark {
            if let Some(image) = brand_mark(src) {
                cursor.push(DrawOp::Image {
                    x: geom.width / 2.0 - MARK_WIDTH / 2.0,
                    y: cursor.y(),
                    width: MARK_WIDTH,
                    height: MARK_HEIGHT,
                    image,
                });
            }
        }
    }
}
