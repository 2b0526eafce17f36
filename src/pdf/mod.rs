//! # PDF Serializer
//!
//! Takes the composed pages and writes a valid PDF 1.7 file. This is a
//! from-scratch writer: the subset needed here (standard Type1 fonts, text
//! runs, strokes, rectangles, image XObjects) is small enough that owning
//! the raw bytes keeps the engine self-contained.
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (catalog, pages, fonts, streams, images)
//! ...
//! xref                <- byte offsets of each object
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Text is encoded as WinAnsi (Latin-1 superset), which covers the accented
//! Portuguese of the clause text without font embedding.

use std::collections::HashMap;
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};
use crate::layout::{DrawOp, Page};
use crate::model::Metadata;

pub struct PdfWriter;

struct PdfObject {
    data: Vec<u8>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize composed pages to PDF bytes.
    pub fn write(&self, pages: &[Page], metadata: &Metadata) -> Vec<u8> {
        // Object IDs: 0 = placeholder (PDF objects are 1-indexed),
        // 1 = Catalog, 2 = Pages root, 3 = /F1, 4 = /F2, then images,
        // content streams, and page dicts.
        let mut objects: Vec<PdfObject> = Vec::new();
        objects.push(PdfObject { data: vec![] });
        objects.push(PdfObject { data: vec![] });
        objects.push(PdfObject { data: vec![] });
        objects.push(PdfObject {
            data: b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        });
        objects.push(PdfObject {
            data: b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        });

        // Register every image as an XObject up front.
        // (page_index, op_index) -> (image number, object id)
        let mut image_refs: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        let mut next_image = 0usize;
        for (pi, page) in pages.iter().enumerate() {
            for (oi, op) in page.ops.iter().enumerate() {
                if let DrawOp::Image { image, .. } = op {
                    let obj_id = push_image_xobject(&mut objects, image);
                    image_refs.insert((pi, oi), (next_image, obj_id));
                    next_image += 1;
                }
            }
        }

        // Content stream + page dict per page.
        let mut page_obj_ids = Vec::with_capacity(pages.len());
        for (pi, page) in pages.iter().enumerate() {
            let content = content_stream(page, pi, &image_refs);
            let compressed = compress_to_vec_zlib(&content, 6);

            let content_obj_id = objects.len();
            let mut data = Vec::new();
            let _ = write!(
                data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            data.extend_from_slice(&compressed);
            data.extend_from_slice(b"\nendstream");
            objects.push(PdfObject { data });

            let mut resources = String::from("/Font << /F1 3 0 R /F2 4 0 R >>");
            let mut page_images: Vec<(usize, usize)> = image_refs
                .iter()
                .filter(|((p, _), _)| *p == pi)
                .map(|(_, &(num, id))| (num, id))
                .collect();
            if !page_images.is_empty() {
                page_images.sort_unstable();
                resources.push_str(" /XObject << ");
                for (num, id) in page_images {
                    resources.push_str(&format!("/Im{} {} 0 R ", num, id));
                }
                resources.push_str(">>");
            }

            let page_obj_id = objects.len();
            let dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                page.width, page.height, content_obj_id, resources
            );
            objects.push(PdfObject {
                data: dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        // Catalog (object 1) and Pages tree (object 2).
        objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();
        let kids = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary.
        let info_obj_id = if metadata.title.is_some()
            || metadata.author.is_some()
            || metadata.subject.is_some()
        {
            let id = objects.len();
            let mut info = String::from("<< ");
            if let Some(title) = &metadata.title {
                info.push_str(&format!("/Title ({}) ", escape_pdf_text(title)));
            }
            if let Some(author) = &metadata.author {
                info.push_str(&format!("/Author ({}) ", escape_pdf_text(author)));
            }
            if let Some(subject) = &metadata.subject {
                info.push_str(&format!("/Subject ({}) ", escape_pdf_text(subject)));
            }
            info.push_str("/Producer (Minuta 0.3) >>");
            objects.push(PdfObject {
                data: info.into_bytes(),
            });
            Some(id)
        } else {
            None
        };

        serialize(&objects, info_obj_id)
    }
}

/// Write all objects, the xref table, and the trailer.
fn serialize(objects: &[PdfObject], info_obj_id: Option<usize>) -> Vec<u8> {
    let mut out: Vec<u8> = b"%PDF-1.7\n".to_vec();
    let mut offsets = vec![0usize; objects.len()];

    for (id, obj) in objects.iter().enumerate().skip(1) {
        offsets[id] = out.len();
        let _ = write!(out, "{} 0 obj\n", id);
        out.extend_from_slice(&obj.data);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_start = out.len();
    let _ = write!(out, "xref\n0 {}\n", objects.len());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }

    let info = info_obj_id
        .map(|id| format!(" /Info {} 0 R", id))
        .unwrap_or_default();
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R{} >>\nstartxref\n{}\n%%EOF\n",
        objects.len(),
        info,
        xref_start
    );
    out
}

/// Build the uncompressed content stream for one page.
///
/// The cursor's coordinates grow downward from the top of the page; PDF's
/// origin is the bottom-left corner, so every y is flipped here.
fn content_stream(
    page: &Page,
    page_index: usize,
    image_refs: &HashMap<(usize, usize), (usize, usize)>,
) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();
    let h = page.height;

    for (oi, op) in page.ops.iter().enumerate() {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
            } => {
                let _ = write!(
                    buf,
                    "BT /{} {:.2} Tf {:.2} {:.2} Td (",
                    font.resource_name(),
                    size,
                    x,
                    h - y
                );
                for b in encode_winansi(text) {
                    if b == b'(' || b == b')' || b == b'\\' {
                        buf.push(b'\\');
                    }
                    buf.push(b);
                }
                buf.extend_from_slice(b") Tj ET\n");
            }
            DrawOp::Line { x1, y1, x2, y2 } => {
                let _ = write!(
                    buf,
                    "{:.2} {:.2} m {:.2} {:.2} l S\n",
                    x1,
                    h - y1,
                    x2,
                    h - y2
                );
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
            } => {
                let _ = write!(
                    buf,
                    "{:.2} {:.2} {:.2} {:.2} re S\n",
                    x,
                    h - y - height,
                    width,
                    height
                );
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
                ..
            } => {
                if let Some((num, _)) = image_refs.get(&(page_index, oi)) {
                    let _ = write!(
                        buf,
                        "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im{} Do Q\n",
                        width,
                        height,
                        x,
                        h - y - height,
                        num
                    );
                }
            }
        }
    }
    buf
}

/// Append the XObject(s) for one image, returning the main object id.
fn push_image_xobject(objects: &mut Vec<PdfObject>, image: &LoadedImage) -> usize {
    match &image.pixel_data {
        ImagePixelData::Jpeg { data, color_space } => {
            let cs = match color_space {
                JpegColorSpace::DeviceRgb => "/DeviceRGB",
                JpegColorSpace::DeviceGray => "/DeviceGray",
            };
            let id = objects.len();
            let mut obj = Vec::new();
            let _ = write!(
                obj,
                "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace {} /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>\nstream\n",
                image.width_px,
                image.height_px,
                cs,
                data.len()
            );
            obj.extend_from_slice(data);
            obj.extend_from_slice(b"\nendstream");
            objects.push(PdfObject { data: obj });
            id
        }
        ImagePixelData::Decoded { rgb, alpha } => {
            let smask_id = alpha.as_ref().map(|alpha| {
                let compressed = compress_to_vec_zlib(alpha, 6);
                let id = objects.len();
                let mut obj = Vec::new();
                let _ = write!(
                    obj,
                    "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    compressed.len()
                );
                obj.extend_from_slice(&compressed);
                obj.extend_from_slice(b"\nendstream");
                objects.push(PdfObject { data: obj });
                id
            });

            let compressed = compress_to_vec_zlib(rgb, 6);
            let id = objects.len();
            let smask = smask_id
                .map(|id| format!(" /SMask {} 0 R", id))
                .unwrap_or_default();
            let mut obj = Vec::new();
            let _ = write!(
                obj,
                "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode{} /Length {} >>\nstream\n",
                image.width_px,
                image.height_px,
                smask,
                compressed.len()
            );
            obj.extend_from_slice(&compressed);
            obj.extend_from_slice(b"\nendstream");
            objects.push(PdfObject { data: obj });
            id
        }
    }
}

/// Encode text as WinAnsi bytes. ASCII and Latin-1 map directly; a handful
/// of CP1252 punctuation points are remapped; everything else degrades to
/// `?` rather than corrupting the stream.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch as u32 {
            0x20..=0x7E => ch as u8,
            0xA0..=0xFF => ch as u8,
            _ => match ch {
                '\u{20AC}' => 0x80,
                '\u{2026}' => 0x85,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                _ => b'?',
            },
        })
        .collect()
}

/// Escape a string for a PDF literal string (metadata dictionaries).
fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for b in encode_winansi(text) {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            _ => out.push(b as char),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontId;

    fn page_with(ops: Vec<DrawOp>) -> Page {
        Page {
            width: 595.28,
            height: 841.89,
            ops,
        }
    }

    fn text_op(text: &str) -> DrawOp {
        DrawOp::Text {
            x: 56.7,
            y: 56.7,
            text: text.to_string(),
            font: FontId::Helvetica,
            size: 12.0,
        }
    }

    #[test]
    fn test_structurally_valid_pdf() {
        let writer = PdfWriter::new();
        let bytes = writer.write(&[page_with(vec![text_op("Olá")])], &Metadata::default());
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
        assert!(bytes.windows(4).any(|w| w == b"xref"));
        assert!(bytes.windows(7).any(|w| w == b"trailer"));
    }

    #[test]
    fn test_one_page_dict_per_page() {
        let writer = PdfWriter::new();
        let pages = vec![page_with(vec![]), page_with(vec![]), page_with(vec![])];
        let bytes = writer.write(&pages, &Metadata::default());
        let count = bytes
            .windows(b"/Type /Page ".len())
            .filter(|w| *w == b"/Type /Page ")
            .count();
        assert_eq!(count, 3);
        assert!(bytes.windows(8).any(|w| w == b"/Count 3"));
    }

    #[test]
    fn test_info_dict_present_when_titled() {
        let writer = PdfWriter::new();
        let meta = Metadata {
            title: Some("Contrato - Maria".to_string()),
            ..Metadata::default()
        };
        let bytes = writer.write(&[page_with(vec![])], &meta);
        assert!(bytes.windows(6).any(|w| w == b"/Title"));
        assert!(bytes.windows(5).any(|w| w == b"/Info"));
    }

    #[test]
    fn test_winansi_latin1_passthrough() {
        assert_eq!(encode_winansi("Ção"), vec![0xC7, 0xE3, 0x6F]);
    }

    #[test]
    fn test_winansi_unknown_degrades() {
        assert_eq!(encode_winansi("→"), vec![b'?']);
        assert_eq!(encode_winansi("\u{2013}"), vec![0x96]);
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(escape_pdf_text("a(b)c\\"), "a\\(b\\)c\\\\");
    }

    #[test]
    fn test_rect_y_flip() {
        let page = page_with(vec![DrawOp::Rect {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 30.0,
        }]);
        let content = content_stream(&page, 0, &HashMap::new());
        let s = String::from_utf8(content).unwrap();
        // top-down y=20, height=30 on an 841.89pt page -> bottom-up y=791.89
        assert!(s.contains("10.00 791.89 100.00 30.00 re S"));
    }
}
