//! # Document Model
//!
//! The input representation for the rendering engine. A `DocumentRecord` is
//! produced by an external form collector and consumed read-only by the
//! composer; the renderer never mutates it. Field names serialize as
//! camelCase because the record typically arrives as JSON from a web form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which kind of printable document to produce.
///
/// The two kinds differ only by the title string and by whether the legal
/// clause section is included. Defaults to `Contract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Contract,
    Quote,
}

impl DocumentKind {
    /// The lowercase tag used in persisted records.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentKind::Contract => "contract",
            DocumentKind::Quote => "quote",
        }
    }
}

/// One billable item: a description, a value, and an optional discount.
///
/// `discount` exceeding `value` is tolerated (a soft UI constraint upstream);
/// the renderer simply produces a negative line total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    /// Opaque identifier, unique within a document. Insertion order of the
    /// surrounding `Vec` is significant and is preserved in printed output.
    pub id: String,
    pub description: String,
    /// Non-negative amount in the document currency.
    pub value: f64,
    #[serde(default)]
    pub discount: f64,
}

/// A complete document ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub client_name: String,
    #[serde(default)]
    pub client_document: String,
    #[serde(default)]
    pub client_address: String,
    pub client_phone: String,
    #[serde(default)]
    pub client_email: String,

    /// Ordered service lines. Row order in the printed table equals this order.
    #[serde(default)]
    pub services: Vec<ServiceLine>,

    #[serde(default = "today")]
    pub document_date: NaiveDate,

    #[serde(default)]
    pub document_kind: DocumentKind,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl DocumentRecord {
    /// A fresh record: empty client fields, no services, dated today.
    pub fn draft(kind: DocumentKind) -> Self {
        Self {
            client_name: String::new(),
            client_document: String::new(),
            client_address: String::new(),
            client_phone: String::new(),
            client_email: String::new(),
            services: Vec::new(),
            document_date: today(),
            document_kind: kind,
        }
    }

    /// Precondition check performed by callers before rendering or saving.
    ///
    /// The renderer itself assumes a valid record and does not re-validate.
    pub fn validate(&self) -> Result<(), crate::error::MinutaError> {
        use crate::error::MinutaError;
        if self.client_name.trim().is_empty() {
            return Err(MinutaError::MissingField("clientName"));
        }
        if self.client_phone.trim().is_empty() {
            return Err(MinutaError::MissingField("clientPhone"));
        }
        if self.services.is_empty() {
            return Err(MinutaError::MissingField("services"));
        }
        Ok(())
    }
}

/// Document metadata embedded in the PDF Info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

/// Human-readable title for a record, used for PDF metadata and for the
/// denormalized title column in the store.
pub fn display_title(record: &DocumentRecord) -> String {
    match record.document_kind {
        DocumentKind::Contract => format!("Contrato - {}", record.client_name),
        DocumentKind::Quote => format!("Orçamento - {}", record.client_name),
    }
}

/// Default output filename: `{contract|quotation}_{client}_{ISO date}.pdf`,
/// with whitespace runs in the client name replaced by underscores.
pub fn suggested_filename(record: &DocumentRecord, date: NaiveDate) -> String {
    let prefix = match record.document_kind {
        DocumentKind::Contract => "contract",
        DocumentKind::Quote => "quotation",
    };
    let client = record
        .client_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}_{}.pdf", prefix, client, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(kind: DocumentKind) -> DocumentRecord {
        DocumentRecord {
            client_name: "Maria Silva".to_string(),
            client_phone: "11999999999".to_string(),
            services: vec![ServiceLine {
                id: "1".to_string(),
                description: "Hosting".to_string(),
                value: 100.0,
                discount: 10.0,
            }],
            document_kind: kind,
            ..DocumentRecord::draft(kind)
        }
    }

    #[test]
    fn test_filename_convention() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(
            suggested_filename(&record(DocumentKind::Quote), date),
            "quotation_Maria_Silva_2026-08-25.pdf"
        );
        assert_eq!(
            suggested_filename(&record(DocumentKind::Contract), date),
            "contract_Maria_Silva_2026-08-25.pdf"
        );
    }

    #[test]
    fn test_kind_defaults_to_contract() {
        let json = r#"{"clientName":"A","clientPhone":"1"}"#;
        let rec: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.document_kind, DocumentKind::Contract);
        assert!(rec.services.is_empty());
    }

    #[test]
    fn test_camel_case_deserialization() {
        let json = r#"{
            "clientName": "Maria Silva",
            "clientPhone": "11999999999",
            "documentKind": "quote",
            "documentDate": "2026-08-25",
            "services": [
                { "id": "a", "description": "Hosting", "value": 100.0, "discount": 10.0 }
            ]
        }"#;
        let rec: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.document_kind, DocumentKind::Quote);
        assert_eq!(rec.services[0].description, "Hosting");
        assert_eq!(
            rec.document_date,
            NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
        );
    }

    #[test]
    fn test_validate_missing_fields() {
        let mut rec = record(DocumentKind::Quote);
        assert!(rec.validate().is_ok());
        rec.client_phone.clear();
        assert!(rec.validate().is_err());
        let mut rec = record(DocumentKind::Quote);
        rec.services.clear();
        assert!(rec.validate().is_err());
    }
}
