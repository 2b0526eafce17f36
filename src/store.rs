//! # Persistence Collaborator
//!
//! Opaque record storage for documents: save, update, list/filter, delete,
//! status updates, and quote-to-contract conversion. The renderer never
//! calls this (it only consumes a `DocumentRecord`), so the store lives
//! behind a trait and the core stays storage-agnostic.
//!
//! Each persisted envelope denormalizes the computed totals and a
//! title/summary pair next to the full record, so list views never recompute
//! financials. The store does not enforce status transitions; callers own
//! the workflow.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{display_title, DocumentKind, DocumentRecord};
use crate::money;

/// Workflow status of a persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Contracted,
}

/// A stored document: identity, audit timestamps, workflow status, and
/// denormalized totals alongside the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub summary: String,
    pub kind: DocumentKind,
    pub status: DocumentStatus,
    pub total: f64,
    pub discount: f64,
    pub client_name: String,
    /// Set on contracts created by quote conversion: the originating quote.
    pub source_document_id: Option<String>,
    /// The full record, kept opaque for re-rendering and editing.
    pub record: DocumentRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn summary_for(record: &DocumentRecord) -> String {
    let noun = match record.document_kind {
        DocumentKind::Contract => "Contrato",
        DocumentKind::Quote => "Orçamento",
    };
    format!(
        "{} para {} com {} serviço(s)",
        noun,
        record.client_name,
        record.services.len()
    )
}

/// Storage operations the application layer depends on.
pub trait DocumentStore {
    fn save(
        &mut self,
        user_id: &str,
        record: &DocumentRecord,
        status: DocumentStatus,
    ) -> Result<PersistedDocument, StoreError>;

    fn update(
        &mut self,
        id: &str,
        record: &DocumentRecord,
        status: Option<DocumentStatus>,
    ) -> Result<PersistedDocument, StoreError>;

    fn get(&self, id: &str) -> Result<Option<PersistedDocument>, StoreError>;

    /// Documents for one user, newest first, optionally filtered by kind.
    fn list(
        &self,
        user_id: &str,
        kind: Option<DocumentKind>,
    ) -> Result<Vec<PersistedDocument>, StoreError>;

    fn delete(&mut self, id: &str) -> Result<(), StoreError>;

    fn update_status(
        &mut self,
        id: &str,
        status: DocumentStatus,
    ) -> Result<PersistedDocument, StoreError>;

    /// Create a new draft contract from an existing quote, keeping a
    /// back-reference to the source quote. The quote itself is untouched.
    fn convert_quote_to_contract(
        &mut self,
        user_id: &str,
        quote_id: &str,
        record: &DocumentRecord,
    ) -> Result<PersistedDocument, StoreError>;
}

/// In-memory store, primarily for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, PersistedDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn envelope(
        user_id: &str,
        record: &DocumentRecord,
        status: DocumentStatus,
        source_document_id: Option<String>,
    ) -> PersistedDocument {
        let now = Utc::now();
        PersistedDocument {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: display_title(record),
            summary: summary_for(record),
            kind: record.document_kind,
            status,
            total: money::net_total(&record.services),
            discount: money::discount_total(&record.services),
            client_name: record.client_name.clone(),
            source_document_id,
            record: record.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl DocumentStore for MemoryStore {
    fn save(
        &mut self,
        user_id: &str,
        record: &DocumentRecord,
        status: DocumentStatus,
    ) -> Result<PersistedDocument, StoreError> {
        let doc = Self::envelope(user_id, record, status, None);
        self.documents.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    fn update(
        &mut self,
        id: &str,
        record: &DocumentRecord,
        status: Option<DocumentStatus>,
    ) -> Result<PersistedDocument, StoreError> {
        let doc = self
            .documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        doc.title = display_title(record);
        doc.summary = summary_for(record);
        doc.kind = record.document_kind;
        doc.total = money::net_total(&record.services);
        doc.discount = money::discount_total(&record.services);
        doc.client_name = record.client_name.clone();
        doc.record = record.clone();
        if let Some(status) = status {
            doc.status = status;
        }
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    fn get(&self, id: &str) -> Result<Option<PersistedDocument>, StoreError> {
        Ok(self.documents.get(id).cloned())
    }

    fn list(
        &self,
        user_id: &str,
        kind: Option<DocumentKind>,
    ) -> Result<Vec<PersistedDocument>, StoreError> {
        let mut docs: Vec<PersistedDocument> = self
            .documents
            .values()
            .filter(|d| d.user_id == user_id)
            .filter(|d| kind.map_or(true, |k| d.kind == k))
            .cloned()
            .collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update_status(
        &mut self,
        id: &str,
        status: DocumentStatus,
    ) -> Result<PersistedDocument, StoreError> {
        let doc = self
            .documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        doc.status = status;
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    fn convert_quote_to_contract(
        &mut self,
        user_id: &str,
        quote_id: &str,
        record: &DocumentRecord,
    ) -> Result<PersistedDocument, StoreError> {
        let source = self
            .documents
            .get(quote_id)
            .ok_or_else(|| StoreError::NotFound(quote_id.to_string()))?;
        if source.kind != DocumentKind::Quote {
            return Err(StoreError::NotAQuote(quote_id.to_string()));
        }

        let mut contract_record = record.clone();
        contract_record.document_kind = DocumentKind::Contract;

        let doc = Self::envelope(
            user_id,
            &contract_record,
            DocumentStatus::Draft,
            Some(quote_id.to_string()),
        );
        self.documents.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceLine;
    use pretty_assertions::assert_eq;

    fn record(kind: DocumentKind, name: &str) -> DocumentRecord {
        DocumentRecord {
            client_name: name.to_string(),
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
    fn test_save_denormalizes_totals() {
        let mut store = MemoryStore::new();
        let doc = store
            .save("user-1", &record(DocumentKind::Quote, "Maria"), DocumentStatus::Draft)
            .unwrap();
        assert_eq!(doc.total, 90.0);
        assert_eq!(doc.discount, 10.0);
        assert_eq!(doc.title, "Orçamento - Maria");
        assert_eq!(doc.summary, "Orçamento para Maria com 1 serviço(s)");
        assert_eq!(doc.status, DocumentStatus::Draft);
    }

    #[test]
    fn test_update_refreshes_totals_and_status() {
        let mut store = MemoryStore::new();
        let doc = store
            .save("user-1", &record(DocumentKind::Quote, "Maria"), DocumentStatus::Draft)
            .unwrap();

        let mut changed = record(DocumentKind::Quote, "Maria");
        changed.services[0].discount = 0.0;
        let updated = store
            .update(&doc.id, &changed, Some(DocumentStatus::Sent))
            .unwrap();
        assert_eq!(updated.total, 100.0);
        assert_eq!(updated.status, DocumentStatus::Sent);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store
            .update("nope", &record(DocumentKind::Quote, "Maria"), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_list_filters_by_kind_and_user() {
        let mut store = MemoryStore::new();
        store
            .save("user-1", &record(DocumentKind::Quote, "A"), DocumentStatus::Draft)
            .unwrap();
        store
            .save("user-1", &record(DocumentKind::Contract, "B"), DocumentStatus::Draft)
            .unwrap();
        store
            .save("user-2", &record(DocumentKind::Quote, "C"), DocumentStatus::Draft)
            .unwrap();

        assert_eq!(store.list("user-1", None).unwrap().len(), 2);
        let quotes = store.list("user-1", Some(DocumentKind::Quote)).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].client_name, "A");
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        let doc = store
            .save("user-1", &record(DocumentKind::Quote, "A"), DocumentStatus::Draft)
            .unwrap();
        store.delete(&doc.id).unwrap();
        assert!(store.get(&doc.id).unwrap().is_none());
        assert!(matches!(
            store.delete(&doc.id).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_convert_quote_to_contract() {
        let mut store = MemoryStore::new();
        let quote = store
            .save("user-1", &record(DocumentKind::Quote, "Maria"), DocumentStatus::Accepted)
            .unwrap();

        let contract = store
            .convert_quote_to_contract("user-1", &quote.id, &quote.record.clone())
            .unwrap();
        assert_eq!(contract.kind, DocumentKind::Contract);
        assert_eq!(contract.status, DocumentStatus::Draft);
        assert_eq!(contract.title, "Contrato - Maria");
        assert_eq!(contract.source_document_id.as_deref(), Some(quote.id.as_str()));
        // The source quote is untouched.
        assert_eq!(
            store.get(&quote.id).unwrap().unwrap().kind,
            DocumentKind::Quote
        );
    }

    #[test]
    fn test_convert_rejects_non_quote() {
        let mut store = MemoryStore::new();
        let contract = store
            .save("user-1", &record(DocumentKind::Contract, "Maria"), DocumentStatus::Draft)
            .unwrap();
        let err = store
            .convert_quote_to_contract("user-1", &contract.id, &contract.record.clone())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotAQuote(_)));
    }
}
