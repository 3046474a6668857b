//! DocumentStore trait for persisting generated bytes.
//!
//! Persistence belongs to the surrounding application; the report core
//! hands finished bytes to a store and receives a [`Document`] back.

use docket_types::Document;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for document persistence.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("failed to store document '{name}': {message}")]
    StoreFailed { name: String, message: String },

    #[error("unsupported document type '{0}'")]
    UnsupportedType(String),
}

/// Creates persisted documents from raw bytes.
pub trait DocumentStore: Send + Sync + Debug {
    /// Persists `contents` under `name` with the given MIME type and
    /// returns the stored document.
    fn create(
        &self,
        name: &str,
        mime_type: &str,
        contents: Vec<u8>,
    ) -> Result<Document, DocumentError>;
}

/// An in-memory document store for tests and previews.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of documents created so far.
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn create(
        &self,
        name: &str,
        mime_type: &str,
        contents: Vec<u8>,
    ) -> Result<Document, DocumentError> {
        let document = Document::new(name, mime_type, contents);
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DocumentError::StoreFailed {
                name: name.to_string(),
                message: "document store lock poisoned".to_string(),
            })?;
        documents.push(document.clone());
        Ok(document)
    }
}
