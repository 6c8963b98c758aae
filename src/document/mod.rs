// src/document/mod.rs
pub mod decode;

use std::path::Path;

use serde::Serialize;

use crate::utils::error::DecodeError;
pub use decode::{decode, is_supported};

/// A loaded syllabus: its identifier (the path as given) and decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let id = id.into();
        let name = Path::new(&id)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.clone());
        Self { id, name, text: text.into() }
    }
}

/// Reads and decodes a document from disk, choosing the decoder by extension.
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document, DecodeError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if !is_supported(extension) {
        return Err(DecodeError::UnsupportedFormat(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    let text = decode(&bytes, extension)?;

    Ok(Document::new(path.to_string_lossy(), text))
}

/// Insertion-ordered set of loaded documents keyed by id.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document unless one with the same id is already loaded.
    pub fn insert(&mut self, document: Document) -> bool {
        if self.contains(&document.id) {
            tracing::debug!("Document already loaded, skipping: {}", document.id);
            return false;
        }
        self.documents.push(document);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Document> {
        let idx = self.documents.iter().position(|d| d.id == id)?;
        Some(self.documents.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<'a> IntoIterator for &'a DocumentStore {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
