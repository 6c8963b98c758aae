// src/session.rs
use crate::document::{Document, DocumentStore};
use crate::export::Selection;

/// Front-end state: which documents are loaded, which one is being viewed,
/// and any text the user picked out of it. The extraction core never sees this.
#[derive(Debug, Default)]
pub struct Session {
    documents: DocumentStore,
    current: Option<String>,
    selected_text: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn load(&mut self, document: Document) -> bool {
        self.documents.insert(document)
    }

    /// Removes a document; clears the view state if it was the current one.
    pub fn unload(&mut self, id: &str) -> Option<Document> {
        let removed = self.documents.remove(id)?;
        if self.current.as_deref() == Some(id) {
            self.current = None;
            self.selected_text = None;
        }
        Some(removed)
    }

    /// Switches the current document. Any previous selection is dropped.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.documents.contains(id) {
            return false;
        }
        self.current = Some(id.to_string());
        self.selected_text = None;
        true
    }

    pub fn current(&self) -> Option<&Document> {
        self.current.as_deref().and_then(|id| self.documents.get(id))
    }

    /// Records selected text for the current document. Empty text clears it.
    pub fn set_selected_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.selected_text = if self.current.is_some() && !text.is_empty() {
            Some(text)
        } else {
            None
        };
    }

    pub fn selection(&self) -> Option<Selection> {
        Some(Selection {
            document_id: self.current.clone()?,
            text: self.selected_text.clone()?,
        })
    }
}
