//! TemplateResolver trait for report template lookup.
//!
//! Templates live in external storage (a document archive, a database, a
//! deployment directory). The core borrows template bytes for the duration
//! of a fill and never persists or mutates them. An absent template is a
//! normal outcome, surfaced as `None` rather than an error.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for template lookups.
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("template lookup for '{name}' failed: {message}")]
    LookupFailed { name: String, message: String },
}

/// Looks up report template definitions.
pub trait TemplateResolver: Send + Sync + Debug {
    /// Returns the template with the given name, or `None` if no such
    /// template is configured.
    fn template(&self, name: &str) -> Result<Option<Vec<u8>>, ResolveError>;

    /// Returns the template configured for an archetype short name, or
    /// `None` if the archetype has no associated template.
    fn template_for_archetype(&self, archetype: &str) -> Result<Option<Vec<u8>>, ResolveError>;
}

/// An in-memory template resolver, pre-populated before use.
#[derive(Debug, Default)]
pub struct InMemoryTemplateResolver {
    by_name: RwLock<HashMap<String, Vec<u8>>>,
    by_archetype: RwLock<HashMap<String, String>>,
}

impl InMemoryTemplateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, name: impl Into<String>, source: Vec<u8>) {
        if let Ok(mut templates) = self.by_name.write() {
            templates.insert(name.into(), source);
        }
    }

    /// Associates an archetype with a named template.
    pub fn associate(&self, archetype: impl Into<String>, template_name: impl Into<String>) {
        if let Ok(mut names) = self.by_archetype.write() {
            names.insert(archetype.into(), template_name.into());
        }
    }
}

impl TemplateResolver for InMemoryTemplateResolver {
    fn template(&self, name: &str) -> Result<Option<Vec<u8>>, ResolveError> {
        let templates = self.by_name.read().map_err(|_| ResolveError::LookupFailed {
            name: name.to_string(),
            message: "template store lock poisoned".to_string(),
        })?;
        Ok(templates.get(name).cloned())
    }

    fn template_for_archetype(&self, archetype: &str) -> Result<Option<Vec<u8>>, ResolveError> {
        let names = self
            .by_archetype
            .read()
            .map_err(|_| ResolveError::LookupFailed {
                name: archetype.to_string(),
                message: "template store lock poisoned".to_string(),
            })?;
        match names.get(archetype) {
            Some(name) => self.template(name),
            None => Ok(None),
        }
    }
}
