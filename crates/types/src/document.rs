//! The terminal output of report generation: a named, typed byte blob.

/// A generated document.
///
/// Ownership transfers to the caller once a generation call returns one;
/// the report core keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    mime_type: String,
    contents: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            contents,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }
}
