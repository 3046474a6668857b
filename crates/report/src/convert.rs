//! Pluggable conversion from rendered artifacts to output bytes.

use crate::engine::EngineError;
use std::collections::HashMap;

/// Converts a rendered report artifact into one output format.
pub trait Converter<A>: Send + Sync {
    /// The MIME type this converter produces.
    fn mime_type(&self) -> &'static str;

    /// The file extension for documents in this format.
    fn extension(&self) -> &'static str;

    fn convert(&self, artifact: &A) -> Result<Vec<u8>, EngineError>;
}

/// Maps output format identifiers to converters.
///
/// Adding a format means registering another converter; the generation
/// facade's control flow never changes.
pub struct ConverterRegistry<A> {
    converters: HashMap<&'static str, Box<dyn Converter<A>>>,
}

impl<A> ConverterRegistry<A> {
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Registers a converter under its MIME type, replacing any previous
    /// registration for that type.
    pub fn register(&mut self, converter: Box<dyn Converter<A>>) {
        self.converters.insert(converter.mime_type(), converter);
    }

    pub fn supports(&self, mime_type: &str) -> bool {
        self.converters.contains_key(mime_type)
    }

    pub fn get(&self, mime_type: &str) -> Option<&dyn Converter<A>> {
        self.converters.get(mime_type).map(|c| c.as_ref())
    }
}

impl<A> Default for ConverterRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}
