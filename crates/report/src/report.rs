//! The report facade: fill, format negotiation, generation, direct print.

use crate::convert::ConverterRegistry;
use crate::engine::{CompiledReport, RenderEngine, TemplateSet};
use crate::error::ReportError;
use docket_datasource::{CollectionFieldsRegistry, ObjectDataSource};
use docket_pool::SessionFactory;
use docket_print::{PrintDispatcher, RenderedPrintSession};
use docket_traits::{ArchetypeService, DocumentStore};
use docket_types::{formats, Document, ParameterType, PrintProperties, ReportParameters, SharedObject};
use log::{debug, info};
use std::sync::Arc;

/// Generates documents from business objects using one compiled template.
///
/// Stateless across calls: each generation or print request resolves its
/// own parameters, builds its own data source and produces its own
/// rendered artifact. Instances may be shared freely between request
/// threads.
pub struct ObjectReport<E: RenderEngine> {
    engine: Arc<E>,
    templates: TemplateSet<E::Template>,
    archetypes: Arc<dyn ArchetypeService>,
    documents: Arc<dyn DocumentStore>,
    converters: Arc<ConverterRegistry<E::Artifact>>,
    collection_fields: Arc<CollectionFieldsRegistry>,
}

impl<E: RenderEngine> std::fmt::Debug for ObjectReport<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectReport").finish_non_exhaustive()
    }
}

impl<E: RenderEngine> ObjectReport<E> {
    pub fn new(
        engine: Arc<E>,
        templates: TemplateSet<E::Template>,
        archetypes: Arc<dyn ArchetypeService>,
        documents: Arc<dyn DocumentStore>,
        converters: Arc<ConverterRegistry<E::Artifact>>,
    ) -> Self {
        Self {
            engine,
            templates,
            archetypes,
            documents,
            converters,
            collection_fields: Arc::new(CollectionFieldsRegistry::new()),
        }
    }

    /// Replaces the registry that selects display fields when the engine
    /// expands a collection field into a sub-source.
    pub fn with_collection_fields(mut self, registry: Arc<CollectionFieldsRegistry>) -> Self {
        self.collection_fields = registry;
        self
    }

    /// The template's name, used to name generated documents.
    pub fn name(&self) -> &str {
        self.templates.main().name()
    }

    /// The parameters this report accepts.
    pub fn parameter_types(&self) -> &[ParameterType] {
        self.templates.main().parameter_types()
    }

    /// Fills the template with `objects`, producing the engine's rendered
    /// artifact.
    ///
    /// Parameters are validated and merged with declared defaults first;
    /// engine failures surface as [`ReportError::Generation`] with the
    /// engine's diagnostic preserved.
    pub fn fill(
        &self,
        objects: Vec<SharedObject>,
        parameters: &ReportParameters,
    ) -> Result<E::Artifact, ReportError> {
        let resolved = parameters.resolve(self.parameter_types())?;
        let mut source = ObjectDataSource::new(objects, self.archetypes.clone())?
            .with_collection_fields(self.collection_fields.clone());
        debug!("filling report '{}'", self.name());
        self.engine
            .fill(&self.templates, &resolved, &mut source)
            .map_err(|err| ReportError::Generation {
                name: self.name().to_string(),
                message: err.to_string(),
            })
    }

    /// Generates a document, negotiating the output format from the
    /// caller's ordered MIME type preferences.
    ///
    /// The first requested type that is both whitelisted for reports and
    /// backed by a registered converter wins. With no match the call
    /// fails before any rendering work.
    pub fn generate(
        &self,
        objects: Vec<SharedObject>,
        parameters: &ReportParameters,
        mime_types: &[&str],
    ) -> Result<Document, ReportError> {
        let mime_type = self.negotiate(mime_types)?;
        let artifact = self.fill(objects, parameters)?;
        let converter = self
            .converters
            .get(mime_type)
            .ok_or_else(|| ReportError::UnsupportedFormat {
                requested: vec![mime_type.to_string()],
            })?;
        let data = converter
            .convert(&artifact)
            .map_err(|err| ReportError::Generation {
                name: self.name().to_string(),
                message: err.to_string(),
            })?;
        let name = format!("{}.{}", self.name(), converter.extension());
        info!("generated '{}' ({} bytes, {})", name, data.len(), mime_type);
        Ok(self.documents.create(&name, mime_type, data)?)
    }

    /// Fills the template and prints the rendered artifact directly,
    /// bypassing document materialisation.
    pub fn print<F>(
        &self,
        objects: Vec<SharedObject>,
        parameters: &ReportParameters,
        properties: &PrintProperties,
        dispatcher: &PrintDispatcher<F>,
    ) -> Result<(), ReportError>
    where
        F: SessionFactory,
        F::Session: RenderedPrintSession<E::Artifact>,
    {
        let artifact = self.fill(objects, parameters)?;
        dispatcher.print_rendered(&artifact, self.name(), properties)?;
        Ok(())
    }

    fn negotiate<'a>(&self, mime_types: &[&'a str]) -> Result<&'a str, ReportError> {
        mime_types
            .iter()
            .copied()
            .find(|mime| formats::is_report_type(mime) && self.converters.supports(mime))
            .ok_or_else(|| ReportError::UnsupportedFormat {
                requested: mime_types.iter().map(|s| s.to_string()).collect(),
            })
    }
}
