//! Builds reports from templates looked up by name or archetype.

use crate::convert::ConverterRegistry;
use crate::engine::{CompiledReport, RenderEngine, TemplateSet};
use crate::error::ReportError;
use crate::report::ObjectReport;
use docket_datasource::CollectionFieldsRegistry;
use docket_traits::{ArchetypeService, DocumentStore, TemplateResolver};
use log::debug;
use std::sync::Arc;

/// Creates [`ObjectReport`]s from externally stored templates.
///
/// An absent template is a normal outcome (`Ok(None)`): it means the
/// installation has nothing configured for that name or archetype, and
/// the caller decides what to do about it.
pub struct ReportFactory<E: RenderEngine> {
    engine: Arc<E>,
    resolver: Arc<dyn TemplateResolver>,
    archetypes: Arc<dyn ArchetypeService>,
    documents: Arc<dyn DocumentStore>,
    converters: Arc<ConverterRegistry<E::Artifact>>,
    collection_fields: Arc<CollectionFieldsRegistry>,
}

impl<E: RenderEngine> ReportFactory<E> {
    pub fn new(
        engine: Arc<E>,
        resolver: Arc<dyn TemplateResolver>,
        archetypes: Arc<dyn ArchetypeService>,
        documents: Arc<dyn DocumentStore>,
        converters: Arc<ConverterRegistry<E::Artifact>>,
    ) -> Self {
        Self {
            engine,
            resolver,
            archetypes,
            documents,
            converters,
            collection_fields: Arc::new(CollectionFieldsRegistry::new()),
        }
    }

    /// Replaces the collection display-field registry handed to every
    /// report this factory builds.
    pub fn with_collection_fields(mut self, registry: Arc<CollectionFieldsRegistry>) -> Self {
        self.collection_fields = registry;
        self
    }

    /// Builds the report for a named template, or `None` if no template
    /// with that name is configured.
    pub fn for_template(&self, name: &str) -> Result<Option<ObjectReport<E>>, ReportError> {
        match self.resolver.template(name)? {
            Some(source) => self.build(name, &source).map(Some),
            None => Ok(None),
        }
    }

    /// Builds the report configured for an archetype short name, or
    /// `None` if the archetype has no associated template.
    pub fn for_archetype(&self, archetype: &str) -> Result<Option<ObjectReport<E>>, ReportError> {
        match self.resolver.template_for_archetype(archetype)? {
            Some(source) => self.build(archetype, &source).map(Some),
            None => Ok(None),
        }
    }

    /// Compiles a template and every sub-template it references.
    fn build(&self, lookup_name: &str, source: &[u8]) -> Result<ObjectReport<E>, ReportError> {
        let main = self
            .engine
            .compile(source)
            .map_err(|err| ReportError::Generation {
                name: lookup_name.to_string(),
                message: err.to_string(),
            })?;
        let mut templates = TemplateSet::new(main);
        for sub_name in templates.main().sub_template_names() {
            let sub_source = self.resolver.template(&sub_name)?.ok_or_else(|| {
                ReportError::Generation {
                    name: lookup_name.to_string(),
                    message: format!("sub-template '{sub_name}' not found"),
                }
            })?;
            let sub = self
                .engine
                .compile(&sub_source)
                .map_err(|err| ReportError::Generation {
                    name: sub_name.clone(),
                    message: err.to_string(),
                })?;
            templates.add_sub(sub_name, sub);
        }
        debug!(
            "compiled report '{}' with {} sub-templates",
            templates.main().name(),
            templates.sub_count()
        );
        Ok(ObjectReport::new(
            self.engine.clone(),
            templates,
            self.archetypes.clone(),
            self.documents.clone(),
            self.converters.clone(),
        )
        .with_collection_fields(self.collection_fields.clone()))
    }
}
