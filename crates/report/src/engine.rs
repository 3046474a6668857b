//! The seam between this crate and the external rendering engine.

use docket_datasource::{DataSource, DataSourceError};
use docket_types::{ParameterType, ResolvedParameters};
use std::collections::HashMap;
use thiserror::Error;

/// Errors reported by a rendering engine.
///
/// The engine's own diagnostic text is preserved; callers see it wrapped
/// in a report-level error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("malformed template: {0}")]
    MalformedTemplate(String),

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

/// A compiled report template.
///
/// Opaque to this crate beyond its name, its declared parameters and the
/// sub-templates it references. The parameter set never changes for a
/// given template version.
pub trait CompiledReport: Send + Sync {
    fn name(&self) -> &str;

    /// The parameters this template accepts, discovered at compile time.
    fn parameter_types(&self) -> &[ParameterType];

    /// Names of sub-templates referenced by repeat regions.
    fn sub_template_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A main template together with the sub-templates it references.
///
/// Borrowed for the duration of a fill; never mutated by it.
pub struct TemplateSet<T> {
    main: T,
    subs: HashMap<String, T>,
}

impl<T: CompiledReport> TemplateSet<T> {
    pub fn new(main: T) -> Self {
        Self {
            main,
            subs: HashMap::new(),
        }
    }

    pub fn add_sub(&mut self, name: impl Into<String>, template: T) {
        self.subs.insert(name.into(), template);
    }

    pub fn main(&self) -> &T {
        &self.main
    }

    pub fn sub(&self, name: &str) -> Option<&T> {
        self.subs.get(name)
    }

    pub fn sub_count(&self) -> usize {
        self.subs.len()
    }
}

/// An external rendering engine.
///
/// `compile` turns template bytes into an executable definition; `fill`
/// binds one to a data source and validated parameters, producing an
/// ephemeral rendered artifact. Exactly one artifact exists per fill and
/// it is never shared across calls.
pub trait RenderEngine: Send + Sync {
    type Template: CompiledReport;
    type Artifact: Send;

    fn compile(&self, source: &[u8]) -> Result<Self::Template, EngineError>;

    fn fill(
        &self,
        templates: &TemplateSet<Self::Template>,
        parameters: &ResolvedParameters,
        source: &mut dyn DataSource,
    ) -> Result<Self::Artifact, EngineError>;
}
