use docket_datasource::DataSourceError;
use docket_print::PrintError;
use docket_traits::{ArchetypeError, DocumentError, ResolveError};
use docket_types::ParameterError;
use thiserror::Error;

/// Error type for report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// None of the requested MIME types intersect the supported
    /// whitelist. Raised before any rendering work.
    #[error("unsupported mime types: {requested:?}")]
    UnsupportedFormat { requested: Vec<String> },

    /// Template fill or conversion failed. The engine's diagnostic is
    /// preserved; retrying would repeat the failure.
    #[error("failed to generate report '{name}': {message}")]
    Generation { name: String, message: String },

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Archetype(#[from] ArchetypeError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Print(#[from] PrintError),
}
