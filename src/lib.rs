//! Report generation and pooled print dispatch for business records.
//!
//! The crate turns business objects plus a compiled template into
//! rendered documents (PDF or RTF), or submits them directly to a
//! physical printer over a bounded pool of engine sessions.
//!
//! ## Crate map
//!
//! - [`docket_types`]: parameters, print properties, documents, formats
//! - [`docket_traits`]: seams to the archetype service, template storage
//!   and document persistence
//! - [`docket_datasource`]: row-oriented adapters over business objects
//! - [`docket_report`]: the render-engine seam, converter registry and
//!   report facade
//! - [`docket_pool`]: the bounded engine-session pool
//! - [`docket_print`]: the print dispatcher
//!
//! This integration crate re-exports the public surface of each.

pub use docket_datasource::{
    CollectionDataSource, CollectionFields, CollectionFieldsRegistry, DataSource,
    DataSourceError, DefaultCollectionFields, ObjectDataSource, RelationshipFields,
};
pub use docket_pool::{
    EngineSession, PoolConfig, PoolError, PoolStats, PooledSession, SessionFactory, SessionPool,
};
pub use docket_print::{
    duplex_mode, print_attributes, DocumentId, DuplexMode, PrintAttribute, PrintDispatcher,
    PrintError, PrintSession, RenderedPrintSession,
};
pub use docket_report::{
    CompiledReport, Converter, ConverterRegistry, EngineError, ObjectReport, RenderEngine,
    ReportError, ReportFactory, TemplateSet,
};
pub use docket_traits::{
    ArchetypeDescriptor, ArchetypeError, ArchetypeService, DocumentError, DocumentStore,
    InMemoryArchetypeService, InMemoryDocumentStore, InMemoryTemplateResolver, NodeDescriptor,
    ResolveError, TemplateResolver,
};
pub use docket_types::{
    formats, BusinessObject, Document, FieldValue, MediaSize, MediaTray, ObjectRef,
    ParameterError, ParameterType, PrintProperties, ReportParameters, ResolvedParameters,
    SharedObject, Sides, Value, ValueType,
};
