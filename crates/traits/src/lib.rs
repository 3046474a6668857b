pub mod archetype;
pub mod store;
pub mod template;

pub use archetype::{
    ArchetypeDescriptor, ArchetypeError, ArchetypeService, InMemoryArchetypeService,
    NodeDescriptor,
};
pub use store::{DocumentError, DocumentStore, InMemoryDocumentStore};
pub use template::{InMemoryTemplateResolver, ResolveError, TemplateResolver};
