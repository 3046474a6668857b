//! Row-oriented data sources over business objects.
//!
//! A rendering engine reads report fields from a [`DataSource`]: an
//! ordered set of field names, a forward-only cursor, and typed scalar
//! values. This crate adapts business objects (and collection-valued
//! fields inside them) to that shape, using archetype metadata to resolve
//! field names and coerce values:
//!
//! - money fields become fixed-precision decimals, never floats
//! - reference fields become the referenced object's display name
//! - collection fields become a textual summary of their items
//!
//! Data sources are single-pass and non-restartable, matching the
//! one-shot nature of a fill operation.

mod collection;
mod object;

pub use collection::{
    CollectionDataSource, CollectionFields, CollectionFieldsRegistry, DefaultCollectionFields,
    RelationshipFields,
};
pub use object::ObjectDataSource;

use docket_traits::ArchetypeError;
use docket_types::Value;
use thiserror::Error;

/// Errors raised while reading rows from a data source.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("no current row; call advance() first")]
    NoCurrentRow,

    #[error("field '{0}' is not a collection")]
    NotACollection(String),

    #[error(transparent)]
    Archetype(#[from] ArchetypeError),
}

/// A forward-only, row-oriented view over a sequence of objects.
///
/// The contract mirrors what rendering engines expect: enumerate the
/// field names once, then repeatedly advance and read scalar values.
/// Rewinding is not supported.
pub trait DataSource {
    /// The ordered field names rows of this source expose.
    fn field_names(&self) -> &[String];

    /// Moves to the next row. Returns `false` once the sequence is
    /// exhausted.
    fn advance(&mut self) -> Result<bool, DataSourceError>;

    /// Reads a field of the current row, coerced to a scalar value.
    fn value(&self, field: &str) -> Result<Value, DataSourceError>;

    /// Opens a sub-source over a collection-valued field of the current
    /// row.
    ///
    /// Engines call this to repeat a sub-template region once per item.
    /// The returned source is independent of its parent's cursor and
    /// exposes the display fields selected for the collection's target
    /// type.
    fn collection(&self, field: &str) -> Result<Box<dyn DataSource>, DataSourceError>;
}
