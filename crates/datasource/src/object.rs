//! Data source over a sequence of business objects.

use crate::collection::{CollectionDataSource, CollectionFieldsRegistry};
use crate::{DataSource, DataSourceError};
use docket_traits::{ArchetypeDescriptor, ArchetypeService, NodeDescriptor};
use docket_types::{FieldValue, SharedObject, Value};
use itertools::Itertools;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Adapts one object or a sequence of objects to the row/field access
/// pattern a rendering engine expects.
///
/// Field names and coercion rules come from the archetype descriptor of
/// the first object; all objects in one report share an archetype.
/// Collection-valued fields can be expanded into their own row
/// sequences through [`DataSource::collection`].
pub struct ObjectDataSource {
    objects: Vec<SharedObject>,
    service: Arc<dyn ArchetypeService>,
    registry: Arc<CollectionFieldsRegistry>,
    descriptor: ArchetypeDescriptor,
    field_names: Vec<String>,
    /// Index of the current row; `None` before the first `advance()`.
    current: Option<usize>,
}

impl ObjectDataSource {
    /// Creates a data source over `objects`, resolving field metadata
    /// through `service`.
    pub fn new(
        objects: Vec<SharedObject>,
        service: Arc<dyn ArchetypeService>,
    ) -> Result<Self, DataSourceError> {
        let descriptor = match objects.first() {
            Some(object) => service.descriptor(object.archetype())?,
            None => ArchetypeDescriptor::default(),
        };
        let field_names: Vec<String> = descriptor
            .nodes()
            .iter()
            .map(|node| node.name().to_string())
            .collect();
        debug!(
            "data source over {} objects of '{}' ({} fields)",
            objects.len(),
            descriptor.name(),
            field_names.len()
        );
        Ok(Self {
            objects,
            service,
            registry: Arc::new(CollectionFieldsRegistry::new()),
            descriptor,
            field_names,
            current: None,
        })
    }

    /// Convenience constructor for a single object.
    pub fn single(
        object: SharedObject,
        service: Arc<dyn ArchetypeService>,
    ) -> Result<Self, DataSourceError> {
        Self::new(vec![object], service)
    }

    /// Replaces the registry that selects display fields when a
    /// collection field is expanded into a sub-source.
    pub fn with_collection_fields(mut self, registry: Arc<CollectionFieldsRegistry>) -> Self {
        self.registry = registry;
        self
    }

    fn current_object(&self) -> Result<&SharedObject, DataSourceError> {
        let index = self.current.ok_or(DataSourceError::NoCurrentRow)?;
        self.objects.get(index).ok_or(DataSourceError::NoCurrentRow)
    }
}

impl DataSource for ObjectDataSource {
    fn field_names(&self) -> &[String] {
        &self.field_names
    }

    fn advance(&mut self) -> Result<bool, DataSourceError> {
        let next = match self.current {
            None => 0,
            Some(index) => index + 1,
        };
        if next < self.objects.len() {
            self.current = Some(next);
            Ok(true)
        } else {
            // Park the cursor past the end; the source is not restartable.
            self.current = Some(self.objects.len());
            Ok(false)
        }
    }

    fn value(&self, field: &str) -> Result<Value, DataSourceError> {
        let node = self
            .descriptor
            .node(field)
            .ok_or_else(|| DataSourceError::UnknownField(field.to_string()))?;
        let object = self.current_object()?;
        Ok(scalar_value(object.field(field), node))
    }

    fn collection(&self, field: &str) -> Result<Box<dyn DataSource>, DataSourceError> {
        let object = self.current_object()?;
        let source = CollectionDataSource::new(
            object.as_ref(),
            field,
            self.service.clone(),
            self.registry.clone(),
        )?;
        Ok(Box::new(source))
    }
}

/// Coerces a raw field value to the scalar type the node binds as.
///
/// Money values are normalised to fixed-precision decimals. References
/// render as the target's display name and collections as a summary of
/// their items' names, never as internal identifiers.
pub(crate) fn scalar_value(raw: Option<FieldValue>, node: &NodeDescriptor) -> Value {
    match raw {
        None => Value::Null,
        Some(FieldValue::Scalar(value)) => {
            if node.is_money() {
                match value {
                    Value::Int(i) => Value::Decimal(Decimal::from(i)),
                    other => other,
                }
            } else {
                value
            }
        }
        Some(FieldValue::Reference(reference)) => Value::Text(reference.name),
        Some(FieldValue::Collection(items)) => {
            Value::Text(items.iter().map(|item| item.name()).join(", "))
        }
    }
}
