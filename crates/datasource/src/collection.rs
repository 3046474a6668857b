//! Sub-adapters for collection-valued fields.
//!
//! Templates that repeat a sub-template region per line item need the
//! collection expanded into its own row sequence. Which fields those rows
//! display depends on the collection's target type: a relationship
//! collection shows the target party's name, a plain detail collection
//! shows its scalar nodes. That choice is a capability
//! ([`CollectionFields`]) selected per target archetype, not a class
//! hierarchy.

use crate::object::scalar_value;
use crate::{DataSource, DataSourceError};
use docket_traits::{ArchetypeDescriptor, ArchetypeService};
use docket_types::{BusinessObject, FieldValue, SharedObject, Value};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Describes the fields to display for one kind of collection.
pub trait CollectionFields: Send + Sync {
    /// The ordered field names rows of this collection expose.
    ///
    /// Names may traverse a reference with a dotted path, e.g.
    /// `target.name` for the display name of a relationship's target.
    fn fields(&self, descriptor: &ArchetypeDescriptor) -> Vec<String>;
}

/// Fields for relationship collections: the related object's display
/// name (namespaced to the traversed side) and the relationship's own
/// description.
#[derive(Debug, Default)]
pub struct RelationshipFields;

impl CollectionFields for RelationshipFields {
    fn fields(&self, _descriptor: &ArchetypeDescriptor) -> Vec<String> {
        vec!["target.name".to_string(), "description".to_string()]
    }
}

/// Fallback fields: every scalar node of the item archetype, in
/// declaration order.
#[derive(Debug, Default)]
pub struct DefaultCollectionFields;

impl CollectionFields for DefaultCollectionFields {
    fn fields(&self, descriptor: &ArchetypeDescriptor) -> Vec<String> {
        descriptor
            .nodes()
            .iter()
            .filter(|node| !node.is_collection())
            .map(|node| node.name().to_string())
            .collect()
    }
}

/// Selects a [`CollectionFields`] capability by the collection's target
/// archetype, falling back to [`DefaultCollectionFields`].
pub struct CollectionFieldsRegistry {
    by_archetype: HashMap<String, Arc<dyn CollectionFields>>,
    fallback: Arc<dyn CollectionFields>,
}

impl CollectionFieldsRegistry {
    pub fn new() -> Self {
        Self {
            by_archetype: HashMap::new(),
            fallback: Arc::new(DefaultCollectionFields),
        }
    }

    pub fn register(
        &mut self,
        target_archetype: impl Into<String>,
        fields: Arc<dyn CollectionFields>,
    ) {
        self.by_archetype.insert(target_archetype.into(), fields);
    }

    pub fn select(&self, target_archetype: &str) -> &dyn CollectionFields {
        self.by_archetype
            .get(target_archetype)
            .unwrap_or(&self.fallback)
            .as_ref()
    }
}

impl Default for CollectionFieldsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Expands one collection-valued field of a parent object into its own
/// row sequence.
pub struct CollectionDataSource {
    items: Vec<SharedObject>,
    service: Arc<dyn ArchetypeService>,
    registry: Arc<CollectionFieldsRegistry>,
    descriptor: ArchetypeDescriptor,
    field_names: Vec<String>,
    current: Option<usize>,
}

impl CollectionDataSource {
    /// Creates a row sequence over `parent.node`, selecting display
    /// fields for the collection's target archetype from `registry`.
    pub fn new(
        parent: &dyn BusinessObject,
        node: &str,
        service: Arc<dyn ArchetypeService>,
        registry: Arc<CollectionFieldsRegistry>,
    ) -> Result<Self, DataSourceError> {
        let parent_descriptor = service.descriptor(parent.archetype())?;
        let node_descriptor = parent_descriptor
            .node(node)
            .ok_or_else(|| DataSourceError::UnknownField(node.to_string()))?;
        if !node_descriptor.is_collection() {
            return Err(DataSourceError::NotACollection(node.to_string()));
        }

        let items = match parent.field(node) {
            Some(FieldValue::Collection(items)) => items,
            _ => Vec::new(),
        };
        let target = node_descriptor
            .target_archetypes()
            .first()
            .cloned()
            .or_else(|| items.first().map(|item| item.archetype().to_string()))
            .unwrap_or_default();
        let descriptor = if target.is_empty() {
            ArchetypeDescriptor::default()
        } else {
            service.descriptor(&target)?
        };
        let field_names = registry.select(&target).fields(&descriptor);
        debug!(
            "collection source over '{}' ({} rows, target '{}')",
            node,
            items.len(),
            target
        );
        Ok(Self {
            items,
            service,
            registry,
            descriptor,
            field_names,
            current: None,
        })
    }

    fn current_item(&self) -> Result<&SharedObject, DataSourceError> {
        let index = self.current.ok_or(DataSourceError::NoCurrentRow)?;
        self.items.get(index).ok_or(DataSourceError::NoCurrentRow)
    }
}

impl DataSource for CollectionDataSource {
    fn field_names(&self) -> &[String] {
        &self.field_names
    }

    fn advance(&mut self) -> Result<bool, DataSourceError> {
        let next = match self.current {
            None => 0,
            Some(index) => index + 1,
        };
        if next < self.items.len() {
            self.current = Some(next);
            Ok(true)
        } else {
            self.current = Some(self.items.len());
            Ok(false)
        }
    }

    fn value(&self, field: &str) -> Result<Value, DataSourceError> {
        let item = self.current_item()?;
        // Dotted paths traverse one reference node and read the target's
        // display name.
        if let Some((reference_node, attribute)) = field.split_once('.') {
            if attribute != "name" {
                return Err(DataSourceError::UnknownField(field.to_string()));
            }
            return match item.field(reference_node) {
                Some(FieldValue::Reference(reference)) => Ok(Value::Text(reference.name)),
                Some(_) | None => Err(DataSourceError::UnknownField(field.to_string())),
            };
        }
        let node = self
            .descriptor
            .node(field)
            .ok_or_else(|| DataSourceError::UnknownField(field.to_string()))?;
        Ok(scalar_value(item.field(field), node))
    }

    fn collection(&self, field: &str) -> Result<Box<dyn DataSource>, DataSourceError> {
        let item = self.current_item()?;
        let source = CollectionDataSource::new(
            item.as_ref(),
            field,
            self.service.clone(),
            self.registry.clone(),
        )?;
        Ok(Box::new(source))
    }
}
