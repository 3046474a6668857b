//! ArchetypeService trait for field metadata lookups.
//!
//! The archetype service is an external collaborator; the report core
//! consumes its descriptors to resolve field names and types but never
//! defines schemas itself. Lookup failures propagate unchanged; no retry
//! semantics are added here.

use docket_types::ValueType;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for archetype metadata lookups.
#[derive(Error, Debug, Clone)]
pub enum ArchetypeError {
    #[error("no archetype registered for '{0}'")]
    NotFound(String),

    #[error("archetype lookup for '{archetype}' failed: {message}")]
    LookupFailed { archetype: String, message: String },
}

/// Describes one field (node) of an archetype.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescriptor {
    name: String,
    value_type: ValueType,
    money: bool,
    collection: bool,
    reference: bool,
    /// Archetypes a reference or collection node may point at, most
    /// specific first.
    target_archetypes: Vec<String>,
}

impl NodeDescriptor {
    pub fn scalar(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            money: false,
            collection: false,
            reference: false,
            target_archetypes: Vec::new(),
        }
    }

    pub fn money(name: impl Into<String>) -> Self {
        Self {
            money: true,
            ..Self::scalar(name, ValueType::Decimal)
        }
    }

    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            reference: true,
            target_archetypes: vec![target.into()],
            ..Self::scalar(name, ValueType::Text)
        }
    }

    pub fn collection(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            collection: true,
            target_archetypes: vec![target.into()],
            ..Self::scalar(name, ValueType::Text)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_money(&self) -> bool {
        self.money
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    pub fn is_reference(&self) -> bool {
        self.reference
    }

    pub fn target_archetypes(&self) -> &[String] {
        &self.target_archetypes
    }

    /// The scalar type a rendering engine should bind this field as.
    ///
    /// Money is always fixed-precision decimal; collections and references
    /// bind as text, because engines only understand scalar
    /// text/number/date fields.
    pub fn value_type(&self) -> ValueType {
        if self.money {
            ValueType::Decimal
        } else if self.collection || self.reference {
            ValueType::Text
        } else {
            self.value_type
        }
    }
}

/// The full field metadata of one archetype.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchetypeDescriptor {
    name: String,
    nodes: Vec<NodeDescriptor>,
}

impl ArchetypeDescriptor {
    pub fn new(name: impl Into<String>, nodes: Vec<NodeDescriptor>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The archetype's nodes, in declaration order.
    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.name() == name)
    }
}

/// Field metadata lookups, keyed by archetype short name.
pub trait ArchetypeService: Send + Sync + Debug {
    /// Returns the descriptor for an archetype.
    fn descriptor(&self, archetype: &str) -> Result<ArchetypeDescriptor, ArchetypeError>;
}

/// An in-memory archetype service, pre-populated before use.
///
/// Chiefly for tests; production deployments wrap the real metadata
/// service behind [`ArchetypeService`].
#[derive(Debug, Default)]
pub struct InMemoryArchetypeService {
    descriptors: RwLock<HashMap<String, ArchetypeDescriptor>>,
}

impl InMemoryArchetypeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, descriptor: ArchetypeDescriptor) {
        if let Ok(mut descriptors) = self.descriptors.write() {
            descriptors.insert(descriptor.name().to_string(), descriptor);
        }
    }
}

impl ArchetypeService for InMemoryArchetypeService {
    fn descriptor(&self, archetype: &str) -> Result<ArchetypeDescriptor, ArchetypeError> {
        let descriptors = self
            .descriptors
            .read()
            .map_err(|_| ArchetypeError::LookupFailed {
                archetype: archetype.to_string(),
                message: "descriptor store lock poisoned".to_string(),
            })?;
        descriptors
            .get(archetype)
            .cloned()
            .ok_or_else(|| ArchetypeError::NotFound(archetype.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_node_binds_as_decimal() {
        let node = NodeDescriptor::money("total");
        assert!(node.is_money());
        assert_eq!(node.value_type(), ValueType::Decimal);
    }

    #[test]
    fn test_collection_and_reference_bind_as_text() {
        assert_eq!(
            NodeDescriptor::collection("items", "act.invoiceItem").value_type(),
            ValueType::Text
        );
        assert_eq!(
            NodeDescriptor::reference("customer", "party.customer").value_type(),
            ValueType::Text
        );
    }

    #[test]
    fn test_scalar_node_keeps_declared_type() {
        let node = NodeDescriptor::scalar("startTime", ValueType::Timestamp);
        assert_eq!(node.value_type(), ValueType::Timestamp);
    }

    #[test]
    fn test_in_memory_service_lookup() {
        let service = InMemoryArchetypeService::new();
        service.register(ArchetypeDescriptor::new(
            "party.customer",
            vec![NodeDescriptor::scalar("name", ValueType::Text)],
        ));

        let descriptor = service.descriptor("party.customer").unwrap();
        assert_eq!(descriptor.name(), "party.customer");
        assert!(descriptor.node("name").is_some());
        assert!(descriptor.node("missing").is_none());
    }

    #[test]
    fn test_in_memory_service_not_found() {
        let service = InMemoryArchetypeService::new();
        let result = service.descriptor("party.unknown");
        assert!(matches!(result, Err(ArchetypeError::NotFound(_))));
    }
}
