//! Read-only view over an external business record.
//!
//! The business object model itself lives outside this workspace; reports
//! only need enough of it to read fields. `BusinessObject` is that minimal
//! surface: an archetype name identifying the record's schema, a display
//! name, and per-field raw values.

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// A shared, read-only handle to a business object.
pub type SharedObject = Arc<dyn BusinessObject>;

/// Field access over one business record.
///
/// Implementations come from the surrounding application; the report core
/// never constructs or mutates business objects.
pub trait BusinessObject: Send + Sync {
    /// The schema (archetype) short name of this object, e.g. `act.customerInvoice`.
    fn archetype(&self) -> &str;

    /// The object's display name.
    fn name(&self) -> &str;

    /// An optional human-readable description.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Returns the raw value of a field, or `None` if the object has no
    /// such field.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A lightweight reference to another business object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// The referenced object's archetype short name.
    pub archetype: String,
    /// The referenced object's persistent identifier.
    pub id: i64,
    /// The referenced object's display name.
    pub name: String,
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A raw field value as stored on a business object.
///
/// Scalars pass through unchanged; references and collections must be
/// coerced to scalar text before a rendering engine sees them.
#[derive(Clone)]
pub enum FieldValue {
    Scalar(Value),
    Reference(ObjectRef),
    Collection(Vec<SharedObject>),
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            FieldValue::Reference(object_ref) => {
                f.debug_tuple("Reference").field(object_ref).finish()
            }
            FieldValue::Collection(items) => f
                .debug_struct("Collection")
                .field("len", &items.len())
                .finish(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<ObjectRef> for FieldValue {
    fn from(value: ObjectRef) -> Self {
        FieldValue::Reference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_displays_name_not_id() {
        let reference = ObjectRef {
            archetype: "party.customer".into(),
            id: 9312,
            name: "Acme Pty Ltd".into(),
        };
        assert_eq!(reference.to_string(), "Acme Pty Ltd");
    }

    #[test]
    fn test_field_value_debug_elides_collection_contents() {
        let value = FieldValue::Collection(vec![]);
        assert_eq!(format!("{value:?}"), "Collection { len: 0 }");
    }
}
