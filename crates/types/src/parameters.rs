//! Report parameter declarations and caller-supplied parameter sets.

use crate::value::{Value, ValueType};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while resolving caller-supplied parameters against a
/// template's declared parameter types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("missing required parameter '{name}'")]
    Missing { name: String },

    #[error("parameter '{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        actual: ValueType,
    },
}

/// Declares one parameter a report accepts.
///
/// Parameter types are produced by template inspection and never change
/// for a given template version.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterType {
    name: String,
    value_type: ValueType,
    required: bool,
    default: Option<Value>,
}

impl ParameterType {
    pub fn new(name: impl Into<String>, value_type: ValueType, required: bool) -> Self {
        Self {
            name: name.into(),
            value_type,
            required,
            default: None,
        }
    }

    /// Attaches a default value, used when the caller supplies nothing.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Caller-supplied parameter values for one generation request.
///
/// Values are type-erased here; [`ReportParameters::resolve`] validates
/// them against the template's [`ParameterType`] set at fill time.
#[derive(Debug, Clone, Default)]
pub struct ReportParameters {
    values: HashMap<String, Value>,
}

impl ReportParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Validates supplied values against `types`, merging in declared
    /// defaults for anything the caller omitted.
    ///
    /// Supplied parameters without a declaration pass through unchanged;
    /// the rendering engine decides whether it can use them.
    pub fn resolve(&self, types: &[ParameterType]) -> Result<ResolvedParameters, ParameterError> {
        let mut resolved = self.values.clone();
        for parameter in types {
            match resolved.get(parameter.name()) {
                Some(value) => {
                    if !value.conforms_to(parameter.value_type()) {
                        return Err(ParameterError::TypeMismatch {
                            name: parameter.name().to_string(),
                            expected: parameter.value_type(),
                            // conforms_to only fails for non-null values
                            actual: value.value_type().unwrap_or(ValueType::Text),
                        });
                    }
                }
                None => {
                    if let Some(default) = parameter.default() {
                        resolved.insert(parameter.name().to_string(), default.clone());
                    } else if parameter.is_required() {
                        return Err(ParameterError::Missing {
                            name: parameter.name().to_string(),
                        });
                    }
                }
            }
        }
        Ok(ResolvedParameters { values: resolved })
    }
}

/// A validated parameter set, ready to hand to a rendering engine.
#[derive(Debug, Clone, Default)]
pub struct ResolvedParameters {
    values: HashMap<String, Value>,
}

impl ResolvedParameters {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
