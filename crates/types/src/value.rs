//! Scalar value model shared by report parameters and data source rows.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// The semantic type of a scalar value.
///
/// Rendering engines bind report fields to scalar text/number/date types
/// only; richer object-model values (references, collections) are coerced
/// to one of these before they reach an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Text,
    Int,
    /// Fixed-precision decimal. Money values always use this type so that
    /// financial documents never show binary-float rounding artifacts.
    Decimal,
    Bool,
    Date,
    Timestamp,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Text => "text",
            ValueType::Int => "int",
            ValueType::Decimal => "decimal",
            ValueType::Bool => "bool",
            ValueType::Date => "date",
            ValueType::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A type-erased scalar value.
///
/// This is the currency of the report boundary: caller-supplied parameters
/// arrive as `Value`s and data source rows yield `Value`s. Validation
/// against a declared [`ValueType`] happens at fill time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Int(i64),
    Decimal(Decimal),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Returns the value's type, or `None` for `Null`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(ValueType::Text),
            Value::Int(_) => Some(ValueType::Int),
            Value::Decimal(_) => Some(ValueType::Decimal),
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Date(_) => Some(ValueType::Date),
            Value::Timestamp(_) => Some(ValueType::Timestamp),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Checks whether this value can be bound to a field of `expected` type.
    ///
    /// `Null` binds to any type; integers widen to decimal fields.
    pub fn conforms_to(&self, expected: ValueType) -> bool {
        match self.value_type() {
            None => true,
            Some(actual) if actual == expected => true,
            Some(ValueType::Int) => expected == ValueType::Decimal,
            Some(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Timestamp(t) => write!(f, "{t}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}
