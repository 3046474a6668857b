pub mod document;
pub mod formats;
pub mod object;
pub mod parameters;
pub mod print;
pub mod value;

pub use document::Document;
pub use object::{BusinessObject, FieldValue, ObjectRef, SharedObject};
pub use parameters::{ParameterError, ParameterType, ReportParameters, ResolvedParameters};
pub use print::{MediaSize, MediaTray, PrintProperties, Sides};
pub use value::{Value, ValueType};
