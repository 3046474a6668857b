//! Report generation over an external rendering engine.
//!
//! The rendering engine itself (template compilation, layout, export) is
//! an external collaborator reached through the [`RenderEngine`] trait.
//! This crate owns everything around it:
//!
//! - the [`ConverterRegistry`], mapping output formats to converters
//! - the [`ObjectReport`] facade: fill, format negotiation, generate,
//!   direct print
//! - the [`ReportFactory`], building reports from templates looked up by
//!   name or archetype
//!
//! Only the fixed portable-document/rich-text whitelist is ever offered
//! for generation, regardless of what converters are registered.

mod convert;
mod engine;
mod error;
mod factory;
mod report;

pub use convert::{Converter, ConverterRegistry};
pub use engine::{CompiledReport, EngineError, RenderEngine, TemplateSet};
pub use error::ReportError;
pub use factory::ReportFactory;
pub use report::ObjectReport;
