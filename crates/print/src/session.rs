//! Session-side surface of print dispatch.

use crate::attributes::PrintAttribute;
use crate::error::PrintError;
use docket_pool::EngineSession;
use docket_types::Document;

/// Identifies a document loaded into an engine session.
///
/// Valid only within the session that issued it, and only until it is
/// closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// An engine session that can load and print persisted documents.
///
/// Implementations wrap the remote engine's actual API; the dispatcher
/// drives them through a fixed call sequence: open, set printer, print,
/// close. `close_document` is called exactly once per opened id.
pub trait PrintSession: EngineSession {
    /// Loads a persisted document into the session for printing.
    fn open_document(&mut self, document: &Document) -> Result<DocumentId, PrintError>;

    /// Selects the target printer for a loaded document.
    fn set_printer(&mut self, document: DocumentId, printer: &str) -> Result<(), PrintError>;

    /// Submits the print job with the given attributes, blocking until
    /// the engine reports completion when [`PrintAttribute::Wait`] is
    /// set.
    fn print(&mut self, document: DocumentId, attributes: &[PrintAttribute])
        -> Result<(), PrintError>;

    /// Closes a loaded document, releasing its engine-side resources.
    fn close_document(&mut self, document: DocumentId) -> Result<(), PrintError>;
}

/// A [`PrintSession`] that can also print a rendered report artifact
/// directly, without materialising it as a stored document first.
pub trait RenderedPrintSession<A>: PrintSession {
    /// Loads a rendered artifact into the session for printing.
    fn open_rendered(&mut self, artifact: &A) -> Result<DocumentId, PrintError>;
}
