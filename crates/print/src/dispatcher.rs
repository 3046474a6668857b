//! The print dispatcher: scoped session acquisition around job submission.

use crate::attributes::print_attributes;
use crate::error::PrintError;
use crate::session::{DocumentId, PrintSession, RenderedPrintSession};
use docket_pool::{SessionFactory, SessionPool};
use docket_types::{Document, PrintProperties};
use log::info;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Submits print jobs over pooled engine sessions.
///
/// Every print call acquires a session, uses it, and releases it via the
/// pool handle's RAII guard. An error anywhere in the submission path
/// (bad printer name, rejected attribute, engine failure) still returns
/// the session to the pool and closes the session document.
pub struct PrintDispatcher<F: SessionFactory> {
    pool: Arc<SessionPool<F>>,
}

impl<F: SessionFactory> PrintDispatcher<F> {
    pub fn new(pool: Arc<SessionPool<F>>) -> Self {
        Self { pool }
    }

    /// Prints a stored document with full print properties.
    pub fn print_document(
        &self,
        document: &Document,
        properties: &PrintProperties,
    ) -> Result<(), PrintError>
    where
        F::Session: PrintSession,
    {
        let mut session = self.pool.acquire()?;
        dispatch(
            &mut *session,
            |session| session.open_document(document),
            document.name(),
            properties,
        )
    }

    /// Prints a single copy of a stored document on the named printer.
    pub fn print_to(&self, document: &Document, printer: &str) -> Result<(), PrintError>
    where
        F::Session: PrintSession,
    {
        self.print_document(document, &PrintProperties::new(printer))
    }

    /// Prints `copies` copies of a stored document on the named printer.
    pub fn print_copies(
        &self,
        document: &Document,
        printer: &str,
        copies: NonZeroU32,
    ) -> Result<(), PrintError>
    where
        F::Session: PrintSession,
    {
        self.print_document(document, &PrintProperties::new(printer).with_copies(copies))
    }

    /// Prints a rendered report artifact directly, skipping document
    /// materialisation.
    pub fn print_rendered<A>(
        &self,
        artifact: &A,
        name: &str,
        properties: &PrintProperties,
    ) -> Result<(), PrintError>
    where
        F::Session: RenderedPrintSession<A>,
    {
        let mut session = self.pool.acquire()?;
        dispatch(
            &mut *session,
            |session| session.open_rendered(artifact),
            name,
            properties,
        )
    }
}

/// Runs the open/configure/print/close sequence on a borrowed session.
///
/// The printer name is validated before the session document is opened;
/// the document is closed exactly once whether or not submission
/// succeeded, with a submission error taking precedence over a close
/// error.
fn dispatch<S, O>(
    session: &mut S,
    open: O,
    name: &str,
    properties: &PrintProperties,
) -> Result<(), PrintError>
where
    S: PrintSession,
    O: FnOnce(&mut S) -> Result<DocumentId, PrintError>,
{
    let printer = properties.printer().trim();
    if printer.is_empty() {
        return Err(PrintError::InvalidPrinter);
    }
    let document = open(session)?;
    let outcome = submit(session, document, name, printer, properties);
    let closed = session.close_document(document);
    outcome.and(closed)
}

fn submit<S: PrintSession>(
    session: &mut S,
    document: DocumentId,
    name: &str,
    printer: &str,
    properties: &PrintProperties,
) -> Result<(), PrintError> {
    session.set_printer(document, printer)?;
    info!(
        "printing '{}' on '{}' ({} copies)",
        name,
        printer,
        properties.copies()
    );
    session.print(document, &print_attributes(properties))
}
