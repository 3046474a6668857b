//! Direct-to-printer dispatch over pooled engine sessions.
//!
//! A print request loads a document into a live engine session, sets the
//! target printer, submits the job with keyed attributes (copy count,
//! duplex mode, media), and closes the session document. The session is
//! borrowed from a [`docket_pool::SessionPool`] and released on every
//! exit path; a rejected printer name or a refused attribute never
//! leaks a connection or an open document handle.

mod attributes;
mod dispatcher;
mod error;
mod session;

pub use attributes::{duplex_mode, print_attributes, DuplexMode, PrintAttribute};
pub use dispatcher::PrintDispatcher;
pub use error::PrintError;
pub use session::{DocumentId, PrintSession, RenderedPrintSession};
