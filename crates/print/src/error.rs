use docket_pool::PoolError;
use thiserror::Error;

/// Error type for print dispatch.
#[derive(Error, Debug)]
pub enum PrintError {
    /// The print properties carry no printer name.
    #[error("no printer name specified")]
    InvalidPrinter,

    /// The remote engine rejected the print request.
    #[error("failed to print '{name}': {message}")]
    Failed { name: String, message: String },

    /// No engine session could be borrowed for the job.
    #[error(transparent)]
    Pool(#[from] PoolError),
}
