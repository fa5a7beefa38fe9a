// One error type for the whole program.
// Every variant states *where* things went wrong; main.rs decides how each one ends the process.
use std::collections::TryReserveError;

use thiserror::Error;

use crate::types::PixelFormat;

#[derive(Debug, Error)]
pub enum Error {
    // Opening the window / display session failed
    #[error("display capability missing: {0}")]
    Capability(String),

    // The window cannot take our pixel layout
    #[error("{0} not available")]
    UnsupportedFormat(PixelFormat),

    // Backing memory for a frame could not be reserved
    #[error("creating a buffer for {bytes} B failed: {source}")]
    Allocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },

    // Pool had nothing to hand out on the very first redraw
    #[error("failed to create the first buffer")]
    NoFirstBuffer,

    // Both slots still owned by the window on a later redraw
    #[error("both buffers busy at redraw, presenter bug?")]
    BothBuffersBusy,

    // The event loop cannot continue (window closed, Escape, update failure)
    #[error("dispatch ended: {0}")]
    Dispatch(String),

    // Geometry or flags that the simulators cannot run on
    #[error("invalid configuration: {0}")]
    Config(String),

    // Installing the Ctrl+C handler failed
    #[error("installing interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl Error {
    /// Errors that break the double-buffering contract. The process aborts on these
    /// instead of dropping a frame.
    pub fn is_pool_violation(&self) -> bool {
        matches!(
            self,
            Error::NoFirstBuffer | Error::BothBuffersBusy | Error::Allocation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_diagnostics_are_distinct() {
        let first = Error::NoFirstBuffer.to_string();
        let later = Error::BothBuffersBusy.to_string();
        assert_ne!(first, later);
        assert!(first.contains("first"));
        assert!(later.contains("both buffers busy"));
    }

    #[test]
    fn only_pool_errors_abort() {
        assert!(Error::NoFirstBuffer.is_pool_violation());
        assert!(Error::BothBuffersBusy.is_pool_violation());
        assert!(!Error::Dispatch("window closed".into()).is_pool_violation());
        assert!(!Error::UnsupportedFormat(PixelFormat::Xrgb8888).is_pool_violation());
    }
}
