// Error taxonomy for the reconciler

//! Error types
//!
//! Every failure a tick can hit maps onto one [`ErrorClass`]. The daemon never
//! retries within a tick; each class is simply logged and the next poll tries
//! again.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hostsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the reconciler and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// The OS interface table could not be queried
    #[error("failed to query interface table: {0}")]
    InterfaceLookup(#[source] std::io::Error),

    /// The designated interface is absent from the interface table
    #[error("interface '{0}' not found or has no addresses")]
    InterfaceNotFound(String),

    /// The file naming the designated interface is missing, empty or invalid
    #[error("cannot determine interface from {path}: {reason}")]
    MainInterfaceFile {
        /// Path of the main-interface file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// The OS did not report a usable hostname
    #[error("hostname unavailable")]
    HostnameUnavailable,

    /// The template file could not be read
    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        /// Template path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The template engine rejected the template or context
    #[error("failed to render template: {0}")]
    TemplateRender(String),

    /// The destination file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification used for logging aborted ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Interface table, main-interface file or hostname could not be read
    Read,
    /// Template missing or rejected by the engine
    Render,
    /// Destination could not be written
    Write,
}

impl Error {
    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::InterfaceLookup(_)
            | Error::InterfaceNotFound(_)
            | Error::MainInterfaceFile { .. }
            | Error::HostnameUnavailable => ErrorClass::Read,
            Error::TemplateRead { .. } | Error::TemplateRender(_) => ErrorClass::Render,
            Error::Write { .. } => ErrorClass::Write,
        }
    }
}
