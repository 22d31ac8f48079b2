//! # Error Handling
//!
//! This module defines the error type shared by every part of the `tiapp-xml`
//! library. It uses the `thiserror` library to build an `Error` enum covering
//! the ways loading, mutating, or writing a descriptor can fail.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all library failures. Each variant carries the
//!   context needed to produce a useful diagnostic.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants cover:
//!
//! - A descriptor file that does not exist.
//! - Malformed XML content.
//! - Invalid arguments passed to an accessor (for example an empty property
//!   name).
//! - Failures reported by the XML tree while mutating or serializing.
//! - I/O errors.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for tiapp-xml operations
#[derive(Error, Debug)]
pub enum Error {
    /// The descriptor file was not found at the given path.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The descriptor content is not well-formed XML.
    ///
    /// Includes the file path when the content came from disk.
    #[error("XML parsing error{}: {message}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Parse {
        message: String,
        path: Option<PathBuf>,
    },

    /// A required argument was missing or invalid.
    #[error("Invalid argument: {message}")]
    Argument { message: String },

    /// The XML tree rejected a mutation or could not be serialized.
    #[error("XML tree error: {message}")]
    Xml { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Error::Argument {
            message: message.into(),
        }
    }

    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Error::Xml {
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
