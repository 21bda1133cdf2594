/*!
 * Error types for the yafc conversion library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::fmt;

use thiserror::Error;

/// A single validation issue: the field path that failed plus a message.
///
/// Every validator issue becomes one descriptor; the pipeline aggregates
/// them in the order the validator reported them, without deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Path of the offending field ("" for the whole payload)
    pub path: String,

    /// Human-readable description of the failure
    pub message: String,
}

impl ErrorDescriptor {
    /// Create a descriptor for a specific field path
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorDescriptor {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a descriptor for the payload as a whole
    pub fn root(message: impl Into<String>) -> Self {
        Self::new("", message)
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Errors raised when constructing a protocol identity
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The protocol name was missing or blank
    #[error("protocol name must be a non-empty string")]
    MissingName,
}

/// Errors reported by a concrete protocol's own transforms
///
/// The pipeline treats these as opaque: it propagates them unchanged and
/// never merges them with validation failures.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The protocol failed to render the payload
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// The protocol failed to parse the content
    #[error("deserialization failed: {0}")]
    Deserialize(String),
}

/// Errors raised by the protocol registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Lookup of a name with no registered protocol
    #[error("the protocol '{0}' does not exist within this registry")]
    NotFound(String),

    /// Insertion of a name that is already registered
    #[error("the protocol '{0}' already exists within this registry")]
    AlreadyExists(String),
}

/// Failure outcome of a pipeline operation
///
/// A pipeline call fails with exactly one of these; validation failures
/// always carry the full ordered issue list, never just the first issue.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The payload was rejected by the supplied validator
    #[error("validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ErrorDescriptor>),

    /// The concrete protocol's transform reported failure
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Error from a file operation (load/save adapters only)
    #[error("file error: {0}")]
    File(String),
}

impl ConvertError {
    /// The validation issues carried by this error, if any
    pub fn issues(&self) -> Option<&[ErrorDescriptor]> {
        match self {
            ConvertError::Validation(issues) => Some(issues),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
