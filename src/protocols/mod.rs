/*!
 * Protocol implementations for the supported payload formats.
 *
 * This module defines the common protocol contract and contains the
 * concrete implementations:
 * - Default: passthrough protocol for plain text payloads
 * - Json: JSON rendering via serde_json
 * - Yaml: YAML rendering via serde_yaml
 * - Mock: instrumented protocol for testing pipeline behavior
 */

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{ProtocolError, TransformError};

/// Immutable identity of a protocol: its registry name and the file
/// extensions associated with its wire format.
///
/// The `extensions` view is computed once at construction from `extension`
/// and `other_extensions` and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolIdentity {
    name: String,
    extension: String,
    other_extensions: Vec<String>,
    extensions: Vec<String>,
}

impl ProtocolIdentity {
    /// Create a new identity.
    ///
    /// The name is trimmed and lower-cased; a blank name is rejected with
    /// `ProtocolError::MissingName`. An absent canonical extension is
    /// normalized to the empty string and excluded from the derived
    /// `extensions` list.
    pub fn new(
        name: &str,
        extension: Option<&str>,
        other_extensions: &[&str],
    ) -> Result<Self, ProtocolError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(ProtocolError::MissingName);
        }

        let extension = extension.unwrap_or("").to_string();
        let other_extensions: Vec<String> =
            other_extensions.iter().map(|e| e.to_string()).collect();

        let extensions = if extension.is_empty() {
            other_extensions.clone()
        } else {
            let mut all = Vec::with_capacity(other_extensions.len() + 1);
            all.push(extension.clone());
            all.extend(other_extensions.iter().cloned());
            all
        };

        Ok(ProtocolIdentity {
            name,
            extension,
            other_extensions,
            extensions,
        })
    }

    /// Normalized protocol name (trimmed, lower-cased)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical file extension ("" when the protocol has none)
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Alternate file extensions
    pub fn other_extensions(&self) -> &[String] {
        &self.other_extensions
    }

    /// All extensions, canonical first
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether the given extension (with or without a leading dot,
    /// case-insensitive) belongs to this protocol
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }
}

/// Common trait for all payload format protocols
///
/// This trait defines the interface that all protocol implementations must
/// follow, allowing them to be used interchangeably by the conversion
/// pipeline. A protocol owns its wire-level rules; the pipeline never
/// inspects which concrete protocol it was given.
#[async_trait]
pub trait Protocol: Send + Sync + Debug {
    /// The identity of this protocol
    fn identity(&self) -> &ProtocolIdentity;

    /// Normalized protocol name, used as the registry key
    fn name(&self) -> &str {
        self.identity().name()
    }

    /// Canonical file extension ("" when the protocol has none)
    fn extension(&self) -> &str {
        self.identity().extension()
    }

    /// All file extensions associated with this protocol
    fn extensions(&self) -> &[String] {
        self.identity().extensions()
    }

    /// Render a payload into this protocol's wire representation
    ///
    /// # Arguments
    /// * `data` - The payload to render
    ///
    /// # Returns
    /// * `Result<String, TransformError>` - The rendered content or a
    ///   format-specific failure; must not panic
    async fn serialize(&self, data: &Value) -> Result<String, TransformError>;

    /// Parse wire content back into a payload; inverse of `serialize`
    ///
    /// # Arguments
    /// * `content` - The content to parse
    ///
    /// # Returns
    /// * `Result<Value, TransformError>` - The parsed payload or a
    ///   format-specific failure; must not panic
    async fn deserialize(&self, content: &str) -> Result<Value, TransformError>;
}

pub mod default;
pub mod json;
pub mod mock;
pub mod yaml;
