/*!
 * Passthrough protocol for plain text payloads.
 *
 * The default protocol performs no real encoding: string payloads are
 * rendered as-is and raw content deserializes to a string value. It serves
 * as the reference implementation of the protocol contract.
 */

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransformError;
use crate::protocols::{Protocol, ProtocolIdentity};

/// Protocol that passes text content through unchanged
#[derive(Debug, Clone)]
pub struct DefaultProtocol {
    identity: ProtocolIdentity,
}

impl DefaultProtocol {
    /// Create a new passthrough protocol named "default" with no extensions
    pub fn new() -> Self {
        let identity = ProtocolIdentity::new("default", None, &[])
            .expect("static protocol identity");
        DefaultProtocol { identity }
    }
}

impl Default for DefaultProtocol {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Protocol for DefaultProtocol {
    fn identity(&self) -> &ProtocolIdentity {
        &self.identity
    }

    async fn serialize(&self, data: &Value) -> Result<String, TransformError> {
        match data {
            Value::String(text) => Ok(text.clone()),
            other => Ok(other.to_string()),
        }
    }

    async fn deserialize(&self, content: &str) -> Result<Value, TransformError> {
        Ok(Value::String(content.to_string()))
    }
}
