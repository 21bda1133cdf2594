/*!
 * JSON protocol backed by serde_json.
 */

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransformError;
use crate::protocols::{Protocol, ProtocolIdentity};

/// Protocol rendering payloads as JSON text
#[derive(Debug, Clone)]
pub struct JsonProtocol {
    identity: ProtocolIdentity,
    pretty: bool,
}

impl JsonProtocol {
    /// Create a JSON protocol with compact output
    pub fn new() -> Self {
        let identity = ProtocolIdentity::new("json", Some("json"), &[])
            .expect("static protocol identity");
        JsonProtocol {
            identity,
            pretty: false,
        }
    }

    /// Create a JSON protocol with pretty-printed output
    pub fn pretty() -> Self {
        JsonProtocol {
            pretty: true,
            ..Self::new()
        }
    }
}

impl Default for JsonProtocol {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Protocol for JsonProtocol {
    fn identity(&self) -> &ProtocolIdentity {
        &self.identity
    }

    async fn serialize(&self, data: &Value) -> Result<String, TransformError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };

        rendered.map_err(|e| TransformError::Serialize(e.to_string()))
    }

    async fn deserialize(&self, content: &str) -> Result<Value, TransformError> {
        serde_json::from_str(content).map_err(|e| TransformError::Deserialize(e.to_string()))
    }
}
