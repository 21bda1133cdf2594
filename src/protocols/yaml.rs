/*!
 * YAML protocol backed by serde_yaml.
 */

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransformError;
use crate::protocols::{Protocol, ProtocolIdentity};

/// Protocol rendering payloads as YAML text
#[derive(Debug, Clone)]
pub struct YamlProtocol {
    identity: ProtocolIdentity,
}

impl YamlProtocol {
    /// Create a YAML protocol ("yaml" canonical extension, "yml" alternate)
    pub fn new() -> Self {
        let identity = ProtocolIdentity::new("yaml", Some("yaml"), &["yml"])
            .expect("static protocol identity");
        YamlProtocol { identity }
    }
}

impl Default for YamlProtocol {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Protocol for YamlProtocol {
    fn identity(&self) -> &ProtocolIdentity {
        &self.identity
    }

    async fn serialize(&self, data: &Value) -> Result<String, TransformError> {
        serde_yaml::to_string(data).map_err(|e| TransformError::Serialize(e.to_string()))
    }

    async fn deserialize(&self, content: &str) -> Result<Value, TransformError> {
        serde_yaml::from_str(content).map_err(|e| TransformError::Deserialize(e.to_string()))
    }
}
