/*!
 * Mock protocol implementation for testing.
 *
 * This module provides a mock protocol that simulates different behaviors:
 * - `MockProtocol::working()` - Both transforms succeed
 * - `MockProtocol::failing_serialize()` - serialize always fails
 * - `MockProtocol::failing_deserialize()` - deserialize always fails
 *
 * Call counters are shared across clones, so tests can observe whether the
 * pipeline actually invoked a transform.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransformError;
use crate::protocols::{Protocol, ProtocolIdentity};

/// Behavior mode for the mock protocol
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Both transforms succeed
    Working,
    /// serialize always fails with a transform error
    FailingSerialize,
    /// deserialize always fails with a transform error
    FailingDeserialize,
}

/// Mock protocol for testing pipeline behavior
#[derive(Debug)]
pub struct MockProtocol {
    identity: ProtocolIdentity,
    behavior: MockBehavior,
    serialize_calls: Arc<AtomicUsize>,
    deserialize_calls: Arc<AtomicUsize>,
}

impl MockProtocol {
    /// Create a new mock protocol with the specified behavior
    pub fn new(name: &str, behavior: MockBehavior) -> Self {
        let identity = ProtocolIdentity::new(name, Some("mock"), &[])
            .expect("mock protocol identity");
        MockProtocol {
            identity,
            behavior,
            serialize_calls: Arc::new(AtomicUsize::new(0)),
            deserialize_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock protocol
    pub fn working() -> Self {
        Self::new("mock", MockBehavior::Working)
    }

    /// Create a mock whose serialize always errors
    pub fn failing_serialize() -> Self {
        Self::new("mock", MockBehavior::FailingSerialize)
    }

    /// Create a mock whose deserialize always errors
    pub fn failing_deserialize() -> Self {
        Self::new("mock", MockBehavior::FailingDeserialize)
    }

    /// Number of times serialize was invoked, across all clones
    pub fn serialize_calls(&self) -> usize {
        self.serialize_calls.load(Ordering::SeqCst)
    }

    /// Number of times deserialize was invoked, across all clones
    pub fn deserialize_calls(&self) -> usize {
        self.deserialize_calls.load(Ordering::SeqCst)
    }
}

impl Clone for MockProtocol {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            behavior: self.behavior,
            serialize_calls: Arc::clone(&self.serialize_calls),
            deserialize_calls: Arc::clone(&self.deserialize_calls),
        }
    }
}

#[async_trait]
impl Protocol for MockProtocol {
    fn identity(&self) -> &ProtocolIdentity {
        &self.identity
    }

    async fn serialize(&self, data: &Value) -> Result<String, TransformError> {
        self.serialize_calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::FailingSerialize => Err(TransformError::Serialize(
                "simulated serialize failure".to_string(),
            )),
            _ => Ok(data.to_string()),
        }
    }

    async fn deserialize(&self, content: &str) -> Result<Value, TransformError> {
        self.deserialize_calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::FailingDeserialize => Err(TransformError::Deserialize(
                "simulated deserialize failure".to_string(),
            )),
            _ => serde_json::from_str(content)
                .map_err(|e| TransformError::Deserialize(e.to_string())),
        }
    }
}
