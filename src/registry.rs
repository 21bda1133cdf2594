/*!
 * Name-keyed store of active protocol instances.
 *
 * The registry maps normalized (trimmed, lower-cased) names to shared
 * protocol handles. Uniqueness is enforced by `add_protocol` only;
 * `swap_protocol` is an unconditional upsert. The registry owns nothing
 * beyond the map itself.
 */

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::errors::RegistryError;
use crate::protocols::Protocol;
use crate::protocols::default::DefaultProtocol;
use crate::protocols::json::JsonProtocol;
use crate::protocols::yaml::YamlProtocol;

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A key the registry can remove an entry by: a plain name, or a protocol
/// instance standing in for its own name.
pub trait RegistryKey {
    /// The (unnormalized) name this key refers to
    fn registry_key(&self) -> &str;
}

impl RegistryKey for &str {
    fn registry_key(&self) -> &str {
        self
    }
}

impl RegistryKey for String {
    fn registry_key(&self) -> &str {
        self
    }
}

impl RegistryKey for &String {
    fn registry_key(&self) -> &str {
        self
    }
}

impl RegistryKey for &dyn Protocol {
    fn registry_key(&self) -> &str {
        self.name()
    }
}

impl RegistryKey for &Arc<dyn Protocol> {
    fn registry_key(&self) -> &str {
        self.name()
    }
}

/// Registry of named protocol instances
#[derive(Debug, Default)]
pub struct ProtocolRegistry {
    protocols: HashMap<String, Arc<dyn Protocol>>,
}

impl ProtocolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        ProtocolRegistry {
            protocols: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in protocols
    /// (default, json, yaml)
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry
            .swap_protocol(Arc::new(DefaultProtocol::new()))
            .swap_protocol(Arc::new(JsonProtocol::new()))
            .swap_protocol(Arc::new(YamlProtocol::new()));

        registry
    }

    /// Look up a protocol by name.
    ///
    /// The query is normalized the same way registered names are, so
    /// `" X "` and `"x"` resolve to the same entry.
    pub fn get_protocol(&self, name: &str) -> Result<Arc<dyn Protocol>, RegistryError> {
        self.protocols
            .get(&normalize_name(name))
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Register a protocol under its own name.
    ///
    /// Fails with `AlreadyExists` when the name is taken; the existing
    /// entry is left untouched in that case.
    pub fn add_protocol(
        &mut self,
        protocol: Arc<dyn Protocol>,
    ) -> Result<&mut Self, RegistryError> {
        let name = normalize_name(protocol.name());

        if self.protocols.contains_key(&name) {
            return Err(RegistryError::AlreadyExists(name));
        }

        debug!("registering protocol '{}'", name);
        self.protocols.insert(name, protocol);

        Ok(self)
    }

    /// Remove a protocol by name or by instance; absent entries are a
    /// silent no-op.
    pub fn remove_protocol(&mut self, key: impl RegistryKey) -> &mut Self {
        let name = normalize_name(key.registry_key());

        if self.protocols.remove(&name).is_some() {
            debug!("removed protocol '{}'", name);
        }

        self
    }

    /// Insert or replace a protocol under its own name (unconditional
    /// upsert)
    pub fn swap_protocol(&mut self, protocol: Arc<dyn Protocol>) -> &mut Self {
        let name = normalize_name(protocol.name());

        debug!("swapping in protocol '{}'", name);
        self.protocols.insert(name, protocol);

        self
    }

    /// Find a protocol claiming the given file extension (with or without
    /// a leading dot, case-insensitive).
    ///
    /// When several protocols claim the extension, the one with the
    /// lexicographically smallest name wins, so lookup stays deterministic.
    pub fn protocol_for_extension(&self, ext: &str) -> Result<Arc<dyn Protocol>, RegistryError> {
        let mut matches: Vec<&Arc<dyn Protocol>> = self
            .protocols
            .values()
            .filter(|p| p.identity().matches_extension(ext))
            .collect();
        matches.sort_by(|a, b| a.name().cmp(b.name()));

        matches
            .first()
            .map(|p| Arc::clone(p))
            .ok_or_else(|| RegistryError::NotFound(ext.to_string()))
    }

    /// Find a protocol for a path, by its file extension
    pub fn protocol_for_path(&self, path: &Path) -> Result<Arc<dyn Protocol>, RegistryError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .ok_or_else(|| RegistryError::NotFound(path.display().to_string()))?;

        self.protocol_for_extension(&ext)
    }

    /// Registered protocol names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.protocols.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered protocols
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}
