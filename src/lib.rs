/*!
 * # yafc - Yet Another Format Converter
 *
 * A Rust library for pluggable, validated conversion between payload
 * formats.
 *
 * ## Features
 *
 * - Named, bidirectional protocols (serializer/deserializer pairs) behind
 *   one object-safe trait
 * - Built-in protocols: passthrough text, JSON, YAML
 * - A format-agnostic pipeline composing mixin injection, validation, and
 *   the protocol transform: `serialize`, `deserialize`, `translate`
 * - Mixin fields: caller-forced overrides merged into object payloads
 *   before validation
 * - Pluggable validators with full ordered issue lists on failure
 * - A name-keyed protocol registry with extension-based lookup
 * - File adapters for load/save/translate over UTF-8 text files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `protocols`: the protocol contract and concrete implementations:
 *   - `protocols::default`: passthrough text protocol
 *   - `protocols::json`: JSON protocol (serde_json)
 *   - `protocols::yaml`: YAML protocol (serde_yaml)
 *   - `protocols::mock`: instrumented protocol for tests
 * - `pipeline`: the serialize/deserialize/translate orchestration
 * - `registry`: name-keyed store of active protocols
 * - `validation`: the validator capability and bundled validators
 * - `file_utils`: file system operations and pipeline file adapters
 * - `app_config`: configuration management
 * - `app_controller`: main application controller
 * - `errors`: custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod pipeline;
pub mod protocols;
pub mod registry;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ConvertError, ErrorDescriptor, ProtocolError, RegistryError, TransformError};
pub use pipeline::{ConvertResult, Mixin, deserialize, serialize, translate};
pub use protocols::{Protocol, ProtocolIdentity};
pub use registry::ProtocolRegistry;
pub use validation::{IdentityValidator, Validator};
