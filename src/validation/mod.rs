/*!
 * Validation capability consumed by the conversion pipeline.
 *
 * The pipeline never owns schema semantics; it only invokes a pluggable
 * validator and wraps its issues into the pipeline's error representation.
 *
 * # Architecture
 *
 * - `validator`: the `Validator` trait, the accept-all `IdentityValidator`,
 *   and a blanket impl so plain closures can be used directly
 * - `required`: a concrete validator checking required object keys
 */

pub mod required;
pub mod validator;

// Re-export main types
pub use required::RequiredKeysValidator;
pub use validator::{IdentityValidator, ValidationOutcome, Validator};
