/*!
 * The validator capability trait and its accept-all default.
 */

use serde_json::Value;

use crate::errors::ErrorDescriptor;

/// Outcome of a validation call: the validated (possibly coerced) value, or
/// the full ordered list of issues found.
pub type ValidationOutcome = Result<Value, Vec<ErrorDescriptor>>;

/// Pluggable validation capability
///
/// Implementations inspect a payload and either vouch for it (returning the
/// value they accept, which may differ from the input when the validator
/// coerces) or report every issue they found. The pipeline treats the
/// returned value as authoritative.
pub trait Validator: Send + Sync {
    /// Validate a payload
    fn validate(&self, value: &Value) -> ValidationOutcome;
}

/// Accept-all validator: every payload passes unchanged.
///
/// This is the default validator for every pipeline operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityValidator;

impl Validator for IdentityValidator {
    fn validate(&self, value: &Value) -> ValidationOutcome {
        Ok(value.clone())
    }
}

// Plain closures work as validators, which keeps one-off rules in tests and
// call sites from needing a named type.
impl<F> Validator for F
where
    F: Fn(&Value) -> ValidationOutcome + Send + Sync,
{
    fn validate(&self, value: &Value) -> ValidationOutcome {
        self(value)
    }
}
