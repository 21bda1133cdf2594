/*!
 * Format-agnostic conversion pipeline.
 *
 * The three entry points compose mixin injection, validation, and a
 * protocol's own transform into one result-returning operation:
 * - `serialize`: merge + validate, then render with the protocol
 * - `deserialize`: parse with the protocol, then merge + validate
 * - `translate`: parse with one protocol, merge + validate once, render
 *   with another
 *
 * The pipeline never recovers an error locally: validation failures carry
 * the full ordered issue list, and a protocol's transform failure is
 * propagated unchanged, never mixed with validation issues.
 */

use log::debug;
use serde_json::Value;

use crate::errors::ConvertError;
use crate::protocols::Protocol;
use crate::validation::Validator;

/// Fields forced onto a payload before validation
pub type Mixin = serde_json::Map<String, Value>;

/// Outcome of a pipeline operation
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Merge mixin fields into a payload with override semantics.
///
/// Mixin keys win over payload keys. Only object payloads are merged;
/// arrays and scalars pass through unchanged.
pub fn apply_mixin(data: Value, mixin: &Mixin) -> Value {
    if mixin.is_empty() {
        return data;
    }

    match data {
        Value::Object(mut fields) => {
            for (key, value) in mixin {
                fields.insert(key.clone(), value.clone());
            }
            Value::Object(fields)
        }
        other => other,
    }
}

/// Render a payload with a protocol, after mixin injection and validation.
///
/// On validation failure the protocol is never invoked and the full issue
/// list is returned. On success the merged payload is handed to the
/// protocol; validation acts as a gate on this path.
pub async fn serialize(
    data: Value,
    protocol: &dyn Protocol,
    validator: &dyn Validator,
    mixin: &Mixin,
) -> ConvertResult<String> {
    let mixed = apply_mixin(data, mixin);

    match validator.validate(&mixed) {
        Ok(_) => Ok(protocol.serialize(&mixed).await?),
        Err(issues) => {
            debug!(
                "serialize via '{}' rejected by validator with {} issue(s)",
                protocol.name(),
                issues.len()
            );
            Err(ConvertError::Validation(issues))
        }
    }
}

/// Parse content with a protocol, then apply mixin injection and validation.
///
/// A parse failure is returned unchanged and neither merge nor validation
/// runs. On success the validator's output is authoritative: the returned
/// value is the validated (possibly coerced) payload.
pub async fn deserialize(
    content: &str,
    protocol: &dyn Protocol,
    validator: &dyn Validator,
    mixin: &Mixin,
) -> ConvertResult<Value> {
    let decoded = protocol.deserialize(content).await?;

    let mixed = apply_mixin(decoded, mixin);

    match validator.validate(&mixed) {
        Ok(validated) => Ok(validated),
        Err(issues) => {
            debug!(
                "deserialize via '{}' rejected by validator with {} issue(s)",
                protocol.name(),
                issues.len()
            );
            Err(ConvertError::Validation(issues))
        }
    }
}

/// Convert content from one protocol's format to another's.
///
/// Parses with the input protocol, merges and validates exactly once at the
/// midpoint, then renders the validated payload with the output protocol.
/// Any decode or validation failure short-circuits; the output protocol is
/// never invoked on failure.
pub async fn translate(
    content: &str,
    input_protocol: &dyn Protocol,
    output_protocol: &dyn Protocol,
    validator: &dyn Validator,
    mixin: &Mixin,
) -> ConvertResult<String> {
    let decoded = input_protocol.deserialize(content).await?;

    let mixed = apply_mixin(decoded, mixin);

    match validator.validate(&mixed) {
        Ok(validated) => {
            debug!(
                "translating '{}' -> '{}'",
                input_protocol.name(),
                output_protocol.name()
            );
            Ok(output_protocol.serialize(&validated).await?)
        }
        Err(issues) => {
            debug!(
                "translate '{}' -> '{}' rejected by validator with {} issue(s)",
                input_protocol.name(),
                output_protocol.name(),
                issues.len()
            );
            Err(ConvertError::Validation(issues))
        }
    }
}
