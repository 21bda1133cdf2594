/*!
 * Tests for the conversion pipeline orchestration
 */

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use yafc::errors::{ConvertError, ErrorDescriptor};
use yafc::pipeline::{self, Mixin};
use yafc::protocols::default::DefaultProtocol;
use yafc::protocols::json::JsonProtocol;
use yafc::protocols::mock::MockProtocol;
use yafc::validation::{IdentityValidator, RequiredKeysValidator, ValidationOutcome};

fn mixin_of(pairs: &[(&str, Value)]) -> Mixin {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A validator that records the value it was asked to validate
fn recording_validator(
    seen: Arc<Mutex<Option<Value>>>,
) -> impl Fn(&Value) -> ValidationOutcome + Send + Sync {
    move |value: &Value| {
        *seen.lock().unwrap() = Some(value.clone());
        Ok(value.clone())
    }
}

#[tokio::test]
async fn test_serialize_withMixin_shouldValidateMergedPayload() {
    let protocol = MockProtocol::working();
    let seen = Arc::new(Mutex::new(None));
    let validator = recording_validator(Arc::clone(&seen));
    let mixin = mixin_of(&[("source", json!("injected")), ("kept", json!(2))]);

    pipeline::serialize(json!({"kept": 1, "name": "x"}), &protocol, &validator, &mixin)
        .await
        .unwrap();

    // Mixin keys win over payload keys with the same name
    let validated = seen.lock().unwrap().clone().unwrap();
    assert_eq!(
        validated,
        json!({"kept": 2, "name": "x", "source": "injected"})
    );
}

#[tokio::test]
async fn test_serialize_withArrayPayload_shouldSkipMixin() {
    let protocol = MockProtocol::working();
    let seen = Arc::new(Mutex::new(None));
    let validator = recording_validator(Arc::clone(&seen));
    let mixin = mixin_of(&[("ignored", json!(true))]);

    pipeline::serialize(json!([1, 2, 3]), &protocol, &validator, &mixin)
        .await
        .unwrap();

    let validated = seen.lock().unwrap().clone().unwrap();
    assert_eq!(validated, json!([1, 2, 3]));
}

#[tokio::test]
async fn test_serialize_withScalarPayload_shouldSkipMixin() {
    let protocol = MockProtocol::working();
    let seen = Arc::new(Mutex::new(None));
    let validator = recording_validator(Arc::clone(&seen));
    let mixin = mixin_of(&[("ignored", json!(true))]);

    pipeline::serialize(json!("scalar"), &protocol, &validator, &mixin)
        .await
        .unwrap();

    let validated = seen.lock().unwrap().clone().unwrap();
    assert_eq!(validated, json!("scalar"));
}

#[tokio::test]
async fn test_serialize_withFailingValidator_shouldNeverInvokeProtocol() {
    let protocol = MockProtocol::working();
    let validator = RequiredKeysValidator::new(&["missing"]);

    let result =
        pipeline::serialize(json!({"present": 1}), &protocol, &validator, &Mixin::new()).await;

    assert!(matches!(result, Err(ConvertError::Validation(_))));
    assert_eq!(protocol.serialize_calls(), 0);
}

#[tokio::test]
async fn test_serialize_withFailingValidator_shouldCarryAllIssuesInOrder() {
    let protocol = MockProtocol::working();
    let validator = RequiredKeysValidator::new(&["first", "second"]);

    let error = pipeline::serialize(json!({}), &protocol, &validator, &Mixin::new())
        .await
        .unwrap_err();

    let issues = error.issues().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].path, "first");
    assert_eq!(issues[1].path, "second");
}

#[tokio::test]
async fn test_serialize_withTransformFailure_shouldPropagateTransformError() {
    let protocol = MockProtocol::failing_serialize();

    let result = pipeline::serialize(json!(1), &protocol, &IdentityValidator, &Mixin::new()).await;

    assert!(matches!(result, Err(ConvertError::Transform(_))));
}

#[tokio::test]
async fn test_deserialize_withTransformFailure_shouldNeverInvokeValidator() {
    let protocol = MockProtocol::failing_deserialize();
    let seen = Arc::new(Mutex::new(None));
    let validator = recording_validator(Arc::clone(&seen));

    let result = pipeline::deserialize("content", &protocol, &validator, &Mixin::new()).await;

    assert!(matches!(result, Err(ConvertError::Transform(_))));
    assert!(seen.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_deserialize_shouldReturnValidatorOutput() {
    let protocol = MockProtocol::working();
    // A coercing validator: the value it vouches for differs from its input
    let coercing = |_: &Value| -> ValidationOutcome { Ok(json!({"coerced": true})) };

    let result = pipeline::deserialize(r#"{"raw": 1}"#, &protocol, &coercing, &Mixin::new())
        .await
        .unwrap();

    assert_eq!(result, json!({"coerced": true}));
}

#[tokio::test]
async fn test_deserialize_withMixin_shouldMergeBeforeValidation() {
    let protocol = MockProtocol::working();
    let validator = RequiredKeysValidator::new(&["injected"]);
    let mixin = mixin_of(&[("injected", json!("yes"))]);

    // The payload alone would fail validation; the mixin satisfies it
    let result = pipeline::deserialize(r#"{"raw": 1}"#, &protocol, &validator, &mixin)
        .await
        .unwrap();

    assert_eq!(result, json!({"raw": 1, "injected": "yes"}));
}

#[tokio::test]
async fn test_roundTrip_withIdentityValidator_shouldPreservePayload() {
    let protocol = JsonProtocol::new();
    let payload = json!({"name": "demo", "values": [1, 2, 3], "nested": {"ok": true}});

    let rendered = pipeline::serialize(
        payload.clone(),
        &protocol,
        &IdentityValidator,
        &Mixin::new(),
    )
    .await
    .unwrap();

    let parsed = pipeline::deserialize(&rendered, &protocol, &IdentityValidator, &Mixin::new())
        .await
        .unwrap();

    assert_eq!(parsed, payload);
}

#[tokio::test]
async fn test_translate_shouldMatchDeserializeThenSerialize() {
    let json_protocol = JsonProtocol::new();
    let mock = MockProtocol::working();
    let mixin = mixin_of(&[("stamp", json!("v1"))]);
    let content = r#"{"name": "demo"}"#;

    let translated = pipeline::translate(
        content,
        &json_protocol,
        &mock,
        &IdentityValidator,
        &mixin,
    )
    .await
    .unwrap();

    let decoded = pipeline::deserialize(content, &json_protocol, &IdentityValidator, &mixin)
        .await
        .unwrap();
    let composed = pipeline::serialize(decoded, &mock, &IdentityValidator, &Mixin::new())
        .await
        .unwrap();

    assert_eq!(translated, composed);
}

#[tokio::test]
async fn test_translate_withDecodeFailure_shouldNeverInvokeOutputProtocol() {
    let input = MockProtocol::failing_deserialize();
    let output = MockProtocol::working();

    let result = pipeline::translate(
        "content",
        &input,
        &output,
        &IdentityValidator,
        &Mixin::new(),
    )
    .await;

    assert!(matches!(result, Err(ConvertError::Transform(_))));
    assert_eq!(output.serialize_calls(), 0);
}

#[tokio::test]
async fn test_translate_withFailingValidator_shouldNeverInvokeOutputProtocol() {
    let input = MockProtocol::working();
    let output = MockProtocol::working();
    let validator = RequiredKeysValidator::new(&["missing"]);

    let result = pipeline::translate(r#"{"a": 1}"#, &input, &output, &validator, &Mixin::new())
        .await;

    assert!(matches!(result, Err(ConvertError::Validation(_))));
    assert_eq!(input.deserialize_calls(), 1);
    assert_eq!(output.serialize_calls(), 0);
}

#[tokio::test]
async fn test_translate_shouldValidateExactlyOnce() {
    let input = MockProtocol::working();
    let output = MockProtocol::working();
    let calls = Arc::new(Mutex::new(0usize));
    let counting = {
        let calls = Arc::clone(&calls);
        move |value: &Value| -> ValidationOutcome {
            *calls.lock().unwrap() += 1;
            Ok(value.clone())
        }
    };

    pipeline::translate(r#"{"a": 1}"#, &input, &output, &counting, &Mixin::new())
        .await
        .unwrap();

    assert_eq!(*calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_defaultProtocol_withPipeline_shouldPassTextThrough() {
    let protocol = DefaultProtocol::new();

    let rendered = pipeline::serialize(
        json!("hello"),
        &protocol,
        &IdentityValidator,
        &Mixin::new(),
    )
    .await
    .unwrap();
    assert_eq!(rendered, "hello");

    let parsed = pipeline::deserialize("hello", &protocol, &IdentityValidator, &Mixin::new())
        .await
        .unwrap();
    assert_eq!(parsed, json!("hello"));
}

#[tokio::test]
async fn test_validationError_shouldRenderPathAndMessage() {
    let descriptor = ErrorDescriptor::new("field", "is missing");
    assert_eq!(descriptor.to_string(), "field: is missing");

    let root = ErrorDescriptor::root("payload rejected");
    assert_eq!(root.to_string(), "payload rejected");
}
