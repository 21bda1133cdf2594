/*!
 * End-to-end conversion workflow tests
 */

use anyhow::Result;
use serde_json::json;

use yafc::app_config::Config;
use yafc::app_controller::Controller;
use yafc::file_utils::FileManager;
use yafc::pipeline::{self, Mixin};
use yafc::protocols::Protocol;
use yafc::registry::ProtocolRegistry;
use yafc::validation::{IdentityValidator, RequiredKeysValidator};

use crate::common;

#[tokio::test]
async fn test_registryDrivenTranslate_shouldConvertJsonToYaml() {
    let registry = ProtocolRegistry::with_builtins();
    let json_protocol = registry.get_protocol("json").unwrap();
    let yaml_protocol = registry.get_protocol("yaml").unwrap();

    let mut mixin = Mixin::new();
    mixin.insert("converted".to_string(), json!(true));

    let output = pipeline::translate(
        r#"{"name": "demo", "count": 2}"#,
        json_protocol.as_ref(),
        yaml_protocol.as_ref(),
        &IdentityValidator,
        &mixin,
    )
    .await
    .unwrap();

    assert!(output.contains("name: demo"));
    assert!(output.contains("converted: true"));
}

#[tokio::test]
async fn test_registryDrivenTranslate_withRequiredFields_shouldGateConversion() {
    let registry = ProtocolRegistry::with_builtins();
    let json_protocol = registry.get_protocol("json").unwrap();
    let yaml_protocol = registry.get_protocol("yaml").unwrap();
    let validator = RequiredKeysValidator::new(&["id"]);

    let result = pipeline::translate(
        r#"{"name": "no id"}"#,
        json_protocol.as_ref(),
        yaml_protocol.as_ref(),
        &validator,
        &Mixin::new(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_controller_shouldConvertSingleFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_json(&dir, "payload.json")?;
    let output = dir.join("payload.yaml");

    let controller = Controller::with_config(Config::default())?;
    controller.run(&input, &output, false).await?;

    let content = FileManager::read_to_string(&output)?;
    assert!(content.contains("name: sample"));

    Ok(())
}

#[tokio::test]
async fn test_controller_withMixinAndRequiredFields_shouldInjectAndValidate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_json(&dir, "payload.json")?;
    let output = dir.join("payload.yaml");

    let mut config = Config::default();
    config.mixin.insert("source".to_string(), json!("pipeline"));
    config.required_fields.push("source".to_string());

    let controller = Controller::with_config(config)?;
    controller.run(&input, &output, false).await?;

    let content = FileManager::read_to_string(&output)?;
    assert!(content.contains("source: pipeline"));

    Ok(())
}

#[tokio::test]
async fn test_controller_withUnsatisfiedRequiredField_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_json(&dir, "payload.json")?;
    let output = dir.join("payload.yaml");

    let mut config = Config::default();
    config.required_fields.push("absent_field".to_string());

    let controller = Controller::with_config(config)?;
    let result = controller.run(&input, &output, false).await;

    assert!(result.is_err());
    assert!(!FileManager::file_exists(&output));

    Ok(())
}

#[tokio::test]
async fn test_controller_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_json(&dir, "payload.json")?;
    let output = common::create_test_file(&dir, "payload.yaml", "untouched: true\n")?;

    let controller = Controller::with_config(Config::default())?;

    // Without force the existing file is left alone
    controller.run(&input, &output, false).await?;
    assert_eq!(FileManager::read_to_string(&output)?, "untouched: true\n");

    // With force it is overwritten
    controller.run(&input, &output, true).await?;
    assert!(FileManager::read_to_string(&output)?.contains("name: sample"));

    Ok(())
}

#[tokio::test]
async fn test_controller_directoryMode_shouldConvertAllMatchingFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_json(&dir, "one.json")?;
    common::create_test_json(&dir, "two.json")?;
    common::create_test_file(&dir, "skip.txt", "not json")?;

    let mut config = Config::default();
    config.input_format = Some("json".to_string());
    config.output_format = Some("yaml".to_string());

    let controller = Controller::with_config(config)?;
    controller.run_folder(&dir, false).await?;

    assert!(FileManager::file_exists(dir.join("one.yaml")));
    assert!(FileManager::file_exists(dir.join("two.yaml")));
    assert!(!FileManager::file_exists(dir.join("skip.yaml")));

    Ok(())
}

#[tokio::test]
async fn test_controller_directoryMode_withoutFormats_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller
        .run_folder(&temp_dir.path().to_path_buf(), false)
        .await;

    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_fullLoop_yamlToJsonAndBack_shouldPreservePayload() -> Result<()> {
    let registry = ProtocolRegistry::with_builtins();
    let json_protocol = registry.get_protocol("json").unwrap();
    let yaml_protocol = registry.get_protocol("yaml").unwrap();

    let original = "id: 9\nname: loop\n";

    let as_json = pipeline::translate(
        original,
        yaml_protocol.as_ref(),
        json_protocol.as_ref(),
        &IdentityValidator,
        &Mixin::new(),
    )
    .await
    .unwrap();

    let back_to_yaml = pipeline::translate(
        &as_json,
        json_protocol.as_ref(),
        yaml_protocol.as_ref(),
        &IdentityValidator,
        &Mixin::new(),
    )
    .await
    .unwrap();

    let reparsed = yaml_protocol.deserialize(&back_to_yaml).await.unwrap();
    assert_eq!(reparsed, json!({"id": 9, "name": "loop"}));

    Ok(())
}
