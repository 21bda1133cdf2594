/*!
 * Conversion controller driving the pipeline from configuration.
 *
 * The controller resolves protocols from explicit format names or file
 * extensions, builds the validator and mixin from configuration, and runs
 * single-file or directory conversions through the file adapters.
 */

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use serde_json::Value;

use crate::app_config::Config;
use crate::file_utils::{self, FileManager};
use crate::pipeline::Mixin;
use crate::protocols::Protocol;
use crate::protocols::json::JsonProtocol;
use crate::registry::ProtocolRegistry;
use crate::validation::{IdentityValidator, RequiredKeysValidator, Validator};

/// Parse repeatable `key=value` arguments into a mixin map.
///
/// Values are parsed as JSON when possible so numbers, booleans, and
/// structured values come through typed; anything else is kept as a plain
/// string.
pub fn parse_mixin_pairs(pairs: &[String]) -> Result<Mixin> {
    let mut mixin = Mixin::new();

    for pair in pairs {
        let (key, raw_value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid mixin '{}', expected key=value", pair))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow!("Invalid mixin '{}', key must not be blank", pair));
        }

        let value = serde_json::from_str(raw_value)
            .unwrap_or_else(|_| Value::String(raw_value.to_string()));

        mixin.insert(key.to_string(), value);
    }

    Ok(mixin)
}

/// Main controller for conversion runs
pub struct Controller {
    config: Config,
    registry: ProtocolRegistry,
}

impl Controller {
    /// Create a controller from a validated configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let mut registry = ProtocolRegistry::with_builtins();

        if config.pretty_json {
            registry.swap_protocol(Arc::new(JsonProtocol::pretty()));
        }

        Ok(Controller { config, registry })
    }

    /// The protocol registry backing this controller
    pub fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    fn validator(&self) -> Box<dyn Validator> {
        if self.config.required_fields.is_empty() {
            Box::new(IdentityValidator)
        } else {
            let keys: Vec<&str> = self
                .config
                .required_fields
                .iter()
                .map(|f| f.as_str())
                .collect();
            Box::new(RequiredKeysValidator::new(&keys))
        }
    }

    fn resolve_protocol(
        &self,
        format: Option<&str>,
        path: &Path,
    ) -> Result<Arc<dyn Protocol>> {
        match format {
            Some(name) => self
                .registry
                .get_protocol(name)
                .with_context(|| format!("Unknown format '{}'", name)),
            None => self
                .registry
                .protocol_for_path(path)
                .with_context(|| format!("Cannot infer a format for {:?}", path)),
        }
    }

    /// Convert a single file, choosing protocols from configuration or the
    /// file extensions
    pub async fn run(
        &self,
        input_path: &Path,
        output_path: &Path,
        force_overwrite: bool,
    ) -> Result<()> {
        if !FileManager::file_exists(input_path) {
            return Err(anyhow!("Input file does not exist: {:?}", input_path));
        }

        if FileManager::file_exists(output_path) && !force_overwrite {
            warn!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                output_path
            );
            return Ok(());
        }

        let input_protocol =
            self.resolve_protocol(self.config.input_format.as_deref(), input_path)?;
        let output_protocol =
            self.resolve_protocol(self.config.output_format.as_deref(), output_path)?;

        if let Some(parent) = output_path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let validator = self.validator();

        file_utils::translate_file(
            input_path,
            input_protocol.as_ref(),
            output_path,
            output_protocol.as_ref(),
            validator.as_ref(),
            &self.config.mixin,
        )
        .await
        .map_err(|e| anyhow!("Conversion failed for {:?}: {}", input_path, e))?;

        info!(
            "Converted {:?} ({}) -> {:?} ({})",
            input_path,
            input_protocol.name(),
            output_path,
            output_protocol.name()
        );

        Ok(())
    }

    /// Convert every matching file in a directory.
    ///
    /// Requires an explicit output format, since there is no output path to
    /// infer one from; input files are matched by the input protocol's
    /// extensions and converted in place alongside the originals.
    pub async fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let input_name = self
            .config
            .input_format
            .as_deref()
            .ok_or_else(|| anyhow!("Directory mode requires an input format"))?;
        let output_name = self
            .config
            .output_format
            .as_deref()
            .ok_or_else(|| anyhow!("Directory mode requires an output format"))?;

        let input_protocol = self.registry.get_protocol(input_name)?;
        let output_protocol = self.registry.get_protocol(output_name)?;

        let output_extension = output_protocol.extension();
        if output_extension.is_empty() {
            return Err(anyhow!(
                "Output format '{}' has no file extension for directory mode",
                output_name
            ));
        }

        let files = FileManager::find_files(input_dir, input_protocol.extensions())?;
        if files.is_empty() {
            warn!("No {} files found in {:?}", input_name, input_dir);
            return Ok(());
        }

        let mut converted = 0;
        for input_path in &files {
            let output_path = FileManager::generate_output_path(
                input_path,
                input_path.parent().unwrap_or(Path::new(".")),
                output_extension,
            );

            match self.run(input_path, &output_path, force_overwrite).await {
                Ok(()) => converted += 1,
                Err(e) => warn!("Skipping {:?}: {}", input_path, e),
            }
        }

        info!("Finished converting {}/{} files", converted, files.len());

        Ok(())
    }
}
