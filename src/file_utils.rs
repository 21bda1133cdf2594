use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use serde_json::Value;

use crate::errors::ConvertError;
use crate::pipeline::{self, ConvertResult, Mixin};
use crate::protocols::Protocol;
use crate::validation::Validator;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for converted content
    // @params: input_file, output_dir, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        // Create the output filename with the target extension
        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));

        // Join with the output directory
        output_dir.join(output_filename)
    }

    /// Find files matching any of the given extensions in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[String]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    let ext = ext.to_string_lossy();
                    if extensions.iter().any(|e| {
                        ext.eq_ignore_ascii_case(e.trim_start_matches('.'))
                    }) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Deserialize the contents of a UTF-8 text file through the pipeline.
///
/// I/O failures are reported as `ConvertError::File`; everything past the
/// read follows the `pipeline::deserialize` contract.
pub async fn load_file(
    input_location: &Path,
    protocol: &dyn Protocol,
    validator: &dyn Validator,
    mixin: &Mixin,
) -> ConvertResult<Value> {
    let content = tokio::fs::read_to_string(input_location)
        .await
        .map_err(ConvertError::from)?;

    pipeline::deserialize(&content, protocol, validator, mixin).await
}

/// Serialize a payload through the pipeline and write it to a UTF-8 text
/// file.
///
/// A pipeline failure is returned before anything is written.
pub async fn save_file(
    data: Value,
    output_location: &Path,
    protocol: &dyn Protocol,
    validator: &dyn Validator,
    mixin: &Mixin,
) -> ConvertResult<()> {
    let content = pipeline::serialize(data, protocol, validator, mixin).await?;

    tokio::fs::write(output_location, content)
        .await
        .map_err(ConvertError::from)
}

/// Translate a file from one protocol's format to another's.
///
/// Reads the input, runs `pipeline::translate`, and writes the result; any
/// failure along the way is returned without touching the output file.
pub async fn translate_file(
    input_location: &Path,
    input_protocol: &dyn Protocol,
    output_location: &Path,
    output_protocol: &dyn Protocol,
    validator: &dyn Validator,
    mixin: &Mixin,
) -> ConvertResult<()> {
    let input_content = tokio::fs::read_to_string(input_location)
        .await
        .map_err(ConvertError::from)?;

    let output_content = pipeline::translate(
        &input_content,
        input_protocol,
        output_protocol,
        validator,
        mixin,
    )
    .await?;

    tokio::fs::write(output_location, output_content)
        .await
        .map_err(ConvertError::from)
}
