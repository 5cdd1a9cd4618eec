//! Schema file output

use cdk_schema_generator_common::{GeneratorError, PropertyTypeSchema, ResourceSchema, Result};
use serde::Serialize;
use std::fs;
use std::path::{Component, PathBuf};
use tracing::info;

/// File name of the property type schema
pub const PROPERTY_TYPES_FILE: &str = "cdk-types.json";

/// File name of the resource schema
pub const RESOURCES_FILE: &str = "cdk-resources.json";

/// Check a user supplied output path
///
/// Rejects empty paths and any path that climbs out through `..`.
pub fn validate_output_path(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GeneratorError::InvalidOutputPath(
            "output-path is required and cannot be empty".to_string(),
        ));
    }

    let path = PathBuf::from(trimmed);
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(GeneratorError::InvalidOutputPath(
            "Invalid output-path: path traversal detected".to_string(),
        ));
    }

    Ok(path)
}

/// Writes generated schemas into an output directory
pub struct SchemaWriter {
    output_dir: PathBuf,
}

impl SchemaWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write both schemas, property types first
    ///
    /// Returns the paths written, in order.
    pub fn write(
        &self,
        property_types: &PropertyTypeSchema,
        resources: &ResourceSchema,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            GeneratorError::Generation(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        Ok(vec![
            self.write_json(PROPERTY_TYPES_FILE, property_types)?,
            self.write_json(RESOURCES_FILE, resources)?,
        ])
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let rendered = serde_json::to_string_pretty(value)?;

        fs::write(&path, rendered).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "wrote schema file");
        Ok(path)
    }
}
