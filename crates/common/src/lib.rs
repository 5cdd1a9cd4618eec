//! Common types and utilities for the CDK Schema Generator
//!
//! This crate contains the normalized schema data model, the error taxonomy,
//! and the binding configuration shared by the parser, generator, and CLI
//! components.

pub mod binding_config;
pub mod schema;

pub use binding_config::{BindingBases, BindingConfig, ServiceNameException};
pub use schema::{
    AttributeSpec, Bindings, GoBinding, ModuleBinding, NamespaceBinding, PackageBinding,
    PrimitiveType, PropertySpec, PropertyTypeEntry, PropertyTypeSchema, ResourceEntry,
    ResourceSchema, ValueType, CFN, CFN_TAG,
};

use thiserror::Error;

/// Errors that can occur during schema generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("{0}")]
    InvalidOutputPath(String),

    /// The `hasResource` relation did not yield exactly one service
    #[error("Service not found for resource type {resource}: expected exactly one owning service, found {matches}")]
    ServiceNotFound { resource: String, matches: usize },

    /// The `usesType` relation did not yield exactly one resource
    #[error("Parent resource not found for type {type_name}: expected exactly one owning resource, found {matches}")]
    ParentNotFound { type_name: String, matches: usize },

    #[error("Reference type name not found: {reference} (referenced from {resource_type})")]
    MissingReference {
        resource_type: String,
        reference: String,
    },

    #[error("Malformed type in {resource_type}: {message}")]
    MalformedType {
        resource_type: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
