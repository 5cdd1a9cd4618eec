//! Binding derivation and schema assembly
//!
//! This crate turns a specification source into the two output schemas:
//! - `cdk-types.json` - every property type plus the well-known `CfnTag`
//! - `cdk-resources.json` - every resource with its construct bindings,
//!   attributes, and properties
//!
//! # Examples
//!
//! ```no_run
//! use cdk_schema_generator_generator::{generate_schemas, BindingGenerator, SchemaWriter};
//! use cdk_schema_generator_parser::SpecDatabase;
//!
//! let database = SpecDatabase::from_file("spec/db.json").expect("load failed");
//! let schemas = generate_schemas(&database, BindingGenerator::default()).expect("generation failed");
//! SchemaWriter::new("out")
//!     .write(&schemas.property_types, &schemas.resources)
//!     .expect("write failed");
//! ```

mod assembler;
mod bindings;
mod writer;

pub use assembler::{tag_property_type, SchemaAssembler};
pub use bindings::{go_package_name, BindingGenerator, Language};
pub use writer::{validate_output_path, SchemaWriter, PROPERTY_TYPES_FILE, RESOURCES_FILE};

use cdk_schema_generator_common::{PropertyTypeSchema, ResourceSchema, Result};
use cdk_schema_generator_parser::SpecSource;

/// Both output schemas of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSchemas {
    pub property_types: PropertyTypeSchema,
    pub resources: ResourceSchema,
}

/// Build both schemas, property types first
///
/// Fails on the first error; no partial result is returned.
pub fn generate_schemas<S: SpecSource + ?Sized>(
    source: &S,
    bindings: BindingGenerator,
) -> Result<GeneratedSchemas> {
    let assembler = SchemaAssembler::with_bindings(source, bindings);
    let property_types = assembler.build_property_type_schema()?;
    let resources = assembler.build_resource_schema()?;

    Ok(GeneratedSchemas {
        property_types,
        resources,
    })
}
