//! Read-only access to the specification graph
//!
//! The type decider and the schema assembler only talk to these traits, so
//! any store that can answer these queries can back a generation run.

use crate::spec::{Resource, Service, TypeDefinition};
use cdk_schema_generator_common::Result;

/// Resolves `ref` value types to type definition names
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceResolver {
    /// Name of the type definition with the given id, if it exists and is named
    fn type_definition_name(&self, reference: &str) -> Option<String>;
}

/// The full query surface of a specification store
pub trait SpecSource: ReferenceResolver {
    /// All resources, in a stable order
    fn resources(&self) -> Vec<&Resource>;

    /// All type definitions, in a stable order
    fn type_definitions(&self) -> Vec<&TypeDefinition>;

    /// The one service owning `resource` (incoming `hasResource`)
    fn service_of(&self, resource: &Resource) -> Result<&Service>;

    /// The one resource using `type_definition` (incoming `usesType`)
    fn parent_resource_of(&self, type_definition: &TypeDefinition) -> Result<&Resource>;
}
