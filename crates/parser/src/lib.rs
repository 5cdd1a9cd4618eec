//! Specification loading and value type resolution
//!
//! This crate reads the vendored AWS service specification database and
//! normalizes raw value type descriptors into `ValueType` trees.
//!
//! ## Resolution Rules
//!
//! - `string`, `boolean`, `date-time`, `json` → matching primitive
//! - `number`, `integer` → `number`
//! - `null` → `undefined`
//! - `ref` → `Named("<ResourceType>.<DefinitionName>")`
//! - `array`, `map` → `ListOf` / `MapOf` of the resolved element
//! - `tag` → `Named("CfnTag")`
//! - `union` → `UnionOf` in input order
//! - anything else → `any`
//!
//! A property with previous types resolves to a union of the current type
//! followed by every previous type.

mod source;
pub mod spec;
mod type_decider;

pub use source::{ReferenceResolver, SpecSource};
pub use spec::SpecDatabase;
pub use type_decider::TypeDecider;

use cdk_schema_generator_common::{Result, ValueType};
use spec::RawValueType;

/// Resolve one value type against a specification source
///
/// # Arguments
/// * `source` - Where `ref` value types are looked up
/// * `resource_type` - CloudFormation type that owns the value (e.g. "AWS::S3::Bucket")
/// * `current` - The current value type
/// * `previous_types` - Earlier revisions of the value type, possibly empty
pub fn resolve_value_type<R: ReferenceResolver + ?Sized>(
    source: &R,
    resource_type: &str,
    current: &RawValueType,
    previous_types: &[RawValueType],
) -> Result<ValueType> {
    TypeDecider::new(source).resolve(resource_type, current, previous_types)
}
