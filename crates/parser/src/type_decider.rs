//! Value type resolution
//!
//! Maps raw specification value types to the normalized `ValueType` tree.

use crate::source::ReferenceResolver;
use crate::spec::RawValueType;
use cdk_schema_generator_common::{
    GeneratorError, PrimitiveType, Result, ValueType, CFN_TAG,
};
use std::iter;
use tracing::debug;

/// Resolves raw value types against a reference resolver
///
/// # Examples
/// ```rust,ignore
/// let decider = TypeDecider::new(&database);
/// let value_type = decider.resolve("AWS::S3::Bucket", &RawValueType::String, &[])?;
/// assert_eq!(value_type, ValueType::Primitive(PrimitiveType::String));
/// ```
pub struct TypeDecider<'a, R: ReferenceResolver + ?Sized> {
    resolver: &'a R,
}

impl<'a, R: ReferenceResolver + ?Sized> TypeDecider<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Resolve a value type, merging earlier revisions into a union
    ///
    /// With `previous_types` present the result is always
    /// `UnionOf([current, previous...])`, in that order.
    pub fn resolve(
        &self,
        resource_type: &str,
        current: &RawValueType,
        previous_types: &[RawValueType],
    ) -> Result<ValueType> {
        if previous_types.is_empty() {
            return self.resolve_type(resource_type, current);
        }

        let members = iter::once(current)
            .chain(previous_types)
            .map(|raw| self.resolve_type(resource_type, raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(ValueType::UnionOf(members))
    }

    fn resolve_type(&self, resource_type: &str, raw: &RawValueType) -> Result<ValueType> {
        match raw {
            RawValueType::String => Ok(ValueType::Primitive(PrimitiveType::String)),
            RawValueType::Boolean => Ok(ValueType::Primitive(PrimitiveType::Boolean)),
            RawValueType::Number | RawValueType::Integer => {
                Ok(ValueType::Primitive(PrimitiveType::Number))
            }
            RawValueType::DateTime => Ok(ValueType::Primitive(PrimitiveType::DateTime)),
            RawValueType::Json => Ok(ValueType::Primitive(PrimitiveType::Json)),
            RawValueType::Null => Ok(ValueType::Primitive(PrimitiveType::Undefined)),
            RawValueType::Tag => Ok(ValueType::named(CFN_TAG)),
            RawValueType::Ref { reference } => {
                let name = self
                    .resolver
                    .type_definition_name(&reference.reference)
                    .ok_or_else(|| GeneratorError::MissingReference {
                        resource_type: resource_type.to_string(),
                        reference: reference.reference.clone(),
                    })?;
                Ok(ValueType::named(format!("{}.{}", resource_type, name)))
            }
            RawValueType::Array { element } => {
                let element = element
                    .as_deref()
                    .ok_or_else(|| malformed(resource_type, "Expected array type with element"))?;
                Ok(ValueType::list_of(self.resolve_type(resource_type, element)?))
            }
            RawValueType::Map { element } => {
                let element = element
                    .as_deref()
                    .ok_or_else(|| malformed(resource_type, "Expected map type with element"))?;
                Ok(ValueType::map_of(self.resolve_type(resource_type, element)?))
            }
            RawValueType::Union { types } => {
                let types = types
                    .as_deref()
                    .filter(|types| !types.is_empty())
                    .ok_or_else(|| malformed(resource_type, "Expected union type with types"))?;
                let members = types
                    .iter()
                    .map(|t| self.resolve_type(resource_type, t))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ValueType::UnionOf(members))
            }
            RawValueType::Unknown => {
                debug!(resource_type, "unrecognized value type, falling back to any");
                Ok(ValueType::Primitive(PrimitiveType::Any))
            }
        }
    }
}

fn malformed(resource_type: &str, message: &str) -> GeneratorError {
    GeneratorError::MalformedType {
        resource_type: resource_type.to_string(),
        message: message.to_string(),
    }
}
