//! Schema assembly
//!
//! Walks every resource and type definition of a specification source and
//! produces the two sorted output schemas.

use crate::bindings::BindingGenerator;
use cdk_schema_generator_common::{
    AttributeSpec, PrimitiveType, PropertySpec, PropertyTypeEntry, PropertyTypeSchema,
    ResourceEntry, ResourceSchema, Result, ValueType, CFN, CFN_TAG,
};
use cdk_schema_generator_parser::spec::{RawAttribute, RawProperty};
use cdk_schema_generator_parser::{SpecSource, TypeDecider};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Builds the resource and property type schemas from a specification source
///
/// Both builds only read the source, so they can be run in any order, any
/// number of times, with identical results.
pub struct SchemaAssembler<'a, S: SpecSource + ?Sized> {
    source: &'a S,
    bindings: BindingGenerator,
}

impl<'a, S: SpecSource + ?Sized> SchemaAssembler<'a, S> {
    /// Create an assembler using the default binding conventions
    pub fn new(source: &'a S) -> Self {
        Self::with_bindings(source, BindingGenerator::default())
    }

    pub fn with_bindings(source: &'a S, bindings: BindingGenerator) -> Self {
        Self { source, bindings }
    }

    /// Build the resource schema, keyed by CloudFormation type
    pub fn build_resource_schema(&self) -> Result<ResourceSchema> {
        let mut schema = ResourceSchema::new();

        for resource in self.source.resources() {
            let cloud_formation_type = &resource.cloud_formation_type;
            let service = self.source.service_of(resource)?;
            debug!(resource = %cloud_formation_type, service = %service.name, "assembling resource");

            let entry = ResourceEntry {
                construct: self
                    .bindings
                    .service_binding(service, &format!("{}{}", CFN, resource.name)),
                attributes: self.map_attributes(&resource.attributes, cloud_formation_type)?,
                properties: self.map_properties(&resource.properties, cloud_formation_type)?,
            };

            if schema.insert(cloud_formation_type.clone(), entry).is_some() {
                warn!(resource = %cloud_formation_type, "duplicate resource type, keeping the last one");
            }
        }

        info!(resources = schema.len(), "assembled resource schema");
        Ok(schema)
    }

    /// Build the property type schema, keyed by `<ResourceType>.<TypeName>Property`
    ///
    /// The well-known `CfnTag` type is always added.
    pub fn build_property_type_schema(&self) -> Result<PropertyTypeSchema> {
        let mut schema = PropertyTypeSchema::new();

        for type_definition in self.source.type_definitions() {
            let parent = self.source.parent_resource_of(type_definition)?;
            let service = self.source.service_of(parent)?;
            let property_name = format!("{}Property", type_definition.name);
            let key = format!("{}.{}", parent.cloud_formation_type, property_name);
            debug!(property_type = %key, "assembling property type");

            let entry = PropertyTypeEntry {
                name: self.bindings.service_binding(
                    service,
                    &format!("{}{}.{}", CFN, parent.name, property_name),
                ),
                properties: self
                    .map_properties(&type_definition.properties, &parent.cloud_formation_type)?,
            };

            if schema.insert(key.clone(), entry).is_some() {
                warn!(property_type = %key, "duplicate property type, keeping the last one");
            }
        }

        schema.insert(CFN_TAG.to_string(), tag_property_type(&self.bindings));

        info!(property_types = schema.len(), "assembled property type schema");
        Ok(schema)
    }

    fn map_properties(
        &self,
        properties: &BTreeMap<String, RawProperty>,
        cloud_formation_type: &str,
    ) -> Result<BTreeMap<String, PropertySpec>> {
        let decider = TypeDecider::new(self.source);
        properties
            .iter()
            .map(|(name, property)| {
                let value_type = decider.resolve(
                    cloud_formation_type,
                    &property.value_type,
                    &property.previous_types,
                )?;
                let required = property.required.unwrap_or(false);
                Ok((name.clone(), PropertySpec::new(name.clone(), value_type, required)))
            })
            .collect()
    }

    fn map_attributes(
        &self,
        attributes: &BTreeMap<String, RawAttribute>,
        cloud_formation_type: &str,
    ) -> Result<BTreeMap<String, AttributeSpec>> {
        let decider = TypeDecider::new(self.source);
        attributes
            .iter()
            .map(|(name, attribute)| {
                let value_type = decider.resolve(
                    cloud_formation_type,
                    &attribute.value_type,
                    &attribute.previous_types,
                )?;
                Ok((
                    name.clone(),
                    AttributeSpec {
                        name: name.clone(),
                        value_type,
                    },
                ))
            })
            .collect()
    }
}

/// The well-known `CfnTag` property type: required string `Key` and `Value`
pub fn tag_property_type(bindings: &BindingGenerator) -> PropertyTypeEntry {
    let string_property = |name: &str| {
        (
            name.to_string(),
            PropertySpec::new(name, ValueType::Primitive(PrimitiveType::String), true),
        )
    };

    PropertyTypeEntry {
        name: bindings.core_binding(CFN_TAG),
        properties: [string_property("Key"), string_property("Value")]
            .into_iter()
            .collect(),
    }
}
