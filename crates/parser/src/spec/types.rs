//! AWS service specification database type definitions
//!
//! These types represent the structure of the vendored specification
//! database JSON file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root specification database document
///
/// Entity tables are keyed by entity id. Relations are stored as edge lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecDocument {
    /// Services (e.g. `aws-s3`)
    #[serde(default)]
    pub service: BTreeMap<String, Service>,

    /// Resource types (e.g. `AWS::S3::Bucket`)
    #[serde(default)]
    pub resource: BTreeMap<String, Resource>,

    /// Property type definitions nested under resources
    #[serde(default, rename = "typeDefinition")]
    pub type_definition: BTreeMap<String, TypeDefinition>,

    /// Service -> Resource edges
    #[serde(default, rename = "hasResource")]
    pub has_resource: Vec<Relation>,

    /// Resource -> TypeDefinition edges
    #[serde(default, rename = "usesType")]
    pub uses_type: Vec<Relation>,
}

/// A directed edge between two entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
}

/// A service grouping resources (e.g. `aws-s3`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Entity id, filled from the table key when absent
    #[serde(rename = "$id", default)]
    pub id: String,

    /// Service identifier (e.g. "aws-s3", "alexa-ask")
    pub name: String,

    /// Short name (e.g. "s3")
    #[serde(default)]
    pub short_name: String,

    /// Capitalized service name (e.g. "S3", "ApiGatewayV2")
    pub capitalized: String,

    /// CloudFormation namespace (e.g. "AWS::S3")
    pub cloud_formation_namespace: String,
}

/// A resource type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Entity id, filled from the table key when absent
    #[serde(rename = "$id", default)]
    pub id: String,

    /// Logical name (e.g. "Bucket")
    pub name: String,

    /// Canonical type identifier (e.g. "AWS::S3::Bucket")
    pub cloud_formation_type: String,

    /// Read-only attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, RawAttribute>,

    /// User-supplied properties
    #[serde(default)]
    pub properties: BTreeMap<String, RawProperty>,
}

/// A named structural type used by a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Entity id, filled from the table key when absent
    #[serde(rename = "$id", default)]
    pub id: String,

    /// Logical name (e.g. "CorsRule")
    pub name: String,

    #[serde(default)]
    pub properties: BTreeMap<String, RawProperty>,
}

/// A property as it appears in the specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    #[serde(rename = "type")]
    pub value_type: RawValueType,

    #[serde(default)]
    pub required: Option<bool>,

    /// Value types this property had in earlier revisions, newest first
    #[serde(default)]
    pub previous_types: Vec<RawValueType>,

    #[serde(default)]
    pub documentation: Option<String>,
}

/// An attribute as it appears in the specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttribute {
    #[serde(rename = "type")]
    pub value_type: RawValueType,

    #[serde(default)]
    pub previous_types: Vec<RawValueType>,

    #[serde(default)]
    pub documentation: Option<String>,
}

/// Reference to a type definition by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionReference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// A value type descriptor as it appears in the specification
///
/// `element` and `types` are optional here so that a malformed descriptor
/// loads and is reported when it is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RawValueType {
    String,
    Boolean,
    Number,
    Integer,
    DateTime,
    Json,

    /// Reference to a type definition
    Ref { reference: DefinitionReference },

    Array {
        #[serde(default)]
        element: Option<Box<RawValueType>>,
    },

    Map {
        #[serde(default)]
        element: Option<Box<RawValueType>>,
    },

    /// CloudFormation key/value tag
    Tag,

    Union {
        #[serde(default)]
        types: Option<Vec<RawValueType>>,
    },

    Null,

    /// Fallback for kinds this generator does not know
    #[serde(other)]
    Unknown,
}

impl RawValueType {
    /// Convenience constructor for a reference descriptor
    pub fn reference(id: impl Into<String>) -> Self {
        RawValueType::Ref {
            reference: DefinitionReference {
                reference: id.into(),
            },
        }
    }

    pub fn array_of(element: RawValueType) -> Self {
        RawValueType::Array {
            element: Some(Box::new(element)),
        }
    }

    pub fn map_of(element: RawValueType) -> Self {
        RawValueType::Map {
            element: Some(Box::new(element)),
        }
    }

    pub fn union_of(types: Vec<RawValueType>) -> Self {
        RawValueType::Union { types: Some(types) }
    }

    /// The `type` tag of this descriptor
    pub fn kind(&self) -> &'static str {
        match self {
            RawValueType::String => "string",
            RawValueType::Boolean => "boolean",
            RawValueType::Number => "number",
            RawValueType::Integer => "integer",
            RawValueType::DateTime => "date-time",
            RawValueType::Json => "json",
            RawValueType::Ref { .. } => "ref",
            RawValueType::Array { .. } => "array",
            RawValueType::Map { .. } => "map",
            RawValueType::Tag => "tag",
            RawValueType::Union { .. } => "union",
            RawValueType::Null => "null",
            RawValueType::Unknown => "unknown",
        }
    }
}
