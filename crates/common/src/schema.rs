//! Normalized schema data model
//!
//! These types are what the generator emits. Their serde representation is
//! the JSON contract consumed by downstream code generators:
//!
//! ```json
//! {
//!   "AWS::S3::Bucket": {
//!     "construct": { "typescript": { "module": "aws-cdk-lib/aws-s3", "name": "CfnBucket" }, ... },
//!     "attributes": { "Arn": { "name": "Arn", "valueType": { "primitive": "string" } } },
//!     "properties": { "BucketName": { "name": "BucketName", "valueType": { "primitive": "string" } } }
//!   }
//! }
//! ```
//!
//! Every map is a `BTreeMap`, so keys serialize in lexicographic order at
//! every nesting level regardless of insertion order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Prefix of every generated L1 construct class name
pub const CFN: &str = "Cfn";

/// Name of the well-known tag property type
pub const CFN_TAG: &str = "CfnTag";

/// Primitive value kinds understood by the downstream generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveType {
    String,
    Boolean,
    Number,
    DateTime,
    Json,
    Any,
    Undefined,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Number => "number",
            PrimitiveType::DateTime => "date-time",
            PrimitiveType::Json => "json",
            PrimitiveType::Any => "any",
            PrimitiveType::Undefined => "undefined",
        }
    }
}

/// A normalized value type
///
/// Serializes externally tagged, e.g. `{"listOf": {"primitive": "string"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Primitive(PrimitiveType),
    ListOf(Box<ValueType>),
    MapOf(Box<ValueType>),
    /// Reference to another type in the property type schema
    Named(String),
    /// Members in input order, never deduplicated or flattened
    UnionOf(Vec<ValueType>),
}

impl ValueType {
    pub fn list_of(element: ValueType) -> Self {
        ValueType::ListOf(Box::new(element))
    }

    pub fn map_of(element: ValueType) -> Self {
        ValueType::MapOf(Box::new(element))
    }

    pub fn named(name: impl Into<String>) -> Self {
        ValueType::Named(name.into())
    }

    /// Nesting depth, counting this node as 1
    pub fn depth(&self) -> usize {
        match self {
            ValueType::Primitive(_) | ValueType::Named(_) => 1,
            ValueType::ListOf(element) | ValueType::MapOf(element) => 1 + element.depth(),
            ValueType::UnionOf(members) => {
                1 + members.iter().map(ValueType::depth).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Primitive(p) => write!(f, "{}", p.as_str()),
            ValueType::ListOf(element) => write!(f, "list<{}>", element),
            ValueType::MapOf(element) => write!(f, "map<{}>", element),
            ValueType::Named(name) => write!(f, "{}", name),
            ValueType::UnionOf(members) => {
                let parts: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "union<{}>", parts.join(" | "))
            }
        }
    }
}

/// A property of a resource or property type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub name: String,
    pub value_type: ValueType,
    /// Only ever `Some(true)`; optional properties omit the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, value_type: ValueType, required: bool) -> Self {
        Self {
            name: name.into(),
            value_type,
            required: required.then_some(true),
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// A read-only attribute of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSpec {
    pub name: String,
    pub value_type: ValueType,
}

/// TypeScript and Python location: an importable module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBinding {
    pub module: String,
    pub name: String,
}

/// C# location: a namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBinding {
    pub namespace: String,
    pub name: String,
}

/// Go location: module path plus package name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoBinding {
    pub module: String,
    pub package: String,
    pub name: String,
}

/// Java location: a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageBinding {
    pub package: String,
    pub name: String,
}

/// Per-language identifiers for one generated class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub typescript: ModuleBinding,
    pub csharp: NamespaceBinding,
    pub golang: GoBinding,
    pub java: PackageBinding,
    pub python: ModuleBinding,
}

/// One entry of the property type schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTypeEntry {
    pub name: Bindings,
    pub properties: BTreeMap<String, PropertySpec>,
}

/// One entry of the resource schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub construct: Bindings,
    pub attributes: BTreeMap<String, AttributeSpec>,
    pub properties: BTreeMap<String, PropertySpec>,
}

/// Resource type id (`AWS::S3::Bucket`) to resource entry
pub type ResourceSchema = BTreeMap<String, ResourceEntry>;

/// Qualified type key (`AWS::S3::Bucket.CorsRuleProperty`) to property type entry
pub type PropertyTypeSchema = BTreeMap<String, PropertyTypeEntry>;
