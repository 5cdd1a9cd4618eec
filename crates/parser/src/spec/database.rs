//! Specification database loader and relation queries

use super::types::{Relation, Resource, Service, SpecDocument, TypeDefinition};
use crate::source::{ReferenceResolver, SpecSource};
use cdk_schema_generator_common::{GeneratorError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

static SHARED: OnceLock<SpecDatabase> = OnceLock::new();

/// In-memory specification database
///
/// Loaded once, never mutated. Incoming-relation indexes are built at load
/// time so relation lookups do not scan the edge lists.
#[derive(Debug)]
pub struct SpecDatabase {
    document: SpecDocument,

    /// resource id -> ids of services with a `hasResource` edge to it
    resource_owners: HashMap<String, Vec<String>>,

    /// type definition id -> ids of resources with a `usesType` edge to it
    type_users: HashMap<String, Vec<String>>,

    /// File this database was loaded from, if any
    source_path: Option<PathBuf>,
}

impl SpecDatabase {
    /// Load the database from a JSON file
    ///
    /// # Example
    /// ```rust,ignore
    /// let db = SpecDatabase::from_file("spec/db.json")?;
    /// println!("{} resources", db.resources().len());
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read specification database {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut database = Self::from_json(&content).map_err(|e| match e {
            GeneratorError::Parse(msg) => {
                GeneratorError::Parse(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        database.source_path = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            services = database.document.service.len(),
            resources = database.document.resource.len(),
            type_definitions = database.document.type_definition.len(),
            "loaded specification database"
        );

        Ok(database)
    }

    /// Parse the database from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: SpecDocument = serde_json::from_str(json).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse specification database JSON: {}", e))
        })?;

        Ok(Self::from_document(document))
    }

    /// Build the database from an already parsed document
    pub fn from_document(mut document: SpecDocument) -> Self {
        for (id, service) in document.service.iter_mut() {
            if service.id.is_empty() {
                service.id = id.clone();
            }
        }
        for (id, resource) in document.resource.iter_mut() {
            if resource.id.is_empty() {
                resource.id = id.clone();
            }
        }
        for (id, type_definition) in document.type_definition.iter_mut() {
            if type_definition.id.is_empty() {
                type_definition.id = id.clone();
            }
        }

        let resource_owners = index_incoming(&document.has_resource);
        let type_users = index_incoming(&document.uses_type);

        let database = Self {
            document,
            resource_owners,
            type_users,
            source_path: None,
        };

        for relation in database.dangling_relations() {
            warn!(from = %relation.from, to = %relation.to, "relation references an unknown entity");
        }

        database
    }

    /// Process-wide handle, loaded on first use
    ///
    /// The first successful call loads `path`; every later call returns the
    /// same database regardless of the path it is given.
    pub fn shared(path: &Path) -> Result<&'static SpecDatabase> {
        if let Some(database) = SHARED.get() {
            if database.source_path.as_deref() != Some(path) {
                debug!(
                    requested = %path.display(),
                    "specification database already loaded, reusing cached handle"
                );
            }
            return Ok(database);
        }

        let database = Self::from_file(path)?;
        Ok(SHARED.get_or_init(|| database))
    }

    /// File this database was loaded from
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// All services, in id order
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.document.service.values()
    }

    pub fn get_service(&self, id: &str) -> Option<&Service> {
        self.document.service.get(id)
    }

    pub fn get_resource(&self, id: &str) -> Option<&Resource> {
        self.document.resource.get(id)
    }

    pub fn get_type_definition(&self, id: &str) -> Option<&TypeDefinition> {
        self.document.type_definition.get(id)
    }

    /// Relation edges whose source or target entity does not exist
    ///
    /// Relation lookups skip these edges, so a non-empty result means the
    /// database is corrupt even if generation succeeds.
    pub fn dangling_relations(&self) -> Vec<&Relation> {
        let doc = &self.document;
        let has_resource = doc.has_resource.iter().filter(|r| {
            !doc.service.contains_key(&r.from) || !doc.resource.contains_key(&r.to)
        });
        let uses_type = doc.uses_type.iter().filter(|r| {
            !doc.resource.contains_key(&r.from) || !doc.type_definition.contains_key(&r.to)
        });
        has_resource.chain(uses_type).collect()
    }

    /// Find a resource by its CloudFormation type (e.g. `AWS::S3::Bucket`)
    pub fn find_resource_by_type(&self, cloud_formation_type: &str) -> Option<&Resource> {
        self.document
            .resource
            .values()
            .find(|r| r.cloud_formation_type == cloud_formation_type)
    }
}

fn index_incoming(relations: &[Relation]) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for relation in relations {
        index
            .entry(relation.to.clone())
            .or_default()
            .push(relation.from.clone());
    }
    index
}

/// Resolve the sources of an incoming relation, requiring exactly one
///
/// Edges from ids that name no entity are skipped.
fn only<'a, T>(
    target: &str,
    sources: Option<&Vec<String>>,
    lookup: impl Fn(&str) -> Option<&'a T>,
) -> std::result::Result<&'a T, usize> {
    let found: Vec<&T> = sources
        .into_iter()
        .flatten()
        .filter_map(|id| {
            let entity = lookup(id.as_str());
            if entity.is_none() {
                debug!(from = %id, to = target, "skipping edge from unknown entity");
            }
            entity
        })
        .collect();

    match found.as_slice() {
        [single] => Ok(*single),
        _ => Err(found.len()),
    }
}

impl ReferenceResolver for SpecDatabase {
    fn type_definition_name(&self, reference: &str) -> Option<String> {
        self.document
            .type_definition
            .get(reference)
            .map(|t| t.name.clone())
            .filter(|name| !name.is_empty())
    }
}

impl SpecSource for SpecDatabase {
    fn resources(&self) -> Vec<&Resource> {
        self.document.resource.values().collect()
    }

    fn type_definitions(&self) -> Vec<&TypeDefinition> {
        self.document.type_definition.values().collect()
    }

    fn service_of(&self, resource: &Resource) -> Result<&Service> {
        only(&resource.id, self.resource_owners.get(&resource.id), |id| {
            self.document.service.get(id)
        })
        .map_err(|matches| {
            warn!(resource = %resource.cloud_formation_type, matches, "owning service is ambiguous or missing");
            GeneratorError::ServiceNotFound {
                resource: resource.cloud_formation_type.clone(),
                matches,
            }
        })
    }

    fn parent_resource_of(&self, type_definition: &TypeDefinition) -> Result<&Resource> {
        only(&type_definition.id, self.type_users.get(&type_definition.id), |id| {
            self.document.resource.get(id)
        })
        .map_err(|matches| {
            warn!(type_name = %type_definition.name, matches, "parent resource is ambiguous or missing");
            GeneratorError::ParentNotFound {
                type_name: type_definition.name.clone(),
                matches,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SPEC_JSON: &str = r#"{
        "service": {
            "svc-s3": {
                "name": "aws-s3",
                "shortName": "s3",
                "capitalized": "S3",
                "cloudFormationNamespace": "AWS::S3"
            },
            "svc-sqs": {
                "name": "aws-sqs",
                "shortName": "sqs",
                "capitalized": "SQS",
                "cloudFormationNamespace": "AWS::SQS"
            }
        },
        "resource": {
            "res-bucket": {
                "name": "Bucket",
                "cloudFormationType": "AWS::S3::Bucket",
                "properties": {
                    "BucketName": { "type": { "type": "string" } }
                }
            },
            "res-orphan": {
                "name": "Orphan",
                "cloudFormationType": "AWS::S3::Orphan"
            },
            "res-queue": {
                "name": "Queue",
                "cloudFormationType": "AWS::SQS::Queue"
            }
        },
        "typeDefinition": {
            "type-cors": {
                "name": "CorsRule",
                "properties": {
                    "MaxAge": { "type": { "type": "integer" } }
                }
            },
            "type-shared": { "name": "Shared" },
            "type-unnamed": { "name": "" }
        },
        "hasResource": [
            { "from": "svc-s3", "to": "res-bucket" },
            { "from": "svc-s3", "to": "res-queue" },
            { "from": "svc-sqs", "to": "res-queue" }
        ],
        "usesType": [
            { "from": "res-bucket", "to": "type-cors" },
            { "from": "res-bucket", "to": "type-shared" },
            { "from": "res-queue", "to": "type-shared" }
        ]
    }"#;

    #[test]
    fn test_load_fills_ids_from_keys() {
        let db = SpecDatabase::from_json(SPEC_JSON).unwrap();
        assert_eq!(db.get_resource("res-bucket").unwrap().id, "res-bucket");
        assert_eq!(db.get_service("svc-s3").unwrap().id, "svc-s3");
        assert_eq!(db.get_type_definition("type-cors").unwrap().id, "type-cors");
        assert_eq!(db.resources().len(), 3);
        assert_eq!(db.type_definitions().len(), 3);
        assert_eq!(db.services().count(), 2);
    }

    #[test]
    fn test_service_of_single_owner() {
        let db = SpecDatabase::from_json(SPEC_JSON).unwrap();
        let bucket = db.find_resource_by_type("AWS::S3::Bucket").unwrap();
        let service = db.service_of(bucket).unwrap();
        assert_eq!(service.name, "aws-s3");
    }

    #[test]
    fn test_service_of_missing_owner() {
        let db = SpecDatabase::from_json(SPEC_JSON).unwrap();
        let orphan = db.get_resource("res-orphan").unwrap();
        match db.service_of(orphan) {
            Err(GeneratorError::ServiceNotFound { resource, matches }) => {
                assert_eq!(resource, "AWS::S3::Orphan");
                assert_eq!(matches, 0);
            }
            other => panic!("expected ServiceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_service_of_ambiguous_owner() {
        let db = SpecDatabase::from_json(SPEC_JSON).unwrap();
        let queue = db.get_resource("res-queue").unwrap();
        assert!(matches!(
            db.service_of(queue),
            Err(GeneratorError::ServiceNotFound { matches: 2, .. })
        ));
    }

    #[test]
    fn test_parent_resource_of() {
        let db = SpecDatabase::from_json(SPEC_JSON).unwrap();

        let cors = db.get_type_definition("type-cors").unwrap();
        assert_eq!(
            db.parent_resource_of(cors).unwrap().cloud_formation_type,
            "AWS::S3::Bucket"
        );

        let shared = db.get_type_definition("type-shared").unwrap();
        match db.parent_resource_of(shared) {
            Err(GeneratorError::ParentNotFound { type_name, matches }) => {
                assert_eq!(type_name, "Shared");
                assert_eq!(matches, 2);
            }
            other => panic!("expected ParentNotFound, got {:?}", other),
        }

        let unnamed = db.get_type_definition("type-unnamed").unwrap();
        assert!(matches!(
            db.parent_resource_of(unnamed),
            Err(GeneratorError::ParentNotFound { matches: 0, .. })
        ));
    }

    #[test]
    fn test_type_definition_name() {
        let db = SpecDatabase::from_json(SPEC_JSON).unwrap();
        assert_eq!(
            db.type_definition_name("type-cors"),
            Some("CorsRule".to_string())
        );
        assert_eq!(db.type_definition_name("type-unnamed"), None);
        assert_eq!(db.type_definition_name("does-not-exist"), None);
    }

    #[test]
    fn test_invalid_json() {
        let result = SpecDatabase::from_json("{ not json");
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_from_file_records_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SPEC_JSON.as_bytes()).unwrap();

        let db = SpecDatabase::from_file(file.path()).unwrap();
        assert_eq!(db.source_path(), Some(file.path()));
    }

    #[test]
    fn test_dangling_edge_is_reported_and_skipped() {
        let db = SpecDatabase::from_json(
            r#"{
                "service": {
                    "s3": { "name": "aws-s3", "capitalized": "S3", "cloudFormationNamespace": "AWS::S3" }
                },
                "resource": {
                    "bucket": { "name": "Bucket", "cloudFormationType": "AWS::S3::Bucket" }
                },
                "hasResource": [
                    { "from": "s3", "to": "bucket" },
                    { "from": "ghost", "to": "bucket" }
                ],
                "usesType": [{ "from": "bucket", "to": "missing-type" }]
            }"#,
        )
        .unwrap();

        let bucket = db.get_resource("bucket").unwrap();
        assert_eq!(db.service_of(bucket).unwrap().name, "aws-s3");

        let dangling = db.dangling_relations();
        assert_eq!(dangling.len(), 2);
        assert_eq!(dangling[0].from, "ghost");
        assert_eq!(dangling[1].to, "missing-type");
    }

    #[test]
    fn test_consistent_database_has_no_dangling_relations() {
        let db = SpecDatabase::from_json(SPEC_JSON).unwrap();
        assert!(db.dangling_relations().is_empty());
    }

    // The shared handle is process-wide, so every step lives in one test
    #[test]
    fn test_shared_loads_once() {
        assert!(SpecDatabase::shared(Path::new("/nonexistent/shared-db.json")).is_err());

        let mut first_file = tempfile::NamedTempFile::new().unwrap();
        first_file.write_all(SPEC_JSON.as_bytes()).unwrap();
        let first = SpecDatabase::shared(first_file.path()).unwrap();
        assert_eq!(first.source_path(), Some(first_file.path()));
        assert_eq!(first.resources().len(), 3);

        let mut other_file = tempfile::NamedTempFile::new().unwrap();
        other_file.write_all(b"{}").unwrap();
        let second = SpecDatabase::shared(other_file.path()).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.source_path(), Some(first_file.path()));
        assert_eq!(second.resources().len(), 3);
    }

    #[test]
    fn test_from_file_missing() {
        let result = SpecDatabase::from_file("/nonexistent/db.json");
        match result {
            Err(GeneratorError::Parse(msg)) => assert!(msg.contains("/nonexistent/db.json")),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }
}
