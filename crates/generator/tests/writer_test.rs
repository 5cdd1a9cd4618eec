//! Integration tests for writing schema files

use cdk_schema_generator_generator::{
    generate_schemas, BindingGenerator, SchemaWriter, PROPERTY_TYPES_FILE, RESOURCES_FILE,
};
use cdk_schema_generator_parser::SpecDatabase;
use std::fs;
use tempfile::TempDir;

const SPEC_JSON: &str = r#"{
    "service": {
        "sqs": { "name": "aws-sqs", "capitalized": "SQS", "cloudFormationNamespace": "AWS::SQS" }
    },
    "resource": {
        "queue": {
            "name": "Queue",
            "cloudFormationType": "AWS::SQS::Queue",
            "attributes": { "Arn": { "type": { "type": "string" } } },
            "properties": { "DelaySeconds": { "type": { "type": "integer" } } }
        }
    },
    "hasResource": [{ "from": "sqs", "to": "queue" }]
}"#;

#[test]
fn test_write_schema_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("nested").join("out");

    let database = SpecDatabase::from_json(SPEC_JSON).unwrap();
    let schemas = generate_schemas(&database, BindingGenerator::default()).unwrap();

    let written = SchemaWriter::new(&output_dir)
        .write(&schemas.property_types, &schemas.resources)
        .unwrap();

    assert_eq!(
        written,
        vec![
            output_dir.join(PROPERTY_TYPES_FILE),
            output_dir.join(RESOURCES_FILE)
        ]
    );
    assert!(output_dir.join("cdk-types.json").exists());
    assert!(output_dir.join("cdk-resources.json").exists());

    let resources = fs::read_to_string(output_dir.join(RESOURCES_FILE)).unwrap();
    assert!(resources.starts_with("{\n  \"AWS::SQS::Queue\": {\n"));
    assert!(resources.contains("\"module\": \"aws-cdk-lib/aws-sqs\""));
    assert!(resources.contains("\"name\": \"CfnQueue\""));

    let parsed: serde_json::Value = serde_json::from_str(&resources).unwrap();
    assert_eq!(
        parsed["AWS::SQS::Queue"]["properties"]["DelaySeconds"]["valueType"]["primitive"],
        "number"
    );

    let property_types = fs::read_to_string(output_dir.join(PROPERTY_TYPES_FILE)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&property_types).unwrap();
    assert_eq!(parsed.as_object().unwrap().len(), 1);
    assert_eq!(parsed["CfnTag"]["name"]["golang"]["package"], "awscdk");
}

#[test]
fn test_rewrite_overwrites_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let writer = SchemaWriter::new(temp_dir.path());
    let database = SpecDatabase::from_json(SPEC_JSON).unwrap();
    let schemas = generate_schemas(&database, BindingGenerator::default()).unwrap();

    writer
        .write(&schemas.property_types, &schemas.resources)
        .unwrap();
    let first = fs::read(temp_dir.path().join(RESOURCES_FILE)).unwrap();

    writer
        .write(&schemas.property_types, &schemas.resources)
        .unwrap();
    let second = fs::read(temp_dir.path().join(RESOURCES_FILE)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_write_into_file_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let database = SpecDatabase::from_json(SPEC_JSON).unwrap();
    let schemas = generate_schemas(&database, BindingGenerator::default()).unwrap();

    let err = SchemaWriter::new(blocker.join("out"))
        .write(&schemas.property_types, &schemas.resources)
        .unwrap_err();
    assert!(err.to_string().contains("Failed to create output directory"));
}
