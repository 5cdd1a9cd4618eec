//! AWS service specification database
//!
//! Loads the vendored specification graph (services, resources, type
//! definitions and the `hasResource` / `usesType` relations between them)
//! and answers the relation queries the generator needs.
//!
//! ## Usage
//! ```rust,ignore
//! use cdk_schema_generator_parser::spec::SpecDatabase;
//! use cdk_schema_generator_parser::SpecSource;
//!
//! let db = SpecDatabase::from_file("spec/db.json")?;
//! for resource in db.resources() {
//!     let service = db.service_of(resource)?;
//!     println!("{} -> {}", resource.cloud_formation_type, service.name);
//! }
//! ```

mod database;
mod types;

pub use database::SpecDatabase;
pub use types::*;
