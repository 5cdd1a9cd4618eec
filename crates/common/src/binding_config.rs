//! Binding convention loading from YAML files
//!
//! The per-language base locations and the service-name exceptions are data,
//! so a new exception can be added to a YAML file instead of the code:
//!
//! ```yaml
//! version: 1
//! bases:
//!   typescript: aws-cdk-lib
//!   csharp: Amazon.CDK
//!   golang: github.com/aws/aws-cdk-go/awscdk/v2
//!   java: software.amazon.awscdk
//!   python: aws_cdk
//! golang_core_package: awscdk
//! csharp_service_exceptions:
//!   - { from: ApiGatewayV2, to: APIGatewayV2 }
//! ```

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root structure for binding configuration YAML files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BindingConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Base module/namespace/package of each language
    #[serde(default)]
    pub bases: BindingBases,
    /// Go package used by types that belong to no service
    #[serde(default = "default_golang_core_package")]
    pub golang_core_package: String,
    /// Literal rewrites applied to the capitalized service name in C#
    ///
    /// Applied in order. Entries from a YAML file are appended to the
    /// built-in ones rather than replacing them.
    #[serde(default)]
    pub csharp_service_exceptions: Vec<ServiceNameException>,
}

/// Fixed base location per language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BindingBases {
    pub typescript: String,
    pub csharp: String,
    pub golang: String,
    pub java: String,
    pub python: String,
}

/// A literal substring rewrite, e.g. `ApiGatewayV2` -> `APIGatewayV2`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceNameException {
    pub from: String,
    pub to: String,
}

/// C# stylizes ApiGatewayV2 as APIGatewayV2, the same is not true for ApiGateway
const BUILTIN_CSHARP_EXCEPTIONS: &[(&str, &str)] = &[("ApiGatewayV2", "APIGatewayV2")];

fn default_version() -> u32 {
    1
}

fn default_golang_core_package() -> String {
    "awscdk".to_string()
}

impl Default for BindingBases {
    fn default() -> Self {
        Self {
            typescript: "aws-cdk-lib".to_string(),
            csharp: "Amazon.CDK".to_string(),
            golang: "github.com/aws/aws-cdk-go/awscdk/v2".to_string(),
            java: "software.amazon.awscdk".to_string(),
            python: "aws_cdk".to_string(),
        }
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            bases: BindingBases::default(),
            golang_core_package: default_golang_core_package(),
            csharp_service_exceptions: builtin_csharp_exceptions(),
        }
    }
}

fn builtin_csharp_exceptions() -> Vec<ServiceNameException> {
    BUILTIN_CSHARP_EXCEPTIONS
        .iter()
        .map(|(from, to)| ServiceNameException {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect()
}

impl BindingConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read binding config {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to parse binding config YAML from {:?}: {}",
                path, e
            ))
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: BindingConfig = serde_yaml::from_str(content)?;

        let mut exceptions = builtin_csharp_exceptions();
        for exception in config.csharp_service_exceptions.drain(..) {
            if !exceptions.contains(&exception) {
                exceptions.push(exception);
            }
        }
        config.csharp_service_exceptions = exceptions;

        Ok(config)
    }

    /// Apply the C# exceptions to a capitalized service name
    pub fn apply_csharp_exceptions(&self, capitalized: &str) -> String {
        self.csharp_service_exceptions
            .iter()
            .fold(capitalized.to_string(), |name, exception| {
                name.replacen(&exception.from, &exception.to, 1)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_bases() {
        let config = BindingConfig::default();
        assert_eq!(config.bases.typescript, "aws-cdk-lib");
        assert_eq!(config.bases.golang, "github.com/aws/aws-cdk-go/awscdk/v2");
        assert_eq!(config.golang_core_package, "awscdk");
        assert_eq!(config.csharp_service_exceptions.len(), 1);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config = BindingConfig::from_yaml("bases:\n  python: my_cdk\n").unwrap();
        assert_eq!(config.bases.python, "my_cdk");
        assert_eq!(config.bases.java, "software.amazon.awscdk");
        assert_eq!(config.version, 1);
        assert_eq!(config.golang_core_package, "awscdk");
    }

    #[test]
    fn test_exceptions_are_additive() {
        let yaml = r#"
csharp_service_exceptions:
  - { from: Iot, to: IoT }
  - { from: ApiGatewayV2, to: APIGatewayV2 }
"#;
        let config = BindingConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.csharp_service_exceptions.len(), 2);
        assert_eq!(config.csharp_service_exceptions[0].from, "ApiGatewayV2");
        assert_eq!(config.apply_csharp_exceptions("IotEvents"), "IoTEvents");
    }

    #[test]
    fn test_apply_csharp_exceptions() {
        let config = BindingConfig::default();
        assert_eq!(config.apply_csharp_exceptions("ApiGatewayV2"), "APIGatewayV2");
        assert_eq!(config.apply_csharp_exceptions("ApiGateway"), "ApiGateway");
        assert_eq!(config.apply_csharp_exceptions("S3"), "S3");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version: 1\ngolang_core_package: cdk").unwrap();

        let config = BindingConfig::load(file.path()).unwrap();
        assert_eq!(config.golang_core_package, "cdk");
    }

    #[test]
    fn test_load_missing_file() {
        let result = BindingConfig::load(Path::new("/nonexistent/bindings.yaml"));
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }
}
