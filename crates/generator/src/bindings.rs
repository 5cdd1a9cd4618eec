//! Language binding derivation
//!
//! Computes, for each target language, where a generated class lives and
//! what it is called. Every rule is a row in a per-language table so that
//! the naming of one ecosystem can be read (and changed) in one place.

use cdk_schema_generator_common::{
    BindingConfig, Bindings, GoBinding, ModuleBinding, NamespaceBinding, PackageBinding,
};
use cdk_schema_generator_parser::spec::Service;
use regex::Regex;
use std::sync::OnceLock;

/// A target language ecosystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    CSharp,
    Golang,
    Java,
    Python,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::TypeScript,
        Language::CSharp,
        Language::Golang,
        Language::Java,
        Language::Python,
    ];

    /// Key of this language in the emitted bindings object
    pub fn key(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::CSharp => "csharp",
            Language::Golang => "golang",
            Language::Java => "java",
            Language::Python => "python",
        }
    }

    /// Separator between the base location and the service segment
    fn separator(&self) -> &'static str {
        match self {
            Language::TypeScript | Language::Golang => "/",
            Language::CSharp | Language::Java | Language::Python => ".",
        }
    }
}

/// Derives per-language bindings from service identifiers and class names
#[derive(Debug, Clone, Default)]
pub struct BindingGenerator {
    config: BindingConfig,
}

impl BindingGenerator {
    pub fn new(config: BindingConfig) -> Self {
        Self { config }
    }

    /// Bindings for a type that belongs to no service (e.g. `CfnTag`)
    pub fn core_binding(&self, name: &str) -> Bindings {
        let bases = &self.config.bases;
        Bindings {
            typescript: ModuleBinding {
                module: bases.typescript.clone(),
                name: name.to_string(),
            },
            csharp: NamespaceBinding {
                namespace: bases.csharp.clone(),
                name: name.to_string(),
            },
            golang: GoBinding {
                module: bases.golang.clone(),
                package: self.config.golang_core_package.clone(),
                name: name.to_string(),
            },
            java: PackageBinding {
                package: bases.java.clone(),
                name: name.to_string(),
            },
            python: ModuleBinding {
                module: bases.python.clone(),
                name: name.to_string(),
            },
        }
    }

    /// Bindings for a resource or property type owned by `service`
    pub fn service_binding(&self, service: &Service, name: &str) -> Bindings {
        Bindings {
            typescript: ModuleBinding {
                module: self.location(Language::TypeScript, service),
                name: name.to_string(),
            },
            csharp: NamespaceBinding {
                namespace: self.location(Language::CSharp, service),
                name: name.to_string(),
            },
            golang: GoBinding {
                module: self.location(Language::Golang, service),
                package: go_package_name(&service.capitalized),
                name: name.replacen('.', "_", 1),
            },
            java: PackageBinding {
                package: self.location(Language::Java, service),
                name: name.to_string(),
            },
            python: ModuleBinding {
                module: self.location(Language::Python, service),
                name: name.to_string(),
            },
        }
    }

    /// Base location joined with the service segment
    pub fn location(&self, language: Language, service: &Service) -> String {
        format!(
            "{}{}{}",
            self.base(language),
            language.separator(),
            self.service_segment(language, service)
        )
    }

    fn base(&self, language: Language) -> &str {
        let bases = &self.config.bases;
        match language {
            Language::TypeScript => &bases.typescript,
            Language::CSharp => &bases.csharp,
            Language::Golang => &bases.golang,
            Language::Java => &bases.java,
            Language::Python => &bases.python,
        }
    }

    /// The service part of a language location
    ///
    /// | Language   | `aws-s3` | `alexa-ask` |
    /// |------------|----------|-------------|
    /// | TypeScript | `aws-s3` | `alexa-ask` |
    /// | C#         | `AWS.S3` | `Alexa.ASK` |
    /// | Go         | `awss3`  | `alexaask`  |
    /// | Java       | `services.s3` | `alexa.ask` |
    /// | Python     | `aws_s3` | `alexa_ask` |
    pub fn service_segment(&self, language: Language, service: &Service) -> String {
        match language {
            Language::TypeScript => service.name.clone(),
            Language::CSharp => {
                let namespace = service
                    .cloud_formation_namespace
                    .split("::")
                    .next()
                    .unwrap_or_default();
                format!(
                    "{}.{}",
                    namespace,
                    self.config.apply_csharp_exceptions(&service.capitalized)
                )
            }
            Language::Golang => service.name.replacen('-', "", 1),
            Language::Java => service
                .name
                .replacen("aws-", "services.", 1)
                .replacen('-', ".", 1),
            Language::Python => service.name.replacen('-', "_", 1),
        }
    }
}

fn acronym_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym boundary pattern"))
}

fn lower_upper_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("case boundary pattern"))
}

/// Go package name of a capitalized service name
///
/// Underscores go before the last capital of an acronym run that is
/// followed by a lowercase letter, and at every lower-to-upper transition.
///
/// ```
/// use cdk_schema_generator_generator::go_package_name;
///
/// assert_eq!(go_package_name("S3"), "s3");
/// assert_eq!(go_package_name("ApiGatewayV2"), "api_gateway_v2");
/// assert_eq!(go_package_name("DynamoDB"), "dynamo_db");
/// ```
pub fn go_package_name(capitalized: &str) -> String {
    let split_acronyms = acronym_boundary().replace_all(capitalized, "${1}_${2}");
    lower_upper_boundary()
        .replace_all(&split_acronyms, "${1}_${2}")
        .to_lowercase()
}
