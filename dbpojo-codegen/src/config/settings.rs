//! Configuration settings for dbpojo-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::codegen::{GeneratorOptions, NamingOptions};
use crate::error::{CodegenError, Result};

/// How pre-existing output files are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwriteMode {
    /// Ask the injected overwrite policy for every existing file
    #[default]
    Ask,
    /// Overwrite existing files without asking
    Always,
    /// Never touch existing files
    Never,
}

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to a SQL DDL file describing the schema
    #[serde(default)]
    pub schema_file: Option<PathBuf>,

    /// Path to a SQLite database file to introspect
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to exclude (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Root directory for generated sources
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Java package of the generated classes (dotted)
    #[serde(default)]
    pub package_name: String,

    /// Whether to emit a separate key class
    #[serde(default = "default_generate_key_class")]
    pub generate_key_class: bool,

    /// Whether value classes also carry the key fields
    #[serde(default = "default_include_keys_in_value")]
    pub include_keys_in_value: bool,

    /// Whether to emit an all-fields constructor
    #[serde(default = "default_constructor_with_args")]
    pub constructor_with_args: bool,

    /// Map a single-column primary key to a bare scalar type instead of a class
    #[serde(default = "default_scalar_single_key")]
    pub scalar_single_key: bool,

    /// Suffix appended to key class names
    #[serde(default = "default_key_suffix")]
    pub key_suffix: String,

    /// Suffix appended to value class names
    #[serde(default = "default_value_suffix")]
    pub value_suffix: String,

    /// Policy for files that already exist
    #[serde(default)]
    pub overwrite: OverwriteMode,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_generate_key_class() -> bool {
    defaults::GENERATE_KEY_CLASS
}
fn default_include_keys_in_value() -> bool {
    defaults::INCLUDE_KEYS_IN_VALUE
}
fn default_constructor_with_args() -> bool {
    defaults::CONSTRUCTOR_WITH_ARGS
}
fn default_scalar_single_key() -> bool {
    defaults::SCALAR_SINGLE_KEY
}
fn default_key_suffix() -> String {
    defaults::KEY_SUFFIX.to_string()
}
fn default_value_suffix() -> String {
    defaults::VALUE_SUFFIX.to_string()
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema_file: None,
            database: None,
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            output_dir: default_output_dir(),
            package_name: String::new(),
            generate_key_class: default_generate_key_class(),
            include_keys_in_value: default_include_keys_in_value(),
            constructor_with_args: default_constructor_with_args(),
            scalar_single_key: default_scalar_single_key(),
            key_suffix: default_key_suffix(),
            value_suffix: default_value_suffix(),
            overwrite: OverwriteMode::default(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name("dbpojo-codegen").required(false));
        }

        // Override with environment variables (DBPOJO_CODEGEN_*)
        builder = builder.add_source(
            Environment::with_prefix("DBPOJO_CODEGEN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Naming rules for descriptor derivation
    pub fn naming_options(&self) -> NamingOptions {
        NamingOptions {
            key_suffix: self.key_suffix.clone(),
            value_suffix: self.value_suffix.clone(),
            scalar_single_key: self.scalar_single_key,
        }
    }

    /// Rendering and output options for the source generator
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            output_dir: self.output_dir.clone(),
            package_name: self.package_name.clone(),
            generate_key_class: self.generate_key_class,
            include_keys_in_value: self.include_keys_in_value,
            constructor_with_args: self.constructor_with_args,
            generated_on: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.schema_file, &self.database) {
            (None, None) => {
                return Err(CodegenError::ValidationError(
                    "one of schema_file or database is required".into(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(CodegenError::ValidationError(
                    "schema_file and database are mutually exclusive".into(),
                ));
            }
            (Some(path), None) | (None, Some(path)) => {
                if !path.exists() {
                    return Err(CodegenError::ValidationError(format!(
                        "Schema source not found: {}",
                        path.display()
                    )));
                }
            }
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "output_dir is required".into(),
            ));
        }

        validate_package_name(&self.package_name)?;

        if self.key_suffix == self.value_suffix {
            return Err(CodegenError::ValidationError(format!(
                "key_suffix and value_suffix must differ (both are {:?})",
                self.key_suffix
            )));
        }

        Ok(())
    }
}

/// Check that a dotted package name is made of Java identifiers
pub fn validate_package_name(package_name: &str) -> Result<()> {
    if package_name.is_empty() {
        return Err(CodegenError::ValidationError(
            "package_name is required".into(),
        ));
    }

    for segment in package_name.split('.') {
        let mut chars = segment.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };
        if !valid {
            return Err(CodegenError::ValidationError(format!(
                "Invalid package name {:?}: bad segment {:?}",
                package_name, segment
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert_eq!(config.include_tables, "*");
        assert!(config.generate_key_class);
        assert!(!config.include_keys_in_value);
        assert_eq!(config.key_suffix, "Key");
        assert_eq!(config.overwrite, OverwriteMode::Ask);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_validation_missing_source() {
        let config = CodegenConfig {
            package_name: "com.example".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_package_name() {
        let schema = tempfile::NamedTempFile::new().unwrap();
        let mut config = CodegenConfig {
            schema_file: Some(schema.path().to_path_buf()),
            package_name: "com.example.model".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.package_name = "com..model".into();
        assert!(config.validate().is_err());

        config.package_name = "com.1model".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            database = "app.db"
            package_name = "com.example"
            overwrite = "always"
            generate_key_class = false
            log_level = "debug"
        "#;
        let config: CodegenConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("app.db")));
        assert_eq!(config.overwrite, OverwriteMode::Always);
        assert!(!config.generate_key_class);
        assert!(config.constructor_with_args);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }
}
