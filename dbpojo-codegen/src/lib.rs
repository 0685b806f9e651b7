//! dbpojo-codegen: Generate Java key/value POJO classes from database schema metadata
//!
//! This crate provides both a CLI tool and a library. It reads table metadata
//! from a live SQLite database or a SQL DDL script, builds one
//! [`SchemaDescriptor`](parser::SchemaDescriptor) per table and renders:
//!
//! - a key class holding the primary-key columns
//! - a value class holding the remaining columns
//!
//! Each class has fields in column order, constructors, accessors and
//! `equals`/`hashCode`/`toString`. Existing files are never overwritten
//! without consulting an [`OverwritePolicy`](codegen::OverwritePolicy).
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use dbpojo_codegen::codegen::Answer;
//!
//! let report = dbpojo_codegen::CodegenBuilder::new("com.example.model")
//!     .database("app.db")
//!     .output_dir("src/main/java")
//!     .generate(&mut |_prompt: &str| Answer::YesToAll)?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! dbpojo-codegen --database app.db --package com.example.model --output src/main/java generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

use std::path::Path;

use tracing::{debug, info};

use codegen::{
    check_descriptor, generate_all, render_descriptor, AlwaysOverwrite, Drift, GenerationReport,
    NeverOverwrite, OverwritePolicy,
};
pub use config::{CodegenConfig, OverwriteMode};
pub use error::{CodegenError, Result};
use parser::{parse_metadata, DdlSource, SchemaDescriptor, TableFilter};

/// Main entry point for code generation.
///
/// `policy` is only consulted when the config's overwrite mode is `ask`.
pub fn generate(
    config: &CodegenConfig,
    policy: &mut dyn OverwritePolicy,
) -> Result<GenerationReport> {
    let descriptors = load_descriptors(config)?;
    let options = config.generator_options();

    if config.dry_run {
        for desc in &descriptors {
            for file in render_descriptor(desc, &options)? {
                let path = options.output_dir.join(&file.relative_path);
                info!("Would write {}", path.display());
            }
        }
        return Ok(GenerationReport::default());
    }

    let report = match config.overwrite {
        OverwriteMode::Ask => generate_all(&descriptors, &options, policy)?,
        OverwriteMode::Always => generate_all(&descriptors, &options, &mut AlwaysOverwrite)?,
        OverwriteMode::Never => generate_all(&descriptors, &options, &mut NeverOverwrite)?,
    };

    info!("Code generation complete");
    Ok(report)
}

/// Compare generated files on disk with a fresh rendering
pub fn check(config: &CodegenConfig) -> Result<Vec<Drift>> {
    let descriptors = load_descriptors(config)?;
    let options = config.generator_options();

    let mut drifts = Vec::new();
    for desc in &descriptors {
        drifts.extend(check_descriptor(desc, &options)?);
    }
    Ok(drifts)
}

/// Read the configured schema source into descriptors
pub fn load_descriptors(config: &CodegenConfig) -> Result<Vec<SchemaDescriptor>> {
    let filter = TableFilter::new(&config.include_tables, &config.exclude_tables);
    let naming = config.naming_options();
    debug!(
        "Table filter: include={}, exclude={}",
        config.include_tables, config.exclude_tables
    );

    match (&config.schema_file, &config.database) {
        (Some(schema_file), None) => {
            info!("Parsing schema: {:?}", schema_file);
            parse_metadata(DdlSource::from_file(schema_file)?, &filter, &naming)
        }
        (None, Some(database)) => {
            info!("Reading database metadata: {:?}", database);
            open_database(database).and_then(|source| parse_metadata(source, &filter, &naming))
        }
        _ => Err(CodegenError::ConfigError(
            "exactly one of schema_file or database must be set".into(),
        )),
    }
}

#[cfg(feature = "sqlite")]
fn open_database(path: &Path) -> Result<parser::SqliteSource> {
    parser::SqliteSource::open(path)
}

#[cfg(not(feature = "sqlite"))]
fn open_database(path: &Path) -> Result<DdlSource> {
    Err(CodegenError::ConfigError(format!(
        "cannot open {}: built without the `sqlite` feature",
        path.display()
    )))
}

/// Builder pattern for programmatic configuration
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder generating into the given Java package
    pub fn new(package_name: &str) -> Self {
        Self {
            config: CodegenConfig {
                package_name: package_name.to_string(),
                ..Default::default()
            },
        }
    }

    /// Read the schema from a SQL DDL file
    pub fn schema_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.schema_file = Some(path.as_ref().to_path_buf());
        self.config.database = None;
        self
    }

    /// Read the schema from a SQLite database file
    pub fn database(mut self, path: impl AsRef<Path>) -> Self {
        self.config.database = Some(path.as_ref().to_path_buf());
        self.config.schema_file = None;
        self
    }

    /// Set the root output directory
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Skip key classes; key fields are rendered into the value class
    pub fn without_key_class(mut self) -> Self {
        self.config.generate_key_class = false;
        self
    }

    /// Also render key fields into the value class
    pub fn include_keys_in_value(mut self) -> Self {
        self.config.include_keys_in_value = true;
        self
    }

    /// Enable or disable the all-fields constructor
    pub fn constructor_with_args(mut self, enabled: bool) -> Self {
        self.config.constructor_with_args = enabled;
        self
    }

    /// Map single-column primary keys to a bare scalar type
    pub fn scalar_single_key(mut self) -> Self {
        self.config.scalar_single_key = true;
        self
    }

    /// Set the overwrite mode
    pub fn overwrite(mut self, mode: OverwriteMode) -> Self {
        self.config.overwrite = mode;
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// The assembled configuration
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the code
    pub fn generate(self, policy: &mut dyn OverwritePolicy) -> Result<GenerationReport> {
        self.config.validate()?;
        generate(&self.config, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen::Answer;

    const SCHEMA: &str = r#"
        CREATE TABLE accounts (
            id BIGINT PRIMARY KEY,
            email VARCHAR(255) NOT NULL,
            balance DECIMAL(12, 2)
        );
        CREATE TABLE audit (
            message TEXT
        );
    "#;

    #[test]
    fn test_builder_generates_from_ddl() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, SCHEMA).unwrap();
        let out = dir.path().join("out");

        let report = CodegenBuilder::new("com.example")
            .schema_file(&schema)
            .output_dir(&out)
            .generate(&mut |_: &str| Answer::No)
            .unwrap();

        assert_eq!(report.written().len(), 3);
        assert!(out.join("com/example/AccountsKey.java").exists());
        assert!(out.join("com/example/Accounts.java").exists());
        assert!(out.join("com/example/Audit.java").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, SCHEMA).unwrap();
        let out = dir.path().join("out");

        let report = CodegenBuilder::new("com.example")
            .schema_file(&schema)
            .output_dir(&out)
            .dry_run()
            .generate(&mut |_: &str| Answer::Cancel)
            .unwrap();

        assert!(report.files.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn test_never_mode_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, SCHEMA).unwrap();
        let out = dir.path().join("out");
        let audit = out.join("com/example/Audit.java");
        std::fs::create_dir_all(audit.parent().unwrap()).unwrap();
        std::fs::write(&audit, "keep me").unwrap();

        let report = CodegenBuilder::new("com.example")
            .schema_file(&schema)
            .output_dir(&out)
            .overwrite(OverwriteMode::Never)
            .generate(&mut |_: &str| -> Answer { panic!("never mode does not ask") })
            .unwrap();

        assert_eq!(report.skipped(), [audit.as_path()]);
        assert_eq!(std::fs::read_to_string(&audit).unwrap(), "keep me");
    }

    #[test]
    fn test_check_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, SCHEMA).unwrap();

        let builder = CodegenBuilder::new("com.example")
            .schema_file(&schema)
            .output_dir(dir.path().join("out"));
        let drifts = check(builder.config()).unwrap();
        assert_eq!(drifts.len(), 3);
        assert!(drifts.iter().all(|d| matches!(d, Drift::Missing(_))));
    }
}
