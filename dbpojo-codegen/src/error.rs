//! Error types for dbpojo-codegen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dbpojo-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Error raised by a [`MetadataSource`](crate::parser::MetadataSource) implementation
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during schema parsing and code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to read database metadata{}: {source}", context_suffix(.table))]
    MetadataAccess {
        table: Option<String>,
        #[source]
        source: SourceError,
    },

    #[error("Unsupported SQL type code {code} for column {table}.{column}")]
    UnsupportedSqlType {
        table: String,
        column: String,
        code: i32,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Generation cancelled at {}", .path.display())]
    OverwriteAborted { path: PathBuf },

    #[error("Table {0} has no columns")]
    EmptyTable(String),

    #[error("Class name {class_name} is produced by both {first} and {second}")]
    ClassNameCollision {
        class_name: String,
        first: String,
        second: String,
    },

    #[error("Class name {class_name} for table {table} clashes with {conflict}")]
    ReservedClassName {
        class_name: String,
        table: String,
        conflict: String,
    },

    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CodegenError {
    /// Whether this error is a user cancel rather than a failure
    pub fn is_abort(&self) -> bool {
        matches!(self, CodegenError::OverwriteAborted { .. })
    }

    pub(crate) fn metadata(table: Option<&str>, source: SourceError) -> Self {
        CodegenError::MetadataAccess {
            table: table.map(str::to_string),
            source,
        }
    }
}

fn context_suffix(table: &Option<String>) -> String {
    match table {
        Some(table) => format!(" for table {}", table),
        None => String::new(),
    }
}

impl From<sqlparser::parser::ParserError> for CodegenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
