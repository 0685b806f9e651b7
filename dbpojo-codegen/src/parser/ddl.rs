//! Metadata source backed by SQL DDL, parsed with sqlparser-rs

use std::path::Path;

use sqlparser::ast::{
    ColumnOption, CreateTable, Expr, Ident, IndexColumn, ObjectName, PrimaryKeyConstraint,
    Statement, TableConstraint,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use super::model::Column;
use super::source::{InMemorySource, MetadataSource, TableRef};
use super::sql_type::DeclaredType;
use crate::error::{Result, SourceError};

/// Catalog built from the `CREATE TABLE` statements of a schema script
#[derive(Debug, Clone, Default)]
pub struct DdlSource {
    catalog: InMemorySource,
}

impl DdlSource {
    /// Parse a SQL schema string
    pub fn parse(sql: &str) -> Result<Self> {
        let dialect = MySqlDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;

        let mut catalog = InMemorySource::new();
        for stmt in statements {
            if let Statement::CreateTable(create_table) = stmt {
                let (table, columns, primary_key) = extract_table(&create_table);
                debug!(
                    "DDL table {} with {} columns",
                    table.qualified_name(),
                    columns.len()
                );
                catalog.add_table(table, columns, primary_key);
            }
        }

        Ok(Self { catalog })
    }

    /// Read and parse a schema file
    pub fn from_file(path: &Path) -> Result<Self> {
        let sql = std::fs::read_to_string(path)?;
        Self::parse(&sql)
    }
}

impl MetadataSource for DdlSource {
    fn list_tables(&mut self) -> std::result::Result<Vec<TableRef>, SourceError> {
        self.catalog.list_tables()
    }

    fn list_columns(&mut self, table: &TableRef) -> std::result::Result<Vec<Column>, SourceError> {
        self.catalog.list_columns(table)
    }

    fn list_primary_key_columns(
        &mut self,
        table: &TableRef,
    ) -> std::result::Result<Vec<String>, SourceError> {
        self.catalog.list_primary_key_columns(table)
    }
}

/// Extract the table reference, columns and primary key from a CREATE TABLE statement
fn extract_table(create: &CreateTable) -> (TableRef, Vec<Column>, Vec<String>) {
    let table = extract_table_ref(&create.name);

    let mut columns = Vec::new();
    let mut primary_key = Vec::new();

    for col_def in &create.columns {
        let declared = DeclaredType::parse(&format!("{}", col_def.data_type));
        let mut column = Column {
            name: extract_ident(&col_def.name),
            sql_type: declared.sql_type,
            size: declared.size,
            scale: declared.scale,
            nullable: true,
            primary_key: false,
        };

        for option in &col_def.options {
            match &option.option {
                ColumnOption::NotNull => column.nullable = false,
                ColumnOption::Null => column.nullable = true,
                ColumnOption::PrimaryKey(_) => {
                    column.nullable = false;
                    primary_key = vec![column.name.clone()];
                }
                _ => {}
            }
        }

        columns.push(column);
    }

    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey(PrimaryKeyConstraint {
            columns: pk_cols, ..
        }) = constraint
        {
            primary_key = pk_cols.iter().map(extract_ident_from_index_column).collect();
        }
    }

    // Primary key columns are implicitly NOT NULL
    for col in columns.iter_mut() {
        if primary_key.contains(&col.name) {
            col.nullable = false;
        }
    }

    (table, columns, primary_key)
}

/// Split an ObjectName into optional schema and table name
fn extract_table_ref(name: &ObjectName) -> TableRef {
    let parts: Vec<String> = name
        .0
        .iter()
        .filter_map(|part| part.as_ident())
        .map(extract_ident)
        .collect();

    match parts.as_slice() {
        [] => TableRef::new(None, ""),
        [table] => TableRef::new(None, table),
        [.., schema, table] => TableRef::new(Some(schema.as_str()), table),
    }
}

/// Extract a string from an Ident, removing quotes if present
fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
