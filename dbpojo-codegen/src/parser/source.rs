//! Metadata access capability and an in-memory catalog

use std::collections::HashMap;

use serde::Serialize;

use super::model::Column;
use crate::error::SourceError;

/// A table visible through a metadata source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: Option<&str>, name: &str) -> Self {
        Self {
            schema: schema.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// `schema.name`, or just `name` when there is no schema
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

/// Narrow view of a database connection's catalog metadata
pub trait MetadataSource {
    /// Tables visible to the connection, in catalog order
    fn list_tables(&mut self) -> Result<Vec<TableRef>, SourceError>;

    /// Columns of a table in ordinal order
    fn list_columns(&mut self, table: &TableRef) -> Result<Vec<Column>, SourceError>;

    /// Primary-key column names of a table in key ordinal order
    fn list_primary_key_columns(&mut self, table: &TableRef) -> Result<Vec<String>, SourceError>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &mut S {
    fn list_tables(&mut self) -> Result<Vec<TableRef>, SourceError> {
        (**self).list_tables()
    }

    fn list_columns(&mut self, table: &TableRef) -> Result<Vec<Column>, SourceError> {
        (**self).list_columns(table)
    }

    fn list_primary_key_columns(&mut self, table: &TableRef) -> Result<Vec<String>, SourceError> {
        (**self).list_primary_key_columns(table)
    }
}

#[derive(Debug, Clone, Default)]
struct TableEntry {
    columns: Vec<Column>,
    primary_key: Vec<String>,
}

/// Catalog held in memory, used for DDL input and in tests
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: Vec<TableRef>,
    entries: HashMap<TableRef, TableEntry>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with its columns and primary-key column names
    pub fn table(mut self, name: &str, columns: Vec<Column>, primary_key: &[&str]) -> Self {
        let primary_key = primary_key.iter().map(|s| s.to_string()).collect();
        self.add_table(TableRef::new(None, name), columns, primary_key);
        self
    }

    pub fn add_table(&mut self, table: TableRef, columns: Vec<Column>, primary_key: Vec<String>) {
        if !self.entries.contains_key(&table) {
            self.tables.push(table.clone());
        }
        self.entries.insert(
            table,
            TableEntry {
                columns,
                primary_key,
            },
        );
    }

    fn entry(&self, table: &TableRef) -> Result<&TableEntry, SourceError> {
        self.entries
            .get(table)
            .ok_or_else(|| format!("no such table: {}", table.qualified_name()).into())
    }
}

impl MetadataSource for InMemorySource {
    fn list_tables(&mut self) -> Result<Vec<TableRef>, SourceError> {
        Ok(self.tables.clone())
    }

    fn list_columns(&mut self, table: &TableRef) -> Result<Vec<Column>, SourceError> {
        Ok(self.entry(table)?.columns.clone())
    }

    fn list_primary_key_columns(&mut self, table: &TableRef) -> Result<Vec<String>, SourceError> {
        Ok(self.entry(table)?.primary_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SqlType;

    #[test]
    fn test_in_memory_source_keeps_insertion_order() {
        let mut source = InMemorySource::new()
            .table("b", vec![Column::new("id", SqlType::Integer, false)], &["id"])
            .table("a", vec![Column::new("x", SqlType::VarChar, true)], &[]);

        let tables = source.list_tables().unwrap();
        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);

        assert_eq!(source.list_primary_key_columns(&tables[0]).unwrap(), ["id"]);
        assert!(source.list_columns(&TableRef::new(None, "missing")).is_err());
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(TableRef::new(Some("PUBLIC"), "USERS").qualified_name(), "PUBLIC.USERS");
        assert_eq!(TableRef::new(None, "users").qualified_name(), "users");
    }
}
