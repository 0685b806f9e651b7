//! Metadata source over a live SQLite connection

use std::path::Path;

use rusqlite::Connection;

use super::model::Column;
use super::source::{MetadataSource, TableRef};
use super::sql_type::DeclaredType;
use crate::error::{CodegenError, Result, SourceError};

/// Reads table metadata from `sqlite_master` and `pragma_table_info`.
///
/// Owns the connection; it is closed when the source is dropped.
#[derive(Debug)]
pub struct SqliteSource {
    connection: Connection,
}

impl SqliteSource {
    /// Open a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).map_err(|e| CodegenError::metadata(None, Box::new(e)))?;
        Ok(Self::from_connection(connection))
    }

    /// Wrap an already opened connection
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    fn table_info(&self, table: &TableRef) -> std::result::Result<Vec<TableInfoRow>, SourceError> {
        let mut stmt = self.connection.prepare(
            "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
        )?;
        let rows = stmt
            .query_map([&table.name], |row| {
                Ok(TableInfoRow {
                    name: row.get(0)?,
                    declared_type: row.get(1)?,
                    not_null: row.get(2)?,
                    pk: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

struct TableInfoRow {
    name: String,
    declared_type: String,
    not_null: bool,
    /// 1-based position in the primary key, 0 when not a key column
    pk: i64,
}

impl MetadataSource for SqliteSource {
    fn list_tables(&mut self) -> std::result::Result<Vec<TableRef>, SourceError> {
        let mut stmt = self
            .connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names
            .into_iter()
            .map(|name| TableRef::new(None, &name))
            .collect())
    }

    fn list_columns(&mut self, table: &TableRef) -> std::result::Result<Vec<Column>, SourceError> {
        let rows = self.table_info(table)?;
        if rows.is_empty() {
            return Err(format!("no such table: {}", table.qualified_name()).into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let declared = DeclaredType::parse(&row.declared_type);
                Column {
                    name: row.name,
                    sql_type: declared.sql_type,
                    size: declared.size,
                    scale: declared.scale,
                    // SQLite lets non-INTEGER key columns hold NULL; treat keys as NOT NULL
                    nullable: !row.not_null && row.pk == 0,
                    primary_key: row.pk > 0,
                }
            })
            .collect())
    }

    fn list_primary_key_columns(
        &mut self,
        table: &TableRef,
    ) -> std::result::Result<Vec<String>, SourceError> {
        let mut keys: Vec<(i64, String)> = self
            .table_info(table)?
            .into_iter()
            .filter(|row| row.pk > 0)
            .map(|row| (row.pk, row.name))
            .collect();
        keys.sort_by_key(|(seq, _)| *seq);
        Ok(keys.into_iter().map(|(_, name)| name).collect())
    }
}
