//! Schema descriptor model built by the metadata parser

use serde::Serialize;

use super::sql_type::SqlType;
use crate::codegen::{referenced_type, to_class_name, NamingOptions};
use crate::error::{CodegenError, Result};

/// A table column as reported by the metadata source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,

    /// JDBC type of the column
    pub sql_type: SqlType,

    /// Declared size or precision
    pub size: Option<u32>,

    /// Declared scale
    pub scale: Option<u32>,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Whether the column belongs to the primary key
    pub primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: SqlType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            sql_type,
            size: None,
            scale: None,
            nullable,
            primary_key: false,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.size = Some(precision);
        self.scale = Some(scale);
        self
    }
}

/// Parsed description of one table and the classes derived from it
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDescriptor {
    schema: Option<String>,
    table: String,
    columns: Vec<Column>,
    /// Indexes into `columns`, in primary-key ordinal order
    key_order: Vec<usize>,
    key_class_name: String,
    value_class_name: String,
    scalar_key: bool,
}

impl SchemaDescriptor {
    /// Build a descriptor from a table's columns (in table order) and its
    /// primary-key column names (in key ordinal order).
    pub fn new(
        schema: Option<String>,
        table: impl Into<String>,
        mut columns: Vec<Column>,
        key_columns: &[String],
        naming: &NamingOptions,
    ) -> Result<Self> {
        let table = table.into();

        if columns.is_empty() {
            return Err(CodegenError::EmptyTable(table));
        }

        let mut key_order = Vec::with_capacity(key_columns.len());
        for key in key_columns {
            let idx = columns.iter().position(|c| &c.name == key).ok_or_else(|| {
                CodegenError::metadata(
                    Some(&table),
                    format!("primary key column {} is not a column of the table", key).into(),
                )
            })?;
            if !key_order.contains(&idx) {
                key_order.push(idx);
            }
        }

        for (idx, column) in columns.iter_mut().enumerate() {
            column.primary_key = key_order.contains(&idx);
        }

        let base = to_class_name(&table);
        let scalar_key = naming.scalar_single_key && key_order.len() == 1;

        let key_class_name = if key_order.is_empty() || scalar_key {
            String::new()
        } else {
            format!("{}{}", base, naming.key_suffix)
        };
        let value_class_name = if key_order.len() < columns.len() {
            format!("{}{}", base, naming.value_suffix)
        } else {
            String::new()
        };

        for class_name in [&key_class_name, &value_class_name] {
            if let Some(conflict) = referenced_type(class_name) {
                return Err(CodegenError::ReservedClassName {
                    class_name: class_name.clone(),
                    table,
                    conflict: conflict.to_string(),
                });
            }
        }

        Ok(Self {
            schema,
            table,
            columns,
            key_order,
            key_class_name,
            value_class_name,
            scalar_key,
        })
    }

    /// Schema (or catalog) the table belongs to, if the source reports one
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// All columns in table order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Primary-key columns in key ordinal order
    pub fn key_columns(&self) -> Vec<&Column> {
        self.key_order.iter().map(|&i| &self.columns[i]).collect()
    }

    /// Non-key columns in table order
    pub fn value_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| !c.primary_key).collect()
    }

    /// Key class name, empty when no key class is modeled
    pub fn key_class_name(&self) -> &str {
        &self.key_class_name
    }

    /// Value class name, empty when the table has no non-key column
    pub fn value_class_name(&self) -> &str {
        &self.value_class_name
    }

    /// The single key column when the key is modeled as a bare scalar
    pub fn scalar_key_column(&self) -> Option<&Column> {
        if self.scalar_key {
            self.key_columns().into_iter().next()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("tenant", SqlType::Integer, false),
            Column::new("name", SqlType::VarChar, true),
            Column::new("id", SqlType::BigInt, false),
        ]
    }

    #[test]
    fn test_partition_preserves_orders() {
        let keys = vec!["id".to_string(), "tenant".to_string()];
        let desc =
            SchemaDescriptor::new(None, "user_accounts", columns(), &keys, &NamingOptions::default())
                .unwrap();

        let key_names: Vec<_> = desc.key_columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(key_names, ["id", "tenant"]);

        let value_names: Vec<_> = desc.value_columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(value_names, ["name"]);

        assert_eq!(desc.key_class_name(), "UserAccountsKey");
        assert_eq!(desc.value_class_name(), "UserAccounts");
    }

    #[test]
    fn test_no_primary_key() {
        let desc =
            SchemaDescriptor::new(None, "LOG", columns(), &[], &NamingOptions::default()).unwrap();
        assert!(desc.key_class_name().is_empty());
        assert_eq!(desc.value_class_name(), "Log");
        assert_eq!(desc.value_columns().len(), 3);
    }

    #[test]
    fn test_key_only_table_has_no_value_class() {
        let cols = vec![Column::new("id", SqlType::Integer, false)];
        let desc = SchemaDescriptor::new(
            None,
            "ids",
            cols,
            &["id".to_string()],
            &NamingOptions::default(),
        )
        .unwrap();
        assert_eq!(desc.key_class_name(), "IdsKey");
        assert!(desc.value_class_name().is_empty());
    }

    #[test]
    fn test_scalar_single_key() {
        let naming = NamingOptions {
            scalar_single_key: true,
            ..Default::default()
        };
        let desc =
            SchemaDescriptor::new(None, "users", columns(), &["id".to_string()], &naming).unwrap();
        assert!(desc.key_class_name().is_empty());
        assert_eq!(desc.scalar_key_column().map(|c| c.name.as_str()), Some("id"));

        // Composite keys still get a class
        let keys = vec!["id".to_string(), "tenant".to_string()];
        let desc = SchemaDescriptor::new(None, "users", columns(), &keys, &naming).unwrap();
        assert_eq!(desc.key_class_name(), "UsersKey");
        assert!(desc.scalar_key_column().is_none());
    }

    #[test]
    fn test_class_name_shadowing_referenced_type_fails() {
        for table in ["date", "TIME", "timestamp", "serializable", "arrays"] {
            let err = SchemaDescriptor::new(None, table, columns(), &[], &NamingOptions::default())
                .unwrap_err();
            assert!(
                matches!(err, CodegenError::ReservedClassName { table: t, .. } if t == table),
                "{} accepted",
                table
            );
        }

        // Suffixed names do not shadow anything
        let desc = SchemaDescriptor::new(
            None,
            "date",
            columns(),
            &["id".to_string()],
            &NamingOptions {
                value_suffix: "Row".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(desc.key_class_name(), "DateKey");
        assert_eq!(desc.value_class_name(), "DateRow");

        let err = SchemaDescriptor::new(
            None,
            "date",
            columns(),
            &["id".to_string()],
            &NamingOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Class name Date for table date clashes with java.sql.Date"
        );
    }

    #[test]
    fn test_empty_table_fails() {
        let err = SchemaDescriptor::new(None, "EMPTY", vec![], &[], &NamingOptions::default())
            .unwrap_err();
        assert!(matches!(err, CodegenError::EmptyTable(t) if t == "EMPTY"));
    }

    #[test]
    fn test_unknown_key_column_fails() {
        let err = SchemaDescriptor::new(
            None,
            "users",
            columns(),
            &["missing".to_string()],
            &NamingOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::MetadataAccess { .. }));
    }
}
