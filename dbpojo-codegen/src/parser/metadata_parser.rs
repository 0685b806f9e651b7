//! Walks a metadata source and builds schema descriptors

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::model::SchemaDescriptor;
use super::source::{MetadataSource, TableRef};
use crate::codegen::NamingOptions;
use crate::error::{CodegenError, Result};

/// Schemas that only hold catalog tables
const SYSTEM_SCHEMAS: &[&str] = &["information_schema", "pg_catalog", "sys", "mysql"];

/// Include/exclude filter over table names
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    include: Option<HashSet<String>>,
    exclude: HashSet<String>,
}

impl TableFilter {
    /// Build from comma-separated lists; `*` or empty includes everything
    pub fn new(include: &str, exclude: &str) -> Self {
        let include_all = include.trim() == "*" || include.trim().is_empty();
        let include = if include_all {
            None
        } else {
            Some(include.split(',').map(|s| s.trim().to_string()).collect())
        };
        let exclude = exclude
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { include, exclude }
    }

    /// Whether a table passes the filter, matched by plain or qualified name
    pub fn matches(&self, table: &TableRef) -> bool {
        let qualified = table.qualified_name();
        let hit = |set: &HashSet<String>| set.contains(&table.name) || set.contains(&qualified);

        let included = self.include.as_ref().map_or(true, hit);
        included && !hit(&self.exclude)
    }
}

/// Whether a table belongs to the database's own catalog
pub fn is_system_table(table: &TableRef) -> bool {
    let system_schema = table.schema.as_deref().is_some_and(|schema| {
        SYSTEM_SCHEMAS
            .iter()
            .any(|system| schema.eq_ignore_ascii_case(system))
    });
    system_schema || table.name.starts_with("sqlite_")
}

/// Parse every user table of a metadata source into descriptors.
///
/// The source is consumed and dropped before this returns, whatever the
/// outcome. Any failure discards all descriptors built so far.
pub fn parse_metadata<S: MetadataSource>(
    mut source: S,
    filter: &TableFilter,
    naming: &NamingOptions,
) -> Result<Vec<SchemaDescriptor>> {
    let tables = source
        .list_tables()
        .map_err(|e| CodegenError::metadata(None, e))?;
    info!("Found {} tables", tables.len());

    let mut descriptors = Vec::new();
    for table in tables {
        if is_system_table(&table) {
            debug!("Skipping system table {}", table.qualified_name());
            continue;
        }
        if !filter.matches(&table) {
            debug!("Table {} filtered out", table.qualified_name());
            continue;
        }

        let qualified = table.qualified_name();
        let columns = source
            .list_columns(&table)
            .map_err(|e| CodegenError::metadata(Some(&qualified), e))?;
        let primary_key = source
            .list_primary_key_columns(&table)
            .map_err(|e| CodegenError::metadata(Some(&qualified), e))?;

        let descriptor = SchemaDescriptor::new(
            table.schema.clone(),
            table.name.clone(),
            columns,
            &primary_key,
            naming,
        )?;
        debug!(
            "Parsed {}: key class {:?}, value class {:?}",
            qualified,
            descriptor.key_class_name(),
            descriptor.value_class_name()
        );
        descriptors.push(descriptor);
    }

    check_class_names(&descriptors)?;

    Ok(descriptors)
}

/// Reject descriptor lists where two classes would land in the same file
fn check_class_names(descriptors: &[SchemaDescriptor]) -> Result<()> {
    let mut owners: HashMap<&str, String> = HashMap::new();

    for desc in descriptors {
        let table = match desc.schema() {
            Some(schema) => format!("{}.{}", schema, desc.table()),
            None => desc.table().to_string(),
        };

        for class_name in [desc.key_class_name(), desc.value_class_name()] {
            if class_name.is_empty() {
                continue;
            }
            if let Some(first) = owners.get(class_name) {
                return Err(CodegenError::ClassNameCollision {
                    class_name: class_name.to_string(),
                    first: first.clone(),
                    second: table,
                });
            }
            owners.insert(class_name, table.clone());
        }
    }

    Ok(())
}
