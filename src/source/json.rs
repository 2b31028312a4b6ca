use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, error, info, trace};

use super::{SchemaSource, TableFilter};
use crate::config::Options;
use crate::prelude::SchematsError;
use crate::schema::{Column, DataType, EnumType, Schema, Table};

/// Loads a schema from a JSON document on disk
///
/// Columns either carry a ready `ts_type` or a PostgreSQL `udt_name`, which
/// is resolved through [`DataType`] against the document's enums.
pub struct JsonSchemaSource {
    path: PathBuf,
    options: Options,
}

impl JsonSchemaSource {
    pub fn new(path: impl Into<PathBuf>, options: Options) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }
}

impl SchemaSource for JsonSchemaSource {
    fn load(&mut self, filter: &TableFilter) -> Result<Schema, SchematsError> {
        info!(path = ?self.path, "Loading schema document");

        let text = fs::read_to_string(&self.path).map_err(|e| {
            error!(path = ?self.path, error = ?e, "Failed to read schema document");
            SchematsError::Schema {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;

        let schema = parse_schema(&text, &self.path, &self.options, filter)?;

        info!(
            schema = ?schema.name,
            tables = ?schema.tables.len(),
            enums = ?schema.enums.len(),
            "Schema document loaded"
        );

        Ok(schema)
    }
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default = "default_schema_name")]
    name: String,
    #[serde(default)]
    tables: Vec<TableDocument>,
    #[serde(default)]
    enums: Vec<EnumType>,
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnDocument>,
}

#[derive(Debug, Deserialize)]
struct ColumnDocument {
    name: String,
    #[serde(default)]
    udt_name: Option<String>,
    #[serde(default)]
    ts_type: Option<String>,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    has_default: bool,
}

fn default_schema_name() -> String {
    "public".to_string()
}

/// Parse a schema document and resolve column types
pub(crate) fn parse_schema(
    text: &str,
    path: &Path,
    options: &Options,
    filter: &TableFilter,
) -> Result<Schema, SchematsError> {
    let document: SchemaDocument = serde_json::from_str(text).map_err(|e| {
        error!(path = ?path, error = ?e, "Malformed schema document");
        SchematsError::Schema {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    debug!(count = ?document.tables.len(), "Found all tables");

    let mut tables = Vec::with_capacity(document.tables.len());
    for table in document.tables {
        if !filter.should_include(&table.name) {
            trace!(table = ?table.name, "Table filtered out");
            continue;
        }

        let mut columns = Vec::with_capacity(table.columns.len());
        for column in table.columns {
            let ts_type = match (column.ts_type, &column.udt_name) {
                (Some(ts_type), _) => ts_type,
                (None, Some(udt_name)) => DataType::parse(udt_name).ts_type(&document.enums, options),
                (None, None) => {
                    return Err(SchematsError::Schema {
                        path: path.to_path_buf(),
                        message: format!(
                            "column '{}.{}' needs either udt_name or ts_type",
                            table.name, column.name
                        ),
                    })
                }
            };

            trace!(
                table = ?table.name,
                column = ?column.name,
                udt_name = ?column.udt_name,
                ts_type = ?ts_type,
                is_nullable = ?column.nullable,
                has_default = ?column.has_default,
                "Resolved column"
            );

            columns.push(Column {
                name: column.name,
                ts_type,
                is_nullable: column.nullable,
                has_default: column.has_default,
            });
        }

        tables.push(Table {
            name: table.name,
            columns,
        });
    }
    debug!(count = ?tables.len(), "Tables after filtering");

    Ok(Schema {
        name: document.name,
        tables,
        enums: document.enums,
    })
}
