//! TypeScript code generator
//!
//! Generates TypeScript type declarations for tables and enums.

use std::collections::HashSet;

use minijinja::Environment;
use tracing::{debug, info, trace};

use crate::codegen::{CodeGenConfig, CodeGenerator};
use crate::config::Options;
use crate::error::SchematsError;
use crate::schema::{Column, EnumType, Schema, Table};

/// Identifiers the TypeScript grammar will not accept as a namespace or type name
const RESERVED_KEYWORDS: &[&str] = &["string", "number", "package", "public"];

/// Marker and helper types the generated code imports from the runtime module
const RUNTIME_IMPORTS: &[&str] = &[
    "ColumnNames",
    "ColumnValues",
    "DateString",
    "DefaultType",
    "GenericSQLExpression",
    "ParentColumn",
    "PromisedSQLFragmentReturnTypeMap",
    "SQLFragment",
    "SQLFragmentsMap",
    "SelectResultMode",
    "UpsertAction",
];

/// Append a trailing underscore to names that collide with a reserved word
pub fn normalize_name(name: &str, _options: &Options) -> String {
    if RESERVED_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

/// TypeScript code generator
pub struct TypeScriptGenerator {
    env: Environment<'static>,
}

impl TypeScriptGenerator {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        // Register templates
        env.add_template(
            "table_interface",
            include_str!("templates/table_interface.ts.jinja"),
        )
        .expect("Failed to load table interface template");
        env.add_template("table_types", include_str!("templates/table_types.ts.jinja"))
            .expect("Failed to load table types template");
        env.add_template("enums", include_str!("templates/enums.ts.jinja"))
            .expect("Failed to load enums template");
        env.add_template("file", include_str!("templates/file.ts.jinja"))
            .expect("Failed to load file template");

        Self { env }
    }
}

impl Default for TypeScriptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for TypeScriptGenerator {
    fn render(
        &self,
        schema: &Schema,
        options: &Options,
        config: &CodeGenConfig,
    ) -> Result<String, SchematsError> {
        info!(
            schema = ?schema.name,
            tables = schema.tables.len(),
            enums = schema.enums.len(),
            camel_case = options.camel_case,
            "Generating TypeScript code"
        );

        let enums = self.generate_enum_type(&schema.enums, options)?;

        let tables_ctx: Vec<_> = schema
            .tables
            .iter()
            .map(|table| -> Result<minijinja::Value, SchematsError> {
                Ok(minijinja::context! {
                    interface => self.generate_table_interface(&table.name, table, options)?,
                    fields => self.generate_table_types(&table.name, table, options)?,
                })
            })
            .collect::<Result<_, _>>()?;

        let ctx = minijinja::context! {
            write_header => config.write_header,
            version => env!("CARGO_PKG_VERSION"),
            schema_name => &schema.name,
            imports => RUNTIME_IMPORTS,
            runtime_module => &config.runtime_module,
            enums => enums.trim_end(),
            tables => tables_ctx,
        };

        let rendered = self.render_template("file", &schema.name, ctx)?;
        let code = format!("{}\n", rendered.trim_end());

        info!(bytes = code.len(), "TypeScript code generation complete");

        Ok(code)
    }
}

impl TypeScriptGenerator {
    /// Render the namespace holding every access shape for one table
    ///
    /// Members follow the table's column order. Column names go through
    /// [`Options::transform_column_name`] only; the namespace name is also
    /// passed through [`normalize_name`].
    pub fn generate_table_interface(
        &self,
        table_name_raw: &str,
        table: &Table,
        options: &Options,
    ) -> Result<String, SchematsError> {
        let table_name = options.transform_type_name(table_name_raw);
        debug!(table = ?table_name_raw, name = ?table_name, columns = table.columns.len(), "Generating table interface");

        let columns_ctx: Vec<_> = table
            .columns
            .iter()
            .map(|col| {
                let column_name = options.transform_column_name(&col.name);
                let selectable = selectable_member(&column_name, col);
                let insertable = insertable_member(&column_name, col);
                trace!(column = ?col.name, selectable = ?selectable, insertable = ?insertable, "Column members");
                (
                    column_name,
                    minijinja::context! {
                        selectable => selectable,
                        insertable => insertable,
                    },
                )
            })
            .collect();

        ensure_unique(&table_name, columns_ctx.iter().map(|(name, _)| name.as_str()))?;

        let ctx = minijinja::context! {
            namespace => normalize_name(&table_name, options),
            table_literal => string_literal(&table_name, '"'),
            columns => columns_ctx.into_iter().map(|(_, ctx)| ctx).collect::<Vec<_>>(),
        };

        self.render_template("table_interface", &table_name, ctx)
    }

    /// Render a `<Table>Fields` namespace with one type alias per column
    pub fn generate_table_types(
        &self,
        table_name_raw: &str,
        table: &Table,
        options: &Options,
    ) -> Result<String, SchematsError> {
        let table_name = options.transform_type_name(table_name_raw);
        debug!(table = ?table_name_raw, name = ?table_name, "Generating table field types");

        let fields: Vec<(String, String)> = table
            .columns
            .iter()
            .map(|col| {
                let name = normalize_name(&options.transform_column_name(&col.name), options);
                (name, selectable_type(col))
            })
            .collect();

        let scope = format!("{}Fields", table_name);
        ensure_unique(&scope, fields.iter().map(|(name, _)| name.as_str()))?;

        let ctx = minijinja::context! {
            namespace => &table_name,
            fields => fields.iter().map(|(name, ts_type)| {
                minijinja::context! {
                    name => name,
                    ts_type => ts_type,
                }
            }).collect::<Vec<_>>(),
        };

        self.render_template("table_types", &scope, ctx)
    }

    /// Render a union type and an `every` tuple type for each enum, in order
    ///
    /// An enum without variants renders as `never` with an empty tuple.
    pub fn generate_enum_type(
        &self,
        enums: &[EnumType],
        options: &Options,
    ) -> Result<String, SchematsError> {
        debug!(count = enums.len(), "Generating enum types");

        let names: Vec<String> = enums
            .iter()
            .map(|e| options.transform_type_name(&e.name))
            .collect();
        ensure_unique("enums", names.iter().map(String::as_str))?;

        let ctx = minijinja::context! {
            enums => enums.iter().zip(&names).map(|(e, name)| {
                minijinja::context! {
                    name => name,
                    literals => e.values.iter().map(|v| string_literal(v, '\'')).collect::<Vec<_>>(),
                }
            }).collect::<Vec<_>>(),
        };

        self.render_template("enums", "enums", ctx)
    }

    fn render_template(
        &self,
        name: &str,
        scope: &str,
        ctx: minijinja::Value,
    ) -> Result<String, SchematsError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| SchematsError::CodeGen {
                scope: scope.to_string(),
                message: format!("Template error: {}", e),
            })?;

        template.render(ctx).map_err(|e| SchematsError::CodeGen {
            scope: scope.to_string(),
            message: format!("Render error: {}", e),
        })
    }
}

/// Column value type as read back from the table
fn selectable_type(col: &Column) -> String {
    if col.is_nullable {
        format!("{} | null", col.ts_type)
    } else {
        col.ts_type.clone()
    }
}

fn selectable_member(column_name: &str, col: &Column) -> String {
    format!("{}: {}", column_name, selectable_type(col))
}

fn insertable_member(column_name: &str, col: &Column) -> String {
    let optional = col.is_nullable || col.has_default;

    let mut member = format!(
        "{}{}: {}",
        column_name,
        if optional { "?" } else { "" },
        col.ts_type
    );
    if col.is_date() {
        member.push_str(" | DateString");
    }
    if col.is_nullable {
        member.push_str(" | null");
    }
    if optional {
        member.push_str(" | DefaultType");
    }
    member.push_str(" | SQLFragment");
    member
}

/// Quote a value as a TypeScript string literal type
fn string_literal(value: &str, quote: char) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push(quote);
    for c in value.chars() {
        if c == '\\' || c == quote {
            literal.push('\\');
        }
        literal.push(c);
    }
    literal.push(quote);
    literal
}

fn ensure_unique<'a>(
    scope: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), SchematsError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(SchematsError::DuplicateIdentifier {
                scope: scope.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
