//! Schema data structures
//!
//! These types represent table and enum definitions and form the contract
//! between schema loading (produces) and code generation (consumes).

use serde::Deserialize;
use tracing::warn;

use crate::config::Options;

/// A complete database schema
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub name: String,
    pub tables: Vec<Table>,
    pub enums: Vec<EnumType>,
}

/// Database table
///
/// Column order is significant: generated members follow it exactly.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

/// A table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// TypeScript type expression of the column value
    pub ts_type: String,
    pub is_nullable: bool,
    /// Column has a server-side default (DEFAULT value, NOW(), etc.)
    pub has_default: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ts_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ts_type: ts_type.into(),
            is_nullable: false,
            has_default: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn is_date(&self) -> bool {
        self.ts_type == "Date"
    }
}

/// A custom enum type defined in the database
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumType {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// PostgreSQL column type, as reported by `udt_name`
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Boolean,
    Text,
    Varchar,
    Char,
    Real,
    DoublePrecision,
    Numeric,
    Money,
    Timestamp,
    TimestampTz,
    Date,
    Time,
    TimeTz,
    Interval,
    Uuid,
    Json,
    JsonBinary,
    Binary,
    Array(Box<DataType>),
    /// Custom enum type or anything unrecognised, stores the raw name
    Named(String),
}

impl DataType {
    /// Parse a `udt_name` (`int4`, `timestamptz`, `_text`, ...)
    pub fn parse(udt_name: &str) -> Self {
        if let Some(inner) = udt_name.strip_prefix('_') {
            return DataType::Array(Box::new(DataType::parse(inner)));
        }

        match udt_name {
            "int2" => DataType::SmallInt,
            "int4" | "oid" => DataType::Integer,
            "int8" => DataType::BigInt,
            "bool" => DataType::Boolean,
            "text" | "citext" | "name" => DataType::Text,
            "varchar" => DataType::Varchar,
            "bpchar" | "char" => DataType::Char,
            "float4" => DataType::Real,
            "float8" => DataType::DoublePrecision,
            "numeric" => DataType::Numeric,
            "money" => DataType::Money,
            "timestamp" => DataType::Timestamp,
            "timestamptz" => DataType::TimestampTz,
            "date" => DataType::Date,
            "time" => DataType::Time,
            "timetz" => DataType::TimeTz,
            "interval" => DataType::Interval,
            "uuid" => DataType::Uuid,
            "json" => DataType::Json,
            "jsonb" => DataType::JsonBinary,
            "bytea" => DataType::Binary,
            other => DataType::Named(other.to_string()),
        }
    }

    /// TypeScript type expression for this column type
    ///
    /// Names matching a declared enum resolve to that enum's transformed
    /// type name; other unknown names fall back to `any`.
    pub fn ts_type(&self, enums: &[EnumType], options: &Options) -> String {
        match self {
            DataType::SmallInt
            | DataType::Integer
            | DataType::Real
            | DataType::DoublePrecision => "number".to_string(),
            // 64-bit and arbitrary precision values arrive as strings
            DataType::BigInt
            | DataType::Numeric
            | DataType::Money
            | DataType::Text
            | DataType::Varchar
            | DataType::Char
            | DataType::Uuid
            | DataType::Time
            | DataType::TimeTz
            | DataType::Interval => "string".to_string(),
            DataType::Boolean => "boolean".to_string(),
            DataType::Timestamp | DataType::TimestampTz | DataType::Date => "Date".to_string(),
            DataType::Json | DataType::JsonBinary => "Object".to_string(),
            DataType::Binary => "Buffer".to_string(),
            DataType::Array(inner) => format!("Array<{}>", inner.ts_type(enums, options)),
            DataType::Named(name) => {
                if enums.iter().any(|e| &e.name == name) {
                    options.transform_type_name(name)
                } else {
                    warn!(udt_name = ?name, "Unknown column type, falling back to any");
                    "any".to_string()
                }
            }
        }
    }
}
