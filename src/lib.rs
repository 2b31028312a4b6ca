//! # schemats
//!
//! Generate TypeScript type declarations from database table schemas
//!
//! This crate provides a CLI tool and library for turning table and enum
//! definitions into Selectable/Insertable/Updatable/Whereable shapes plus
//! the query helper types that go with them.

pub mod codegen;
pub mod config;
pub mod error;
pub mod schema;
pub mod source;

pub mod prelude {
    pub use crate::codegen::{normalize_name, CodeGenConfig, CodeGenerator, TypeScriptGenerator};
    pub use crate::config::Options;
    pub use crate::error::SchematsError;
    pub use crate::schema::{Column, DataType, EnumType, Schema, Table};
    pub use crate::source::{JsonSchemaSource, SchemaSource, TableFilter};
}
