//! Schema sources
//!
//! This module provides functionality for obtaining table and enum
//! definitions to generate from. Each source format has its own submodule.

use crate::prelude::{Schema, SchematsError};

mod json;

pub use json::JsonSchemaSource;

/// Filters to apply while loading a schema
#[derive(Debug, Default, Clone)]
pub struct TableFilter {
    /// Only include these tables (if Some)
    pub include: Option<Vec<String>>,
    /// Exclude these tables
    pub exclude: Option<Vec<String>>,
}

impl TableFilter {
    /// Check if a table should be included
    pub fn should_include(&self, table_name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.iter().any(|t| t == table_name) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude {
            if exclude.iter().any(|t| t == table_name) {
                return false;
            }
        }

        true
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }
}

/// Trait for schema loading implementations
pub trait SchemaSource {
    /// Load a schema and return structured schema information
    fn load(&mut self, filter: &TableFilter) -> Result<Schema, SchematsError>;
}
