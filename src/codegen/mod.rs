//! Code generation
//!
//! This module provides functionality for generating TypeScript type
//! declarations from the loaded table and enum definitions.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::prelude::{Options, Schema, SchematsError};

pub mod typescript;

pub use typescript::{normalize_name, TypeScriptGenerator};

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct CodeGenConfig {
    /// Output file path
    pub output_path: PathBuf,
    /// Emit the "do not edit" banner at the top of the file
    pub write_header: bool,
    /// Module the generated code imports marker and helper types from
    pub runtime_module: String,
}

impl CodeGenConfig {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            write_header: true,
            runtime_module: "./core".to_string(),
        }
    }

    pub fn with_write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    pub fn with_runtime_module(mut self, module: impl Into<String>) -> Self {
        self.runtime_module = module.into();
        self
    }

    /// Output path with a `.ts` extension
    pub fn final_path(&self) -> PathBuf {
        if self.output_path.extension().is_some_and(|ext| ext == "ts") {
            self.output_path.clone()
        } else {
            self.output_path.with_extension("ts")
        }
    }
}

/// Trait for language-specific code generators
pub trait CodeGenerator {
    /// Render code for the given schema
    fn render(
        &self,
        schema: &Schema,
        options: &Options,
        config: &CodeGenConfig,
    ) -> Result<String, SchematsError>;

    /// Render code for the given schema and write it to the output path
    fn generate(
        &self,
        schema: &Schema,
        options: &Options,
        config: &CodeGenConfig,
    ) -> Result<PathBuf, SchematsError> {
        let code = self.render(schema, options, config)?;

        let final_path = config.final_path();
        if let Some(parent) = final_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&final_path, code)?;
        info!(path = ?final_path, "Wrote generated file");

        Ok(final_path)
    }
}
