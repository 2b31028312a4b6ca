use std::path::PathBuf;

use thiserror::Error;

/// schemats errors
#[derive(Error, Debug)]
pub enum SchematsError {
    #[error("Failed to read schema document {}: {message}", path.display())]
    Schema { path: PathBuf, message: String },

    #[error("Code generation failed for '{scope}': {message}")]
    CodeGen { scope: String, message: String },

    #[error("Identifier '{name}' is emitted more than once in '{scope}'")]
    DuplicateIdentifier { scope: String, name: String },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
