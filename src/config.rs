//! Naming options
//!
//! The options object handed to every generator. It owns the two naming
//! transforms applied to raw schema identifiers and can be loaded from
//! environment variables, optionally reading from a .env file first.

use crate::prelude::SchematsError;
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use std::{env, path::Path};
use tracing::{debug, error, trace, warn};

/// Naming options shared by all generators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Convert table and enum names to PascalCase and column names to camelCase
    pub camel_case: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camel_case(mut self, camel_case: bool) -> Self {
        self.camel_case = camel_case;
        self
    }

    /// Adapt a raw table or enum name to the emitted type name
    pub fn transform_type_name(&self, name: &str) -> String {
        if self.camel_case {
            to_pascal_case(name)
        } else {
            name.to_string()
        }
    }

    /// Adapt a raw column name to the emitted member name
    pub fn transform_column_name(&self, name: &str) -> String {
        if self.camel_case {
            to_camel_case(name)
        } else {
            name.to_string()
        }
    }

    /// Load options from environment variables
    ///
    /// Expected variables:
    /// - SCHEMATS_CAMEL_CASE (default: false)
    pub fn from_env() -> Result<Self, SchematsError> {
        debug!("Loading naming options from environment");

        let camel_case = match env::var("SCHEMATS_CAMEL_CASE") {
            Ok(value) => parse_flag(&value).ok_or_else(|| {
                error!(value = ?value, "Invalid SCHEMATS_CAMEL_CASE value");
                SchematsError::Config("SCHEMATS_CAMEL_CASE must be true or false".to_string())
            })?,
            Err(_) => {
                trace!("SCHEMATS_CAMEL_CASE not set, using default");
                false
            }
        };

        debug!(camel_case = ?camel_case, "Options loaded");

        Ok(Self { camel_case })
    }

    /// Load a .env file and then read options from environment
    pub fn load(env_file: &Path) -> Result<Self, SchematsError> {
        if env_file.exists() {
            debug!(path = ?env_file, "Loading environment file");
            dotenvy::from_path(env_file).map_err(|e| {
                error!(path = ?env_file, error = ?e, "Failed to load environment file");
                SchematsError::Config(format!("Failed to load {}: {}", env_file.display(), e))
            })?;
        } else {
            warn!(path = ?env_file, "Environment file not found, using existing environment");
        }

        Self::from_env()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Convert an identifier to camelCase (`user_accounts` -> `userAccounts`)
pub fn to_camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Convert an identifier to PascalCase (`user_accounts` -> `UserAccounts`)
pub fn to_pascal_case(s: &str) -> String {
    s.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_transforms_are_identity() {
        let options = Options::new();

        assert_eq!(options.transform_type_name("user_accounts"), "user_accounts");
        assert_eq!(options.transform_column_name("created_at"), "created_at");
    }

    #[test]
    fn test_camel_case_transforms() {
        let options = Options::new().with_camel_case(true);

        assert_eq!(options.transform_type_name("user_accounts"), "UserAccounts");
        assert_eq!(options.transform_column_name("created_at"), "createdAt");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("id"), "id");
        assert_eq!(to_camel_case("order_line_items"), "orderLineItems");
        assert_eq!(to_camel_case("FOO_BAR"), "fooBar");
        assert_eq!(to_camel_case("already camelCase"), "alreadyCamelCase");
        assert_eq!(to_camel_case("__weird--name"), "weirdName");
    }

    #[test]
    fn test_acronym_runs() {
        assert_eq!(to_camel_case("HTTPServer"), "httpServer");
        assert_eq!(to_pascal_case("HTTPServer"), "HttpServer");
        assert_eq!(to_pascal_case("api_URL"), "ApiUrl");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("user"), "User");
        assert_eq!(to_pascal_case("order_status"), "OrderStatus");
        assert_eq!(to_pascal_case("address2_line"), "Address2Line");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_from_env() {
        env::set_var("SCHEMATS_CAMEL_CASE", "1");
        let options = Options::from_env().unwrap();
        assert!(options.camel_case);

        env::set_var("SCHEMATS_CAMEL_CASE", "sometimes");
        let result = Options::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("SCHEMATS_CAMEL_CASE"));

        env::remove_var("SCHEMATS_CAMEL_CASE");
        let options = Options::from_env().unwrap();
        assert!(!options.camel_case);
    }
}
