//! Runtime configuration read from the Lambda environment.

use thiserror::Error;

/// Variable holding the DynamoDB table name.
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Variable allowing `POST` to replace an existing user.
pub const ALLOW_OVERWRITE_VAR: &str = "ALLOW_OVERWRITE";

/// Configuration errors, fatal at cold start.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A required variable is not set or empty.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    /// A variable is set to a value that cannot be parsed.
    #[error("environment variable {name} has an invalid value: {value}")]
    Invalid {
        /// The variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Function configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Whether creating a user replaces an existing one with the same email.
    pub allow_overwrite: bool,
    /// The DynamoDB table holding the users.
    pub table_name: String,
}

impl Config {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = lookup(TABLE_NAME_VAR)
            .filter(|table_name| !table_name.is_empty())
            .ok_or(ConfigError::Missing(TABLE_NAME_VAR))?;
        let allow_overwrite = match lookup(ALLOW_OVERWRITE_VAR) {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: ALLOW_OVERWRITE_VAR,
                        value,
                    });
                }
            },
        };
        Ok(Self {
            allow_overwrite,
            table_name,
        })
    }
}
