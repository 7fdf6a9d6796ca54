//! Error and warning types for configuration loading.

use thiserror::Error;

/// A configuration document that could not be read at all.
///
/// Field values never produce errors (they fall back to defaults); only a
/// document that is not JSON/YAML, or not a mapping, does.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A setting that was present but unusable and was replaced by its default.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    /// Dotted path of the field (e.g. `groove.spacing`).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl ConfigWarning {
    /// Creates a new warning.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Prefixes the field path with a parent section name.
    pub fn nested(mut self, section: &str) -> Self {
        self.field = format!("{}.{}", section, self.field);
        self
    }
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
