use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "placeholder.prefix")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagerSettings {
    /// Separator used when parsing textual keys such as `nested.greeting`.
    pub key_separator: String,

    pub placeholder: PlaceholderConfig,

    /// Whether every locale must define the same key paths.
    pub shape_validation: ShapeValidation,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            key_separator: ".".to_string(),
            placeholder: PlaceholderConfig::default(),
            shape_validation: ShapeValidation::default(),
        }
    }
}

/// Delimiters surrounding a placeholder name in a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderConfig {
    pub prefix: String,
    pub suffix: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self { prefix: "{".to_string(), suffix: "}".to_string() }
    }
}

/// When locale tree shapes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeValidation {
    /// Never compared up front; a missing key surfaces as `InvalidPath` when it is looked up.
    #[default]
    Lazy,
    /// Compared at construction; any difference fails with `ShapeMismatch`.
    Strict,
}

impl ManagerSettings {
    /// # Errors
    /// - Empty key separator
    /// - Empty placeholder delimiters
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.placeholder.prefix.is_empty() {
            errors.push(ValidationError::new(
                "placeholder.prefix",
                "The placeholder prefix cannot be empty. Example: \"{\"",
            ));
        }

        if self.placeholder.suffix.is_empty() {
            errors.push(ValidationError::new(
                "placeholder.suffix",
                "The placeholder suffix cannot be empty. Example: \"}\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
