use thiserror::Error;

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<serde_yaml::Error> for AuditError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigError(format!("YAML parse error: {}", err))
    }
}

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Audit trail not found: {0}")]
    NotFound(String),

    #[error("Malformed audit record: {0}")]
    MalformedRecord(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AuditError {
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::ValidationError(format!("Missing required fields: {}", fields.join(", ")))
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Client-side errors are the caller's fault and should never be retried.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::NotFound(_) | Self::MalformedRecord(_)
        )
    }
}
