use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffordabilityError {
    #[error("Unknown financing type: '{0}'")]
    UnknownFinancingType(String),

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid financing plan '{plan}': {reason}")]
    InvalidPlan { plan: String, reason: String },

    #[error("Export unavailable: no computation has been generated yet")]
    ExportNotReady,

    #[error("Generation store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AffordabilityError {
    fn from(e: serde_json::Error) -> Self {
        AffordabilityError::SerializationError(e.to_string())
    }
}
