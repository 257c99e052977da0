use thiserror::Error;

#[derive(Debug, Error)]
pub enum RealtyError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RealtyError {
    fn from(e: serde_json::Error) -> Self {
        RealtyError::SerializationError(e.to_string())
    }
}
