use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

impl CoreError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput(field.to_string(), reason.into())
    }
}
