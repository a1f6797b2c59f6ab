use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShoplensError {
    /// A timestamp or numeric field could not be converted to its expected type.
    #[error("Parse error in column '{column}' (value {value:?}): {reason}")]
    Parse {
        column: String,
        value: String,
        reason: String,
    },

    /// A structural precondition was violated (empty input, missing column).
    #[error("Validation error in {step}: {reason}")]
    Validation { step: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(String),

    #[error("Parquet error: {0}")]
    Parquet(String),

    #[error("{0}")]
    Other(String),
}

impl ShoplensError {
    pub fn parse(column: &str, value: &str, reason: impl Into<String>) -> Self {
        ShoplensError::Parse {
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn validation(step: &str, reason: impl Into<String>) -> Self {
        ShoplensError::Validation {
            step: step.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ShoplensError::Parse { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ShoplensError::Validation { .. })
    }
}
