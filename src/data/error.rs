use thiserror::Error;

/// Errors raised while summarising a loaded survey.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("column '{column}', row {row}: '{value}' is not a response code in 1..=5")]
    InvalidCode {
        column: String,
        row: usize,
        value: String,
    },

    #[error("unknown section '{name}'")]
    UnknownSection { name: String },
}
