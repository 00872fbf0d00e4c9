use thiserror::Error;

/// Failures raised while shaping or aggregating tables.
#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid value in column '{column}': {value}")]
    InvalidValue { column: String, value: String },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
