use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },

    #[error("{path} contains no usable sale records ({skipped} rows skipped)")]
    Empty { path: String, skipped: usize },
}

/// A single row that cannot be drawn. The row is skipped, loading continues.
#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("column `{column}` is empty")]
    MissingNumber { column: &'static str },

    #[error("column `{column}` has non-numeric value {value:?}")]
    InvalidNumber { column: &'static str, value: String },
}
