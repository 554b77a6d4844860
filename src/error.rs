use thiserror::Error;

/// Precondition failures raised by [`compute_insights`](crate::insights::compute_insights).
///
/// This is the only error the engine itself defines. Callers are expected
/// to translate it into a user-facing "invalid axis selection" style
/// message; the variants carry which precondition failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// The table holds no rows at all.
    #[error("table is empty")]
    EmptyTable,

    /// The selected axis is not a key of the first row.
    #[error("{axis} axis '{column}' not found in sheet columns")]
    MissingAxis {
        /// Which selection failed: "x" or "y".
        axis: &'static str,
        column: String,
    },

    /// No row held a y-value that parses to a finite number.
    #[error("column '{column}' has no numeric values")]
    NoNumericValues { column: String },
}

/// Errors from converting source text into a [`Table`](crate::table::Table).
///
/// Kept separate from [`InvalidInputError`] so engine callers never see
/// ingestion failures through the analysis contract.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read sheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("invalid JSON rows: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of row objects")]
    NotRowObjects,

    #[error("sheet has no data rows")]
    EmptySheet,
}
