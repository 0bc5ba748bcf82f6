use thiserror::Error;

/// Failure kinds of the analysis pipeline.
///
/// Only the dataset-level variants abort a request. `AmountParse` is always
/// recovered locally by dropping the offending line or row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    /// A single token could not be coerced to a number.
    #[error("could not parse amount from {token:?}")]
    AmountParse { token: String },

    /// Tabular input had no column with numeric values.
    #[error("could not determine the amount column")]
    MissingAmountColumn,

    /// Decoded input produced zero rows.
    #[error("file contains no data")]
    EmptyDataset,

    /// File extension not handled by the decoder.
    #[error("unsupported file format {0:?} (expected .csv, .xlsx or .pdf)")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            AnalyzeError::MissingAmountColumn.to_string(),
            "could not determine the amount column"
        );
        assert_eq!(AnalyzeError::EmptyDataset.to_string(), "file contains no data");
        assert!(
            AnalyzeError::UnsupportedFormat("docx".to_string())
                .to_string()
                .contains("docx")
        );
    }
}
