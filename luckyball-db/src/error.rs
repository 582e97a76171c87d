//! Error taxonomy shared by the loader, the engine and the ticket store.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LuckyError>;

#[derive(Debug, Error)]
pub enum LuckyError {
    /// A data row could not be turned into a valid drawing. `row` is 1-based,
    /// counted from the first row after the header.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The window handed to a strategy or backtest is too small.
    #[error("insufficient data: need {required} drawing(s), have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LuckyError {
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        LuckyError::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_row() {
        let err = LuckyError::malformed(7, "lucky ball 19 out of range (1-18)");
        let msg = err.to_string();
        assert!(msg.contains("row 7"), "{msg}");
        assert!(msg.contains("lucky ball 19"), "{msg}");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = LuckyError::InsufficientData {
            required: 1,
            available: 0,
        };
        assert_eq!(err.to_string(), "insufficient data: need 1 drawing(s), have 0");
    }
}
