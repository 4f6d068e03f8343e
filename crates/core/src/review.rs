use crate::error::{ReviewError, TOO_LONG_MESSAGE};
use serde::{Deserialize, Serialize};

/// Recommendation used for files without any content.
pub const NO_CODE_MESSAGE: &str = "No code found in file";

/// How a file's review ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Reviewed,
    Empty,
    TooLong,
    Failed,
}

/// Review result for one file.
///
/// `recommendation` is always set so the record can be displayed as is;
/// `status` tells failed analyses apart from successful ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReview {
    pub code_file: String,
    pub code_snippet: String,
    pub recommendation: String,
    pub status: ReviewStatus,
}

impl FileReview {
    pub fn empty(code_file: impl Into<String>) -> Self {
        Self {
            code_file: code_file.into(),
            code_snippet: String::new(),
            recommendation: NO_CODE_MESSAGE.to_string(),
            status: ReviewStatus::Empty,
        }
    }

    /// Build the record for a finished analysis.
    pub fn from_outcome(
        code_file: impl Into<String>,
        code_snippet: impl Into<String>,
        outcome: Result<String, ReviewError>,
    ) -> Self {
        let (recommendation, status) = match outcome {
            Ok(text) => (text, ReviewStatus::Reviewed),
            Err(ReviewError::TooLong { .. }) => {
                (TOO_LONG_MESSAGE.to_string(), ReviewStatus::TooLong)
            }
            Err(err) => (failure_message(&err), ReviewStatus::Failed),
        };

        Self {
            code_file: code_file.into(),
            code_snippet: code_snippet.into(),
            recommendation,
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReviewStatus::Reviewed
    }
}

/// Human readable recommendation for a failed analysis.
pub fn failure_message(err: &ReviewError) -> String {
    format!("Error analyzing code file: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        let record = FileReview::empty("src/empty.py");
        assert_eq!(record.recommendation, "No code found in file");
        assert_eq!(record.status, ReviewStatus::Empty);
        assert!(record.code_snippet.is_empty());
    }

    #[test]
    fn test_success_record() {
        let record = FileReview::from_outcome("a.rs", "fn a() {}", Ok("All good".to_string()));
        assert!(record.is_success());
        assert_eq!(record.recommendation, "All good");
    }

    #[test]
    fn test_too_long_record_uses_fixed_message() {
        let record = FileReview::from_outcome(
            "big.rs",
            "...",
            Err(ReviewError::TooLong {
                prompt_tokens: 8100,
                remaining: 92,
            }),
        );
        assert_eq!(record.status, ReviewStatus::TooLong);
        assert_eq!(record.recommendation, TOO_LONG_MESSAGE);
    }

    #[test]
    fn test_failure_record_stringifies_error() {
        let record = FileReview::from_outcome(
            "a.rs",
            "x",
            Err(ReviewError::Remote("status 500".to_string())),
        );
        assert_eq!(record.status, ReviewStatus::Failed);
        assert_eq!(
            record.recommendation,
            "Error analyzing code file: Remote error: status 500"
        );
        assert!(!record.is_success());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_value(ReviewStatus::TooLong).unwrap();
        assert_eq!(json, serde_json::json!("too_long"));
    }
}
