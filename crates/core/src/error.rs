/// Fixed message returned when the prompt leaves too little room for a reply.
pub const TOO_LONG_MESSAGE: &str =
    "The code file is too long to analyze. Please select a shorter file.";

/// Reasons a single review can fail.
///
/// These never abort a batch; the analyzer turns them into
/// [`FileReview`](crate::review::FileReview) records.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Token counting is not implemented for model {0}")]
    UnsupportedModel(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("The code file is too long to analyze. Please select a shorter file.")]
    TooLong {
        prompt_tokens: usize,
        remaining: usize,
    },

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Completion response contained no message content")]
    EmptyResponse,

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
}
