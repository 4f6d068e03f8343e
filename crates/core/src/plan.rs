//! Context budget planning for a single review request.

use crate::chat::ChatCompletionRequest;
use crate::error::ReviewError;
use crate::prompt::build_messages;
use crate::tokens::{count_with, Tokenizer};

/// Total tokens shared between the prompt and the reply.
pub const DEFAULT_CONTEXT_WINDOW: usize = 8192;

/// Smallest reply budget worth sending a request for.
pub const MIN_RESPONSE_TOKENS: usize = 200;

/// Review requests are deterministic and ask for a single candidate.
pub const TEMPERATURE: f32 = 0.0;
pub const CANDIDATES: u32 = 1;

/// Token accounting for one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Budget {
    pub prompt_tokens: usize,
    pub context_window: usize,
    /// Tokens left for the reply; zero when the prompt fills the window.
    pub remaining: usize,
}

impl Budget {
    pub fn new(prompt_tokens: usize, context_window: usize) -> Self {
        Self {
            prompt_tokens,
            context_window,
            remaining: context_window.saturating_sub(prompt_tokens),
        }
    }

    pub fn fits(&self) -> bool {
        self.remaining >= MIN_RESPONSE_TOKENS
    }
}

/// Build the completion request for reviewing `code`.
///
/// Fails with [`ReviewError::TooLong`] when fewer than
/// [`MIN_RESPONSE_TOKENS`] would be left for the reply.
pub fn plan_request<T>(
    code: &str,
    model: &str,
    context_window: usize,
    tokenizer: &T,
) -> Result<ChatCompletionRequest, ReviewError>
where
    T: Tokenizer + ?Sized,
{
    let messages = build_messages(code);
    let prompt_tokens = count_with(&messages, model, tokenizer)?;
    let budget = Budget::new(prompt_tokens, context_window);

    if !budget.fits() {
        return Err(ReviewError::TooLong {
            prompt_tokens,
            remaining: budget.remaining,
        });
    }

    Ok(ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens: budget.remaining,
        n: CANDIDATES,
        temperature: TEMPERATURE,
    })
}
