//! Chat message token estimation.
//!
//! Implements the per-message counting rule published for OpenAI chat models:
//! every message costs a fixed per-model overhead plus the encoded length of
//! each field value, a `name` field costs a per-model adjustment, and every
//! reply is primed with three extra tokens.
//!
//! The set of supported models is closed. Unknown models fail with
//! [`ReviewError::UnsupportedModel`] rather than guessing at costs.

use crate::error::ReviewError;
use crate::types::Message;
use tiktoken_rs::CoreBPE;

/// Every reply is primed with `<|start|>assistant<|message|>`.
pub const REPLY_PRIMING_TOKENS: i64 = 3;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Encoding used when the tokenizer lookup does not know a model.
pub const FALLBACK_ENCODING: &str = "cl100k_base";

/// Counting costs for a model, or a redirect to the dated variant it tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelCosts {
    Alias(&'static str),
    Fixed {
        tokens_per_message: i64,
        tokens_per_name: i64,
    },
}

/// Entry of the supported model table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: &'static str,
    pub costs: ModelCosts,
}

/// Supported models.
pub const MODELS: &[ModelSpec] = &[
    ModelSpec {
        name: "gpt-3.5-turbo",
        costs: ModelCosts::Alias("gpt-3.5-turbo-0301"),
    },
    ModelSpec {
        name: "gpt-4",
        costs: ModelCosts::Alias("gpt-4-0314"),
    },
    ModelSpec {
        name: "gpt-3.5-turbo-0301",
        // <|start|>{role/name}\n{content}<|end|>\n; a name replaces the role
        costs: ModelCosts::Fixed {
            tokens_per_message: 4,
            tokens_per_name: -1,
        },
    },
    ModelSpec {
        name: "gpt-4-0314",
        costs: ModelCosts::Fixed {
            tokens_per_message: 3,
            tokens_per_name: 1,
        },
    },
    ModelSpec {
        name: "gpt-4o-mini",
        costs: ModelCosts::Fixed {
            tokens_per_message: 3,
            tokens_per_name: 1,
        },
    },
];

/// A model resolved through its alias chain to concrete costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedModel {
    /// Concrete (dated) model name.
    pub name: &'static str,
    pub tokens_per_message: i64,
    pub tokens_per_name: i64,
}

/// Find a model in the supported table.
pub fn lookup(model: &str) -> Result<&'static ModelSpec, ReviewError> {
    MODELS
        .iter()
        .find(|spec| spec.name == model)
        .ok_or_else(|| ReviewError::UnsupportedModel(model.to_string()))
}

/// Follow aliases until a model with fixed costs is reached.
pub fn resolve(model: &str) -> Result<ResolvedModel, ReviewError> {
    let mut spec = lookup(model)?;

    // Bounded by the table size so a cyclic alias cannot spin forever.
    for _ in 0..MODELS.len() {
        match spec.costs {
            ModelCosts::Fixed {
                tokens_per_message,
                tokens_per_name,
            } => {
                return Ok(ResolvedModel {
                    name: spec.name,
                    tokens_per_message,
                    tokens_per_name,
                })
            }
            ModelCosts::Alias(target) => {
                log::debug!(
                    "{} may change over time. Counting tokens assuming {}.",
                    spec.name,
                    target
                );
                spec = lookup(target)?;
            }
        }
    }

    Err(ReviewError::UnsupportedModel(model.to_string()))
}

/// Something that can measure text in tokens.
pub trait Tokenizer {
    fn count_tokens(&self, text: &str) -> usize;
}

impl Tokenizer for CoreBPE {
    fn count_tokens(&self, text: &str) -> usize {
        self.encode_ordinary(text).len()
    }
}

/// Load the BPE encoding for `model`, falling back to `cl100k_base`.
pub fn tokenizer_for_model(model: &str) -> Result<CoreBPE, ReviewError> {
    match tiktoken_rs::get_bpe_from_model(model) {
        Ok(bpe) => Ok(bpe),
        Err(_) => {
            log::debug!(
                "Model {} not found. Using {} encoding.",
                model,
                FALLBACK_ENCODING
            );
            tiktoken_rs::cl100k_base().map_err(|e| ReviewError::Tokenizer(e.to_string()))
        }
    }
}

/// Count the tokens `messages` consume for `model` using the given tokenizer.
pub fn count_with<T>(
    messages: &[Message],
    model: &str,
    tokenizer: &T,
) -> Result<usize, ReviewError>
where
    T: Tokenizer + ?Sized,
{
    let resolved = resolve(model)?;

    let mut total: i64 = 0;
    for message in messages {
        total += resolved.tokens_per_message;
        for value in message.field_values() {
            total += tokenizer.count_tokens(value) as i64;
        }
        if message.name.is_some() {
            total += resolved.tokens_per_name;
        }
    }
    total += REPLY_PRIMING_TOKENS;

    Ok(total.max(0) as usize)
}

/// Count the tokens `messages` consume for `model` with the model's own encoding.
pub fn num_tokens_from_messages(messages: &[Message], model: &str) -> Result<usize, ReviewError> {
    let resolved = resolve(model)?;
    let tokenizer = tokenizer_for_model(resolved.name)?;
    count_with(messages, model, &tokenizer)
}
