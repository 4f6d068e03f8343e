//! Core library for codereview
//!
//! This crate implements the **Functional Core** of the codereview application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`codereview_core`** (this crate): Pure transformation functions with zero I/O
//! - **`codereview`**: File loading, HTTP calls and the CLI (the Imperative Shell)
//!
//! Everything here is deterministic: given the same source text, model and
//! tokenizer, the same prompt, token count and request come out. The shell
//! owns the remote call, the file system and the [`cache::ReviewCache`].
//!
//! # Module Organization
//!
//! - [`prompt`]: The fixed review prompt and the single system message built from it
//! - [`tokens`]: Supported model table and the chat message token counting rule
//! - [`plan`]: Context budget and completion request planning
//! - [`chat`]: Chat completion wire types and response extraction
//! - [`cache`]: Explicit memoization of successful reviews
//! - [`review`]: Per-file review records
//! - [`error`]: Typed failure reasons
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use codereview_core::{plan::plan_request, tokens::tokenizer_for_model};
//!
//! let tokenizer = tokenizer_for_model("gpt-4o-mini")?;
//! let request = plan_request("fn main() {}", "gpt-4o-mini", 8192, &tokenizer)?;
//! assert_eq!(request.n, 1);
//! ```

pub mod cache;
pub mod chat;
pub mod error;
pub mod plan;
pub mod prompt;
pub mod review;
pub mod tokens;
pub mod types;

pub use error::ReviewError;
