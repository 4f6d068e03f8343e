use crate::openai::CompletionBackend;
use codereview_core::cache::ReviewCache;
use codereview_core::chat::extract_first_choice;
use codereview_core::plan::plan_request;
use codereview_core::review::FileReview;
use codereview_core::tokens::{resolve, tokenizer_for_model, Tokenizer};
use codereview_core::ReviewError;
use std::path::{Path, PathBuf};

/// Reviews source files one at a time against a completion backend.
///
/// Successful reviews are memoized in the owned [`ReviewCache`], so the same
/// text is only ever sent once for the lifetime of the reviewer.
pub struct Reviewer<B> {
    backend: B,
    tokenizer: Box<dyn Tokenizer>,
    model: String,
    context_window: usize,
    cache: ReviewCache,
}

impl<B: CompletionBackend> Reviewer<B> {
    /// Create a reviewer using the model's own encoding.
    ///
    /// The cache is supplied by the caller; pass a fresh [`ReviewCache`] to
    /// start cold or a populated one to reuse earlier reviews.
    pub fn new(
        backend: B,
        cache: ReviewCache,
        model: &str,
        context_window: usize,
    ) -> Result<Self, ReviewError> {
        let resolved = resolve(model)?;
        let tokenizer = tokenizer_for_model(resolved.name)?;

        Ok(Self {
            backend,
            tokenizer: Box::new(tokenizer),
            model: model.to_string(),
            context_window,
            cache,
        })
    }

    pub fn cache(&self) -> &ReviewCache {
        &self.cache
    }

    /// Review `code`, returning the model's trimmed recommendation.
    ///
    /// Fails with [`ReviewError::TooLong`] before contacting the backend when
    /// the prompt leaves too little room for a reply.
    pub async fn get_code_analysis(&mut self, code: &str) -> Result<String, ReviewError> {
        if let Some(cached) = self.cache.get(code) {
            log::debug!("Using cached review ({} bytes of code)", code.len());
            return Ok(cached.to_string());
        }

        let request = plan_request(
            code,
            &self.model,
            self.context_window,
            self.tokenizer.as_ref(),
        )?;
        log::debug!(
            "tokens_in_messages: {}, max_tokens: {}, tokens_for_response: {}",
            self.context_window - request.max_tokens,
            self.context_window,
            request.max_tokens
        );

        let response = self.backend.complete(&request).await?;
        let review = extract_first_choice(response)?;

        self.cache.insert(code, review.clone());

        Ok(review)
    }

    /// Analyze one file. Never fails: errors end up in the record.
    pub async fn analyze_file(&mut self, path: &Path) -> FileReview {
        let code_file = path.display().to_string();

        let code = match tokio::fs::read_to_string(path).await {
            Ok(code) => code,
            Err(e) => {
                log::warn!("Error reading code file: {}", code_file);
                let err = ReviewError::Read {
                    path: code_file.clone(),
                    message: e.to_string(),
                };
                return FileReview::from_outcome(code_file, String::new(), Err(err));
            }
        };

        if code.is_empty() {
            return FileReview::empty(code_file);
        }

        log::info!("Analyzing code file: {}", code_file);
        let outcome = self.get_code_analysis(&code).await;
        match &outcome {
            Ok(_) => {}
            Err(ReviewError::TooLong { prompt_tokens, .. }) => {
                log::info!(
                    "Skipping {}: prompt uses {} of {} tokens",
                    code_file,
                    prompt_tokens,
                    self.context_window
                );
            }
            Err(err) => log::warn!("Error analyzing code file: {}: {}", code_file, err),
        }

        FileReview::from_outcome(code_file, code, outcome)
    }

    /// Analyze files in order, one record per path.
    pub async fn analyze_files(&mut self, paths: &[PathBuf]) -> Vec<FileReview> {
        let mut reviews = Vec::with_capacity(paths.len());
        for path in paths {
            reviews.push(self.analyze_file(path).await);
        }
        reviews
    }
}
