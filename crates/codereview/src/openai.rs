use crate::prelude::*;
use codereview_core::chat::{ChatCompletionRequest, ChatCompletionResponse};
use codereview_core::ReviewError;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Anything able to answer a chat completion request.
#[async_trait::async_trait]
pub trait CompletionBackend {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> std::result::Result<ChatCompletionResponse, ReviewError>;
}

/// OpenAI connection settings
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Request timeout in seconds. `None` keeps the client default.
    pub timeout: Option<u64>,
}

impl OpenAiConfig {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        Ok(Self {
            base_url: base_url.into(),
            api_key,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Create an HTTP client with Bearer auth headers
pub fn create_client(config: &OpenAiConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| Error::InvalidConfig(format!("Invalid header value: {e}")))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(secs) = config.timeout {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Chat completion backend talking to an OpenAI compatible API.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    url: String,
}

impl OpenAiBackend {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            url: config.completions_url(),
        })
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> std::result::Result<ChatCompletionResponse, ReviewError> {
        log::info!("Sending request to {} for code analysis", self.url);
        log::info!("Max response tokens: {}", request.max_tokens);

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| remote(Error::Network(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewError::Remote(format!(
                "API returned status {status}: {body}"
            )));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ReviewError::Remote(format!("Failed to parse response: {e}")))?;

        log::info!("Received response from {}", self.url);

        Ok(parsed)
    }
}

fn remote(err: Error) -> ReviewError {
    ReviewError::Remote(err.to_string())
}
