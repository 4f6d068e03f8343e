use crate::error::ReviewError;
use crate::types::Message;
use serde::{Deserialize, Serialize};

/// Chat completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: usize,
    pub n: u32,
    pub temperature: f32,
}

/// Chat completion response body. Fields we do not read are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Take the first choice's content, trimmed of surrounding whitespace.
pub fn extract_first_choice(response: ChatCompletionResponse) -> Result<String, ReviewError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or(ReviewError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ChatCompletionResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extracts_and_trims_first_choice() {
        let response = parse(
            r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "\n  X  \n"}, "finish_reason": "stop"},
                    {"index": 1, "message": {"role": "assistant", "content": "Y"}, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 10, "completion_tokens": 1, "total_tokens": 11}
            }"#,
        );
        assert_eq!(extract_first_choice(response).unwrap(), "X");
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let response = parse(r#"{"choices": []}"#);
        assert_eq!(
            extract_first_choice(response).unwrap_err(),
            ReviewError::EmptyResponse
        );
    }

    #[test]
    fn test_null_content_is_empty_response() {
        let response = parse(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#);
        assert_eq!(
            extract_first_choice(response).unwrap_err(),
            ReviewError::EmptyResponse
        );
    }

    #[test]
    fn test_request_wire_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![Message::system("prompt")],
            max_tokens: 4000,
            n: 1,
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "system", "content": "prompt"}],
                "max_tokens": 4000,
                "n": 1,
                "temperature": 0.0
            })
        );
    }
}
