// src/services/openai.rs
//! OpenAI chat completion passthrough for the site chatbot.
//! The completion API is treated as an opaque external service; this
//! client only shapes the request and pulls the first choice's text out.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Chat message with either plain-text content or a content-part array
/// (the latter is how image attachments ride along).
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: serde_json::Value,
}

impl ChatMessage {
    pub fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: serde_json::Value::String(content.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct OpenAIService {
    api_key: Option<String>,
    chat_model: String,
    vision_model: String,
    client: Client,
}

impl OpenAIService {
    pub fn new(
        api_key: Option<String>,
        chat_model: String,
        vision_model: String,
        client: Client,
    ) -> Self {
        if api_key.is_none() {
            warn!("OPENAI_API_KEY not set - chat endpoint will report unconfigured");
        }
        Self {
            api_key,
            chat_model,
            vision_model,
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one completion round-trip and return the assistant text.
    /// `with_image` selects the vision-capable model.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        with_image: bool,
    ) -> Result<String, OpenAIError> {
        let api_key = self.api_key.as_deref().ok_or(OpenAIError::NotConfigured)?;

        let model = if with_image {
            self.vision_model.clone()
        } else {
            self.chat_model.clone()
        };

        let request = ChatCompletionRequest {
            model: model.clone(),
            messages,
            max_tokens: 500,
            temperature: 0.7,
        };

        debug!(model = %model, "Sending chat completion request");

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting OpenAI");
                OpenAIError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(http_status = %status, "OpenAI returned error status");
            return Err(OpenAIError::RequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| OpenAIError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            debug!(total_tokens = usage.total_tokens, "Chat completion usage");
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OpenAIError::InvalidResponse("no choices in response".to_string()))?;

        if let Some(reason) = &choice.finish_reason {
            debug!(finish_reason = %reason, "Chat completion finished");
        }

        choice
            .message
            .content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| OpenAIError::InvalidResponse("empty completion content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_service_reports_it() {
        let service = OpenAIService::new(
            None,
            "gpt-4o-mini".to_string(),
            "gpt-4o".to_string(),
            Client::new(),
        );
        assert!(!service.is_configured());
    }

    #[tokio::test]
    async fn test_completion_without_key_fails_fast() {
        let service = OpenAIService::new(
            None,
            "gpt-4o-mini".to_string(),
            "gpt-4o".to_string(),
            Client::new(),
        );
        let result = service
            .chat_completion(vec![ChatMessage::text("user", "hello")], false)
            .await;
        assert!(matches!(result, Err(OpenAIError::NotConfigured)));
    }

    #[test]
    fn test_text_message_serializes_as_plain_string() {
        let msg = ChatMessage::text("user", "where do I pay faction fees?");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "where do I pay faction fees?");
    }
}
