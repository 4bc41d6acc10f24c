//! OpenRouter chat completion client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use plantdx_core::{
    CompletionConfig, CompletionResult, Error, ImageInput, Result, VisionProvider,
};

use crate::config::OpenRouterConfig;

/// OpenRouter client for multimodal chat completions
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client from configuration
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new OpenRouter client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenRouterConfig::from_env()?;
        Self::new(config)
    }

    /// Set the model to use for completions
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.config.model = model_id.into();
        self
    }

    async fn perform_completion(
        &self,
        prompt: &str,
        image: &ImageInput,
        config: &CompletionConfig,
    ) -> Result<CompletionResult> {
        let request_body = build_request(prompt, image, config);

        let response = self
            .client
            .post(self.config.completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", self.config.app_url.as_str())
            .header("X-Title", self.config.app_title.as_str())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        debug!(%status, bytes = body.len(), "OpenRouter responded");

        let (text, tokens_used) = parse_response(status, &body)?;

        Ok(CompletionResult {
            text,
            model_id: config.model_id.clone(),
            tokens_used,
        })
    }
}

fn build_request<'a>(
    prompt: &'a str,
    image: &'a ImageInput,
    config: &'a CompletionConfig,
) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model_id,
        max_tokens: config.max_tokens,
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text { text: prompt },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: &image.data_url },
                },
            ],
        }],
    }
}

/// Extract the reply text from a chat completion response body
fn parse_response(status: StatusCode, body: &str) -> Result<(String, Option<u32>)> {
    let parsed = serde_json::from_str::<ChatResponse>(body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("API Error: {}", status.as_u16()));

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(message));
        }
        return Err(Error::Provider(message));
    }

    let response = parsed.map_err(|e| Error::Serialization(e.to_string()))?;
    let tokens_used = response.usage.and_then(|u| u.total_tokens);

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| Error::Provider("Invalid response from OpenRouter API".to_string()))?;

    Ok((text, tokens_used))
}

#[async_trait]
impl VisionProvider for OpenRouterClient {
    async fn complete(
        &self,
        prompt: &str,
        image: &ImageInput,
        config: &CompletionConfig,
    ) -> Result<CompletionResult> {
        match timeout(config.timeout, self.perform_completion(prompt, image, config)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout("Request timed out".to_string())),
        }
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageInput {
        ImageInput::from_bytes("leaf.png", b"abc", "image/png").unwrap()
    }

    #[test]
    fn test_request_shape() {
        let image = image();
        let config = CompletionConfig::default();
        let request = build_request("Describe", &image, &config);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "google/gemini-2.0-flash-001");
        assert_eq!(value["max_tokens"], 2048);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
        assert_eq!(value["messages"][0]["content"][0]["text"], "Describe");
        assert_eq!(value["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            value["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,YWJj"
        );
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"status\":\"healthy\"}"}}],"usage":{"total_tokens":321}}"#;
        let (text, tokens) = parse_response(StatusCode::OK, body).unwrap();
        assert_eq!(text, r#"{"status":"healthy"}"#);
        assert_eq!(tokens, Some(321));
    }

    #[test]
    fn test_parse_api_error_message() {
        let body = r#"{"error":{"message":"Rate limit exceeded","code":429}}"#;
        match parse_response(StatusCode::TOO_MANY_REQUESTS, body) {
            Err(Error::Provider(message)) => assert_eq!(message, "Rate limit exceeded"),
            other => panic!("unexpected: {:?}", other.map(|(t, _)| t)),
        }

        match parse_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") {
            Err(Error::Provider(message)) => assert_eq!(message, "API Error: 502"),
            other => panic!("unexpected: {:?}", other.map(|(t, _)| t)),
        }

        assert!(matches!(
            parse_response(StatusCode::UNAUTHORIZED, "{}"),
            Err(Error::Authentication(_))
        ));
    }

    #[test]
    fn test_parse_missing_choices() {
        assert!(matches!(
            parse_response(StatusCode::OK, r#"{"choices":[]}"#),
            Err(Error::Provider(_))
        ));
        assert!(matches!(
            parse_response(StatusCode::OK, r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(Error::Provider(_))
        ));
        assert!(matches!(
            parse_response(StatusCode::OK, "not json"),
            Err(Error::Serialization(_))
        ));
    }
}
