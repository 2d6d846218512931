//! Text-generation client.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::config::AssistConfig;
use crate::error::{AssistResult, ExternalServiceError};

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> AssistResult<String>;
}

/// Type-erased generator, so callers can swap implementations at runtime.
pub type BoxedGenerator = Box<dyn TextGenerator>;

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate_text(&self, prompt: &str) -> AssistResult<String> {
        (**self).generate_text(prompt).await
    }
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client from configuration.
    ///
    /// ## Errors
    /// `MissingCredentials` when no key is configured, `Http` when the
    /// underlying client cannot be built.
    pub fn from_config(config: &AssistConfig) -> AssistResult<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ExternalServiceError::MissingCredentials)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(GeminiClient {
            http,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate_text(&self, prompt: &str) -> AssistResult<String> {
        debug!("Sending request to text-generation service");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        debug!("Received successful response");
        let body: Value = serde_json::from_str(&text)?;
        parse_response(&body)
    }
}

/// Maps a non-success reply to `Api`, keeping the status even when the
/// body is not JSON (a proxy's HTML error page, for instance).
pub fn api_error(status: u16, body: &str) -> ExternalServiceError {
    const MAX_MESSAGE_CHARS: usize = 200;

    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    });

    let message = from_json.unwrap_or_else(|| {
        let raw = body.trim();
        if raw.is_empty() {
            "Unknown error".to_string()
        } else {
            raw.chars().take(MAX_MESSAGE_CHARS).collect()
        }
    });

    ExternalServiceError::Api { status, message }
}

/// `{"contents":[{"parts":[{"text": prompt}]}]}`
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ]
    })
}

/// Concatenates the text parts of the first candidate.
pub fn parse_response(body: &Value) -> AssistResult<String> {
    let parts = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or(ExternalServiceError::EmptyResponse)?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        return Err(ExternalServiceError::EmptyResponse);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_key() {
        let config = AssistConfig::default();
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(ExternalServiceError::MissingCredentials)
        ));
    }

    #[test]
    fn test_endpoint() {
        let config = AssistConfig {
            api_key: Some("test-key".into()),
            base_url: "https://custom.api.com/v1beta/".into(),
            ..Default::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://custom.api.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(client.api_key, "test-key");
    }

    #[test]
    fn test_request_body_shape() {
        let body = request_body("hi");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [ { "text": "九成新，" }, { "text": "价格实惠。" } ] }
            }]
        });
        assert_eq!(parse_response(&body).unwrap(), "九成新，价格实惠。");
    }

    #[test]
    fn test_api_error_reads_json_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#;
        match api_error(400, body) {
            ExternalServiceError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_status_for_html_body() {
        let body = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        match api_error(502, body) {
            ExternalServiceError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("502 Bad Gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            api_error(503, "  "),
            ExternalServiceError::Api { status: 503, ref message } if message == "Unknown error"
        ));
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let body = json!({ "candidates": [] });
        assert!(matches!(
            parse_response(&body),
            Err(ExternalServiceError::EmptyResponse)
        ));

        let blank = json!({ "candidates": [{ "content": { "parts": [ { "text": " " } ] } }] });
        assert!(matches!(
            parse_response(&blank),
            Err(ExternalServiceError::EmptyResponse)
        ));
    }
}
