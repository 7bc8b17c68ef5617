//! DeepSeek chat-completions provider (OpenAI-compatible wire format).

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use super::{
	ComplimentProvider, MAX_OUTPUT_TOKENS, ProviderError, ProviderResult, TEMPERATURE,
	clean_compliment, send_json, usable_credential,
};
use crate::config::ProviderConfig;

/// Default DeepSeek chat-completions endpoint.
pub const DEEPSEEK_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Model used when the config does not name one.
pub const DEEPSEEK_MODEL: &str = "deepseek-chat";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
	model: &'a str,
	messages: Vec<ChatMessage>,
	max_tokens: u32,
	temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
	role: &'static str,
	content: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
	#[serde(default)]
	choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
	#[serde(default)]
	message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
	#[serde(default)]
	content: Option<String>,
}

/// Client for the DeepSeek API, authenticated with a bearer token.
pub struct DeepSeekClient {
	http: reqwest::Client,
	config: ProviderConfig,
	timeout: Duration,
}

impl DeepSeekClient {
	/// Creates a client; a missing credential is only reported when `generate` runs.
	pub fn new(http: reqwest::Client, config: ProviderConfig, timeout: Duration) -> Self {
		Self {
			http,
			config,
			timeout,
		}
	}

	fn model(&self) -> &str {
		self.config.model.as_deref().unwrap_or(DEEPSEEK_MODEL)
	}

	fn build_request<'a>(model: &'a str, prompt: &str) -> ChatRequest<'a> {
		ChatRequest {
			model,
			messages: vec![ChatMessage {
				role: "user",
				content: format!("{prompt} Keep it concise."),
			}],
			max_tokens: MAX_OUTPUT_TOKENS,
			temperature: TEMPERATURE,
		}
	}

	fn extract_text(response: ChatResponse) -> ProviderResult<String> {
		response
			.choices
			.into_iter()
			.next()
			.and_then(|c| c.message)
			.and_then(|m| m.content)
			.as_deref()
			.and_then(clean_compliment)
			.ok_or_else(|| {
				ProviderError::MalformedResponse(
					"DeepSeek did not return a valid compliment structure".to_string(),
				)
			})
	}
}

#[async_trait(?Send)]
impl ComplimentProvider for DeepSeekClient {
	fn name(&self) -> &str {
		"DeepSeek"
	}

	async fn generate(&self, prompt: &str) -> ProviderResult<String> {
		let Some(token) = usable_credential(self.config.credential.as_deref()) else {
			warn!("DeepSeek credential not available; expecting a proxy or disabled feature");
			return Err(ProviderError::CredentialMissing {
				provider: "DeepSeek",
			});
		};

		debug!("DeepSeek: POST {} ({})", self.config.endpoint, self.model());
		let request = self
			.http
			.post(&self.config.endpoint)
			.header(AUTHORIZATION, format!("Bearer {token}"))
			.timeout(self.timeout)
			.json(&Self::build_request(self.model(), prompt));

		let response: ChatResponse = send_json(self.name(), request).await?;
		Self::extract_text(response)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::providers::test_server::{never_respond, respond_once};

	fn parse(json: &str) -> ProviderResult<String> {
		DeepSeekClient::extract_text(serde_json::from_str(json).unwrap())
	}

	#[test]
	fn test_deepseek_request_serialization() {
		let json =
			serde_json::to_value(DeepSeekClient::build_request("deepseek-chat", "Be nice."))
				.unwrap();
		assert_eq!(json["model"], "deepseek-chat");
		assert_eq!(json["messages"][0]["role"], "user");
		assert_eq!(json["messages"][0]["content"], "Be nice. Keep it concise.");
		assert_eq!(json["max_tokens"], 60);
		assert!(json.get("stream").is_none());
	}

	#[test]
	fn test_deepseek_model_defaults() {
		let client = DeepSeekClient::new(
			reqwest::Client::new(),
			ProviderConfig::deepseek(),
			Duration::from_secs(1),
		);
		assert_eq!(client.model(), "deepseek-chat");
	}

	#[test]
	fn test_deepseek_response_parsing() {
		let json = r#"{
			"id": "abc",
			"choices": [{
				"index": 0,
				"message": {"role": "assistant", "content": "  \"You light up every room.\" "},
				"finish_reason": "stop"
			}],
			"usage": {"prompt_tokens": 20, "completion_tokens": 8, "total_tokens": 28}
		}"#;
		assert_eq!(parse(json).unwrap(), "You light up every room.");
	}

	#[test]
	fn test_deepseek_missing_content_is_malformed() {
		assert!(matches!(
			parse(r#"{"choices": [{"message": {"role": "assistant"}}]}"#),
			Err(ProviderError::MalformedResponse(_))
		));
		assert!(matches!(
			parse(r#"{"choices": []}"#),
			Err(ProviderError::MalformedResponse(_))
		));
	}

	#[test]
	fn test_deepseek_blank_credential_fails_fast() {
		let config = ProviderConfig {
			credential: Some("   ".to_string()),
			..ProviderConfig::deepseek()
		};
		let client = DeepSeekClient::new(reqwest::Client::new(), config, Duration::from_secs(1));
		let result = futures::executor::block_on(client.generate("hi"));
		assert!(matches!(
			result,
			Err(ProviderError::CredentialMissing { .. })
		));
	}

	fn client_for(base: &str, timeout: Duration) -> DeepSeekClient {
		let config = ProviderConfig {
			endpoint: format!("{base}/v1/chat/completions"),
			credential: Some("sk-test".to_string()),
			model: None,
		};
		DeepSeekClient::new(reqwest::Client::new(), config, timeout)
	}

	#[tokio::test]
	async fn test_deepseek_http_success_sends_bearer_token() {
		let (base, request) = respond_once(
			200,
			r#"{"choices": [{"message": {"role": "assistant", "content": "\"You've got this!\""}}]}"#,
		)
		.await;
		let client = client_for(&base, Duration::from_secs(5));

		assert_eq!(client.generate("Be nice.").await.unwrap(), "You've got this!");

		let request = request.await.unwrap().to_lowercase();
		assert!(request.starts_with("post /v1/chat/completions "));
		assert!(request.contains("authorization: bearer sk-test"));
		assert!(request.contains(r#""model":"deepseek-chat""#));
	}

	#[tokio::test]
	async fn test_deepseek_http_error_without_json_body() {
		let (base, _request) = respond_once(502, "Bad Gateway").await;
		let client = client_for(&base, Duration::from_secs(5));

		match client.generate("Be nice.").await {
			Err(ProviderError::Http { status, message }) => {
				assert_eq!(status, 502);
				assert_eq!(message, "Unknown API error, response not JSON.");
			}
			other => panic!("expected Http error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_deepseek_http_error_with_top_level_message() {
		let (base, _request) = respond_once(401, r#"{"message": "invalid token"}"#).await;
		let client = client_for(&base, Duration::from_secs(5));

		assert!(matches!(
			client.generate("Be nice.").await,
			Err(ProviderError::Http { status: 401, message }) if message == "invalid token"
		));
	}

	#[tokio::test]
	async fn test_deepseek_hung_server_times_out() {
		let (base, _listener) = never_respond().await;
		let client = client_for(&base, Duration::from_millis(200));

		assert!(matches!(
			client.generate("Be nice.").await,
			Err(ProviderError::Transport(e)) if e.is_timeout()
		));
	}
}
