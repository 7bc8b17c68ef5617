//! Google Gemini `generateContent` provider.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{
	ComplimentProvider, MAX_OUTPUT_TOKENS, ProviderError, ProviderResult, TEMPERATURE,
	clean_compliment, send_json, usable_credential,
};
use crate::config::ProviderConfig;

/// Default Gemini generation endpoint.
pub const GEMINI_ENDPOINT: &str =
	"https://generativelanguage.googleapis.com/v1beta/models/gemini-1.0-pro:generateContent";

const SAFETY_CATEGORIES: [&str; 4] = [
	"HARM_CATEGORY_HARASSMENT",
	"HARM_CATEGORY_HATE_SPEECH",
	"HARM_CATEGORY_SEXUALLY_EXPLICIT",
	"HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
	contents: Vec<GeminiContent<'a>>,
	generation_config: GenerationConfig,
	safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
	parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
	text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
	temperature: f32,
	top_k: u32,
	top_p: f32,
	max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
	category: &'static str,
	threshold: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
	#[serde(default)]
	content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
	#[serde(default)]
	parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
	#[serde(default)]
	text: Option<String>,
}

/// Client for the Gemini API. The credential travels as the `key` query parameter.
pub struct GeminiClient {
	http: reqwest::Client,
	config: ProviderConfig,
	timeout: Duration,
}

impl GeminiClient {
	/// Creates a client; a missing credential is only reported when `generate` runs.
	pub fn new(http: reqwest::Client, config: ProviderConfig, timeout: Duration) -> Self {
		Self {
			http,
			config,
			timeout,
		}
	}

	fn build_request(prompt: &str) -> GeminiRequest<'_> {
		GeminiRequest {
			contents: vec![GeminiContent {
				parts: vec![GeminiPart { text: prompt }],
			}],
			generation_config: GenerationConfig {
				temperature: TEMPERATURE,
				top_k: 1,
				top_p: 1.0,
				max_output_tokens: MAX_OUTPUT_TOKENS,
			},
			safety_settings: SAFETY_CATEGORIES
				.iter()
				.map(|&category| SafetySetting {
					category,
					threshold: "BLOCK_MEDIUM_AND_ABOVE",
				})
				.collect(),
		}
	}

	fn extract_text(response: GeminiResponse) -> ProviderResult<String> {
		response
			.candidates
			.into_iter()
			.next()
			.and_then(|c| c.content)
			.and_then(|c| c.parts.into_iter().next())
			.and_then(|p| p.text)
			.as_deref()
			.and_then(clean_compliment)
			.ok_or_else(|| {
				ProviderError::MalformedResponse(
					"Gemini did not return a valid compliment structure".to_string(),
				)
			})
	}
}

#[async_trait(?Send)]
impl ComplimentProvider for GeminiClient {
	fn name(&self) -> &str {
		"Gemini"
	}

	async fn generate(&self, prompt: &str) -> ProviderResult<String> {
		let Some(key) = usable_credential(self.config.credential.as_deref()) else {
			warn!("Gemini credential not available; expecting a proxy or disabled feature");
			return Err(ProviderError::CredentialMissing { provider: "Gemini" });
		};

		debug!("Gemini: POST {}", self.config.endpoint);
		let request = self
			.http
			.post(&self.config.endpoint)
			.query(&[("key", key)])
			.timeout(self.timeout)
			.json(&Self::build_request(prompt));

		let response: GeminiResponse = send_json(self.name(), request).await?;
		Self::extract_text(response)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::providers::test_server::{never_respond, respond_once};

	fn parse(json: &str) -> ProviderResult<String> {
		GeminiClient::extract_text(serde_json::from_str(json).unwrap())
	}

	#[test]
	fn test_gemini_request_serialization() {
		let json = serde_json::to_value(GeminiClient::build_request("Be nice")).unwrap();
		assert_eq!(json["contents"][0]["parts"][0]["text"], "Be nice");
		assert_eq!(json["generationConfig"]["topK"], 1);
		assert_eq!(json["generationConfig"]["maxOutputTokens"], 60);
		assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
		assert_eq!(
			json["safetySettings"][3]["category"],
			"HARM_CATEGORY_DANGEROUS_CONTENT"
		);
		assert_eq!(json["safetySettings"][0]["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
	}

	#[test]
	fn test_gemini_response_parsing() {
		let json = r#"{
			"candidates": [{
				"content": {"parts": [{"text": "\"Great job!\"\n"}], "role": "model"},
				"finishReason": "STOP"
			}]
		}"#;
		assert_eq!(parse(json).unwrap(), "Great job!");
	}

	#[test]
	fn test_gemini_missing_text_is_malformed() {
		assert!(matches!(
			parse(r#"{"candidates": []}"#),
			Err(ProviderError::MalformedResponse(_))
		));
		assert!(matches!(
			parse(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#),
			Err(ProviderError::MalformedResponse(_))
		));
		assert!(matches!(
			parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#),
			Err(ProviderError::MalformedResponse(_))
		));
	}

	#[test]
	fn test_gemini_without_credential_fails_fast() {
		let client = GeminiClient::new(
			reqwest::Client::new(),
			ProviderConfig::gemini(),
			Duration::from_secs(1),
		);
		let result = futures::executor::block_on(client.generate("hi"));
		assert!(matches!(
			result,
			Err(ProviderError::CredentialMissing { provider: "Gemini" })
		));
	}

	fn client_for(base: &str, timeout: Duration) -> GeminiClient {
		let config = ProviderConfig {
			endpoint: format!("{base}/v1beta/models/gemini-1.0-pro:generateContent"),
			credential: Some("test-key".to_string()),
			model: None,
		};
		GeminiClient::new(reqwest::Client::new(), config, timeout)
	}

	#[tokio::test]
	async fn test_gemini_http_success_sends_key_and_cleans_text() {
		let (base, request) = respond_once(
			200,
			r#"{"candidates": [{"content": {"parts": [{"text": "\"Great job!\""}]}}]}"#,
		)
		.await;
		let client = client_for(&base, Duration::from_secs(5));

		assert_eq!(client.generate("Be nice").await.unwrap(), "Great job!");

		let request = request.await.unwrap();
		assert!(request.starts_with("POST /v1beta/models/gemini-1.0-pro:generateContent?key=test-key "));
		assert!(request.contains(r#""maxOutputTokens":60"#));
	}

	#[tokio::test]
	async fn test_gemini_http_error_uses_payload_message() {
		let (base, _request) =
			respond_once(500, r#"{"error": {"code": 500, "message": "boom"}}"#).await;
		let client = client_for(&base, Duration::from_secs(5));

		match client.generate("Be nice").await {
			Err(ProviderError::Http { status, message }) => {
				assert_eq!(status, 500);
				assert_eq!(message, "boom");
			}
			other => panic!("expected Http error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_gemini_non_json_success_is_malformed() {
		let (base, _request) = respond_once(200, "<html>not json</html>").await;
		let client = client_for(&base, Duration::from_secs(5));

		assert!(matches!(
			client.generate("Be nice").await,
			Err(ProviderError::MalformedResponse(_))
		));
	}

	#[tokio::test]
	async fn test_gemini_hung_server_times_out() {
		let (base, _listener) = never_respond().await;
		let client = client_for(&base, Duration::from_millis(200));

		match client.generate("Be nice").await {
			Err(ProviderError::Transport(e)) => assert!(e.is_timeout(), "{e}"),
			other => panic!("expected Transport timeout, got {other:?}"),
		}
	}
}
