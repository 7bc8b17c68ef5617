//! Text-generation providers and the fallback chain that drives them.
//!
//! Each provider wraps a single HTTP endpoint behind [`ComplimentProvider`].
//! [`FallbackChain`] tries them in priority order and degrades to a local list
//! when all of them fail, so callers always get a compliment back.

mod chain;
mod deepseek;
mod gemini;
#[cfg(test)]
mod test_server;

use async_trait::async_trait;
use log::error;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use chain::{ChainError, FallbackChain, LOCAL_COMPLIMENTS, SAFETY_COMPLIMENT};
pub use deepseek::{DEEPSEEK_ENDPOINT, DEEPSEEK_MODEL, DeepSeekClient};
pub use gemini::{GEMINI_ENDPOINT, GeminiClient};

/// Prompt sent to every provider.
pub const COMPLIMENT_PROMPT: &str = "Generate a short, unique, and uplifting compliment for a person. Make it sound genuine and positive.";

/// Sampling temperature shared by all providers.
pub const TEMPERATURE: f32 = 0.8;

/// Upper bound on generated tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 60;

/// Errors a single provider call can produce.
#[derive(Debug, Error)]
pub enum ProviderError {
	/// No usable credential was injected; no request was sent.
	#[error("{provider} credential not configured")]
	CredentialMissing {
		/// Provider that lacked a credential.
		provider: &'static str,
	},

	/// The request never produced a response (network, CORS, timeout).
	#[error("HTTP request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The provider answered with a non-success status.
	#[error("API error: {status} - {message}")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Message taken from the error payload, or a stand-in.
		message: String,
	},

	/// The response body did not contain a compliment where expected.
	#[error("Invalid response format: {0}")]
	MalformedResponse(String),
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A text-generation backend able to produce one compliment per call.
#[async_trait(?Send)]
pub trait ComplimentProvider {
	/// Human-readable provider name used in logs.
	fn name(&self) -> &str;

	/// Issue one request for `prompt` and return the cleaned compliment.
	async fn generate(&self, prompt: &str) -> ProviderResult<String>;
}

/// Returns the credential if it is present and non-blank.
pub(crate) fn usable_credential(credential: Option<&str>) -> Option<&str> {
	credential.map(str::trim).filter(|c| !c.is_empty())
}

/// Trim the generated text and strip wrapping quote characters.
///
/// Returns `None` when nothing is left.
pub fn clean_compliment(raw: &str) -> Option<String> {
	let text = raw.trim();
	let text = text
		.strip_prefix(['"', '\u{201c}'])
		.unwrap_or(text);
	let text = text
		.strip_suffix(['"', '\u{201d}'])
		.unwrap_or(text);
	let text = text.trim();
	(!text.is_empty()).then(|| text.to_string())
}

#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
	#[serde(default)]
	error: Option<ErrorDetail>,
	#[serde(default)]
	message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
	#[serde(default)]
	message: Option<String>,
}

/// Pull a human-readable message out of an error response body.
pub(crate) fn api_error_message(body: &str) -> String {
	match serde_json::from_str::<ErrorPayload>(body) {
		Ok(payload) => payload
			.error
			.and_then(|e| e.message)
			.or(payload.message)
			.unwrap_or_else(|| "Failed to fetch".to_string()),
		Err(_) => "Unknown API error, response not JSON.".to_string(),
	}
}

/// Send a prepared request and decode a successful JSON body into `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
	provider: &str,
	request: RequestBuilder,
) -> ProviderResult<T> {
	let response = request.send().await?;
	let status = response.status();

	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		let message = api_error_message(&body);
		error!("{provider}: API error response {status}: {message}");
		return Err(ProviderError::Http {
			status: status.as_u16(),
			message,
		});
	}

	response
		.json::<T>()
		.await
		.map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}
