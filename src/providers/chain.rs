//! Sequential provider fallback with a local safety net.

use std::time::Duration;

use log::{error, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use super::{COMPLIMENT_PROMPT, ComplimentProvider, DeepSeekClient, GeminiClient};
use crate::config::AppConfig;

/// Pre-written compliments used when every provider fails.
pub const LOCAL_COMPLIMENTS: [&str; 8] = [
	"You're doing great!",
	"Your smile is a ray of sunshine on a cloudy day!",
	"You bring out the best in other people.",
	"You make a bigger impact than you realize.",
	"You're a smart cookie!",
	"Keep shining brightly!",
	"You've got this!",
	"You are appreciated.",
];

/// Last resort if the local list is empty.
pub const SAFETY_COMPLIMENT: &str = "You're awesome!";

/// Failure of the whole provider chain. Never leaves [`FallbackChain`].
#[derive(Debug, Error)]
pub enum ChainError {
	/// Every configured provider was tried and failed.
	#[error("All AI services failed to generate a compliment ({attempts} tried)")]
	AllProvidersExhausted {
		/// Number of providers tried.
		attempts: usize,
	},
}

/// Tries providers in order and falls back to a local compliment.
pub struct FallbackChain {
	providers: Vec<Box<dyn ComplimentProvider>>,
	local: Vec<String>,
	prompt: String,
}

impl FallbackChain {
	/// Chain over `providers` (highest priority first) with the default local list.
	pub fn new(providers: Vec<Box<dyn ComplimentProvider>>) -> Self {
		Self {
			providers,
			local: LOCAL_COMPLIMENTS.iter().map(|s| s.to_string()).collect(),
			prompt: COMPLIMENT_PROMPT.to_string(),
		}
	}

	/// Gemini first, then DeepSeek, sharing one HTTP client.
	pub fn from_config(config: &AppConfig) -> Self {
		let http = reqwest::Client::new();
		let timeout = Duration::from_millis(config.request_timeout_ms);
		let gemini = GeminiClient::new(http.clone(), config.providers.gemini.clone(), timeout);
		let deepseek = DeepSeekClient::new(http, config.providers.deepseek.clone(), timeout);
		let providers: Vec<Box<dyn ComplimentProvider>> = vec![Box::new(gemini), Box::new(deepseek)];
		Self::new(providers)
	}

	/// Replace the local fallback list.
	pub fn with_local(mut self, local: Vec<String>) -> Self {
		self.local = local;
		self
	}

	/// Ask each provider in turn; the first success wins.
	pub async fn try_providers(&self) -> Result<String, ChainError> {
		for provider in &self.providers {
			info!("Attempting to fetch compliment from {} API...", provider.name());
			match provider.generate(&self.prompt).await {
				Ok(compliment) => {
					info!("Successfully fetched compliment from {} API.", provider.name());
					return Ok(compliment);
				}
				Err(e) => {
					warn!(
						"{} API call failed: {e}. Trying next API if available.",
						provider.name()
					);
				}
			}
		}
		Err(ChainError::AllProvidersExhausted {
			attempts: self.providers.len(),
		})
	}

	/// Always resolves: a provider compliment, or a random local one.
	pub async fn get_compliment(&self) -> String {
		self.get_compliment_with(&mut rand::rng()).await
	}

	/// [`get_compliment`](Self::get_compliment) with an explicit RNG for the local pick.
	pub async fn get_compliment_with<R: Rng>(&self, rng: &mut R) -> String {
		match self.try_providers().await {
			Ok(compliment) => compliment,
			Err(e) => {
				error!("{e}; using a local compliment");
				self.local_compliment(rng)
			}
		}
	}

	/// Uniformly random entry of the local list.
	pub fn local_compliment<R: Rng>(&self, rng: &mut R) -> String {
		self.local
			.choose(rng)
			.cloned()
			.unwrap_or_else(|| SAFETY_COMPLIMENT.to_string())
	}
}
