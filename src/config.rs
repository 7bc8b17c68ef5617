//! Runtime configuration injected by the hosting page.
//!
//! The page may embed a `<script id="compliment-config" type="application/json">`
//! element. Every field is optional; anything left out keeps its default, and
//! provider credentials default to absent so the providers fail fast.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::components::particle_field::FieldParams;
use crate::providers::{DEEPSEEK_ENDPOINT, DEEPSEEK_MODEL, GEMINI_ENDPOINT};

/// Id of the script element holding the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "compliment-config";

/// Connection settings for one text-generation provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
	/// Request URL (the provider itself or a proxy in front of it).
	pub endpoint: String,
	/// Secret injected at runtime. Never compiled in.
	pub credential: Option<String>,
	/// Model name, for providers that take one in the body.
	pub model: Option<String>,
}

impl ProviderConfig {
	/// Gemini defaults, without a credential.
	pub fn gemini() -> Self {
		Self {
			endpoint: GEMINI_ENDPOINT.to_string(),
			credential: None,
			model: None,
		}
	}

	/// DeepSeek defaults, without a credential.
	pub fn deepseek() -> Self {
		Self {
			endpoint: DEEPSEEK_ENDPOINT.to_string(),
			credential: None,
			model: Some(DEEPSEEK_MODEL.to_string()),
		}
	}
}

/// Partial provider settings as they appear in JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderOverride {
	endpoint: Option<String>,
	credential: Option<String>,
	model: Option<String>,
}

impl ProviderOverride {
	fn apply(self, base: ProviderConfig) -> ProviderConfig {
		ProviderConfig {
			endpoint: self.endpoint.unwrap_or(base.endpoint),
			credential: self.credential.or(base.credential),
			model: self.model.or(base.model),
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct ProvidersOverride {
	gemini: ProviderOverride,
	deepseek: ProviderOverride,
}

/// Settings for every provider in the fallback chain.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "ProvidersOverride")]
pub struct ProvidersConfig {
	/// First provider tried.
	pub gemini: ProviderConfig,
	/// Second provider tried.
	pub deepseek: ProviderConfig,
}

impl From<ProvidersOverride> for ProvidersConfig {
	fn from(raw: ProvidersOverride) -> Self {
		Self {
			gemini: raw.gemini.apply(ProviderConfig::gemini()),
			deepseek: raw.deepseek.apply(ProviderConfig::deepseek()),
		}
	}
}

impl Default for ProvidersConfig {
	fn default() -> Self {
		ProvidersOverride::default().into()
	}
}

/// Top-level application configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Endpoints and credentials per provider.
	pub providers: ProvidersConfig,
	/// Upper bound on a single provider request.
	pub request_timeout_ms: u64,
	/// How often the loading message advances.
	pub loading_interval_ms: u64,
	/// Particle backdrop tuning.
	pub particles: FieldParams,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			providers: ProvidersConfig::default(),
			request_timeout_ms: 8_000,
			loading_interval_ms: 800,
			particles: FieldParams::default(),
		}
	}
}

impl AppConfig {
	/// Parse a JSON document; missing fields keep their defaults.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	/// Read the configuration element from the page, falling back to defaults.
	pub fn load() -> Self {
		let Some(json_text) = config_element_text() else {
			info!("compliment: no #{CONFIG_ELEMENT_ID} element, using defaults");
			return Self::default();
		};

		match Self::from_json(&json_text) {
			Ok(config) => {
				info!(
					"compliment: loaded config (gemini credential: {}, deepseek credential: {})",
					config.providers.gemini.credential.is_some(),
					config.providers.deepseek.credential.is_some()
				);
				config
			}
			Err(e) => {
				warn!("compliment: failed to parse config: {}", e);
				Self::default()
			}
		}
	}
}

fn config_element_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
