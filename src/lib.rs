//! compliment-moment: a one-button compliment generator for the browser.
//!
//! This crate provides a WASM client-side app that fetches a compliment from
//! a chain of text-generation providers (falling back to a local list) and
//! renders a pointer-reactive particle backdrop behind it.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;
pub mod providers;

// Only needed to switch on the browser entropy backend.
#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub use components::compliment::{ComplimentCard, Phase};
pub use components::particle_field::{AnimationContext, FieldParams, ParticleCanvas};
pub use config::AppConfig;
pub use providers::{ComplimentProvider, FallbackChain, ProviderError};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("compliment-moment: logging initialized");
}

/// Main application component.
/// Loads the runtime config from the DOM and renders the card over the particles.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let chain = Rc::new(FallbackChain::from_config(&config));

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Compliment your moment" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleCanvas params=config.particles.clone() />
		<ComplimentCard chain=chain loading_interval_ms=config.loading_interval_ms />
	}
}
