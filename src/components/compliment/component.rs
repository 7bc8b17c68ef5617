//! Leptos component for the compliment card.
//!
//! Clicking the primary button hides the heading, shows the result area with a
//! cycling loading message and asks the [`FallbackChain`] for a compliment.
//! When it resolves the interval is cleared, the compliment replaces the
//! message and the regenerate button appears.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::ev::MouseEvent;
use leptos::leptos_dom::helpers::{IntervalHandle, set_interval_with_handle};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};

use super::state::Phase;
use crate::providers::FallbackChain;

fn display(visible: bool, shown: &'static str) -> &'static str {
	if visible { shown } else { "none" }
}

/// Heading, generate button, result text and regenerate button.
#[component]
pub fn ComplimentCard(
	/// Source of compliments.
	chain: Rc<FallbackChain>,
	/// Period of the loading-message cycle.
	#[prop(default = 800)]
	loading_interval_ms: u64,
) -> impl IntoView {
	let phase = RwSignal::new(Phase::Idle);
	let ticker: Rc<Cell<Option<IntervalHandle>>> = Rc::new(Cell::new(None));

	let request = move || {
		let mut started = false;
		phase.update(|p| started = p.begin());
		if !started {
			debug!("compliment: request already in flight, ignoring");
			return;
		}

		match set_interval_with_handle(
			move || phase.update(Phase::tick),
			Duration::from_millis(loading_interval_ms),
		) {
			Ok(handle) => ticker.set(Some(handle)),
			Err(e) => warn!("compliment: loading animation unavailable: {:?}", e),
		}

		let (chain, ticker) = (chain.clone(), ticker.clone());
		spawn_local(async move {
			let compliment = chain.get_compliment().await;
			if let Some(handle) = ticker.take() {
				handle.clear();
			}
			phase.update(|p| {
				p.resolve(compliment);
			});
		});
	};

	let request_regenerate = request.clone();
	let on_generate = move |_: MouseEvent| {
		info!("compliment: generate button clicked");
		request();
	};
	let on_regenerate = move |_: MouseEvent| {
		info!("compliment: regenerate button clicked");
		request_regenerate();
	};

	view! {
		<div class="container">
			<h1 style:display=move || display(phase.with(Phase::is_idle), "block")>
				"Compliment your moment"
			</h1>
			<button
				id="complimentButton"
				style:display=move || display(phase.with(Phase::is_idle), "inline-block")
				on:click=on_generate
			>
				"Generate Happiness!"
			</button>
			<p
				id="containerComplimentText"
				class="compliment-text"
				style:display=move || display(!phase.with(Phase::is_idle), "block")
			>
				{move || phase.with(|p| p.text().unwrap_or_default().to_string())}
			</p>
			<button
				id="regenerateButton"
				style:display=move || display(phase.with(Phase::is_displayed), "inline-block")
				on:click=on_regenerate
			>
				"Another one!"
			</button>
		</div>
	}
}
