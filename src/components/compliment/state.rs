//! Compliment request state machine.
//!
//! `Idle -> Loading -> Displayed`, and `Displayed -> Loading` again when the
//! user asks for another one. A second request while one is in flight is
//! rejected instead of stacking another loading animation.

/// Messages cycled while a compliment is being fetched.
pub const LOADING_MESSAGES: [&str; 8] = [
	"Rummaging for good vibes...",
	"Consulting the digital oracle...",
	"Warming up the compliment engine...",
	"Polishing a gem for you...",
	"Adding extra sparkle ✨...",
	"Almost there, hang tight!",
	"Summoning happy thoughts...",
	"Tickling the AI's funny bone...",
];

/// Where the compliment card is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
	/// Heading and primary button visible, nothing requested yet.
	#[default]
	Idle,
	/// Waiting on the provider chain; `message` indexes [`LOADING_MESSAGES`].
	Loading {
		/// Index of the message currently shown.
		message: usize,
	},
	/// Showing a compliment with the regenerate button.
	Displayed(String),
}

impl Phase {
	/// Start a request. Returns `false` (and changes nothing) if one is already running.
	pub fn begin(&mut self) -> bool {
		if self.is_loading() {
			return false;
		}
		*self = Phase::Loading { message: 0 };
		true
	}

	/// Advance the loading message, wrapping after the last one.
	pub fn tick(&mut self) {
		if let Phase::Loading { message } = self {
			*message = (*message + 1) % LOADING_MESSAGES.len();
		}
	}

	/// Show the fetched compliment. Ignored unless a request is running.
	pub fn resolve(&mut self, compliment: String) -> bool {
		if !self.is_loading() {
			return false;
		}
		*self = Phase::Displayed(compliment);
		true
	}

	/// Nothing requested yet.
	pub fn is_idle(&self) -> bool {
		matches!(self, Phase::Idle)
	}

	/// A request is in flight.
	pub fn is_loading(&self) -> bool {
		matches!(self, Phase::Loading { .. })
	}

	/// A compliment is on screen.
	pub fn is_displayed(&self) -> bool {
		matches!(self, Phase::Displayed(_))
	}

	/// Text for the result area, if it is visible.
	pub fn text(&self) -> Option<&str> {
		match self {
			Phase::Idle => None,
			Phase::Loading { message } => LOADING_MESSAGES.get(*message).copied(),
			Phase::Displayed(compliment) => Some(compliment),
		}
	}
}
