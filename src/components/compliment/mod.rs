//! Compliment card: a small state machine driving the loading animation and
//! the provider fallback chain.

mod component;
mod state;

pub use component::ComplimentCard;
pub use state::{LOADING_MESSAGES, Phase};
