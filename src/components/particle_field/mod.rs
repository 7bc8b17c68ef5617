//! Decorative particle backdrop that follows the mouse pointer.
//!
//! A fixed population of particles is simulated on an HTML canvas:
//! - Attraction towards the pointer inside a radius, with a brightness boost
//! - Random drift elsewhere, damped by friction
//! - Inelastic bounces off the viewport edges
//!
//! The simulation state lives in an explicit [`AnimationContext`] so the
//! update rule can be driven (and tested) with injected pointer positions.
//!
//! # Example
//!
//! ```ignore
//! use compliment_moment::components::particle_field::{FieldParams, ParticleCanvas};
//!
//! view! { <ParticleCanvas params=FieldParams::default() /> }
//! ```

mod component;
mod particles;
mod render;
pub mod theme;

pub use component::ParticleCanvas;
pub use particles::{AnimationContext, FieldParams, Particle, ParticleField, Pointer};
pub use theme::{Color, ParticleTheme};
