//! UI components: the compliment card and the particle backdrop.

pub mod compliment;
pub mod particle_field;
