//! Colours for the particle backdrop.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same colour with alpha `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Visual style of the particle layer.
#[derive(Clone, Debug)]
pub struct ParticleTheme {
	/// Fill colour; particle opacity multiplies its alpha.
	pub color: Color,
	/// Soft halo drawn around bright particles (0.0 = none).
	pub glow: f64,
}

impl ParticleTheme {
	/// Warm white dots with a faint halo (default)
	pub fn glow() -> Self {
		Self {
			color: Color::rgb(255, 250, 240),
			glow: 0.25,
		}
	}
}

impl Default for ParticleTheme {
	fn default() -> Self {
		Self::glow()
	}
}
