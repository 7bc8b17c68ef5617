//! Pointer-reactive particle simulation.
//!
//! Each frame a particle near the pointer is pulled towards it and brightens;
//! elsewhere it drifts randomly. Friction damps velocity and the viewport edges
//! reflect particles with an inelastic bounce. The step is per frame, not per
//! elapsed second, so motion speed follows the display refresh rate.

use rand::Rng;
use serde::Deserialize;

/// Tunable parameters of the simulation.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldParams {
	/// Number of particles created at startup.
	pub count: usize,
	/// Particles closer than this to the pointer are attracted.
	pub attraction_radius: f64,
	/// Fraction of the pointer offset added to velocity each frame.
	pub acceleration: f64,
	/// Width of the random drift range (sampled in `[-0.5, 0.5) * drift`).
	pub drift_strength: f64,
	/// Velocity multiplier applied every frame.
	pub friction: f64,
	/// Opacity of a particle away from the pointer.
	pub base_opacity: f64,
	/// Fraction of the remaining distance to the target opacity covered per frame.
	pub opacity_smoothing: f64,
	/// Velocity retained (and reversed) when hitting an edge.
	pub bounce: f64,
	/// Smallest particle diameter.
	pub size_min: f64,
	/// Largest particle diameter (exclusive).
	pub size_max: f64,
	/// Initial speed range per axis, `[-speed, speed)`.
	pub initial_speed: f64,
}

impl Default for FieldParams {
	fn default() -> Self {
		Self {
			count: 200,
			attraction_radius: 150.0,
			acceleration: 0.003,
			drift_strength: 0.05,
			friction: 0.95,
			base_opacity: 0.3,
			opacity_smoothing: 0.1,
			bounce: 0.8,
			size_min: 5.0,
			size_max: 15.0,
			initial_speed: 1.0,
		}
	}
}

/// A single particle. `size` is its diameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position of the centre.
	pub x: f64,
	/// Vertical position of the centre.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
	/// Diameter in pixels.
	pub size: f64,
	/// Opacity the particle is easing towards.
	pub opacity_target: f64,
	/// Current opacity in `[0, 1]`.
	pub opacity: f64,
}

/// Last known pointer position in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
}

impl Pointer {
	/// Centre of a `width` x `height` viewport, used before the first move.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
		}
	}
}

/// Fixed population of particles bounded by the viewport.
pub struct ParticleField {
	/// Every particle, in draw order.
	pub particles: Vec<Particle>,
	params: FieldParams,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// Scatter `params.count` particles uniformly over the viewport.
	pub fn new<R: Rng>(params: FieldParams, width: f64, height: f64, rng: &mut R) -> Self {
		let particles = (0..params.count)
			.map(|_| Particle {
				x: rng.random::<f64>() * width,
				y: rng.random::<f64>() * height,
				vx: (rng.random::<f64>() - 0.5) * 2.0 * params.initial_speed,
				vy: (rng.random::<f64>() - 0.5) * 2.0 * params.initial_speed,
				size: params.size_min + rng.random::<f64>() * (params.size_max - params.size_min),
				opacity_target: params.base_opacity,
				opacity: 0.0,
			})
			.collect();

		Self::from_particles(params, particles, width, height)
	}

	/// Field over an explicit set of particles.
	pub fn from_particles(
		params: FieldParams,
		particles: Vec<Particle>,
		width: f64,
		height: f64,
	) -> Self {
		Self {
			particles,
			params,
			width,
			height,
		}
	}

	/// Current viewport width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Current viewport height.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Advance every particle by one frame.
	pub fn update<R: Rng>(&mut self, pointer: Pointer, rng: &mut R) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			step_particle(p, &self.params, pointer, width, height, rng);
		}
	}

	/// Drop every opacity target back to the base level.
	pub fn fade_out(&mut self) {
		for p in &mut self.particles {
			p.opacity_target = self.params.base_opacity;
		}
	}

	/// New viewport bounds. Particles outside are pulled back on the next frame.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn step_particle<R: Rng>(
	p: &mut Particle,
	params: &FieldParams,
	pointer: Pointer,
	width: f64,
	height: f64,
	rng: &mut R,
) {
	let (dx, dy) = (pointer.x - p.x, pointer.y - p.y);
	let distance = dx.hypot(dy);

	if distance < params.attraction_radius {
		p.vx += dx * params.acceleration;
		p.vy += dy * params.acceleration;
		let proximity = (1.0 - distance / params.attraction_radius).max(0.0);
		p.opacity_target = params.base_opacity + (1.0 - params.base_opacity) * proximity;
	} else {
		p.vx += (rng.random::<f64>() - 0.5) * params.drift_strength;
		p.vy += (rng.random::<f64>() - 0.5) * params.drift_strength;
		p.opacity_target = params.base_opacity;
	}

	p.vx *= params.friction;
	p.vy *= params.friction;

	p.x += p.vx;
	p.y += p.vy;

	p.opacity += (p.opacity_target - p.opacity) * params.opacity_smoothing;

	let half = p.size / 2.0;
	if p.x < half || p.x > width - half {
		p.vx *= -params.bounce;
	}
	if p.y < half || p.y > height - half {
		p.vy *= -params.bounce;
	}
	p.x = p.x.min(width - half).max(half);
	p.y = p.y.min(height - half).max(half);
}

/// Everything the per-frame callback mutates: the field and the pointer.
pub struct AnimationContext {
	/// The simulated particles.
	pub field: ParticleField,
	/// Last pointer position; the attraction target.
	pub pointer: Pointer,
}

impl AnimationContext {
	/// Seed a field for the given viewport with the pointer at its centre.
	pub fn new<R: Rng>(params: FieldParams, width: f64, height: f64, rng: &mut R) -> Self {
		Self {
			field: ParticleField::new(params, width, height, rng),
			pointer: Pointer::centered(width, height),
		}
	}

	/// One animation frame.
	pub fn step<R: Rng>(&mut self, rng: &mut R) {
		self.field.update(self.pointer, rng);
	}

	/// Pointer moved to `(x, y)` in viewport coordinates.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer = Pointer { x, y };
	}

	/// Pointer left the page.
	pub fn pointer_left(&mut self) {
		self.field.fade_out();
	}

	/// Window resized to `width` x `height`.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(width, height);
	}
}
