//! Canvas rendering for the particle field.
//!
//! The canvas is cleared every frame and each particle is drawn as a filled
//! circle of diameter `size` at its current opacity.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{Particle, ParticleField};
use super::theme::ParticleTheme;

/// Below this opacity a halo is not worth drawing.
const GLOW_MIN_OPACITY: f64 = 0.5;

/// Renders the whole field to the canvas.
pub fn render(field: &ParticleField, ctx: &CanvasRenderingContext2d, theme: &ParticleTheme) {
	ctx.clear_rect(0.0, 0.0, field.width(), field.height());

	for p in &field.particles {
		if theme.glow > 0.0 && p.opacity > GLOW_MIN_OPACITY {
			draw_glow(ctx, theme, p);
		}
		draw_particle(ctx, theme, p);
	}
}

fn draw_particle(ctx: &CanvasRenderingContext2d, theme: &ParticleTheme, p: &Particle) {
	let color = theme.color.with_alpha(theme.color.a * p.opacity.clamp(0.0, 1.0));
	ctx.set_fill_style_str(&color.to_css());

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, p.size / 2.0, 0.0, PI * 2.0);
	ctx.fill();
}

fn draw_glow(ctx: &CanvasRenderingContext2d, theme: &ParticleTheme, p: &Particle) {
	let strength = (p.opacity - GLOW_MIN_OPACITY) / (1.0 - GLOW_MIN_OPACITY);
	let color = theme.color.with_alpha(theme.glow * strength.clamp(0.0, 1.0));
	ctx.set_fill_style_str(&color.to_css());

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, p.size, 0.0, PI * 2.0);
	ctx.fill();
}
