//! Leptos component wrapping the particle canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page content
//! and wires window/body listeners for pointer movement, pointer exit and
//! resizing. An animation loop runs via `requestAnimationFrame`, stepping the
//! simulation and redrawing every frame for the lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::particles::{AnimationContext, FieldParams};
use super::render;
use super::theme::ParticleTheme;

/// Viewport size in CSS pixels.
fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Renders the decorative particle backdrop.
///
/// Particles are attracted to the mouse pointer within the configured radius
/// and drift randomly elsewhere. The canvas ignores pointer events so the page
/// content above it stays interactive.
#[component]
pub fn ParticleCanvas(
	/// Simulation parameters.
	params: FieldParams,
	/// Particle colour and halo.
	#[prop(default = ParticleTheme::default())]
	theme: ParticleTheme,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<AnimationContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let pointer_cbs: Rc<RefCell<Vec<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(Vec::new()));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("particles: no window, animation disabled");
			return;
		};
		let Some((w, h)) = viewport_size(&window) else {
			error!("particles: viewport size unavailable, animation disabled");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("particles: 2d canvas context unavailable, animation disabled");
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut rng = rand::rng();
		*context.borrow_mut() = Some(AnimationContext::new(params.clone(), w, h, &mut rng));
		info!("particles: {} particles in {}x{}", params.count, w, h);

		let context_move = context.clone();
		let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			if let Some(ref mut c) = *context_move.borrow_mut() {
				c.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
			}
		});
		let _ = window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
		pointer_cbs.borrow_mut().push(on_move);

		if let Some(body) = window.document().and_then(|d| d.body()) {
			let context_leave = context.clone();
			let on_leave = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
				if let Some(ref mut c) = *context_leave.borrow_mut() {
					c.pointer_left();
				}
			});
			let _ = body.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
			pointer_cbs.borrow_mut().push(on_leave);
		}

		let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
				return;
			};
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, theme) = (context.clone(), animate.clone(), theme.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.step(&mut rng);
				render::render(&c.field, &ctx, &theme);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}
