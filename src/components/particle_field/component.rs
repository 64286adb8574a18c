//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page, probes
//! the host once to size the particle budget, and wires window input into the
//! field: throttled mouse and touch movement, debounced resize, navigation
//! bursts and unload cleanup. The animation itself is driven by [`FieldLoop`].

use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, Window};

use super::capability::{FieldParameters, HostProfile, effective_pixel_ratio};
use super::config::FieldConfig;
use super::error::FieldError;
use super::input::InputCoordinator;
use super::scheduler::{FieldLoop, now_ms, set_timeout};
use super::state::ParticleField;
use super::surface::CanvasSurface;
use super::theme::FieldTheme;

/// Selector for links whose click triggers a particle burst.
const NAV_LINK_SELECTOR: &str = "nav a";

/// Bundles the simulation with its input state and drawing target.
pub(super) struct FieldContext {
	pub field: ParticleField,
	pub input: InputCoordinator,
	pub surface: CanvasSurface,
	pub theme: FieldTheme,
	pixel_ratio_cap: f64,
}

impl FieldContext {
	pub(super) fn new(
		params: FieldParameters,
		config: &FieldConfig,
		width: f64,
		height: f64,
		canvas: HtmlCanvasElement,
	) -> Result<Self, FieldError> {
		Ok(Self {
			input: InputCoordinator::new(&params, config),
			field: ParticleField::from_entropy(params, config.clone(), width, height),
			surface: CanvasSurface::new(canvas)?,
			theme: FieldTheme::by_name(&config.theme),
			pixel_ratio_cap: config.input.low_power_max_pixel_ratio,
		})
	}

	/// Match the canvas and the simulation bounds to the viewport.
	fn fit_to_window(&mut self, window: &Window) {
		let host = HostProfile::from_window(window);
		let ratio = effective_pixel_ratio(
			window.device_pixel_ratio(),
			self.field.params().low_power,
			self.pixel_ratio_cap,
		);
		self.surface
			.resize(host.viewport_width, host.viewport_height, ratio);
		self.field.resize(host.viewport_width, host.viewport_height);
		debug!(
			"cyber-field: canvas {}x{} @{}x",
			host.viewport_width, host.viewport_height, ratio
		);
	}
}

/// Renders the ambient particle field on a fixed canvas behind the page.
///
/// Pass `config` to override tunables; otherwise defaults apply. On hosts
/// detected as low-powered the field stays idle unless
/// [`FieldConfig::run_in_low_power`] is set.
#[component]
pub fn ParticleFieldCanvas(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.map(FieldConfig::sanitized).unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Err(e) = mount(canvas.into(), &config) {
			warn!("cyber-field: particle field disabled: {e}");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="particle-canvas"
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: 0;"
		/>
	}
}

fn mount(canvas: HtmlCanvasElement, config: &FieldConfig) -> Result<(), FieldError> {
	let window = web_sys::window().ok_or(FieldError::NoWindow)?;
	let host = HostProfile::from_window(&window);
	let params = FieldParameters::detect(&host, config);
	info!(
		"cyber-field: limit {} particles, low power {}, links under {} px",
		params.particle_limit, params.low_power, params.max_connection_distance
	);

	let low_power = params.low_power;
	let mut context =
		FieldContext::new(params, config, host.viewport_width, host.viewport_height, canvas)?;
	context.fit_to_window(&window);
	let context = Rc::new(RefCell::new(context));

	let mut listeners = wire_input(&context);

	let field_loop = Rc::new(RefCell::new(FieldLoop::new(context.clone())));
	if !low_power || config.run_in_low_power {
		if let Err(e) = field_loop.borrow_mut().start() {
			warn!("cyber-field: could not start animation: {e}");
		}
	} else {
		info!("cyber-field: low-power host, field left idle");
	}

	let unload_loop = field_loop.clone();
	listeners.push(window_event_listener(ev::beforeunload, move |_| {
		unload_loop.borrow_mut().stop();
	}));

	let resources = StoredValue::new_local((field_loop, listeners));
	on_cleanup(move || {
		resources.try_update_value(|(field_loop, listeners)| {
			field_loop.borrow_mut().stop();
			for handle in listeners.drain(..) {
				handle.remove();
			}
		});
	});
	Ok(())
}

fn wire_input(context: &Rc<RefCell<FieldContext>>) -> Vec<WindowListenerHandle> {
	let ctx = context.clone();
	let on_mousemove = window_event_listener(ev::mousemove, move |ev| {
		let mut guard = ctx.borrow_mut();
		let c = &mut *guard;
		c.input.on_pointer_move(
			now_ms(),
			ev.client_x() as f64,
			ev.client_y() as f64,
			&mut c.field,
		);
	});

	let ctx = context.clone();
	let on_touchmove = window_event_listener(ev::touchmove, move |ev| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		let mut guard = ctx.borrow_mut();
		let c = &mut *guard;
		c.input.on_touch_move(
			now_ms(),
			touch.client_x() as f64,
			touch.client_y() as f64,
			&mut c.field,
		);
	});

	let ctx = context.clone();
	let on_click = window_event_listener(ev::click, move |ev| {
		let is_nav_link = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| el.closest(NAV_LINK_SELECTOR).ok().flatten())
			.is_some();
		if !is_nav_link {
			return;
		}
		let mut guard = ctx.borrow_mut();
		let c = &mut *guard;
		let added = c.input.on_navigate(now_ms(), &mut c.field);
		debug!("cyber-field: navigation burst of {added}");
	});

	let ctx = context.clone();
	let on_resize = window_event_listener(ev::resize, move |_| {
		let delay = {
			let mut c = ctx.borrow_mut();
			c.input.on_resize(now_ms());
			c.input.resize_delay_ms()
		};
		let settled = ctx.clone();
		// One extra millisecond so the timer never lands just short of the deadline.
		let scheduled = set_timeout(delay + 1.0, move || {
			let mut c = settled.borrow_mut();
			if !c.input.resize_due(now_ms()) {
				return;
			}
			if let Some(window) = web_sys::window() {
				c.fit_to_window(&window);
			}
		});
		if let Err(e) = scheduled {
			warn!("cyber-field: resize timer failed: {e}");
		}
	});

	vec![on_mousemove, on_touchmove, on_click, on_resize]
}
