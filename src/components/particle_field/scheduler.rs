//! Frame loop and timers.
//!
//! [`FieldLoop`] owns every browser callback that keeps the field alive: the
//! self-rescheduling `requestAnimationFrame` closure and the ambient spawn
//! interval. Stopping (or dropping) it cancels both and releases the closures.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;

use super::component::FieldContext;
use super::error::FieldError;
use super::render;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Milliseconds from the page's high-resolution clock.
pub fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}

/// Run `callback` once after `delay_ms`. The closure frees itself after firing.
pub fn set_timeout(delay_ms: f64, callback: impl FnOnce() + 'static) -> Result<i32, FieldError> {
	let window = web_sys::window().ok_or(FieldError::NoWindow)?;
	let callback = Closure::once_into_js(callback);
	Ok(window.set_timeout_with_callback_and_timeout_and_arguments_0(
		callback.unchecked_ref(),
		delay_ms.ceil() as i32,
	)?)
}

fn request_frame(frame: &FrameCallback) -> Option<i32> {
	let window = web_sys::window()?;
	let frame = frame.borrow();
	let cb = frame.as_ref()?;
	window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

struct AmbientTimer {
	id: i32,
	_callback: Closure<dyn FnMut()>,
}

/// Lifecycle handle for a running particle field.
pub struct FieldLoop {
	context: Rc<RefCell<FieldContext>>,
	frame: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
	ambient: Option<AmbientTimer>,
}

impl FieldLoop {
	pub fn new(context: Rc<RefCell<FieldContext>>) -> Self {
		Self {
			context,
			frame: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
			ambient: None,
		}
	}

	/// Start animating. Does nothing if the loop is already armed.
	pub fn start(&mut self) -> Result<(), FieldError> {
		if self.frame.borrow().is_some() {
			return Ok(());
		}
		let window = web_sys::window().ok_or(FieldError::NoWindow)?;
		let period = {
			let mut c = self.context.borrow_mut();
			c.field.start();
			c.field.params().spawn_interval_ms
		};

		let (context, frame, frame_id) = (
			self.context.clone(),
			self.frame.clone(),
			self.frame_id.clone(),
		);
		*self.frame.borrow_mut() = Some(Closure::new(move || {
			{
				let mut guard = context.borrow_mut();
				let c = &mut *guard;
				if !c.field.is_running() {
					frame_id.set(None);
					return;
				}
				c.field.tick(c.input.pointer());
				render::render(&c.field, &mut c.surface, &c.theme);
			}
			frame_id.set(request_frame(&frame));
		}));
		self.frame_id.set(request_frame(&self.frame));
		if self.frame_id.get().is_none() {
			warn!("cyber-field: requestAnimationFrame refused, stopping");
			self.stop();
			return Err(FieldError::Js("requestAnimationFrame failed".into()));
		}

		let ambient_context = self.context.clone();
		let callback: Closure<dyn FnMut()> = Closure::new(move || {
			let now = now_ms();
			let mut c = ambient_context.borrow_mut();
			if c.field.is_running() && c.field.spawn_ambient(now) > 0 {
				debug!("cyber-field: ambient spawn, {} live", c.field.particles.len());
			}
		});
		match window.set_interval_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			i32::try_from(period).unwrap_or(i32::MAX),
		) {
			Ok(id) => {
				self.ambient = Some(AmbientTimer {
					id,
					_callback: callback,
				});
			}
			Err(e) => {
				self.stop();
				return Err(e.into());
			}
		}

		info!("cyber-field: started (ambient every {period} ms)");
		Ok(())
	}

	/// Stop animating and release the frame callback and ambient timer.
	pub fn stop(&mut self) {
		match self.context.try_borrow_mut() {
			Ok(mut c) => {
				if c.field.stop() {
					info!("cyber-field: stopped with {} live particles", c.field.particles.len());
				}
			}
			Err(_) => {
				// Stopped from inside a callback holding the context; clear the
				// flag once it returns, unless the loop was re-armed meanwhile.
				let (context, frame) = (self.context.clone(), self.frame.clone());
				let deferred = set_timeout(0.0, move || {
					if frame.borrow().is_some() {
						return;
					}
					if let Ok(mut c) = context.try_borrow_mut() {
						c.field.stop();
					}
				});
				if let Err(e) = deferred {
					warn!("cyber-field: could not defer stop: {e}");
				}
			}
		}

		let window = web_sys::window();
		if let Some(id) = self.frame_id.take() {
			if let Some(ref w) = window {
				let _ = w.cancel_animation_frame(id);
			}
		}
		if let Some(timer) = self.ambient.take() {
			if let Some(ref w) = window {
				w.clear_interval_with_handle(timer.id);
			}
		}
		// Breaks the closure's reference to itself.
		self.frame.borrow_mut().take();
	}
}

impl Drop for FieldLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
