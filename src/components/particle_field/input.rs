//! Input coordination: turns raw pointer, touch, navigation and resize events
//! into rate-limited field mutations.

use rand::Rng;

use super::capability::FieldParameters;
use super::config::FieldConfig;
use super::state::ParticleField;
use super::throttle::{Debounce, Throttle};

/// Tracks the pointer and gates how often input reaches the field.
#[derive(Clone, Debug)]
pub struct InputCoordinator {
	pointer: Option<(f64, f64)>,
	pointer_throttle: Throttle,
	touch_throttle: Throttle,
	resize: Debounce,
	pointer_count: usize,
	touch_count: usize,
	low_power: bool,
}

impl InputCoordinator {
	pub fn new(params: &FieldParameters, config: &FieldConfig) -> Self {
		let pointer_interval = if params.low_power {
			config.input.pointer_throttle_low_power_ms
		} else {
			config.input.pointer_throttle_ms
		};

		Self {
			pointer: None,
			pointer_throttle: Throttle::new(pointer_interval),
			touch_throttle: Throttle::new(config.input.touch_throttle_ms),
			resize: Debounce::new(config.input.resize_debounce_ms),
			pointer_count: config.spawn.pointer_count,
			touch_count: config.spawn.touch_count,
			low_power: params.low_power,
		}
	}

	/// Last accepted pointer position, if any.
	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	/// Mouse moved. Updates the pointer, extends the trail and spawns a few
	/// particles. Returns `false` when throttled or the field is idle.
	pub fn on_pointer_move<R: Rng>(
		&mut self,
		now_ms: f64,
		x: f64,
		y: f64,
		field: &mut ParticleField<R>,
	) -> bool {
		if !field.is_running() || !self.pointer_throttle.ready(now_ms) {
			return false;
		}
		self.pointer = Some((x, y));
		field.record_pointer(x, y);
		field.spawn(now_ms, x, y, self.pointer_count);
		true
	}

	/// Finger moved. Like a mouse move, without a trail point.
	pub fn on_touch_move<R: Rng>(
		&mut self,
		now_ms: f64,
		x: f64,
		y: f64,
		field: &mut ParticleField<R>,
	) -> bool {
		if !field.is_running() || !self.touch_throttle.ready(now_ms) {
			return false;
		}
		self.pointer = Some((x, y));
		field.spawn(now_ms, x, y, self.touch_count);
		true
	}

	/// In-page navigation link clicked. Returns the number of particles added.
	pub fn on_navigate<R: Rng>(&mut self, now_ms: f64, field: &mut ParticleField<R>) -> usize {
		if self.low_power || !field.is_running() {
			return 0;
		}
		field.burst(now_ms)
	}

	/// Window resized. Collapsed with [`InputCoordinator::resize_due`].
	pub fn on_resize(&mut self, now_ms: f64) {
		self.resize.call(now_ms);
	}

	/// `true` once the resize burst has settled.
	pub fn resize_due(&mut self, now_ms: f64) -> bool {
		self.resize.poll(now_ms)
	}

	pub fn resize_delay_ms(&self) -> f64 {
		self.resize.delay_ms()
	}
}
