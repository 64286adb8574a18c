//! Timestamp-driven rate limiting for input handlers.
//!
//! Both types take the current time from the caller (milliseconds, e.g.
//! `performance.now()`), which keeps them deterministic under test.

/// Leading-edge throttle: the first call goes through, then calls are dropped
/// until `interval_ms` has elapsed.
#[derive(Clone, Debug)]
pub struct Throttle {
	interval_ms: f64,
	last: Option<f64>,
}

impl Throttle {
	pub fn new(interval_ms: f64) -> Self {
		Self {
			interval_ms,
			last: None,
		}
	}

	/// Returns `true` if the caller should act now, and records the invocation.
	pub fn ready(&mut self, now_ms: f64) -> bool {
		match self.last {
			Some(last) if now_ms - last < self.interval_ms => false,
			_ => {
				self.last = Some(now_ms);
				true
			}
		}
	}
}

/// Trailing-edge debounce: a burst of calls collapses into one action
/// `delay_ms` after the last call.
#[derive(Clone, Debug)]
pub struct Debounce {
	delay_ms: f64,
	deadline: Option<f64>,
}

impl Debounce {
	pub fn new(delay_ms: f64) -> Self {
		Self {
			delay_ms,
			deadline: None,
		}
	}

	pub fn delay_ms(&self) -> f64 {
		self.delay_ms
	}

	/// Record a call, pushing the deadline back.
	pub fn call(&mut self, now_ms: f64) {
		self.deadline = Some(now_ms + self.delay_ms);
	}

	/// Returns `true` exactly once per burst, when the deadline has passed.
	pub fn poll(&mut self, now_ms: f64) -> bool {
		match self.deadline {
			Some(deadline) if now_ms >= deadline => {
				self.deadline = None;
				true
			}
			_ => false,
		}
	}
}
