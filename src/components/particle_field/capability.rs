//! Host capability detection.
//!
//! Runs once at mount. The resulting [`FieldParameters`] stay fixed for the
//! whole session, so per-frame cost is bounded by the particle limit chosen here.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::Window;

use super::config::FieldConfig;

/// Assumed device memory (GiB) when the browser does not report one.
pub const DEFAULT_DEVICE_MEMORY: f64 = 4.0;

const MOBILE_MARKERS: [&str; 7] = [
	"android",
	"iphone",
	"ipad",
	"ipod",
	"blackberry",
	"iemobile",
	"opera mini",
];

/// Raw facts about the host, as reported by the browser.
#[derive(Clone, Debug)]
pub struct HostProfile {
	pub viewport_width: f64,
	pub viewport_height: f64,
	/// `navigator.deviceMemory` in GiB.
	pub device_memory: f64,
	/// `navigator.hardwareConcurrency`; `None` when unreported.
	pub cores: Option<u32>,
	pub user_agent: String,
}

impl Default for HostProfile {
	fn default() -> Self {
		Self {
			viewport_width: 0.0,
			viewport_height: 0.0,
			device_memory: DEFAULT_DEVICE_MEMORY,
			cores: None,
			user_agent: String::new(),
		}
	}
}

impl HostProfile {
	/// Probe the browser. Anything unavailable falls back to the defaults above.
	pub fn from_window(window: &Window) -> Self {
		let navigator = window.navigator();
		let device_memory = Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
			.ok()
			.and_then(|v| v.as_f64())
			.filter(|m| *m > 0.0)
			.unwrap_or(DEFAULT_DEVICE_MEMORY);
		let cores = navigator.hardware_concurrency();

		Self {
			viewport_width: window
				.inner_width()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(0.0),
			viewport_height: window
				.inner_height()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(0.0),
			device_memory,
			cores: (cores >= 1.0).then_some(cores as u32),
			user_agent: navigator.user_agent().unwrap_or_default(),
		}
	}

	pub fn screen_area(&self) -> f64 {
		self.viewport_width * self.viewport_height
	}

	pub fn is_mobile(&self) -> bool {
		let ua = self.user_agent.to_lowercase();
		MOBILE_MARKERS.iter().any(|m| ua.contains(m))
	}

	/// Particle budget from screen area, gated on memory for the top tier.
	pub fn particle_limit(&self) -> usize {
		let area = self.screen_area();
		if area > 2_073_600.0 && self.device_memory >= 8.0 {
			120
		} else if area > 1_228_800.0 {
			80
		} else if area > 614_400.0 {
			50
		} else {
			30
		}
	}

	pub fn is_low_power(&self) -> bool {
		self.is_mobile()
			|| self.cores.is_some_and(|c| c <= 2)
			|| self.device_memory < DEFAULT_DEVICE_MEMORY
	}
}

/// Canvas backing-store scale. Low-power hosts are capped at `low_power_cap`.
pub fn effective_pixel_ratio(device_ratio: f64, low_power: bool, low_power_cap: f64) -> f64 {
	let ratio = if device_ratio.is_finite() && device_ratio > 0.0 {
		device_ratio
	} else {
		1.0
	};
	if low_power { ratio.min(low_power_cap) } else { ratio }
}

/// Session-wide field parameters. Never change after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParameters {
	pub particle_limit: usize,
	pub low_power: bool,
	pub max_connection_distance: f64,
	/// Ambient spawn period.
	pub spawn_interval_ms: u32,
}

impl FieldParameters {
	pub fn detect(host: &HostProfile, config: &FieldConfig) -> Self {
		Self::with_limit(host.particle_limit(), host.is_low_power(), config)
	}

	/// Build parameters for an explicit budget, bypassing detection.
	pub fn with_limit(particle_limit: usize, low_power: bool, config: &FieldConfig) -> Self {
		let (max_connection_distance, spawn_interval_ms) = if low_power {
			(
				config.connection.max_distance_low_power,
				config.spawn.ambient_period_low_power_ms,
			)
		} else {
			(
				config.connection.max_distance,
				config.spawn.ambient_period_ms,
			)
		};

		Self {
			particle_limit,
			low_power,
			max_connection_distance,
			spawn_interval_ms,
		}
	}
}
