//! Tunable constants for the particle field.
//!
//! Every section deserializes with `#[serde(default)]`, so a page only needs to
//! spell out the values it wants to change:
//!
//! ```json
//! { "trail": { "capacity": 24 }, "theme": "synthwave" }
//! ```

use log::warn;
use serde::Deserialize;

/// Hard cap on links drawn from one particle to later ones.
pub const MAX_LINKS_PER_PARTICLE: usize = 3;

/// Largest trail buffer an override may ask for.
pub const MAX_TRAIL_CAPACITY: usize = 256;

/// Physics of a single particle.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
	/// Initial velocity components are drawn from `[-spread/2, spread/2)`.
	pub velocity_spread: f64,
	/// Smallest base radius.
	pub size_min: f64,
	/// Base radius is `size_min + [0, size_range)`.
	pub size_range: f64,
	/// Slowest per-tick life decay.
	pub decay_min: f64,
	/// Decay is `decay_min + [0, decay_range)`.
	pub decay_range: f64,
	/// Phase advance per tick (drives the pulsing radius only).
	pub phase_step: f64,
	/// Fraction of velocity kept (and reversed) when crossing a bound.
	pub bounce: f64,
	/// Per-tick velocity multiplier.
	pub damping: f64,
	/// Pointer attraction only applies inside this distance.
	pub attraction_radius: f64,
	/// Attraction impulse per tick, independent of distance.
	pub attraction_force: f64,
	/// Distance outside the canvas at which a particle is discarded.
	pub offscreen_margin: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			velocity_spread: 2.0,
			size_min: 1.0,
			size_range: 3.0,
			decay_min: 0.005,
			decay_range: 0.015,
			phase_step: 0.08,
			bounce: 0.7,
			damping: 0.99,
			attraction_radius: 100.0,
			attraction_force: 0.00002,
			offscreen_margin: 50.0,
		}
	}
}

/// Proximity links between particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
	/// Links accepted per lower-index particle.
	pub max_per_particle: usize,
	pub max_distance: f64,
	pub max_distance_low_power: f64,
	/// Opacity of a zero-length link.
	pub opacity: f64,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self {
			max_per_particle: 3,
			max_distance: 100.0,
			max_distance_low_power: 80.0,
			opacity: 0.3,
		}
	}
}

/// Pointer trail buffer.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
	pub capacity: usize,
	/// Life multiplier applied every tick.
	pub fade: f64,
	/// Points at or below this life are pruned.
	pub min_life: f64,
}

impl Default for TrailConfig {
	fn default() -> Self {
		Self {
			capacity: 15,
			fade: 0.95,
			min_life: 0.1,
		}
	}
}

/// Spawn placement and pacing.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
	/// Positional jitter around the spawn point, on both axes.
	pub jitter: f64,
	/// Minimum spacing between accepted spawn calls.
	pub min_interval_ms: f64,
	pub ambient_period_ms: u32,
	pub ambient_period_low_power_ms: u32,
	/// Ambient spawning pauses at this fraction of the particle limit.
	pub ambient_occupancy: f64,
	pub pointer_count: usize,
	pub touch_count: usize,
	pub burst_count: usize,
}

impl Default for SpawnConfig {
	fn default() -> Self {
		Self {
			jitter: 10.0,
			min_interval_ms: 16.0,
			ambient_period_ms: 2000,
			ambient_period_low_power_ms: 3000,
			ambient_occupancy: 0.7,
			pointer_count: 2,
			touch_count: 3,
			burst_count: 8,
		}
	}
}

/// Input rate limits and canvas resolution.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct InputConfig {
	pub pointer_throttle_ms: f64,
	pub pointer_throttle_low_power_ms: f64,
	pub touch_throttle_ms: f64,
	pub resize_debounce_ms: f64,
	/// Device pixel ratio cap in low-power mode.
	pub low_power_max_pixel_ratio: f64,
}

impl Default for InputConfig {
	fn default() -> Self {
		Self {
			pointer_throttle_ms: 50.0,
			pointer_throttle_low_power_ms: 100.0,
			touch_throttle_ms: 150.0,
			resize_debounce_ms: 250.0,
			low_power_max_pixel_ratio: 1.5,
		}
	}
}

/// Complete field configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	pub particle: ParticleConfig,
	pub connection: ConnectionConfig,
	pub trail: TrailConfig,
	pub spawn: SpawnConfig,
	pub input: InputConfig,
	/// Theme preset name, see [`super::theme::FieldTheme::by_name`].
	pub theme: String,
	/// Animate even when the host looks low-powered.
	pub run_in_low_power: bool,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle: ParticleConfig::default(),
			connection: ConnectionConfig::default(),
			trail: TrailConfig::default(),
			spawn: SpawnConfig::default(),
			input: InputConfig::default(),
			theme: "cyber".to_string(),
			run_in_low_power: false,
		}
	}
}

impl FieldConfig {
	/// Parse a (possibly partial) JSON override.
	///
	/// Values the field cannot run with are replaced, see [`FieldConfig::sanitized`].
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(text).map(Self::sanitized)
	}

	/// Replace out-of-range values with their defaults, logging each one.
	///
	/// Decay stays positive so every particle eventually dies, periods stay
	/// representable as browser timer delays, and link fan-out never exceeds
	/// [`MAX_LINKS_PER_PARTICLE`].
	pub fn sanitized(mut self) -> Self {
		let d = Self::default();

		let p = &mut self.particle;
		p.velocity_spread = keep(
			"particle.velocity_spread",
			p.velocity_spread,
			|v| v >= 0.0,
			d.particle.velocity_spread,
		);
		p.size_min = keep("particle.size_min", p.size_min, |v| v > 0.0, d.particle.size_min);
		p.size_range = keep(
			"particle.size_range",
			p.size_range,
			|v| v >= 0.0,
			d.particle.size_range,
		);
		p.decay_min = keep("particle.decay_min", p.decay_min, |v| v > 0.0, d.particle.decay_min);
		p.decay_range = keep(
			"particle.decay_range",
			p.decay_range,
			|v| v >= 0.0,
			d.particle.decay_range,
		);
		p.phase_step = keep("particle.phase_step", p.phase_step, |_| true, d.particle.phase_step);
		p.bounce = keep(
			"particle.bounce",
			p.bounce,
			|v| (0.0..=1.0).contains(&v),
			d.particle.bounce,
		);
		p.damping = keep(
			"particle.damping",
			p.damping,
			|v| v > 0.0 && v <= 1.0,
			d.particle.damping,
		);
		p.attraction_radius = keep(
			"particle.attraction_radius",
			p.attraction_radius,
			|v| v >= 0.0,
			d.particle.attraction_radius,
		);
		p.attraction_force = keep(
			"particle.attraction_force",
			p.attraction_force,
			|_| true,
			d.particle.attraction_force,
		);
		p.offscreen_margin = keep(
			"particle.offscreen_margin",
			p.offscreen_margin,
			|v| v >= 0.0,
			d.particle.offscreen_margin,
		);

		let c = &mut self.connection;
		if c.max_per_particle > MAX_LINKS_PER_PARTICLE {
			warn!(
				"cyber-field: connection.max_per_particle = {} capped at {MAX_LINKS_PER_PARTICLE}",
				c.max_per_particle
			);
			c.max_per_particle = MAX_LINKS_PER_PARTICLE;
		}
		c.max_distance = keep(
			"connection.max_distance",
			c.max_distance,
			|v| v > 0.0,
			d.connection.max_distance,
		);
		c.max_distance_low_power = keep(
			"connection.max_distance_low_power",
			c.max_distance_low_power,
			|v| v > 0.0,
			d.connection.max_distance_low_power,
		);
		c.opacity = keep(
			"connection.opacity",
			c.opacity,
			|v| (0.0..=1.0).contains(&v),
			d.connection.opacity,
		);

		let t = &mut self.trail;
		if t.capacity > MAX_TRAIL_CAPACITY {
			warn!("cyber-field: trail.capacity = {} capped at {MAX_TRAIL_CAPACITY}", t.capacity);
			t.capacity = MAX_TRAIL_CAPACITY;
		}
		t.fade = keep("trail.fade", t.fade, |v| v > 0.0 && v < 1.0, d.trail.fade);
		t.min_life = keep("trail.min_life", t.min_life, |v| v > 0.0 && v < 1.0, d.trail.min_life);

		let s = &mut self.spawn;
		s.jitter = keep("spawn.jitter", s.jitter, |v| v >= 0.0, d.spawn.jitter);
		s.min_interval_ms = keep(
			"spawn.min_interval_ms",
			s.min_interval_ms,
			|v| v >= 0.0,
			d.spawn.min_interval_ms,
		);
		s.ambient_period_ms = keep_period("spawn.ambient_period_ms", s.ambient_period_ms, d.spawn.ambient_period_ms);
		s.ambient_period_low_power_ms = keep_period(
			"spawn.ambient_period_low_power_ms",
			s.ambient_period_low_power_ms,
			d.spawn.ambient_period_low_power_ms,
		);
		s.ambient_occupancy = keep(
			"spawn.ambient_occupancy",
			s.ambient_occupancy,
			|v| (0.0..=1.0).contains(&v),
			d.spawn.ambient_occupancy,
		);

		let i = &mut self.input;
		i.pointer_throttle_ms = keep(
			"input.pointer_throttle_ms",
			i.pointer_throttle_ms,
			|v| v >= 0.0,
			d.input.pointer_throttle_ms,
		);
		i.pointer_throttle_low_power_ms = keep(
			"input.pointer_throttle_low_power_ms",
			i.pointer_throttle_low_power_ms,
			|v| v >= 0.0,
			d.input.pointer_throttle_low_power_ms,
		);
		i.touch_throttle_ms = keep(
			"input.touch_throttle_ms",
			i.touch_throttle_ms,
			|v| v >= 0.0,
			d.input.touch_throttle_ms,
		);
		i.resize_debounce_ms = keep(
			"input.resize_debounce_ms",
			i.resize_debounce_ms,
			|v| v >= 0.0,
			d.input.resize_debounce_ms,
		);
		i.low_power_max_pixel_ratio = keep(
			"input.low_power_max_pixel_ratio",
			i.low_power_max_pixel_ratio,
			|v| v > 0.0,
			d.input.low_power_max_pixel_ratio,
		);

		self
	}
}

fn keep(name: &str, value: f64, valid: impl Fn(f64) -> bool, fallback: f64) -> f64 {
	if value.is_finite() && valid(value) {
		value
	} else {
		warn!("cyber-field: {name} = {value} out of range, using {fallback}");
		fallback
	}
}

/// Browser timers take an `i32` delay; zero would spin.
fn keep_period(name: &str, value: u32, fallback: u32) -> u32 {
	if value > 0 && i32::try_from(value).is_ok() {
		value
	} else {
		warn!("cyber-field: {name} = {value} out of range, using {fallback}");
		fallback
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config = FieldConfig::from_json("{}").unwrap();
		assert_eq!(config.trail.capacity, 15);
		assert_eq!(config.connection.max_per_particle, 3);
		assert_eq!(config.spawn.ambient_period_ms, 2000);
		assert_eq!(config.theme, "cyber");
		assert!(!config.run_in_low_power);
	}

	#[test]
	fn partial_section_keeps_sibling_defaults() {
		let config =
			FieldConfig::from_json(r#"{ "trail": { "capacity": 24 }, "theme": "mono" }"#).unwrap();
		assert_eq!(config.trail.capacity, 24);
		assert_eq!(config.trail.fade, 0.95);
		assert_eq!(config.theme, "mono");
		assert_eq!(config.particle.bounce, 0.7);
	}

	#[test]
	fn hostile_values_fall_back_to_safe_ones() {
		let config = FieldConfig::from_json(
			r#"{
				"connection": { "max_per_particle": 4294967295, "opacity": 4.0 },
				"particle": { "decay_min": 0.0, "decay_range": -1.0, "damping": 2.0 },
				"trail": { "capacity": 4294967295, "fade": 1.5, "min_life": -0.1 },
				"spawn": { "ambient_period_ms": 4294967295, "ambient_period_low_power_ms": 0 }
			}"#,
		)
		.unwrap();
		assert_eq!(config.connection.max_per_particle, MAX_LINKS_PER_PARTICLE);
		assert_eq!(config.connection.opacity, 0.3);
		assert_eq!(config.particle.decay_min, 0.005);
		assert_eq!(config.particle.decay_range, 0.015);
		assert_eq!(config.particle.damping, 0.99);
		assert_eq!(config.trail.capacity, MAX_TRAIL_CAPACITY);
		assert_eq!(config.trail.fade, 0.95);
		assert_eq!(config.trail.min_life, 0.1);
		assert_eq!(config.spawn.ambient_period_ms, 2000);
		assert_eq!(config.spawn.ambient_period_low_power_ms, 3000);
	}

	#[test]
	fn in_range_overrides_survive_sanitizing() {
		let config = FieldConfig::from_json(
			r#"{ "connection": { "max_per_particle": 2 }, "particle": { "decay_min": 0.02 } }"#,
		)
		.unwrap();
		assert_eq!(config.connection.max_per_particle, 2);
		assert_eq!(config.particle.decay_min, 0.02);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(FieldConfig::from_json("{ trail: ").is_err());
	}
}
