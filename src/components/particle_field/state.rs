//! Particle field simulation state.
//!
//! Owns the bounded particle set, the per-frame proximity links and the pointer
//! trail. Nothing here touches the browser: time, pointer position and
//! randomness are all supplied by the caller, and rendering reads the state
//! without writing back.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::capability::FieldParameters;
use super::config::{FieldConfig, MAX_LINKS_PER_PARTICLE};
use super::particle::{CyberParticle, unit};
use super::trail::PointerTrail;

/// A transient link between two nearby particles, by index into
/// [`ParticleField::particles`]. Always `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
}

impl Connection {
	/// Fades linearly from `peak` at zero distance to nothing at `max_distance`.
	pub fn opacity(&self, max_distance: f64, peak: f64) -> f64 {
		(1.0 - self.distance / max_distance) * peak
	}
}

/// The simulated particle field.
///
/// Generic over the random source so tests can seed it.
pub struct ParticleField<R: Rng = StdRng> {
	pub particles: Vec<CyberParticle>,
	pub connections: Vec<Connection>,
	pub trail: PointerTrail,
	params: FieldParameters,
	config: FieldConfig,
	width: f64,
	height: f64,
	last_spawn_ms: Option<f64>,
	running: bool,
	rng: R,
}

impl ParticleField<StdRng> {
	/// Field seeded from the platform entropy source.
	pub fn from_entropy(
		params: FieldParameters,
		config: FieldConfig,
		width: f64,
		height: f64,
	) -> Self {
		Self::new(params, config, width, height, StdRng::from_entropy())
	}
}

impl<R: Rng> ParticleField<R> {
	pub fn new(params: FieldParameters, config: FieldConfig, width: f64, height: f64, rng: R) -> Self {
		Self {
			particles: Vec::with_capacity(params.particle_limit),
			connections: Vec::with_capacity(
				params
					.particle_limit
					.saturating_mul(config.connection.max_per_particle.min(MAX_LINKS_PER_PARTICLE)),
			),
			trail: PointerTrail::new(&config.trail),
			params,
			config,
			width,
			height,
			last_spawn_ms: None,
			running: false,
			rng,
		}
	}

	pub fn params(&self) -> &FieldParameters {
		&self.params
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Returns `true` if the field was stopped before.
	pub fn start(&mut self) -> bool {
		!std::mem::replace(&mut self.running, true)
	}

	/// Returns `true` if the field was running before.
	pub fn stop(&mut self) -> bool {
		std::mem::replace(&mut self.running, false)
	}

	/// Free slots under the particle limit.
	pub fn headroom(&self) -> usize {
		self.params.particle_limit.saturating_sub(self.particles.len())
	}

	/// Add up to `count` particles around `(x, y)` and return how many were added.
	///
	/// Calls closer than the minimum spawn interval to the last accepted call
	/// are dropped, as are calls against a full field.
	pub fn spawn(&mut self, now_ms: f64, x: f64, y: f64, count: usize) -> usize {
		let too_soon = self
			.last_spawn_ms
			.is_some_and(|last| now_ms - last < self.config.spawn.min_interval_ms);
		if too_soon || self.headroom() == 0 {
			return 0;
		}
		self.last_spawn_ms = Some(now_ms);

		let added = count.min(self.headroom());
		for _ in 0..added {
			let particle = CyberParticle::spawn(
				x,
				y,
				&mut self.rng,
				&self.config.spawn,
				&self.config.particle,
			);
			self.particles.push(particle);
		}
		added
	}

	/// Spawn one particle on a random canvas edge while occupancy is low.
	pub fn spawn_ambient(&mut self, now_ms: f64) -> usize {
		let threshold = self.params.particle_limit as f64 * self.config.spawn.ambient_occupancy;
		if self.particles.len() as f64 >= threshold {
			return 0;
		}

		let edge = unit(&mut self.rng);
		let along = unit(&mut self.rng);
		let (x, y) = if edge < 0.25 {
			(along * self.width, 0.0)
		} else if edge < 0.5 {
			(self.width, along * self.height)
		} else if edge < 0.75 {
			(along * self.width, self.height)
		} else {
			(0.0, along * self.height)
		};
		self.spawn(now_ms, x, y, 1)
	}

	/// Spawn a burst at the canvas centre.
	pub fn burst(&mut self, now_ms: f64) -> usize {
		let count = self.config.spawn.burst_count;
		self.spawn(now_ms, self.width / 2.0, self.height / 2.0, count)
	}

	/// Record a pointer sample for the trail.
	pub fn record_pointer(&mut self, x: f64, y: f64) {
		self.trail.push(x, y);
	}

	/// Advance the simulation by one frame.
	pub fn tick(&mut self, pointer: Option<(f64, f64)>) {
		let (width, height) = (self.width, self.height);
		let style = &self.config.particle;
		self.particles.retain_mut(|p| {
			p.update(pointer, width, height, style);
			!p.is_dead() && !p.is_offscreen(width, height, style.offscreen_margin)
		});

		if self.particles.len() > 1 && !self.params.low_power {
			self.update_connections();
		} else {
			self.connections.clear();
		}

		self.trail.decay();
	}

	/// Recompute proximity links: for each particle, the first few later
	/// particles closer than the connection distance.
	pub fn update_connections(&mut self) {
		self.connections.clear();
		let max_distance = self.params.max_connection_distance;
		let per_particle = self.config.connection.max_per_particle.min(MAX_LINKS_PER_PARTICLE);

		for (i, p) in self.particles.iter().enumerate() {
			let mut linked = 0;
			for (j, q) in self.particles.iter().enumerate().skip(i + 1) {
				if linked >= per_particle {
					break;
				}
				let (dx, dy) = (q.x - p.x, q.y - p.y);
				let distance = (dx * dx + dy * dy).sqrt();
				if distance < max_distance {
					self.connections.push(Connection { a: i, b: j, distance });
					linked += 1;
				}
			}
		}
	}

	/// Opacity of a link under the current parameters.
	pub fn connection_opacity(&self, connection: &Connection) -> f64 {
		connection.opacity(self.params.max_connection_distance, self.config.connection.opacity)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn field(limit: usize, low_power: bool) -> ParticleField {
		let config = FieldConfig::default();
		let params = FieldParameters::with_limit(limit, low_power, &config);
		ParticleField::new(params, config, 800.0, 600.0, StdRng::seed_from_u64(42))
	}

	fn place(field: &mut ParticleField, points: &[(f64, f64)]) {
		field.particles.clear();
		let mut t = 0.0;
		for &(x, y) in points {
			t += 100.0;
			field.spawn(t, x, y, 1);
			if let Some(p) = field.particles.last_mut() {
				p.x = x;
				p.y = y;
			}
		}
	}

	#[test]
	fn start_stop_are_idempotent() {
		let mut f = field(30, false);
		assert!(!f.is_running());
		assert!(f.start());
		assert!(!f.start());
		assert!(f.is_running());
		assert!(f.stop());
		assert!(!f.stop());
	}

	#[test]
	fn full_field_does_not_consume_spawn_window() {
		let mut f = field(2, false);
		assert_eq!(f.spawn(0.0, 10.0, 10.0, 2), 2);
		assert_eq!(f.spawn(100.0, 10.0, 10.0, 1), 0);
		f.particles.pop();
		// The rejected call above did not move the window.
		assert_eq!(f.spawn(101.0, 10.0, 10.0, 1), 1);
	}

	#[test]
	fn connections_respect_fan_out_and_distance() {
		let mut f = field(30, false);
		place(
			&mut f,
			&[
				(100.0, 100.0),
				(110.0, 100.0),
				(120.0, 100.0),
				(130.0, 100.0),
				(140.0, 100.0),
				(400.0, 400.0),
			],
		);
		f.update_connections();

		let from_first: Vec<usize> = f.connections.iter().filter(|c| c.a == 0).map(|c| c.b).collect();
		assert_eq!(from_first, vec![1, 2, 3]);
		assert!(f.connections.iter().all(|c| c.b != 5 && c.a != 5));
		assert!(f.connections.iter().all(|c| c.distance < 100.0 && c.a < c.b));
	}

	#[test]
	fn connection_opacity_fades_with_distance() {
		let f = field(30, false);
		let near = Connection { a: 0, b: 1, distance: 0.0 };
		let half = Connection { a: 0, b: 1, distance: 50.0 };
		assert!((f.connection_opacity(&near) - 0.3).abs() < 1e-12);
		assert!((f.connection_opacity(&half) - 0.15).abs() < 1e-12);
	}

	#[test]
	fn low_power_skips_connections() {
		let mut f = field(30, true);
		place(&mut f, &[(100.0, 100.0), (105.0, 100.0)]);
		f.tick(None);
		assert!(f.connections.is_empty());
	}

	#[test]
	fn ambient_spawns_on_an_edge_below_occupancy() {
		let mut f = field(10, false);
		let mut now = 0.0;
		for _ in 0..20 {
			now += 2000.0;
			f.spawn_ambient(now);
		}
		assert_eq!(f.particles.len(), 7);
		for p in &f.particles {
			let on_x_edge = p.x.abs() <= 10.0 || (p.x - 800.0).abs() <= 10.0;
			let on_y_edge = p.y.abs() <= 10.0 || (p.y - 600.0).abs() <= 10.0;
			assert!(on_x_edge || on_y_edge);
		}
	}

	#[test]
	fn burst_targets_centre() {
		let mut f = field(30, false);
		assert_eq!(f.burst(0.0), 8);
		assert!(f.particles.iter().all(|p| (p.x - 400.0).abs() <= 10.0 && (p.y - 300.0).abs() <= 10.0));
	}

	#[test]
	fn tick_keeps_survivor_order() {
		let mut f = field(30, false);
		place(&mut f, &[(100.0, 100.0), (200.0, 200.0), (300.0, 300.0)]);
		f.particles[1].life = 0.001;
		let hues: Vec<f64> = [0, 2].iter().map(|&i| f.particles[i].hue).collect();
		f.tick(None);
		let after: Vec<f64> = f.particles.iter().map(|p| p.hue).collect();
		assert_eq!(after, hues);
	}

	#[test]
	fn oversized_link_budget_is_capped() {
		let mut config = FieldConfig::default();
		config.connection.max_per_particle = usize::MAX;
		let params = FieldParameters::with_limit(30, false, &config);
		let mut f = ParticleField::new(params, config, 800.0, 600.0, StdRng::seed_from_u64(7));
		let cluster: Vec<(f64, f64)> = (0..10).map(|i| (100.0 + i as f64, 100.0)).collect();
		place(&mut f, &cluster);
		f.update_connections();

		for i in 0..f.particles.len() {
			let fan_out = f.connections.iter().filter(|c| c.a == i).count();
			assert!(fan_out <= MAX_LINKS_PER_PARTICLE, "particle {i} has {fan_out} links");
		}
		assert_eq!(f.connections.iter().filter(|c| c.a == 0).count(), 3);
	}
}
