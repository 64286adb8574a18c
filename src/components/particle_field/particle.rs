//! A single glowing particle.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::{ParticleConfig, SpawnConfig};

/// Uniform sample in `[0, 1)`.
pub(crate) fn unit<R: Rng>(rng: &mut R) -> f64 {
	rng.gen_range(0.0..1.0)
}

/// A point-mass with its own lifetime and colour.
#[derive(Clone, Debug)]
pub struct CyberParticle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Base radius before pulsing.
	pub size: f64,
	/// Remaining life, starts at 1 and doubles as draw alpha.
	pub life: f64,
	pub decay_rate: f64,
	/// Hue in degrees, `[0, 360)`.
	pub hue: f64,
	pub phase: f64, // For pulsing
}

impl CyberParticle {
	/// Create a particle near `(x, y)` with randomized attributes.
	pub fn spawn<R: Rng>(
		x: f64,
		y: f64,
		rng: &mut R,
		spawn: &SpawnConfig,
		style: &ParticleConfig,
	) -> Self {
		let jitter = |rng: &mut R| (unit(rng) - 0.5) * 2.0 * spawn.jitter;
		let (jx, jy) = (jitter(rng), jitter(rng));

		Self {
			x: x + jx,
			y: y + jy,
			vx: (unit(rng) - 0.5) * style.velocity_spread,
			vy: (unit(rng) - 0.5) * style.velocity_spread,
			size: style.size_min + unit(rng) * style.size_range,
			life: 1.0,
			decay_rate: style.decay_min + unit(rng) * style.decay_range,
			hue: unit(rng) * 360.0,
			phase: unit(rng) * TAU,
		}
	}

	/// Advance one frame inside a `width` x `height` canvas.
	///
	/// Crossing a bound reverses and weakens the velocity component but leaves
	/// the position alone, so a particle may sit outside the canvas for a frame.
	pub fn update(
		&mut self,
		pointer: Option<(f64, f64)>,
		width: f64,
		height: f64,
		style: &ParticleConfig,
	) {
		self.x += self.vx;
		self.y += self.vy;
		self.life -= self.decay_rate;
		self.phase += style.phase_step;

		if self.x < 0.0 || self.x > width {
			self.vx *= -style.bounce;
		}
		if self.y < 0.0 || self.y > height {
			self.vy *= -style.bounce;
		}

		if let Some((px, py)) = pointer {
			let (dx, dy) = (px - self.x, py - self.y);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance > 0.0 && distance < style.attraction_radius {
				self.vx += dx / distance * style.attraction_force;
				self.vy += dy / distance * style.attraction_force;
			}
		}

		self.vx *= style.damping;
		self.vy *= style.damping;
	}

	pub fn is_dead(&self) -> bool {
		self.life <= 0.0
	}

	pub fn is_offscreen(&self, width: f64, height: f64, margin: f64) -> bool {
		self.x < -margin || self.x > width + margin || self.y < -margin || self.y > height + margin
	}

	/// Radius including the pulse, always positive.
	pub fn radius(&self) -> f64 {
		self.size * (self.phase.sin() * 0.3 + 0.7)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn still(x: f64, y: f64) -> CyberParticle {
		CyberParticle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size: 2.0,
			life: 1.0,
			decay_rate: 0.01,
			hue: 180.0,
			phase: 0.0,
		}
	}

	#[test]
	fn spawn_stays_in_ranges() {
		let mut rng = StdRng::seed_from_u64(7);
		let (spawn, style) = (SpawnConfig::default(), ParticleConfig::default());
		for _ in 0..500 {
			let p = CyberParticle::spawn(100.0, 200.0, &mut rng, &spawn, &style);
			assert!((p.x - 100.0).abs() <= 10.0);
			assert!((p.y - 200.0).abs() <= 10.0);
			assert!(p.vx >= -1.0 && p.vx < 1.0);
			assert!(p.size >= 1.0 && p.size < 4.0);
			assert!(p.decay_rate >= 0.005 && p.decay_rate < 0.02);
			assert!(p.hue >= 0.0 && p.hue < 360.0);
			assert_eq!(p.life, 1.0);
		}
	}

	#[test]
	fn update_integrates_then_damps() {
		let style = ParticleConfig::default();
		let mut p = still(50.0, 50.0);
		p.vx = 1.0;
		p.vy = -2.0;
		p.update(None, 100.0, 100.0, &style);

		assert_eq!(p.x, 51.0);
		assert_eq!(p.y, 48.0);
		assert!((p.vx - 0.99).abs() < 1e-12);
		assert!((p.vy + 1.98).abs() < 1e-12);
		assert!((p.life - 0.99).abs() < 1e-12);
		assert!((p.phase - 0.08).abs() < 1e-12);
	}

	#[test]
	fn bounce_reverses_without_clamping() {
		let style = ParticleConfig::default();
		let mut p = still(0.5, 50.0);
		p.vx = -1.0;
		p.update(None, 100.0, 100.0, &style);

		assert!(p.x < 0.0);
		assert!((p.vx - 0.7 * 0.99).abs() < 1e-12);
	}

	#[test]
	fn pointer_attraction_is_gated_and_constant() {
		let style = ParticleConfig::default();

		let mut near = still(50.0, 50.0);
		near.update(Some((60.0, 50.0)), 100.0, 100.0, &style);
		assert!((near.vx - 0.00002 * 0.99).abs() < 1e-15);
		assert_eq!(near.vy, 0.0);

		let mut far = still(50.0, 50.0);
		far.update(Some((50.0, 160.0)), 200.0, 200.0, &style);
		assert_eq!(far.vy, 0.0);

		// Pointer exactly on the particle has no direction.
		let mut on_top = still(50.0, 50.0);
		on_top.update(Some((50.0, 50.0)), 100.0, 100.0, &style);
		assert_eq!((on_top.vx, on_top.vy), (0.0, 0.0));
	}

	#[test]
	fn offscreen_uses_margin() {
		assert!(!still(-49.0, 10.0).is_offscreen(100.0, 100.0, 50.0));
		assert!(still(-51.0, 10.0).is_offscreen(100.0, 100.0, 50.0));
		assert!(still(10.0, 151.0).is_offscreen(100.0, 100.0, 50.0));
	}

	#[test]
	fn radius_pulses_around_base_size() {
		let mut p = still(0.0, 0.0);
		p.phase = std::f64::consts::FRAC_PI_2;
		assert!((p.radius() - 2.0).abs() < 1e-12);
		p.phase = -std::f64::consts::FRAC_PI_2;
		assert!((p.radius() - 0.8).abs() < 1e-12);
	}
}
