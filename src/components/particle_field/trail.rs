//! Fading pointer trail.

use std::collections::VecDeque;

use super::config::{MAX_TRAIL_CAPACITY, TrailConfig};

/// A recorded pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
	pub x: f64,
	pub y: f64,
	pub life: f64,
}

/// Bounded history of recent pointer positions, oldest first.
#[derive(Clone, Debug)]
pub struct PointerTrail {
	points: VecDeque<TrailPoint>,
	capacity: usize,
	fade: f64,
	min_life: f64,
}

impl PointerTrail {
	pub fn new(config: &TrailConfig) -> Self {
		Self {
			points: VecDeque::with_capacity(
				config.capacity.min(MAX_TRAIL_CAPACITY).saturating_add(1),
			),
			capacity: config.capacity,
			fade: config.fade,
			min_life: config.min_life,
		}
	}

	/// Append a fresh point, dropping the oldest on overflow.
	pub fn push(&mut self, x: f64, y: f64) {
		self.points.push_back(TrailPoint { x, y, life: 1.0 });
		while self.points.len() > self.capacity {
			self.points.pop_front();
		}
	}

	/// Fade every point once and prune the exhausted ones.
	pub fn decay(&mut self) {
		let (fade, min_life) = (self.fade, self.min_life);
		self.points.retain_mut(|p| {
			p.life *= fade;
			p.life > min_life
		});
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
		self.points.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overflow_drops_oldest() {
		let mut trail = PointerTrail::new(&TrailConfig::default());
		for i in 0..20 {
			trail.push(i as f64, 0.0);
		}
		assert_eq!(trail.len(), 15);
		let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
		assert_eq!(xs.first(), Some(&5.0));
		assert_eq!(xs.last(), Some(&19.0));
	}

	#[test]
	fn decay_prunes_faded_points() {
		let mut trail = PointerTrail::new(&TrailConfig::default());
		trail.push(0.0, 0.0);
		// 0.95^44 ~= 0.105, 0.95^45 ~= 0.0994
		for _ in 0..44 {
			trail.decay();
		}
		assert_eq!(trail.len(), 1);
		trail.push(1.0, 1.0);
		trail.decay();
		assert_eq!(trail.len(), 1);
		assert_eq!(trail.iter().next().map(|p| p.x), Some(1.0));
		assert!(trail.iter().all(|p| p.life > 0.1));
	}

	#[test]
	fn huge_capacity_does_not_preallocate() {
		let config = TrailConfig {
			capacity: usize::MAX,
			..TrailConfig::default()
		};
		let mut trail = PointerTrail::new(&config);
		trail.push(1.0, 2.0);
		assert_eq!(trail.len(), 1);
	}
}
