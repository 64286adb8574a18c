//! Frame rendering for the particle field.
//!
//! Draw order:
//! 1. Translucent fade over the previous frame
//! 2. Particle glows
//! 3. Connection lines
//! 4. Pointer trail

use rand::Rng;

use super::state::ParticleField;
use super::surface::Surface;
use super::theme::FieldTheme;

/// Renders the current field state. Reads only, never mutates the simulation.
pub fn render<R: Rng, S: Surface>(field: &ParticleField<R>, surface: &mut S, theme: &FieldTheme) {
	surface.fade(&theme.fade.to_css(), field.width(), field.height());
	draw_particles(field, surface, theme);
	draw_connections(field, surface, theme);
	draw_trail(field, surface, theme);
}

fn draw_particles<R: Rng, S: Surface>(field: &ParticleField<R>, surface: &mut S, theme: &FieldTheme) {
	for p in &field.particles {
		let radius = p.radius();
		if radius <= 0.0 || p.life <= 0.0 {
			continue;
		}
		surface.glow(
			p.x,
			p.y,
			radius,
			&theme.glow_core(p.hue).to_css(),
			&theme.glow_rim(p.hue).to_css(),
			p.life.min(1.0),
		);
	}
}

fn draw_connections<R: Rng, S: Surface>(
	field: &ParticleField<R>,
	surface: &mut S,
	theme: &FieldTheme,
) {
	for conn in &field.connections {
		let (Some(a), Some(b)) = (field.particles.get(conn.a), field.particles.get(conn.b)) else {
			continue;
		};
		let opacity = field.connection_opacity(conn);
		if opacity <= 0.0 {
			continue;
		}
		surface.gradient_line(
			(a.x, a.y),
			(b.x, b.y),
			&theme.link_stop(a.hue).to_css(),
			&theme.link_stop(b.hue).to_css(),
			theme.link.width,
			opacity,
		);
	}
}

fn draw_trail<R: Rng, S: Surface>(field: &ParticleField<R>, surface: &mut S, theme: &FieldTheme) {
	if field.trail.len() < 2 {
		return;
	}
	let points: Vec<(f64, f64)> = field.trail.iter().map(|p| (p.x, p.y)).collect();
	surface.polyline(&points, &theme.trail.color.to_css(), theme.trail.width);
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::particle_field::capability::FieldParameters;
	use crate::components::particle_field::config::FieldConfig;

	#[derive(Debug, PartialEq)]
	enum Op {
		Fade(String),
		Glow { alpha: f64 },
		Line { alpha: f64 },
		Polyline(usize),
	}

	#[derive(Default)]
	struct Recorder(Vec<Op>);

	impl Surface for Recorder {
		fn fade(&mut self, color: &str, _width: f64, _height: f64) {
			self.0.push(Op::Fade(color.to_string()));
		}

		fn glow(&mut self, _x: f64, _y: f64, _r: f64, _inner: &str, _outer: &str, alpha: f64) {
			self.0.push(Op::Glow { alpha });
		}

		fn gradient_line(
			&mut self,
			_from: (f64, f64),
			_to: (f64, f64),
			_start: &str,
			_end: &str,
			_width: f64,
			alpha: f64,
		) {
			self.0.push(Op::Line { alpha });
		}

		fn polyline(&mut self, points: &[(f64, f64)], _color: &str, _width: f64) {
			self.0.push(Op::Polyline(points.len()));
		}
	}

	fn field() -> ParticleField {
		let config = FieldConfig::default();
		let params = FieldParameters::with_limit(30, false, &config);
		ParticleField::new(params, config, 800.0, 600.0, StdRng::seed_from_u64(1))
	}

	#[test]
	fn empty_field_only_fades() {
		let mut rec = Recorder::default();
		render(&field(), &mut rec, &FieldTheme::cyber());
		assert_eq!(rec.0, vec![Op::Fade("rgba(10, 10, 11, 0.08)".into())]);
	}

	#[test]
	fn draws_in_layer_order() {
		let mut f = field();
		f.spawn(0.0, 100.0, 100.0, 2);
		f.record_pointer(10.0, 10.0);
		f.record_pointer(20.0, 20.0);
		f.record_pointer(30.0, 30.0);
		f.tick(None);

		let mut rec = Recorder::default();
		render(&f, &mut rec, &FieldTheme::cyber());

		assert!(matches!(rec.0[0], Op::Fade(_)));
		assert!(matches!(rec.0[1], Op::Glow { .. }));
		assert!(matches!(rec.0[2], Op::Glow { .. }));
		// Two particles within jitter range are always linked.
		assert!(matches!(rec.0[3], Op::Line { alpha } if alpha > 0.0 && alpha <= 0.3));
		assert_eq!(rec.0[4], Op::Polyline(3));
		assert_eq!(rec.0.len(), 5);
	}

	#[test]
	fn particle_alpha_follows_life() {
		let mut f = field();
		f.spawn(0.0, 100.0, 100.0, 1);
		f.particles[0].life = 0.25;

		let mut rec = Recorder::default();
		render(&f, &mut rec, &FieldTheme::cyber());
		assert_eq!(rec.0[1], Op::Glow { alpha: 0.25 });
	}
}
