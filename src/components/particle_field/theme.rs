//! Visual theming for the particle field.
//!
//! Provides colours, hue mapping and the named presets.

use log::warn;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// HSLA color, used for the per-particle hues.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	/// Degrees, wrapped into `[0, 360)` on output.
	pub h: f64,
	/// Percent.
	pub s: f64,
	/// Percent.
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	pub fn to_css(self) -> String {
		format!(
			"hsla({:.1}, {}%, {}%, {})",
			self.h.rem_euclid(360.0),
			self.s,
			self.l,
			self.a
		)
	}
}

/// Particle glow style.
#[derive(Clone, Debug)]
pub struct GlowStyle {
	/// Saturation applied to every particle hue.
	pub saturation: f64,
	/// Lightness and alpha at the particle centre.
	pub core_lightness: f64,
	pub core_alpha: f64,
	/// Lightness at the rim, where alpha is zero.
	pub rim_lightness: f64,
}

/// Connection line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub width: f64,
	pub lightness: f64,
}

/// Pointer trail style.
#[derive(Clone, Debug)]
pub struct TrailStyle {
	pub color: Color,
	pub width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	pub name: &'static str,
	/// Painted over the whole canvas each frame. Low alpha leaves motion smear.
	pub fade: Color,
	pub glow: GlowStyle,
	pub link: LinkStyle,
	pub trail: TrailStyle,
	/// Rendered hue is `hue_offset + hue * hue_scale`.
	pub hue_offset: f64,
	pub hue_scale: f64,
}

impl FieldTheme {
	/// Full-spectrum neon on near-black (default)
	pub fn cyber() -> Self {
		Self {
			name: "cyber",
			fade: Color::rgba(10, 10, 11, 0.08),
			glow: GlowStyle {
				saturation: 100.0,
				core_lightness: 70.0,
				core_alpha: 0.8,
				rim_lightness: 50.0,
			},
			link: LinkStyle {
				width: 1.0,
				lightness: 50.0,
			},
			trail: TrailStyle {
				color: Color::rgba(0, 255, 255, 0.2),
				width: 2.0,
			},
			hue_offset: 0.0,
			hue_scale: 1.0,
		}
	}

	/// Magenta to violet band on deep purple
	pub fn synthwave() -> Self {
		Self {
			name: "synthwave",
			fade: Color::rgba(18, 8, 28, 0.1),
			glow: GlowStyle {
				saturation: 90.0,
				core_lightness: 72.0,
				core_alpha: 0.85,
				rim_lightness: 55.0,
			},
			link: LinkStyle {
				width: 1.0,
				lightness: 60.0,
			},
			trail: TrailStyle {
				color: Color::rgba(255, 80, 200, 0.25),
				width: 2.0,
			},
			hue_offset: 260.0,
			hue_scale: 100.0 / 360.0,
		}
	}

	/// Greyscale, for pages that want texture without colour
	pub fn mono() -> Self {
		Self {
			name: "mono",
			fade: Color::rgba(12, 12, 12, 0.12),
			glow: GlowStyle {
				saturation: 0.0,
				core_lightness: 85.0,
				core_alpha: 0.6,
				rim_lightness: 60.0,
			},
			link: LinkStyle {
				width: 0.75,
				lightness: 70.0,
			},
			trail: TrailStyle {
				color: Color::rgba(255, 255, 255, 0.15),
				width: 1.5,
			},
			hue_offset: 0.0,
			hue_scale: 0.0,
		}
	}

	/// Look up a preset, falling back to [`FieldTheme::cyber`].
	pub fn by_name(name: &str) -> Self {
		match name {
			"cyber" => Self::cyber(),
			"synthwave" => Self::synthwave(),
			"mono" => Self::mono(),
			other => {
				warn!("cyber-field: unknown theme {other:?}, using cyber");
				Self::cyber()
			}
		}
	}

	pub fn hue(&self, hue: f64) -> f64 {
		self.hue_offset + hue * self.hue_scale
	}

	/// Centre stop of a particle glow.
	pub fn glow_core(&self, hue: f64) -> Hsla {
		Hsla::new(
			self.hue(hue),
			self.glow.saturation,
			self.glow.core_lightness,
			self.glow.core_alpha,
		)
	}

	/// Outer, transparent stop of a particle glow.
	pub fn glow_rim(&self, hue: f64) -> Hsla {
		Hsla::new(self.hue(hue), self.glow.saturation, self.glow.rim_lightness, 0.0)
	}

	/// Opaque end-point colour of a connection gradient.
	pub fn link_stop(&self, hue: f64) -> Hsla {
		Hsla::new(self.hue(hue), self.glow.saturation, self.link.lightness, 1.0)
	}
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self::cyber()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgba(0, 255, 16, 1.0).to_css(), "#00ff10");
		assert_eq!(Color::rgba(10, 10, 11, 0.08).to_css(), "rgba(10, 10, 11, 0.08)");
		assert_eq!(Hsla::new(200.0, 100.0, 70.0, 0.8).to_css(), "hsla(200.0, 100%, 70%, 0.8)");
		assert_eq!(Hsla::new(370.0, 50.0, 50.0, 0.0).to_css(), "hsla(10.0, 50%, 50%, 0)");
	}

	#[test]
	fn presets_by_name() {
		assert_eq!(FieldTheme::by_name("synthwave").name, "synthwave");
		assert_eq!(FieldTheme::by_name("mono").name, "mono");
		assert_eq!(FieldTheme::by_name("nope").name, "cyber");
	}

	#[test]
	fn hue_mapping() {
		let cyber = FieldTheme::cyber();
		assert_eq!(cyber.glow_core(123.0).h, 123.0);
		assert_eq!(cyber.glow_rim(123.0).a, 0.0);

		let synth = FieldTheme::synthwave();
		assert!((synth.hue(360.0) - 360.0).abs() < 1e-9);
		assert_eq!(synth.hue(0.0), 260.0);
	}
}
