//! Drawing surface abstraction.
//!
//! The renderer only needs four primitives. [`CanvasSurface`] implements them
//! on a 2d canvas context; tests substitute a recorder.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::FieldError;

/// Primitive drawing operations used by the field renderer.
pub trait Surface {
	/// Paint a translucent rectangle over the whole surface.
	fn fade(&mut self, color: &str, width: f64, height: f64);

	/// Filled circle with a radial gradient from `inner` at the centre to `outer` at the rim.
	fn glow(&mut self, x: f64, y: f64, radius: f64, inner: &str, outer: &str, alpha: f64);

	/// Straight segment with a linear gradient from `start` to `end`.
	fn gradient_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		start: &str,
		end: &str,
		width: f64,
		alpha: f64,
	);

	/// A single stroked polyline through `points`.
	fn polyline(&mut self, points: &[(f64, f64)], color: &str, width: f64);
}

/// [`Surface`] backed by an HTML canvas.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FieldError> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(FieldError::NoContext)?
			.dyn_into()
			.map_err(|_| FieldError::NoContext)?;
		Ok(Self { canvas, ctx })
	}

	/// Size the backing store for `css_width` x `css_height` CSS pixels at
	/// `pixel_ratio`, and scale the context so drawing stays in CSS pixels.
	pub fn resize(&self, css_width: f64, css_height: f64, pixel_ratio: f64) {
		self.canvas.set_width((css_width * pixel_ratio) as u32);
		self.canvas.set_height((css_height * pixel_ratio) as u32);

		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{css_width}px"));
		let _ = style.set_property("height", &format!("{css_height}px"));

		// Resetting the backing size also resets the transform.
		let _ = self
			.ctx
			.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
	}
}

impl Surface for CanvasSurface {
	fn fade(&mut self, color: &str, width: f64, height: f64) {
		self.ctx.set_fill_style_str(color);
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn glow(&mut self, x: f64, y: f64, radius: f64, inner: &str, outer: &str, alpha: f64) {
		let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, inner);
		let _ = gradient.add_color_stop(1.0, outer);

		self.ctx.save();
		self.ctx.set_global_alpha(alpha);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
		self.ctx.fill();
		self.ctx.restore();
	}

	fn gradient_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		start: &str,
		end: &str,
		width: f64,
		alpha: f64,
	) {
		let gradient = self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
		let _ = gradient.add_color_stop(0.0, start);
		let _ = gradient.add_color_stop(1.0, end);

		self.ctx.save();
		self.ctx.set_global_alpha(alpha);
		#[allow(deprecated)]
		self.ctx.set_stroke_style(&gradient);
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
		self.ctx.restore();
	}

	fn polyline(&mut self, points: &[(f64, f64)], color: &str, width: f64) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};

		self.ctx.save();
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(x0, y0);
		for &(x, y) in rest {
			self.ctx.line_to(x, y);
		}
		self.ctx.stroke();
		self.ctx.restore();
	}
}
