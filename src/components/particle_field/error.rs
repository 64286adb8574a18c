//! Errors from wiring the field into the browser.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure to set up a platform resource. The field degrades to "no animation".
#[derive(Debug, Error)]
pub enum FieldError {
	#[error("no global window")]
	NoWindow,
	#[error("canvas has no 2d rendering context")]
	NoContext,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for FieldError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
