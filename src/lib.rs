//! cyber-field: ambient canvas particle field for the site background.
//!
//! This crate provides a WASM-based particle effect that spawns glowing
//! particles under the pointer and along the viewport edges, links nearby
//! particles and draws a fading pointer trail.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Selects the browser entropy backend for `rand` on wasm32.
use getrandom as _;

pub mod components;

pub use components::particle_field::{
	FieldConfig, FieldParameters, FieldTheme, HostProfile, ParticleField, ParticleFieldCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("cyber-field: logging initialized");
}

/// Load field overrides from a script element with id="field-config".
/// Expected format: a (partial) JSON [`FieldConfig`].
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("cyber-field: loaded config overrides (theme {})", config.theme);
			Some(config)
		}
		Err(e) => {
			warn!("cyber-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads field configuration from the DOM and renders the particle canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=config />
	}
}
