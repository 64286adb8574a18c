//! Ambient particle field component.
//!
//! Renders a full-viewport canvas of glowing particles with:
//! - A particle budget sized once from the host (screen area, memory, cores)
//! - Pointer and touch spawning, with a fading pointer trail
//! - Soft edge bounces and a weak pull towards the pointer
//! - Proximity links between nearby particles, skipped on low-power hosts
//! - Ambient spawning along the canvas edges while the field is sparse
//!
//! The simulation ([`ParticleField`]) is plain Rust and runs without a browser;
//! [`ParticleFieldCanvas`] wires it to the DOM.
//!
//! # Example
//!
//! ```ignore
//! use cyber_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! { <ParticleFieldCanvas config=FieldConfig::default() /> }
//! ```

pub mod capability;
mod component;
pub mod config;
mod error;
pub mod input;
pub mod particle;
pub mod render;
mod scheduler;
pub mod state;
pub mod surface;
pub mod theme;
pub mod throttle;
pub mod trail;

pub use capability::{FieldParameters, HostProfile};
pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use error::FieldError;
pub use input::InputCoordinator;
pub use particle::CyberParticle;
pub use state::{Connection, ParticleField};
pub use surface::Surface;
pub use theme::FieldTheme;
pub use trail::{PointerTrail, TrailPoint};
