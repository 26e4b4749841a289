// src/config/mod.rs

//! Installation layout and engine profile.
//!
//! - [`install`] locates the installation root and derives the paths below it.
//! - [`model`] is the serde mapping of `conf/launcher.toml`.
//! - [`loader`] reads the profile (falling back to built-in defaults).
//! - [`validate`] turns a raw profile into a checked [`LauncherConfig`].

pub mod install;
pub mod loader;
pub mod model;
pub mod validate;

pub use install::Installation;
pub use loader::{load_and_validate, load_from_path};
pub use model::{EngineSection, LauncherConfig, RawLauncherConfig};
