//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the media element, the
//! uploader, end-of-track behavior and logging, plus helpers to load them
//! from disk and the environment.

mod load;
mod schema;

pub use load::SettingsError;
pub use schema::*;
