//! golinks Core Library
//!
//! Shared types, validation, and the redirect-rule projection for the
//! golinks redirector. This crate is used by both the platform layer and
//! the CLI component.

pub mod error;
pub mod paths;
pub mod rules;
pub mod settings;

// Re-export commonly used types
pub use error::*;
pub use paths::default_settings_path;
pub use rules::*;
pub use settings::*;
