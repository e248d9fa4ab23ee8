//! Command-line surface of the redirector
//!
//! Split in two: [`commands`] declares the clap command tree, and
//! [`handlers`] executes each command against a wired [`crate::runtime::Runtime`].

mod commands;
mod handlers;

pub use commands::*;
pub use handlers::*;
