//! golinks
//!
//! The redirector's event handlers, expressed over the platform traits
//! from `golinks-platform`, plus the CLI that stands in for the browser
//! chrome:
//!
//! - [`ruleman`] keeps the single dynamic redirect rule consistent with
//!   the stored Configuration.
//! - [`omnibox`] handles keyword-triggered input and action-icon clicks.
//! - [`options`] is the options-page controller (view + validated save).
//! - [`events`] routes host lifecycle triggers to the other handlers.
//! - [`runtime`] wires the pieces over a chosen store and surface.
//! - [`cli`] defines the commands and their handlers.

pub mod cli;
pub mod events;
pub mod omnibox;
pub mod options;
pub mod ruleman;
pub mod runtime;
