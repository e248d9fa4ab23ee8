//! golinks-platform
//!
//! Host-platform abstraction crate for the golinks redirector. The browser
//! platform surfaces the extension depends on (synced key-value storage,
//! the dynamic redirect-rule API, tab/options navigation) are modeled as
//! traits here, with in-memory and file-backed implementations so the
//! handler logic can run and be tested without a real browser.
//
//! Public API:
//! - `store::SettingsStore` — durable key-value storage with a change feed
//! - `rules_engine::RuleEngine` — declarative dynamic-rule contract
//! - `surface::BrowserSurface` — tab navigation and the options page

pub mod rules_engine;
pub mod store;
pub mod surface;

pub use rules_engine::{InstalledRules, RuleEngine};
pub use store::{FileStore, MemoryStore, SettingsChange, SettingsStore};
pub use surface::{BrowserSurface, ConsoleSurface, RecordingSurface, SurfaceEvent};

#[cfg(test)]
mod tests {
    // Basic smoke tests to ensure the crate compiles and the public items are exposed.
    use super::*;

    #[test]
    fn exports_present() {
        let _ = std::any::TypeId::of::<MemoryStore>();
        let _ = std::any::TypeId::of::<InstalledRules>();
        let _ = std::any::TypeId::of::<RecordingSurface>();
    }
}
