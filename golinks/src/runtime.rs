//! Handler wiring
//!
//! Builds the full handler set over a chosen store and surface. The
//! binary wires a file store and console surface; tests wire the memory
//! fakes.

use std::sync::Arc;

use golinks_platform::{BrowserSurface, InstalledRules, SettingsStore};

use crate::events::Lifecycle;
use crate::omnibox::OmniboxHandler;
use crate::options::OptionsController;
use crate::ruleman::RuleManager;

pub struct Runtime {
    pub store: Arc<dyn SettingsStore>,
    pub engine: Arc<InstalledRules>,
    pub rules: Arc<RuleManager>,
    pub lifecycle: Lifecycle,
    pub options: OptionsController,
    pub omnibox: OmniboxHandler,
}

impl Runtime {
    pub fn new(store: Arc<dyn SettingsStore>, surface: Arc<dyn BrowserSurface>) -> Self {
        let engine = Arc::new(InstalledRules::new());
        let rules = Arc::new(RuleManager::new(store.clone(), engine.clone()));
        let lifecycle = Lifecycle::new(store.clone(), surface.clone(), rules.clone());
        let options = OptionsController::new(store.clone());
        let omnibox = OmniboxHandler::new(store.clone(), surface);

        Self {
            store,
            engine,
            rules,
            lifecycle,
            options,
            omnibox,
        }
    }
}
