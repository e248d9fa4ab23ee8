//! Omnibox and action-icon handlers
//!
//! Two stateless entry points. Keyword input either opens the options
//! page (unconfigured) or navigates the active tab to the composed
//! destination. The action icon opens the options page in both states;
//! the original behaves that way deliberately or not, and we preserve it.

use std::sync::Arc;

use golinks_core::{compose_destination, Configuration, Result, BASE_URL_KEY};
use golinks_platform::{BrowserSurface, SettingsStore};
use tracing::debug;

pub struct OmniboxHandler {
    store: Arc<dyn SettingsStore>,
    surface: Arc<dyn BrowserSurface>,
}

impl OmniboxHandler {
    pub fn new(store: Arc<dyn SettingsStore>, surface: Arc<dyn BrowserSurface>) -> Self {
        Self { store, surface }
    }

    async fn configured_base_url(&self) -> Result<Option<String>> {
        let config = Configuration::new(self.store.get(BASE_URL_KEY).await?);
        Ok(config.effective_base_url().map(str::to_string))
    }

    /// Keyword entry: the user typed the trigger keyword plus `text`.
    ///
    /// Returns the destination navigated to, or `None` when the options
    /// page was opened instead because no base URL is configured.
    pub async fn on_input_entered(&self, text: &str) -> Result<Option<String>> {
        match self.configured_base_url().await? {
            None => {
                debug!("keyword entry while unconfigured, opening options page");
                self.surface.open_options_page().await?;
                Ok(None)
            }
            Some(base_url) => {
                let destination = compose_destination(&base_url, text);
                debug!(text, destination = %destination, "keyword entry");
                self.surface.navigate_active_tab(&destination).await?;
                Ok(Some(destination))
            }
        }
    }

    /// Action-icon click: opens the options page regardless of state.
    pub async fn on_action_clicked(&self) -> Result<()> {
        let configured = self.configured_base_url().await?.is_some();
        debug!(configured, "action icon clicked, opening options page");
        self.surface.open_options_page().await
    }
}
