//! Host lifecycle triggers
//!
//! Routes the platform events the background script would subscribe to
//! (startup, install/update, storage change) to the rule manager, plus
//! the first-install behavior: open the options page when nothing is
//! configured yet.

use std::sync::Arc;

use golinks_core::{Configuration, Result, BASE_URL_KEY};
use golinks_platform::{BrowserSurface, SettingsChange, SettingsStore};
use tracing::{debug, info};

use crate::ruleman::RuleManager;

/// Why an install/update trigger fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallReason {
    /// Fresh install on this profile.
    Install,
    /// Extension updated in place.
    Update,
}

/// A host platform trigger.
#[derive(Debug, Clone)]
pub enum Trigger {
    Startup,
    Installed { reason: InstallReason },
    StorageChanged(SettingsChange),
}

pub struct Lifecycle {
    store: Arc<dyn SettingsStore>,
    surface: Arc<dyn BrowserSurface>,
    rules: Arc<RuleManager>,
}

impl Lifecycle {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        surface: Arc<dyn BrowserSurface>,
        rules: Arc<RuleManager>,
    ) -> Self {
        Self {
            store,
            surface,
            rules,
        }
    }

    /// Handle one trigger. Every variant reconciles the rule set;
    /// a fresh install additionally opens the options page when no base
    /// URL is configured.
    pub async fn dispatch(&self, trigger: Trigger) -> Result<()> {
        match trigger {
            Trigger::Startup => {
                debug!("startup trigger");
                self.rules.reconcile().await
            }
            Trigger::Installed { reason } => {
                debug!(?reason, "installed trigger");
                self.rules.reconcile().await?;

                if reason == InstallReason::Install {
                    let config = Configuration::new(self.store.get(BASE_URL_KEY).await?);
                    if !config.is_configured() {
                        info!("fresh install without configuration, opening options page");
                        self.surface.open_options_page().await?;
                    }
                }
                Ok(())
            }
            Trigger::StorageChanged(change) => self.rules.handle_change(&change).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golinks_core::SYNC_NAMESPACE;
    use golinks_platform::{
        InstalledRules, MemoryStore, RecordingSurface, RuleEngine, SettingsStore, SurfaceEvent,
    };

    struct Fixture {
        store: Arc<MemoryStore>,
        engine: Arc<InstalledRules>,
        surface: Arc<RecordingSurface>,
        lifecycle: Lifecycle,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let engine = Arc::new(InstalledRules::new());
        let surface = Arc::new(RecordingSurface::new());
        let rules = Arc::new(RuleManager::new(store.clone(), engine.clone()));
        let lifecycle = Lifecycle::new(store.clone(), surface.clone(), rules);
        Fixture {
            store,
            engine,
            surface,
            lifecycle,
        }
    }

    #[tokio::test]
    async fn test_startup_reconciles() {
        let f = fixture();
        f.store
            .set(BASE_URL_KEY, "https://goto.example.com/")
            .await
            .unwrap();

        f.lifecycle.dispatch(Trigger::Startup).await.unwrap();

        assert_eq!(f.engine.dynamic_rules().await.unwrap().len(), 1);
        assert!(f.surface.events().is_empty());
    }

    #[tokio::test]
    async fn test_fresh_install_unconfigured_opens_options() {
        let f = fixture();

        f.lifecycle
            .dispatch(Trigger::Installed {
                reason: InstallReason::Install,
            })
            .await
            .unwrap();

        assert!(f.engine.dynamic_rules().await.unwrap().is_empty());
        assert_eq!(f.surface.events(), vec![SurfaceEvent::OpenedOptions]);
    }

    #[tokio::test]
    async fn test_fresh_install_configured_does_not_open_options() {
        let f = fixture();
        f.store
            .set(BASE_URL_KEY, "https://goto.example.com/")
            .await
            .unwrap();

        f.lifecycle
            .dispatch(Trigger::Installed {
                reason: InstallReason::Install,
            })
            .await
            .unwrap();

        assert_eq!(f.engine.dynamic_rules().await.unwrap().len(), 1);
        assert!(f.surface.events().is_empty());
    }

    #[tokio::test]
    async fn test_update_never_opens_options() {
        let f = fixture();

        f.lifecycle
            .dispatch(Trigger::Installed {
                reason: InstallReason::Update,
            })
            .await
            .unwrap();

        assert!(f.surface.events().is_empty());
    }

    #[tokio::test]
    async fn test_storage_change_reconciles() {
        let f = fixture();
        f.store
            .set(BASE_URL_KEY, "https://goto.example.com/")
            .await
            .unwrap();

        f.lifecycle
            .dispatch(Trigger::StorageChanged(SettingsChange {
                namespace: SYNC_NAMESPACE.to_string(),
                key: BASE_URL_KEY.to_string(),
                old_value: None,
                new_value: Some("https://goto.example.com/".to_string()),
            }))
            .await
            .unwrap();

        assert_eq!(f.engine.dynamic_rules().await.unwrap().len(), 1);
    }
}
