//! Redirect rule manager
//!
//! Keeps exactly one installed redirect rule consistent with the stored
//! Configuration. Every trigger re-runs the full remove-then-add
//! reconcile rather than diffing, so no duplicate or stale rule can
//! accumulate no matter how many triggers fire. Reconciliation is
//! serialized behind a mutex so overlapping triggers cannot interleave
//! their remove/add steps.

use std::sync::Arc;

use golinks_core::{desired_rules, Configuration, Result, BASE_URL_KEY, SYNC_NAMESPACE};
use golinks_platform::{RuleEngine, SettingsChange, SettingsStore};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct RuleManager {
    store: Arc<dyn SettingsStore>,
    engine: Arc<dyn RuleEngine>,
    // Single-flight guard: one reconcile at a time.
    reconcile_gate: Mutex<()>,
}

impl RuleManager {
    pub fn new(store: Arc<dyn SettingsStore>, engine: Arc<dyn RuleEngine>) -> Self {
        Self {
            store,
            engine,
            reconcile_gate: Mutex::new(()),
        }
    }

    /// Recompute the installed rule set from the current Configuration.
    ///
    /// Removes whatever is installed, then installs the desired rule if
    /// a base URL is configured. Safe to call at any time; a failure
    /// during install leaves the removal in effect, which is the safe
    /// default (no redirect rather than a broken one).
    pub async fn reconcile(&self) -> Result<()> {
        let _guard = self.reconcile_gate.lock().await;

        let config = Configuration::new(self.store.get(BASE_URL_KEY).await?);

        let installed = self.engine.dynamic_rules().await?;
        let remove_ids: Vec<u32> = installed.iter().map(|rule| rule.id).collect();
        self.engine
            .update_dynamic_rules(remove_ids, Vec::new())
            .await?;

        let desired = desired_rules(&config);
        if desired.is_empty() {
            debug!("no base URL configured, leaving redirect disabled");
            return Ok(());
        }

        self.engine.update_dynamic_rules(Vec::new(), desired).await?;
        info!(
            base_url = config.effective_base_url().unwrap_or_default(),
            "redirect rule reconciled"
        );
        Ok(())
    }

    /// Whether a store change should trigger reconciliation: the
    /// `baseUrl` key in the synced namespace.
    pub fn is_relevant(change: &SettingsChange) -> bool {
        change.namespace == SYNC_NAMESPACE && change.key == BASE_URL_KEY
    }

    /// Reconcile in response to a store change, if it is relevant.
    pub async fn handle_change(&self, change: &SettingsChange) -> Result<()> {
        if Self::is_relevant(change) {
            debug!(key = %change.key, "relevant settings change, reconciling");
            self.reconcile().await
        } else {
            Ok(())
        }
    }

    /// Spawn a task that follows the store's change feed and keeps the
    /// rule set reconciled until the store is dropped.
    pub fn spawn_watch(self: Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.store.subscribe();
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => {
                        if let Err(e) = self.handle_change(&change).await {
                            warn!("reconcile after settings change failed: {}", e);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Missed events carry no state; re-reading the
                        // store catches up.
                        warn!(skipped, "change feed lagged, reconciling from current state");
                        if let Err(e) = self.reconcile().await {
                            warn!("reconcile after lag failed: {}", e);
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
