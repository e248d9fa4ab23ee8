//! Options-page controller
//!
//! Renders the configuration state and handles the save action: trim,
//! validate, normalize, persist. Validation failures are inline feedback
//! and never reach the store. Feedback is transient; it carries its own
//! display deadline instead of a timer so callers (and tests) decide
//! when "now" is.

use std::sync::Arc;
use std::time::{Duration, Instant};

use golinks_core::{normalize_base_url, Configuration, GoLinksError, Result, BASE_URL_KEY};
use golinks_platform::SettingsStore;
use tracing::{debug, info};

/// How long feedback stays visible after a save attempt.
pub const FEEDBACK_TTL: Duration = Duration::from_secs(3);

/// Transient status message shown after a save attempt.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub message: String,
    pub success: bool,
    shown_at: Instant,
}

impl Feedback {
    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            shown_at: Instant::now(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            shown_at: Instant::now(),
        }
    }

    /// Whether the message is still within its display window at `now`.
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) < FEEDBACK_TTL
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}

/// What the options surface shows on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsView {
    /// A base URL is set; the input is populated with it.
    Configured { base_url: String },
    /// No usable base URL; the surface shows a setup warning.
    SetupRequired,
}

impl OptionsView {
    /// The status line rendered under the input field.
    pub fn status_line(&self) -> String {
        match self {
            OptionsView::Configured { base_url } => format!("Configured: {}", base_url),
            OptionsView::SetupRequired => {
                "Not configured - go links will not work".to_string()
            }
        }
    }

    /// Initial contents of the base-URL input field.
    pub fn input_value(&self) -> &str {
        match self {
            OptionsView::Configured { base_url } => base_url,
            OptionsView::SetupRequired => "",
        }
    }
}

/// Result of a save attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The normalized value was written to the store.
    Saved { base_url: String, feedback: Feedback },
    /// Validation failed; nothing was written.
    Rejected { feedback: Feedback },
}

pub struct OptionsController {
    store: Arc<dyn SettingsStore>,
}

impl OptionsController {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Read the Configuration and decide which state to render.
    pub async fn view(&self) -> Result<OptionsView> {
        let config = Configuration::new(self.store.get(BASE_URL_KEY).await?);
        Ok(match config.effective_base_url() {
            Some(base_url) => OptionsView::Configured {
                base_url: base_url.to_string(),
            },
            None => OptionsView::SetupRequired,
        })
    }

    /// Save action: validate the input and persist the normalized value.
    ///
    /// Empty or non-absolute-URL input is rejected with inline feedback
    /// and Configuration is left unchanged. Store failures propagate as
    /// errors; they are not user mistakes.
    pub async fn save(&self, input: &str) -> Result<SaveOutcome> {
        let normalized = match normalize_base_url(input) {
            Ok(normalized) => normalized,
            Err(GoLinksError::EmptyBaseUrl) => {
                debug!("save rejected: empty base URL");
                return Ok(SaveOutcome::Rejected {
                    feedback: Feedback::error("Please enter a base URL"),
                });
            }
            Err(GoLinksError::InvalidBaseUrl(input)) => {
                debug!(input = %input, "save rejected: not an absolute URL");
                return Ok(SaveOutcome::Rejected {
                    feedback: Feedback::error("Please enter a valid URL (including https://)"),
                });
            }
            Err(e) => return Err(e),
        };

        self.store.set(BASE_URL_KEY, &normalized).await?;
        info!(base_url = %normalized, "base URL saved");

        Ok(SaveOutcome::Saved {
            base_url: normalized,
            feedback: Feedback::success("Settings saved successfully! Go links are now active."),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golinks_platform::MemoryStore;

    fn controller() -> (Arc<MemoryStore>, OptionsController) {
        let store = Arc::new(MemoryStore::new());
        let controller = OptionsController::new(store.clone());
        (store, controller)
    }

    #[tokio::test]
    async fn test_view_setup_required_when_absent() {
        let (_store, controller) = controller();
        let view = controller.view().await.unwrap();

        assert_eq!(view, OptionsView::SetupRequired);
        assert_eq!(view.input_value(), "");
        assert_eq!(view.status_line(), "Not configured - go links will not work");
    }

    #[tokio::test]
    async fn test_view_setup_required_when_blank() {
        let (store, controller) = controller();
        store.set(BASE_URL_KEY, "   ").await.unwrap();

        assert_eq!(controller.view().await.unwrap(), OptionsView::SetupRequired);
    }

    #[tokio::test]
    async fn test_view_configured() {
        let (store, controller) = controller();
        store
            .set(BASE_URL_KEY, "https://goto.example.com/")
            .await
            .unwrap();

        let view = controller.view().await.unwrap();
        assert_eq!(view.input_value(), "https://goto.example.com/");
        assert_eq!(view.status_line(), "Configured: https://goto.example.com/");
    }

    #[tokio::test]
    async fn test_save_empty_rejected_without_write() {
        let (store, controller) = controller();

        let outcome = controller.save("   ").await.unwrap();
        match outcome {
            SaveOutcome::Rejected { feedback } => {
                assert!(!feedback.success);
                assert_eq!(feedback.message, "Please enter a base URL");
            }
            SaveOutcome::Saved { .. } => panic!("expected rejection"),
        }
        assert_eq!(store.get(BASE_URL_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_invalid_url_rejected_without_write() {
        let (store, controller) = controller();
        store
            .set(BASE_URL_KEY, "https://goto.example.com/")
            .await
            .unwrap();

        let outcome = controller.save("not a url").await.unwrap();
        match outcome {
            SaveOutcome::Rejected { feedback } => {
                assert_eq!(
                    feedback.message,
                    "Please enter a valid URL (including https://)"
                );
            }
            SaveOutcome::Saved { .. } => panic!("expected rejection"),
        }

        // The previous value is untouched.
        assert_eq!(
            store.get(BASE_URL_KEY).await.unwrap(),
            Some("https://goto.example.com/".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_appends_trailing_slash() {
        let (store, controller) = controller();

        let outcome = controller.save("https://goto.example.com").await.unwrap();
        match outcome {
            SaveOutcome::Saved { base_url, feedback } => {
                assert_eq!(base_url, "https://goto.example.com/");
                assert!(feedback.success);
            }
            SaveOutcome::Rejected { .. } => panic!("expected save"),
        }
        assert_eq!(
            store.get(BASE_URL_KEY).await.unwrap(),
            Some("https://goto.example.com/".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_keeps_existing_trailing_slash() {
        let (store, controller) = controller();

        controller.save("https://goto.example.com/").await.unwrap();
        assert_eq!(
            store.get(BASE_URL_KEY).await.unwrap(),
            Some("https://goto.example.com/".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_trims_input() {
        let (store, controller) = controller();

        controller.save("  https://goto.example.com  ").await.unwrap();
        assert_eq!(
            store.get(BASE_URL_KEY).await.unwrap(),
            Some("https://goto.example.com/".to_string())
        );
    }

    #[tokio::test]
    async fn test_feedback_expires_after_ttl() {
        let (_store, controller) = controller();

        let outcome = controller.save("https://goto.example.com/").await.unwrap();
        let feedback = match outcome {
            SaveOutcome::Saved { feedback, .. } => feedback,
            SaveOutcome::Rejected { .. } => panic!("expected save"),
        };

        let shown_at = feedback.shown_at;
        assert!(feedback.is_visible_at(shown_at));
        assert!(feedback.is_visible_at(shown_at + Duration::from_millis(2999)));
        assert!(!feedback.is_visible_at(shown_at + FEEDBACK_TTL));
        assert!(!feedback.is_visible_at(shown_at + Duration::from_secs(10)));
    }
}
