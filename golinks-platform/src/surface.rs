//! Browser surface contract
//!
//! The two navigations the handlers can ask the host for: pointing the
//! active tab at a URL, and opening the options page.

use async_trait::async_trait;
use golinks_core::Result;
use std::sync::Mutex;
use tracing::info;

/// Trait for tab and options-page navigation.
#[async_trait]
pub trait BrowserSurface: Send + Sync {
    /// Navigate the current active tab to `url`.
    async fn navigate_active_tab(&self, url: &str) -> Result<()>;

    /// Open the configuration surface.
    async fn open_options_page(&self) -> Result<()>;
}

/// A navigation the surface performed, as recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    NavigatedTo(String),
    OpenedOptions,
}

/// Recording surface for tests: captures every call instead of acting.
#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, in call order.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Drain and return the recorded events.
    pub fn take_events(&self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[async_trait]
impl BrowserSurface for RecordingSurface {
    async fn navigate_active_tab(&self, url: &str) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(SurfaceEvent::NavigatedTo(url.to_string()));
        Ok(())
    }

    async fn open_options_page(&self) -> Result<()> {
        self.events.lock().unwrap().push(SurfaceEvent::OpenedOptions);
        Ok(())
    }
}

/// Console surface used by the CLI binary: reports what the browser
/// would have done.
pub struct ConsoleSurface;

#[async_trait]
impl BrowserSurface for ConsoleSurface {
    async fn navigate_active_tab(&self, url: &str) -> Result<()> {
        info!(url, "navigating active tab");
        println!("Navigating active tab to {}", url);
        Ok(())
    }

    async fn open_options_page(&self) -> Result<()> {
        info!("opening options page");
        println!("Opening the options page. Configure with `golinks set <base-url>`.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_surface_records_in_order() {
        let surface = RecordingSurface::new();
        surface.open_options_page().await.unwrap();
        surface
            .navigate_active_tab("https://goto.example.com/eng")
            .await
            .unwrap();

        assert_eq!(
            surface.events(),
            vec![
                SurfaceEvent::OpenedOptions,
                SurfaceEvent::NavigatedTo("https://goto.example.com/eng".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_take_events_drains() {
        let surface = RecordingSurface::new();
        surface.open_options_page().await.unwrap();

        assert_eq!(surface.take_events(), vec![SurfaceEvent::OpenedOptions]);
        assert!(surface.events().is_empty());
    }
}
