//! Transient messages that revert on their own after a short delay.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared_types::surface::Surface;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

/// How long a flash stays up.
pub const FLASH_DURATION: Duration = Duration::from_millis(1200);

/// What happens to the slot when the flash ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfterFlash {
    Hide,
    Restore(String),
}

/// A slot that shows short-lived text.
///
/// A new flash replaces the previous one and its timer. Dropping the
/// `Flash` cancels the pending timer.
pub struct Flash {
    surface: Arc<Surface>,
    slot: &'static str,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Flash {
    pub fn new(surface: Arc<Surface>, slot: &'static str) -> Self {
        Self {
            surface,
            slot,
            timer: Mutex::new(None),
        }
    }

    pub fn show(&self, text: &str, after: AfterFlash) {
        self.surface.set_text(self.slot, text);
        if after == AfterFlash::Hide {
            self.surface.set_visible(self.slot, true);
        }

        let surface = Arc::clone(&self.surface);
        let slot = self.slot;
        let timer = spawn(async move {
            tokio::time::sleep(FLASH_DURATION).await;
            match after {
                AfterFlash::Hide => surface.set_visible(slot, false),
                AfterFlash::Restore(text) => surface.set_text(slot, text),
            };
        });

        if let Some(previous) = std::mem::replace(&mut *self.timer.lock(), timer) {
            previous.abort();
        }
    }
}

impl Drop for Flash {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }
    }
}

/// Spawn on the current runtime, if there is one.
pub(crate) fn spawn<F>(future: F) -> Option<JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(future)),
        Err(_) => {
            warn!("No async runtime; background work skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_flash_hides_after_delay() {
        let surface = Arc::new(Surface::with_slots(["goalToast"]));
        surface.set_visible("goalToast", false);
        let flash = Flash::new(surface.clone(), "goalToast");

        flash.show("Goal saved", AfterFlash::Hide);
        assert_eq!(surface.is_visible("goalToast"), Some(true));
        assert_eq!(surface.text("goalToast").as_deref(), Some("Goal saved"));

        tokio::time::sleep(FLASH_DURATION + Duration::from_millis(10)).await;
        assert_eq!(surface.is_visible("goalToast"), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_flash_replaces_timer() {
        let surface = Arc::new(Surface::with_slots(["copyBtn"]));
        let flash = Flash::new(surface.clone(), "copyBtn");

        flash.show("Copied!", AfterFlash::Restore("Copy address".into()));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        flash.show("Copied!", AfterFlash::Restore("Copy address".into()));

        // The first timer would have fired here.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(surface.text("copyBtn").as_deref(), Some("Copied!"));

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(surface.text("copyBtn").as_deref(), Some("Copy address"));
    }

    #[test]
    fn test_without_runtime_text_still_shown() {
        let surface = Arc::new(Surface::with_slots(["goalToast"]));
        Flash::new(surface.clone(), "goalToast").show("Goal cleared", AfterFlash::Hide);
        assert_eq!(surface.text("goalToast").as_deref(), Some("Goal cleared"));
    }
}
