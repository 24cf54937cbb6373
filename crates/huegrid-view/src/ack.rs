use huegrid_core::HexColor;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Single slot holding the "copied" acknowledgment.
///
/// At most one hex is acknowledged at a time. Showing a new one aborts the
/// pending hide timer, and a timer only clears the slot if it still belongs
/// to the latest acknowledgment.
pub struct CopyAcknowledgment {
    duration: Duration,
    visible: Arc<watch::Sender<Option<HexColor>>>,
    generation: Arc<AtomicU64>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl CopyAcknowledgment {
    pub fn new(duration: Duration) -> Self {
        let (visible, _) = watch::channel(None);
        Self {
            duration,
            visible: Arc::new(visible),
            generation: Arc::new(AtomicU64::new(0)),
            timer: Mutex::new(None),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Must be called from within a Tokio runtime.
    pub fn show(&self, hex: HexColor) {
        let mut timer = self.timer.lock();
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Acknowledging copy of {} (token {})", hex, token);
        self.visible.send_replace(Some(hex));

        let visible = Arc::clone(&self.visible);
        let generation = Arc::clone(&self.generation);
        let duration = self.duration;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            visible.send_if_modified(|slot| {
                if generation.load(Ordering::SeqCst) != token || slot.is_none() {
                    return false;
                }
                *slot = None;
                true
            });
        }));
    }

    pub fn visible(&self) -> Option<HexColor> {
        self.visible.borrow().clone()
    }

    pub fn is_visible_for(&self, hex: &HexColor) -> bool {
        self.visible.borrow().as_ref() == Some(hex)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<HexColor>> {
        self.visible.subscribe()
    }

    /// Hides the acknowledgment immediately.
    pub fn dismiss(&self) {
        if let Some(pending) = self.timer.lock().take() {
            pending.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.visible.send_if_modified(|slot| slot.take().is_some());
    }
}

impl Drop for CopyAcknowledgment {
    fn drop(&mut self) {
        if let Some(pending) = self.timer.get_mut().take() {
            pending.abort();
        }
    }
}
