//! Card activation: notification feedback and delayed navigation.
//!
//! Every activation spawns its own timer tasks, keyed by [`ActivationId`].
//! Activations never cancel each other: clicking twice opens twice.

mod banner;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

pub use banner::ErrorBanner;

use crate::render::{NodeId, UiSink};
use crate::site::{ContactItem, ContactKind};

/// Class toggled on notification elements while visible.
pub const SHOW_CLASS: &str = "show";

/// Browsing context targets are opened in.
pub const NEW_CONTEXT: &str = "_blank";

/// Fixed delays used by the interaction layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long a contact notification stays visible.
    pub notification: Duration,
    /// Delay between activation and navigation.
    pub navigation_delay: Duration,
    /// How long the error banner stays visible.
    pub banner_visible: Duration,
    /// Fade-out time before the banner element is removed.
    pub banner_fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            notification: Duration::from_secs(2),
            navigation_delay: Duration::from_millis(800),
            banner_visible: Duration::from_secs(3),
            banner_fade: Duration::from_millis(300),
        }
    }
}

/// Opens a target URL in a browsing context.
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str, target: &str);
}

/// Navigator that only records the navigation in the log.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open(&self, url: &str, target: &str) {
        info!("🔗 Navigating to {} ({})", url, target);
    }
}

/// Identifier of one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationId(u64);

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "activation-{}", self.0)
    }
}

/// Timer tasks spawned for one activation.
struct ActivationTasks {
    hide: Option<(JoinHandle<()>, NodeId)>,
    navigate: JoinHandle<()>,
}

impl ActivationTasks {
    fn is_finished(&self) -> bool {
        self.navigate.is_finished() && self.hide.as_ref().is_none_or(|(h, _)| h.is_finished())
    }

    async fn join(self) {
        if let Some((hide, _)) = self.hide {
            if let Err(e) = hide.await {
                if e.is_panic() {
                    warn!("notification hide task panicked: {}", e);
                }
            }
        }
        if let Err(e) = self.navigate.await {
            if e.is_panic() {
                warn!("navigation task panicked: {}", e);
            }
        }
    }
}

/// Handles card activations.
///
/// Must be used from within a Tokio runtime: `activate` spawns tasks.
pub struct ActivationHandler {
    sink: Weak<dyn UiSink>,
    navigator: Arc<dyn Navigator>,
    timings: Timings,
    next_id: AtomicU64,
    pending: DashMap<ActivationId, ActivationTasks>,
}

impl ActivationHandler {
    /// Create a handler showing notifications on `sink`.
    ///
    /// Only a weak reference is kept, since the sink's listeners own the handler.
    pub fn new(sink: &Arc<dyn UiSink>, navigator: Arc<dyn Navigator>, timings: Timings) -> Self {
        Self {
            sink: Arc::downgrade(sink),
            navigator,
            timings,
            next_id: AtomicU64::new(1),
            pending: DashMap::new(),
        }
    }

    /// Activate a contact item.
    ///
    /// Shows the notification for its kind right away, then opens its url in a
    /// new context after the navigation delay.
    pub fn activate(&self, item: &ContactItem) -> ActivationId {
        let id = ActivationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let started = Instant::now();
        info!("📱 Opening contact: {} ({})", item.kind, id);

        self.pending.retain(|_, tasks| !tasks.is_finished());

        let hide = self.show_notification(&item.kind, started);

        let navigator = Arc::clone(&self.navigator);
        let url = item.url.clone();
        let deadline = started + self.timings.navigation_delay;
        let navigate = tokio::spawn(async move {
            sleep_until(deadline).await;
            match url.as_deref() {
                Some(url) => navigator.open(url, NEW_CONTEXT),
                None => debug!("{} has no url, skipping navigation", id),
            }
        });

        self.pending.insert(id, ActivationTasks { hide, navigate });
        id
    }

    fn show_notification(
        &self,
        kind: &ContactKind,
        started: Instant,
    ) -> Option<(JoinHandle<()>, NodeId)> {
        let slot = kind.notification_slot()?;
        let sink = self.sink.upgrade()?;
        let Some(node) = sink.slot(slot) else {
            debug!(slot, "notification element missing");
            return None;
        };

        sink.add_class(node, SHOW_CLASS);

        let weak = Weak::clone(&self.sink);
        let deadline = started + self.timings.notification;
        let hide = tokio::spawn(async move {
            sleep_until(deadline).await;
            if let Some(sink) = weak.upgrade() {
                sink.remove_class(node, SHOW_CLASS);
            }
        });
        Some((hide, node))
    }

    /// Cancel one activation.
    ///
    /// Navigation is aborted and its notification hidden immediately, unless
    /// another pending activation still shows the same element. Returns
    /// `false` if the activation was unknown or already complete.
    #[allow(dead_code)]
    pub fn cancel(&self, id: ActivationId) -> bool {
        let Some((_, tasks)) = self.pending.remove(&id) else {
            return false;
        };
        if tasks.is_finished() {
            return false;
        }

        tasks.navigate.abort();
        if let Some((hide, node)) = tasks.hide {
            hide.abort();
            if !self.is_showing(node) {
                if let Some(sink) = self.sink.upgrade() {
                    sink.remove_class(node, SHOW_CLASS);
                }
            }
        }
        info!("Cancelled {}", id);
        true
    }

    /// Whether a pending activation still owns the notification `node`.
    fn is_showing(&self, node: NodeId) -> bool {
        self.pending.iter().any(|entry| {
            entry
                .value()
                .hide
                .as_ref()
                .is_some_and(|(hide, shown)| *shown == node && !hide.is_finished())
        })
    }

    /// Number of activations with timers still running.
    #[allow(dead_code)]
    pub fn pending_count(&self) -> usize {
        self.pending
            .iter()
            .filter(|entry| !entry.value().is_finished())
            .count()
    }

    /// Wait for every outstanding activation to finish.
    pub async fn drain(&self) {
        let ids: Vec<ActivationId> = self.pending.iter().map(|entry| *entry.key()).collect();
        let tasks: Vec<ActivationTasks> = ids
            .into_iter()
            .filter_map(|id| self.pending.remove(&id).map(|(_, tasks)| tasks))
            .collect();
        futures::future::join_all(tasks.into_iter().map(ActivationTasks::join)).await;
    }
}

impl fmt::Debug for ActivationHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationHandler")
            .field("timings", &self.timings)
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// Navigator that stores every navigation, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    opened: parking_lot::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub fn opened(&self) -> Vec<(String, String)> {
        self.opened.lock().clone()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn open(&self, url: &str, target: &str) {
        self.opened.lock().push((url.to_string(), target.to_string()));
    }
}
