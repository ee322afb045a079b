//! Transient error banner shown when the configuration falls back.

use std::sync::{Arc, Weak};

use tokio::time::{Instant, sleep_until};
use tracing::warn;

use super::{SHOW_CLASS, Timings};
use crate::loader::FailureReporter;
use crate::render::UiSink;

const BANNER_COLOR: &str = "#ff4444";

/// Appends an auto-dismissing error notification to the page body.
pub struct ErrorBanner {
    sink: Weak<dyn UiSink>,
    timings: Timings,
}

impl ErrorBanner {
    pub fn new(sink: &Arc<dyn UiSink>, timings: Timings) -> Self {
        Self {
            sink: Arc::downgrade(sink),
            timings,
        }
    }
}

impl FailureReporter for ErrorBanner {
    fn report(&self, message: &str) {
        warn!("⚠️ {}", message);

        let Some(sink) = self.sink.upgrade() else {
            return;
        };

        let banner = sink.create_element("div");
        for class in ["notification", "error-notif", SHOW_CLASS] {
            sink.add_class(banner, class);
        }
        sink.set_style(banner, "border-color", BANNER_COLOR);

        let icon_box = sink.create_element("div");
        sink.add_class(icon_box, "notification-icon");
        sink.set_style(icon_box, "background", BANNER_COLOR);
        let icon = sink.create_element("i");
        sink.add_class(icon, "fas");
        sink.add_class(icon, "fa-exclamation-triangle");
        sink.append_child(icon_box, icon);
        sink.append_child(banner, icon_box);

        let text = sink.create_element("div");
        sink.add_class(text, "notification-text");
        sink.set_text(text, message);
        sink.append_child(banner, text);

        sink.append_child(sink.body(), banner);

        let weak = Weak::clone(&self.sink);
        let hide_at = Instant::now() + self.timings.banner_visible;
        let remove_at = hide_at + self.timings.banner_fade;
        tokio::spawn(async move {
            sleep_until(hide_at).await;
            let Some(sink) = weak.upgrade() else {
                return;
            };
            sink.remove_class(banner, SHOW_CLASS);
            drop(sink);

            sleep_until(remove_at).await;
            if let Some(sink) = weak.upgrade() {
                sink.remove(banner);
            }
        });
    }
}
