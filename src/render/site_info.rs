//! Header/footer population from [`SiteInfo`].

use tracing::debug;

use super::sink::UiSink;
use super::slots;
use crate::site::SiteInfo;

/// Browser title for a site title.
pub fn page_title(title: &str) -> String {
    format!("{title} - AI Contact Hub")
}

/// Write site metadata into the named slots.
///
/// Each step is independent: a missing slot or a missing field skips only
/// that step.
pub fn populate_site_info(sink: &dyn UiSink, site: &SiteInfo) {
    set_slot_text(sink, slots::TITLE, site.title.as_deref());
    set_slot_text(sink, slots::TAGLINE, site.tagline.as_deref());

    if let Some(subtitle) = site.subtitle.as_deref() {
        let glitch = sink
            .slot(slots::SUBTITLE)
            .and_then(|node| sink.find_by_class(node, slots::SUBTITLE_TEXT_CLASS));
        match glitch {
            Some(node) => {
                sink.set_text(node, subtitle);
                sink.set_attribute(node, "data-text", subtitle);
            }
            None => debug!("subtitle slot missing, skipping"),
        }
    }

    set_slot_text(sink, slots::COPYRIGHT, site.copyright.as_deref());

    if let Some(title) = site.title.as_deref() {
        sink.set_title(&page_title(title));
    }
}

fn set_slot_text(sink: &dyn UiSink, slot: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    match sink.slot(slot) {
        Some(node) => sink.set_text(node, value),
        None => debug!(slot, "slot missing, skipping"),
    }
}
