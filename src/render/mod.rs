//! Rendering: the UI sink abstraction, the in-memory document and the
//! population steps that turn a [`SiteConfig`](crate::site::SiteConfig) into
//! page content.

mod dom;
mod sections;
mod sink;
mod site_info;

pub use dom::Document;
pub use sections::{RenderSummary, SectionRenderer};
pub use sink::{NodeId, UiEvent, UiSink};
pub use site_info::populate_site_info;

/// Element ids and classes the population steps look up.
pub mod slots {
    pub const TITLE: &str = "siteTitle";
    pub const TAGLINE: &str = "siteTagline";
    pub const SUBTITLE: &str = "siteSubtitle";
    /// Class of the subtitle child that carries the text and `data-text`.
    pub const SUBTITLE_TEXT_CLASS: &str = "text-glitch";
    pub const COPYRIGHT: &str = "siteCopyright";
    pub const CONTACT_SECTIONS: &str = "contactSections";
}
