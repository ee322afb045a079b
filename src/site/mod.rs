//! Site configuration: document model and the built-in default.

mod defaults;
mod model;

pub use defaults::default_config;
pub use model::{ContactGroup, ContactItem, ContactKind, SiteConfig, SiteInfo};
