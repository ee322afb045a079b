//! Built-in fallback configuration.
//!
//! Used verbatim whenever the external document cannot be loaded.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::model::{ContactGroup, ContactItem, ContactKind, SiteConfig, SiteInfo};

static DEFAULT_CONFIG: Lazy<Arc<SiteConfig>> = Lazy::new(|| Arc::new(build_default()));

/// Shared handle to the fallback configuration.
pub fn default_config() -> Arc<SiteConfig> {
    Arc::clone(&DEFAULT_CONFIG)
}

fn item(id: &str, kind: ContactKind, url: &str, title: &str, description: &str) -> ContactItem {
    ContactItem {
        id: id.to_string(),
        kind,
        url: Some(url.to_string()),
        title: title.to_string(),
        description: description.to_string(),
        enabled: true,
        number: None,
    }
}

fn build_default() -> SiteConfig {
    let community = "Bergabung dengan komunitas pelanggan kami";

    SiteConfig {
        site: SiteInfo {
            title: Some("Rifqii Store".to_string()),
            subtitle: Some("Hubungi Kami Sekarang!".to_string()),
            tagline: Some("AI-Powered Digital Solutions".to_string()),
            copyright: Some("© 2025 Rifqii Store. Siap melayani Anda!".to_string()),
        },
        groups: vec![
            ContactGroup {
                id: "contact_admin".to_string(),
                title: "Contact Admin".to_string(),
                items: vec![
                    ContactItem {
                        number: Some("6289512839279".to_string()),
                        ..item(
                            "whatsapp",
                            ContactKind::WhatsApp,
                            "https://wa.me/6289512839279",
                            "WhatsApp",
                            "Whatsapp Real Rifqii Store",
                        )
                    },
                    item(
                        "telegram",
                        ContactKind::Telegram,
                        "https://t.me/rifqibotz",
                        "Telegram",
                        "Telegram Real Rifqii Store",
                    ),
                    item(
                        "email",
                        ContactKind::Email,
                        "mailto:rifqiistore87@gmail.com",
                        "Email",
                        "rifqiistore87@gmail.com",
                    ),
                ],
            },
            ContactGroup {
                id: "group_admin".to_string(),
                title: "Group Admin".to_string(),
                items: vec![
                    item(
                        "whatsapp_group",
                        ContactKind::WhatsAppGroup,
                        "https://chat.whatsapp.com/JC5LpgMTNS70yM3CuCWq1O",
                        "Grup WhatsApp",
                        community,
                    ),
                    item(
                        "telegram_group",
                        ContactKind::TelegramGroup,
                        "https://t.me/rifqibotz87",
                        "Grup Telegram",
                        community,
                    ),
                ],
            },
        ],
    }
}
