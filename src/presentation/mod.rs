//! Presentation mapping for contact kinds.
//!
//! Pure lookups from a [`ContactKind`] to the card style class, the icon glyph
//! and the notification slot shown on activation. Every input has an answer.

use crate::site::ContactKind;

/// Card class used for kinds without a dedicated style.
pub const DEFAULT_CARD_CLASS: &str = "default";

/// Icon used for kinds without a dedicated glyph.
pub const UNKNOWN_ICON: &str = "fas fa-question";

impl ContactKind {
    /// Style class appended to `contact-card`.
    pub fn card_class(&self) -> &'static str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Telegram => "telegram",
            Self::Email => "email",
            Self::WhatsAppGroup | Self::TelegramGroup => "group",
            Self::Unknown(_) => DEFAULT_CARD_CLASS,
        }
    }

    /// Font Awesome classes for the card icon.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::WhatsApp => "fab fa-whatsapp",
            Self::Telegram => "fab fa-telegram-plane",
            Self::Email => "fas fa-envelope",
            Self::WhatsAppGroup | Self::TelegramGroup => "fas fa-users",
            Self::Unknown(_) => UNKNOWN_ICON,
        }
    }

    /// Element id of the notification toast for this kind.
    pub fn notification_slot(&self) -> Option<&'static str> {
        match self {
            Self::WhatsApp => Some("whatsappNotif"),
            Self::Telegram => Some("telegramNotif"),
            Self::Email => Some("emailNotif"),
            Self::WhatsAppGroup => Some("whatsappGroupNotif"),
            Self::TelegramGroup => Some("telegramGroupNotif"),
            Self::Unknown(_) => None,
        }
    }

    /// Human label used in notification text.
    pub fn label(&self) -> &str {
        match self {
            Self::WhatsApp => "WhatsApp",
            Self::Telegram => "Telegram",
            Self::Email => "Email",
            Self::WhatsAppGroup => "Grup WhatsApp",
            Self::TelegramGroup => "Grup Telegram",
            Self::Unknown(other) => other,
        }
    }
}

/// Card class for a raw `type` string.
#[allow(dead_code)]
pub fn card_class(kind: &str) -> &'static str {
    ContactKind::from(kind).card_class()
}

/// Icon classes for a raw `type` string.
#[allow(dead_code)]
pub fn icon_for(kind: &str) -> &'static str {
    ContactKind::from(kind).icon()
}
