//! Site configuration document models.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of the configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Header/footer metadata
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: SiteInfo,

    /// Contact groups, rendered in order
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<ContactGroup>,
}

/// Site metadata. Absent fields leave their slot untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// A named collection of contact items rendered as one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactGroup {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ContactItem>,
}

impl ContactGroup {
    /// Items with `enabled == true`, in declaration order.
    pub fn enabled_items(&self) -> impl Iterator<Item = &ContactItem> {
        self.items.iter().filter(|item| item.enabled)
    }
}

/// One actionable entry, e.g. a WhatsApp link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactItem {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: ContactKind,

    /// Action target. Navigation is skipped when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Missing means disabled.
    #[serde(default)]
    pub enabled: bool,

    /// Phone number for phone-based kinds (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// Contact channel kind.
///
/// Unrecognized strings are kept in `Unknown` so a newer document still renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactKind {
    WhatsApp,
    Telegram,
    Email,
    WhatsAppGroup,
    TelegramGroup,
    Unknown(String),
}

impl ContactKind {
    /// The wire name used in the configuration document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Telegram => "telegram",
            Self::Email => "email",
            Self::WhatsAppGroup => "whatsapp_group",
            Self::TelegramGroup => "telegram_group",
            Self::Unknown(other) => other,
        }
    }
}

impl Default for ContactKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<&str> for ContactKind {
    fn from(value: &str) -> Self {
        match value {
            "whatsapp" => Self::WhatsApp,
            "telegram" => Self::Telegram,
            "email" => Self::Email,
            "whatsapp_group" => Self::WhatsAppGroup,
            "telegram_group" => Self::TelegramGroup,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ContactKind {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Unknown(_) => Self::Unknown(value),
            known => known,
        }
    }
}

impl From<ContactKind> for String {
    fn from(kind: ContactKind) -> Self {
        match kind {
            ContactKind::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
