//! Locale selection for bilingual records.
//!
//! Every catalog entity carries parallel Chinese/English field pairs
//! (`name_zh`/`name_en`, ...). The resolver is a pure function from
//! (record, requested locale) to the display string. When the requested
//! language's field is empty the other language is used instead, so the
//! public site always has something to render; both empty yields the empty
//! string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Supported display locales. The original site routes under `/zh` and `/en`
/// with Chinese as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Zh,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Zh
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(Locale::Zh),
            "en" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Zh => write!(f, "zh"),
            Locale::En => write!(f, "en"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown locale {0:?} (expected \"zh\" or \"en\")")]
pub struct UnknownLocale(String);

impl Locale {
    /// Select the field for this locale from a zh/en pair, falling back to
    /// the other language when the selected field is empty.
    pub fn pick<'a>(&self, zh: &'a str, en: &'a str) -> &'a str {
        let (wanted, other) = match self {
            Locale::Zh => (zh, en),
            Locale::En => (en, zh),
        };
        if wanted.is_empty() { other } else { wanted }
    }

    /// Like [`Locale::pick`] for optional field pairs.
    pub fn pick_opt<'a>(&self, zh: Option<&'a str>, en: Option<&'a str>) -> Option<&'a str> {
        let resolved = self.pick(zh.unwrap_or(""), en.unwrap_or(""));
        if resolved.is_empty() { None } else { Some(resolved) }
    }
}
