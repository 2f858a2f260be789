//! Monitored listing platforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A listing platform whose feed reports are polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Avito autoload reports (client-credentials tokens).
    Avito,
    /// Cian feed order reports (static per-account tokens).
    Cian,
    /// Yandex Realty CRM feed state (shared OAuth token).
    Yandex,
}

impl Platform {
    /// All platforms in report order.
    pub const ALL: [Platform; 3] = [Platform::Avito, Platform::Cian, Platform::Yandex];

    /// Human-readable name used in status lines and headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Avito => "Avito",
            Self::Cian => "Cian",
            Self::Yandex => "Yandex",
        }
    }

    /// Name used on the command line and in file names.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Avito => "avito",
            Self::Cian => "cian",
            Self::Yandex => "yandex",
        }
    }

    /// Colored marker that opens the report header.
    pub fn header_marker(&self) -> &'static str {
        match self {
            Self::Avito => "🟢",
            Self::Cian => "🔵",
            Self::Yandex => "🟠",
        }
    }

    /// Whether the platform reports warnings separately from errors.
    pub fn tracks_warnings(&self) -> bool {
        matches!(self, Self::Cian)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.cli_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownPlatform(s.to_string()))
    }
}
