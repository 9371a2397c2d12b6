//! Policy controlling plain-text derivation from HTML bodies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// How the plain-text body is computed when a draft is saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPolicy {
    /// Keep the caller-supplied text untouched, even when empty
    #[default]
    Off,
    /// Always derive text from the HTML body, overriding caller-supplied text
    On,
    /// Derive text from the HTML body only when the caller supplied none
    Auto,
}

impl TextPolicy {
    /// The wire representation of this policy
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for TextPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TextPolicy {
    type Err = DomainError;

    /// Parse a policy string; the empty string selects [`TextPolicy::Off`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "off" => Ok(Self::Off),
            "on" => Ok(Self::On),
            "auto" => Ok(Self::Auto),
            other => Err(DomainError::InvalidTextPolicy(other.to_string())),
        }
    }
}
