//! Supported languages
//!
//! Every document address is namespaced by one of a closed set of languages:
//! - `AncientGreek`: Koine and classical Greek
//! - `Hebrew`: Biblical Hebrew
//! - `Latin`: Classical Latin

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A supported language.
///
/// The set is fixed at compile time; anything else is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    AncientGreek,
    Hebrew,
    Latin,
}

impl Language {
    /// Human-readable name, as shown to learners
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::AncientGreek => "Ancient Greek",
            Language::Hebrew => "Hebrew",
            Language::Latin => "Latin",
        }
    }

    /// Path segment used to address this language's documents
    pub fn slug(&self) -> &'static str {
        match self {
            Language::AncientGreek => "ancient-greek",
            Language::Hebrew => "hebrew",
            Language::Latin => "latin",
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[Language::AncientGreek, Language::Hebrew, Language::Latin]
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ancient greek" | "ancient-greek" | "ancient_greek" | "greek" | "grc" => {
                Ok(Language::AncientGreek)
            }
            "hebrew" | "he" | "hbo" => Ok(Language::Hebrew),
            "latin" | "la" | "lat" => Ok(Language::Latin),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Language {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Language::from_str(&s).map_err(serde::de::Error::custom)
    }
}
