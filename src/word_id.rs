//! Word identity - stable ids for words whose source supplies none
//!
//! Format: `lexicon://<language>/<source>#<word>@<position>`
//!
//! Examples:
//! - `lexicon://hebrew/core#אֱלֹהִים@0`
//! - `lexicon://latin/dcc-core#amō@12`

use crate::language::Language;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deterministic identity of a word within one source document.
///
/// Two loads of the same unchanged document produce equal ids, so callers
/// can memoize or de-duplicate on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordId {
    pub language: Language,
    /// Source key the word was loaded from
    pub source: String,
    /// Trimmed headword
    pub word: String,
    /// Zero-based position of the record within the source document
    pub position: usize,
}

impl WordId {
    pub fn new(language: Language, source: impl Into<String>, word: impl Into<String>, position: usize) -> Self {
        Self {
            language,
            source: source.into(),
            word: word.into(),
            position,
        }
    }

    /// Parse an id string into its parts
    ///
    /// Expected format: `lexicon://<language>/<source>#<word>@<position>`
    pub fn parse(id: &str) -> Result<Self> {
        let rest = id.strip_prefix("lexicon://")
            .ok_or_else(|| Error::InvalidWordId("id must start with lexicon://".to_string()))?;

        let (language_path, fragment) = rest.split_once('#')
            .ok_or_else(|| Error::InvalidWordId("id must contain # fragment".to_string()))?;

        let (slug, source) = language_path.split_once('/')
            .ok_or_else(|| Error::InvalidWordId("id must contain language/source".to_string()))?;

        let (word, position) = fragment.rsplit_once('@')
            .ok_or_else(|| Error::InvalidWordId("fragment must contain @position".to_string()))?;

        let language = Language::from_str(slug)
            .map_err(|_| Error::InvalidWordId(format!("unknown language: {}", slug)))?;
        let position: usize = position.parse()
            .map_err(|_| Error::InvalidWordId(format!("invalid position: {}", position)))?;

        Ok(Self::new(language, source, word, position))
    }

    pub fn to_id_string(&self) -> String {
        format!(
            "lexicon://{}/{}#{}@{}",
            self.language.slug(), self.source, self.word, self.position
        )
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_id_string())
    }
}

impl FromStr for WordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for WordId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_id_string())
    }
}

impl<'de> Deserialize<'de> for WordId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let id = WordId::new(Language::Hebrew, "core", "אֱלֹהִים", 0);
        assert_eq!(id.to_id_string(), "lexicon://hebrew/core#אֱלֹהִים@0");
        assert_eq!(WordId::parse(&id.to_id_string()).unwrap(), id);
    }

    #[test]
    fn test_word_containing_at_sign() {
        let id = WordId::parse("lexicon://ancient-greek/nt#a@b@7").unwrap();
        assert_eq!(id.language, Language::AncientGreek);
        assert_eq!(id.source, "nt");
        assert_eq!(id.word, "a@b");
        assert_eq!(id.position, 7);
    }

    #[test]
    fn test_invalid_ids() {
        assert!(WordId::parse("invalid").is_err());
        assert!(WordId::parse("lexicon://hebrew/core").is_err()); // missing fragment
        assert!(WordId::parse("lexicon://klingon/core#qapla@1").is_err());
        assert!(WordId::parse("lexicon://latin/core#amo@x").is_err());
    }
}
