// Lookup result type: one base form with its tags.

use std::fmt;

/// A base form found for a looked-up word.
///
/// `stem` is the decoded base form, `tags` the dictionary-dependent
/// part-of-speech / morphology tag string (empty when the entry has none).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    pub stem: String,
    pub tags: String,
}

impl Word {
    pub fn new(stem: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            tags: tags.into(),
        }
    }

    /// Split a decoded entry at the first `separator`.
    ///
    /// Everything after the first separator belongs to the tags, so tag
    /// strings may themselves contain the separator character.
    pub fn from_entry(entry: &str, separator: char) -> Self {
        match entry.split_once(separator) {
            Some((stem, tags)) => Self::new(stem, tags),
            None => Self::new(entry, ""),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            f.write_str(&self.stem)
        } else {
            write!(f, "{}\t{}", self.stem, self.tags)
        }
    }
}
