// Affix encoding selector declared by the `fsa.dict.encoder` metadata key.

use std::fmt;
use std::str::FromStr;

use crate::MetadataError;

/// How a stored entry reconstructs the base form from the inflected word.
///
/// Resolved once when the dictionary is opened; the actual decoding lives
/// next to the lookup code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixEncoding {
    /// One truncation byte (suffix), then literal bytes.
    Suffix,
    /// Two truncation bytes (prefix, suffix), then literal bytes.
    Prefix,
    /// The entry holds the base form verbatim.
    None,
}

impl AffixEncoding {
    /// Canonical upper-case name as written in `.info` files.
    pub fn name(self) -> &'static str {
        match self {
            AffixEncoding::Suffix => "SUFFIX",
            AffixEncoding::Prefix => "PREFIX",
            AffixEncoding::None => "NONE",
        }
    }

    /// Number of leading truncation bytes in an encoded entry.
    pub fn header_len(self) -> usize {
        match self {
            AffixEncoding::Suffix => 1,
            AffixEncoding::Prefix => 2,
            AffixEncoding::None => 0,
        }
    }
}

impl FromStr for AffixEncoding {
    type Err = MetadataError;

    /// Names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUFFIX" => Ok(AffixEncoding::Suffix),
            "PREFIX" => Ok(AffixEncoding::Prefix),
            "NONE" => Ok(AffixEncoding::None),
            _ => Err(MetadataError::UnknownEncoder(s.to_string())),
        }
    }
}

impl fmt::Display for AffixEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
