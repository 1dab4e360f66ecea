// Dictionary metadata: the `.info` companion file of a `.dict` automaton.
//
// The file is a list of `key=value` lines. Blank lines and lines starting
// with `#` are ignored. Only three keys are required for lookup; all others
// are kept verbatim and exposed through `get`.

use std::path::Path;

use encoding_rs::Encoding;
use hashbrown::HashMap;
use log::debug;

use crate::{AffixEncoding, MetadataError};

/// Character encoding of the dictionary's byte sequences.
pub const KEY_ENCODING: &str = "fsa.dict.encoding";
/// Single character separating inflected form, encoded base form and tags.
pub const KEY_SEPARATOR: &str = "fsa.dict.separator";
/// Affix encoding name (`SUFFIX`, `PREFIX`, `NONE`).
pub const KEY_ENCODER: &str = "fsa.dict.encoder";

/// Encoding names seen in dictionary metadata that are not WHATWG labels.
/// Keys are lower-case.
const ENCODING_ALIASES: &[(&str, &str)] = &[
    ("utf8", "UTF-8"),
    ("iso8859_1", "ISO-8859-1"),
    ("iso8859_2", "ISO-8859-2"),
    ("iso8859_5", "ISO-8859-5"),
    ("iso8859_15", "ISO-8859-15"),
    ("cp1250", "windows-1250"),
    ("cp1251", "windows-1251"),
    ("cp1252", "windows-1252"),
];

/// Parsed and resolved `.info` metadata.
#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    attributes: HashMap<String, String>,
    encoding: &'static Encoding,
    separator: char,
    separator_byte: u8,
    encoder: AffixEncoding,
}

impl DictionaryMetadata {
    /// Read and resolve a metadata file.
    pub fn read(path: &Path) -> Result<Self, MetadataError> {
        let text = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse metadata text and resolve the required keys.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let attributes = parse_attributes(text)?;

        let encoding_name = required(&attributes, KEY_ENCODING)?;
        let encoding = resolve_encoding(encoding_name)?;

        let separator_value = required(&attributes, KEY_SEPARATOR)?;
        let (separator, separator_byte) = resolve_separator(separator_value, encoding)?;

        let encoder: AffixEncoding = required(&attributes, KEY_ENCODER)?.parse()?;

        debug!(
            "dictionary metadata: encoding={}, separator={:?}, encoder={}",
            encoding.name(),
            separator,
            encoder
        );

        Ok(Self {
            attributes,
            encoding,
            separator,
            separator_byte,
            encoder,
        })
    }

    /// Raw value of any metadata key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All key/value pairs, as read.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// The separator as it appears in the automaton's byte sequences.
    pub fn separator_byte(&self) -> u8 {
        self.separator_byte
    }

    pub fn encoder(&self) -> AffixEncoding {
        self.encoder
    }
}

fn parse_attributes(text: &str) -> Result<HashMap<String, String>, MetadataError> {
    let mut attributes = HashMap::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(MetadataError::MalformedLine {
                line: i + 1,
                content: line.to_string(),
            });
        };
        attributes.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(attributes)
}

fn required<'a>(
    attributes: &'a HashMap<String, String>,
    key: &'static str,
) -> Result<&'a str, MetadataError> {
    attributes
        .get(key)
        .map(String::as_str)
        .ok_or(MetadataError::MissingKey(key))
}

/// Resolve an encoding name through the alias table, then WHATWG labels.
///
/// WHATWG maps `iso-8859-1` and `latin1` to windows-1252, a superset.
/// Encodings that are not ASCII-compatible (UTF-16, ISO-2022-JP, replacement)
/// are rejected: `encoding_rs` encodes into them as UTF-8, so words and
/// entries would disagree.
fn resolve_encoding(name: &str) -> Result<&'static Encoding, MetadataError> {
    let lower = name.to_ascii_lowercase();
    let label = ENCODING_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map_or(name, |(_, canonical)| *canonical);
    Encoding::for_label(label.as_bytes())
        .filter(|encoding| encoding.is_ascii_compatible())
        .ok_or_else(|| MetadataError::UnknownEncoding(name.to_string()))
}

fn resolve_separator(
    value: &str,
    encoding: &'static Encoding,
) -> Result<(char, u8), MetadataError> {
    let mut chars = value.chars();
    let (Some(separator), None) = (chars.next(), chars.next()) else {
        return Err(MetadataError::InvalidSeparator(value.to_string()));
    };
    let (bytes, _, had_errors) = encoding.encode(value);
    match (had_errors, bytes.as_ref()) {
        (false, &[byte]) => Ok((separator, byte)),
        _ => Err(MetadataError::InvalidSeparator(value.to_string())),
    }
}
