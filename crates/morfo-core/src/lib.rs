//! Shared types for morfo dictionaries.
//!
//! - [`word`] -- the `Word` lookup result (stem + tags)
//! - [`encoder`] -- affix encoding selector declared by a dictionary
//! - [`metadata`] -- the `.info` companion file of a dictionary

use std::path::PathBuf;

pub mod encoder;
pub mod metadata;
pub mod word;

pub use encoder::AffixEncoding;
pub use metadata::DictionaryMetadata;
pub use word::Word;

/// Error type for loading and resolving dictionary metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("failed to read metadata file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected key=value, got {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("missing required metadata key: {0}")]
    MissingKey(&'static str),
    #[error("unknown character encoding: {0}")]
    UnknownEncoding(String),
    #[error("affix encoder {0:?} is not supported")]
    UnknownEncoder(String),
    #[error("separator {0:?} must be a single character encoded as a single byte")]
    InvalidSeparator(String),
}
