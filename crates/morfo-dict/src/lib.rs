//! Word-form dictionary lookup.
//!
//! A dictionary is a pair of files: `NAME.info` (metadata) and `NAME.dict`
//! (an FSA automaton). Every stored sequence has the shape
//! `inflected SEP encoded-base SEP tags`, where the encoded base form is a
//! truncation-coded diff against the inflected word (see [`affix`]).
//!
//! ```no_run
//! use morfo_dict::Dictionary;
//!
//! let dictionary = Dictionary::open("dicts/english")?;
//! if let Some(words) = dictionary.lookup("meowing")? {
//!     for word in words {
//!         println!("{} {}", word.stem, word.tags);
//!     }
//! }
//! # Ok::<(), morfo_dict::DictionaryError>(())
//! ```

use std::path::PathBuf;

use morfo_core::MetadataError;
use morfo_fsa::FsaError;

pub mod affix;
pub mod dictionary;

pub use dictionary::Dictionary;
pub use morfo_core::{AffixEncoding, DictionaryMetadata, Word};

/// Error type for opening dictionaries and decoding their entries.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The `.info` file is missing or declares an unusable configuration.
    #[error("invalid dictionary metadata: {0}")]
    Metadata(#[from] MetadataError),

    /// The `.dict` file could not be loaded.
    #[error("failed to load automaton {path}: {source}")]
    AutomatonFile {
        path: PathBuf,
        #[source]
        source: FsaError,
    },

    /// In-memory automaton data could not be parsed.
    #[error("failed to load automaton: {0}")]
    Automaton(#[from] FsaError),

    /// An entry uses truncation count 255 ("remove the whole word").
    #[error("truncation count 255 (remove the whole word) is not supported")]
    UnsupportedTruncation,

    /// An entry does not fit the word it was found for.
    #[error("malformed dictionary entry: {0}")]
    MalformedEntry(&'static str),
}
