// Dictionary: metadata + automaton, and the word lookup built on top.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use morfo_core::{DictionaryMetadata, Word};
use morfo_fsa::{Automaton, Fsa, MatchKind};

use crate::{DictionaryError, affix};

/// A loaded word-form dictionary.
///
/// Immutable after construction; lookups take `&self` and can run from
/// several threads at once.
pub struct Dictionary {
    metadata: DictionaryMetadata,
    automaton: Automaton,
    path: Option<PathBuf>,
}

impl Dictionary {
    /// Open `PATH.info` and `PATH.dict`.
    ///
    /// The suffixes are appended, so `dicts/english` reads
    /// `dicts/english.info` and `dicts/english.dict`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let base = path.as_ref();
        let info_path = with_suffix(base, ".info");
        let dict_path = with_suffix(base, ".dict");

        let metadata = DictionaryMetadata::read(&info_path)?;
        let automaton =
            Automaton::open(&dict_path).map_err(|source| DictionaryError::AutomatonFile {
                path: dict_path.clone(),
                source,
            })?;
        debug!(
            "opened dictionary {} ({})",
            base.display(),
            automaton.version().name()
        );

        Ok(Self {
            metadata,
            automaton,
            path: Some(base.to_path_buf()),
        })
    }

    /// Build a dictionary from in-memory `.info` text and `.dict` bytes.
    pub fn from_bytes(info: &str, dict: &[u8]) -> Result<Self, DictionaryError> {
        let metadata = DictionaryMetadata::parse(info)?;
        let automaton = Automaton::from_bytes(dict)?;
        Ok(Self::from_parts(metadata, automaton))
    }

    pub fn from_parts(metadata: DictionaryMetadata, automaton: Automaton) -> Self {
        Self {
            metadata,
            automaton,
            path: None,
        }
    }

    pub fn metadata(&self) -> &DictionaryMetadata {
        &self.metadata
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Base path given to [`open`](Self::open), if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Look up every base form and tag string stored for `word`.
    ///
    /// Returns `Ok(None)` when the word is not in the dictionary, including
    /// words that cannot be represented in the dictionary's encoding.
    /// Results come in automaton order. Entries that do not fit the word
    /// (truncating more than it has) are skipped; a word left with no
    /// readings is absent. The only error is an entry using the unsupported
    /// truncation count 255.
    pub fn lookup(&self, word: &str) -> Result<Option<Vec<Word>>, DictionaryError> {
        let (encoded, _, unmappable) = self.metadata.encoding().encode(word);
        if unmappable {
            trace!(
                "{word:?} is not representable in {}",
                self.metadata.encoding().name()
            );
            return Ok(None);
        }

        match &self.automaton {
            Automaton::Fsa5(fsa) => self.lookup_in(fsa, &encoded),
            Automaton::Cfsa2(fsa) => self.lookup_in(fsa, &encoded),
        }
    }

    fn lookup_in<F: Fsa>(&self, fsa: &F, word: &[u8]) -> Result<Option<Vec<Word>>, DictionaryError> {
        let matched = fsa.match_sequence(word);
        if matched.kind != MatchKind::SequenceIsAPrefix {
            trace!("no entry for {word:?}: {:?}", matched.kind);
            return Ok(None);
        }

        // The inflected form must be followed by the separator, otherwise
        // the input is only a prefix of some longer stored word.
        let arc = fsa.find_arc(matched.node, self.metadata.separator_byte());
        if arc == 0 || fsa.is_arc_final(arc) || fsa.is_arc_terminal(arc) {
            trace!("no separator after {word:?}");
            return Ok(None);
        }

        let encoder = self.metadata.encoder();
        let encoding = self.metadata.encoding();
        let separator = self.metadata.separator();

        let mut words = Vec::new();
        let mut decoded = Vec::new();
        let mut entries = fsa.sequences_from(fsa.end_node(arc));
        while let Some(entry) = entries.advance() {
            match affix::decode(encoder, word, entry, &mut decoded) {
                Ok(()) => {}
                Err(DictionaryError::MalformedEntry(reason)) => {
                    trace!("skipping entry {entry:?} for {word:?}: {reason}");
                    continue;
                }
                Err(e) => return Err(e),
            }
            let (text, _) = encoding.decode_without_bom_handling(&decoded);
            words.push(Word::from_entry(&text, separator));
        }

        if words.is_empty() {
            return Ok(None);
        }
        Ok(Some(words))
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("path", &self.path)
            .field("version", &self.automaton.version())
            .field("encoding", &self.metadata.encoding().name())
            .field("separator", &self.metadata.separator())
            .field("encoder", &self.metadata.encoder())
            .finish()
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
