//! Finite state automaton (FSA) engine for word-form dictionaries.
//!
//! This crate loads the binary `\fsa` automaton files used by morphological
//! dictionaries and provides arc-level navigation, sequence matching and
//! enumeration of stored byte sequences.
//!
//! # Architecture
//!
//! - [`bytes`] -- signed byte view and variable-length integers
//! - [`header`] -- magic number and version byte
//! - [`fsa5`] -- fixed-width address variant
//! - [`cfsa2`] -- compressed variant with label table and v-int addresses
//! - [`automaton`] -- version dispatch over the two variants
//! - [`matcher`] -- walking an input sequence through the automaton
//! - [`sequences`] -- iterative enumeration of stored sequences
//!
//! Arc offsets inside an automaton file are trusted: a file with a valid
//! header but corrupt arc data may cause a panic on an out-of-bounds index.

pub mod automaton;
pub mod bytes;
pub mod cfsa2;
pub mod fsa5;
pub mod header;
pub mod matcher;
pub mod sequences;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use automaton::Automaton;
pub use cfsa2::Cfsa2;
pub use fsa5::Fsa5;
pub use header::FsaVersion;
pub use matcher::{MatchKind, MatchResult};
pub use sequences::ByteSequences;

/// Error type for FSA parsing and loading.
#[derive(Debug, thiserror::Error)]
pub enum FsaError {
    #[error("failed to read automaton: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid magic number in FSA header")]
    InvalidMagic,
    #[error("data too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("unknown FSA version byte {0:#04x}")]
    UnknownVersion(u8),
    #[error("FSA version {} is not supported", .0.name())]
    UnsupportedVersion(FsaVersion),
    #[error("version mismatch: expected {}, got {}", .expected.name(), .actual.name())]
    VersionMismatch {
        expected: FsaVersion,
        actual: FsaVersion,
    },
    #[error("invalid FSA header: {0}")]
    InvalidHeader(String),
}

/// Arc navigation over an automaton's byte buffer.
///
/// Nodes and arcs are byte offsets into the buffer. Node `0` is reserved and
/// means "no destination"; an arc leading to it is terminal. `next_arc` and
/// `find_arc` return `0` when there is no such arc.
pub trait Fsa {
    /// Node from which all stored sequences start.
    fn root_node(&self) -> usize;

    /// Offset of the first outgoing arc of `node`.
    fn first_arc(&self, node: usize) -> usize;

    /// Offset of the next sibling of `arc`, or `0` if `arc` is the last one.
    fn next_arc(&self, arc: usize) -> usize;

    fn arc_label(&self, arc: usize) -> u8;

    fn is_arc_last(&self, arc: usize) -> bool;

    /// Whether traversing `arc` completes a stored sequence.
    fn is_arc_final(&self, arc: usize) -> bool;

    /// Destination node of `arc` (`0` for terminal arcs).
    fn end_node(&self, arc: usize) -> usize;

    /// Whether `arc` leads to the empty node.
    fn is_arc_terminal(&self, arc: usize) -> bool {
        self.end_node(arc) == 0
    }

    /// Find the outgoing arc of `node` labeled `label`.
    fn find_arc(&self, node: usize, label: u8) -> usize {
        let mut arc = self.first_arc(node);
        while arc != 0 {
            if self.arc_label(arc) == label {
                return arc;
            }
            arc = self.next_arc(arc);
        }
        0
    }

    /// Match `sequence` starting at the root node.
    fn match_sequence(&self, sequence: &[u8]) -> MatchResult {
        matcher::match_sequence(self, sequence, self.root_node())
    }

    /// Match `sequence` starting at `node`.
    fn match_sequence_from(&self, sequence: &[u8], node: usize) -> MatchResult {
        matcher::match_sequence(self, sequence, node)
    }

    /// Enumerate every stored sequence.
    fn sequences(&self) -> ByteSequences<'_, Self> {
        ByteSequences::new(self, self.root_node())
    }

    /// Enumerate every sequence reachable from `node`.
    fn sequences_from(&self, node: usize) -> ByteSequences<'_, Self> {
        ByteSequences::new(self, node)
    }
}
