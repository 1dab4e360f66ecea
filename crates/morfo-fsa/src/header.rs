// FSA binary format: magic number and version byte.

use crate::FsaError;

/// Magic bytes opening every automaton file: `\fsa`.
pub const MAGIC: [u8; 4] = *b"\\fsa";

/// Size of the common header (magic + version byte).
pub const HEADER_SIZE: usize = 5;

/// Automaton format versions known to the version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsaVersion {
    /// Fixed-width addresses (version byte `5`).
    Fsa5,
    /// Legacy compressed format without label table (`0xC5`). Not supported.
    Cfsa,
    /// Compressed format with label table and v-int addresses (`0xC6`).
    Cfsa2,
}

impl FsaVersion {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            5 => Some(FsaVersion::Fsa5),
            0xC5 => Some(FsaVersion::Cfsa),
            0xC6 => Some(FsaVersion::Cfsa2),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            FsaVersion::Fsa5 => 5,
            FsaVersion::Cfsa => 0xC5,
            FsaVersion::Cfsa2 => 0xC6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FsaVersion::Fsa5 => "FSA5",
            FsaVersion::Cfsa => "CFSA",
            FsaVersion::Cfsa2 => "CFSA2",
        }
    }
}

/// Validate the magic number and decode the version byte.
///
/// Extra data after the header (the variant's own header and arcs) is ignored.
pub fn parse_header(data: &[u8]) -> Result<FsaVersion, FsaError> {
    if data.len() < HEADER_SIZE {
        return Err(FsaError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    if data[..4] != MAGIC {
        return Err(FsaError::InvalidMagic);
    }

    FsaVersion::from_byte(data[4]).ok_or(FsaError::UnknownVersion(data[4]))
}
