// Version dispatch: pick the variant from the header's version byte.

use std::io::Read;
use std::path::Path;

use log::debug;

use crate::header::{self, FsaVersion, HEADER_SIZE};
use crate::{Cfsa2, Fsa, Fsa5, FsaError};

/// An automaton loaded from a file of any supported version.
///
/// The variant is chosen once at load time. Hot loops should match on the
/// enum once and run generic code over the concrete type; the [`Fsa`] impl on
/// `Automaton` itself dispatches on every call.
#[derive(Debug)]
pub enum Automaton {
    Fsa5(Fsa5),
    Cfsa2(Cfsa2),
}

macro_rules! dispatch {
    ($self:expr, $fsa:ident => $body:expr) => {
        match $self {
            Automaton::Fsa5($fsa) => $body,
            Automaton::Cfsa2($fsa) => $body,
        }
    };
}

impl Automaton {
    /// Load an automaton from the complete file contents.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        let version = header::parse_header(data)?;
        debug!("automaton version byte {:#04x} ({})", version.byte(), version.name());

        let body = &data[HEADER_SIZE..];
        match version {
            FsaVersion::Fsa5 => Ok(Automaton::Fsa5(Fsa5::from_body(body)?)),
            FsaVersion::Cfsa2 => Ok(Automaton::Cfsa2(Cfsa2::from_body(body)?)),
            FsaVersion::Cfsa => Err(FsaError::UnsupportedVersion(version)),
        }
    }

    /// Read the whole stream and load it.
    pub fn read<R: Read>(mut reader: R) -> Result<Self, FsaError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Load an automaton file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FsaError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    pub fn version(&self) -> FsaVersion {
        match self {
            Automaton::Fsa5(_) => FsaVersion::Fsa5,
            Automaton::Cfsa2(_) => FsaVersion::Cfsa2,
        }
    }
}

impl Fsa for Automaton {
    fn root_node(&self) -> usize {
        dispatch!(self, fsa => fsa.root_node())
    }

    fn first_arc(&self, node: usize) -> usize {
        dispatch!(self, fsa => fsa.first_arc(node))
    }

    fn next_arc(&self, arc: usize) -> usize {
        dispatch!(self, fsa => fsa.next_arc(arc))
    }

    fn arc_label(&self, arc: usize) -> u8 {
        dispatch!(self, fsa => fsa.arc_label(arc))
    }

    fn is_arc_last(&self, arc: usize) -> bool {
        dispatch!(self, fsa => fsa.is_arc_last(arc))
    }

    fn is_arc_final(&self, arc: usize) -> bool {
        dispatch!(self, fsa => fsa.is_arc_final(arc))
    }

    fn end_node(&self, arc: usize) -> usize {
        dispatch!(self, fsa => fsa.end_node(arc))
    }

    fn is_arc_terminal(&self, arc: usize) -> bool {
        dispatch!(self, fsa => fsa.is_arc_terminal(arc))
    }

    fn find_arc(&self, node: usize, label: u8) -> usize {
        dispatch!(self, fsa => fsa.find_arc(node, label))
    }
}
