// FSA5: automaton with fixed-width arc addresses.
//
// Variant header (after magic + version):
// - filler byte
// - annotation byte
// - one byte: node data length (high nibble), address width "gtl" (low nibble)
//
// Arc layout:
// - label byte
// - flags in the low 3 bits of the next byte (final, last, target-next)
// - unless target-next is set, that same byte starts a `gtl`-byte
//   little-endian address whose low 3 bits are the flags

use log::debug;

use crate::bytes;
use crate::header::{self, FsaVersion, HEADER_SIZE};
use crate::{Fsa, FsaError};

/// The arc completes a stored sequence.
pub const BIT_FINAL_ARC: u8 = 1 << 0;
/// The arc is the last one of its node.
pub const BIT_LAST_ARC: u8 = 1 << 1;
/// The destination node follows this arc directly; no address is stored.
pub const BIT_TARGET_NEXT: u8 = 1 << 2;

/// Offset of the flags/address field relative to the arc.
const ADDRESS_OFFSET: usize = 1;

/// Size of the FSA5-specific header.
const VARIANT_HEADER_SIZE: usize = 3;

/// Fixed-width FSA5 automaton.
pub struct Fsa5 {
    arcs: Vec<u8>,
    filler: u8,
    annotation: u8,
    node_data_length: usize,
    gtl: usize,
    root: usize,
}

impl std::fmt::Debug for Fsa5 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsa5")
            .field("arc_bytes", &self.arcs.len())
            .field("node_data_length", &self.node_data_length)
            .field("gtl", &self.gtl)
            .field("root", &self.root)
            .finish()
    }
}

impl Fsa5 {
    /// Load from a complete automaton file (magic and version included).
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        let version = header::parse_header(data)?;
        if version != FsaVersion::Fsa5 {
            return Err(FsaError::VersionMismatch {
                expected: FsaVersion::Fsa5,
                actual: version,
            });
        }
        Self::from_body(&data[HEADER_SIZE..])
    }

    /// Load from the bytes following the common header.
    pub fn from_body(body: &[u8]) -> Result<Self, FsaError> {
        if body.len() < VARIANT_HEADER_SIZE {
            return Err(FsaError::TooShort {
                expected: HEADER_SIZE + VARIANT_HEADER_SIZE,
                actual: HEADER_SIZE + body.len(),
            });
        }

        let filler = body[0];
        let annotation = body[1];
        let hgtl = body[2];
        let node_data_length = ((hgtl >> 4) & 0x0F) as usize;
        let gtl = (hgtl & 0x0F) as usize;

        if gtl == 0 || gtl > size_of::<usize>() {
            return Err(FsaError::InvalidHeader(format!(
                "unsupported FSA5 address width {gtl}"
            )));
        }

        let mut fsa = Self {
            arcs: body[VARIANT_HEADER_SIZE..].to_vec(),
            filler,
            annotation,
            node_data_length,
            gtl,
            root: 0,
        };
        fsa.root = fsa.locate_root()?;

        debug!(
            "loaded FSA5 automaton: {} arc bytes, gtl={}, node data length={}",
            fsa.arcs.len(),
            fsa.gtl,
            fsa.node_data_length
        );

        Ok(fsa)
    }

    pub fn filler(&self) -> u8 {
        self.filler
    }

    pub fn annotation(&self) -> u8 {
        self.annotation
    }

    pub fn node_data_length(&self) -> usize {
        self.node_data_length
    }

    /// Width of arc addresses in bytes.
    pub fn gtl(&self) -> usize {
        self.gtl
    }

    /// The file stores a dummy terminal node at offset 0 and an epsilon node
    /// right after it; the epsilon node's only arc leads to the real root.
    fn locate_root(&self) -> Result<usize, FsaError> {
        let dummy = self.first_arc(0);
        self.ensure_arc(dummy)?;
        let epsilon = self.first_arc(self.skip_arc(dummy));
        self.ensure_arc(epsilon)?;
        Ok(self.end_node(epsilon))
    }

    fn ensure_arc(&self, arc: usize) -> Result<(), FsaError> {
        let expected = if arc + ADDRESS_OFFSET < self.arcs.len() {
            self.skip_arc(arc)
        } else {
            arc + ADDRESS_OFFSET + 1
        };
        if expected > self.arcs.len() {
            return Err(FsaError::TooShort {
                expected: HEADER_SIZE + VARIANT_HEADER_SIZE + expected,
                actual: HEADER_SIZE + VARIANT_HEADER_SIZE + self.arcs.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn flags(&self, arc: usize) -> u8 {
        self.arcs[arc + ADDRESS_OFFSET]
    }

    #[inline]
    fn is_next_set(&self, arc: usize) -> bool {
        self.flags(arc) & BIT_TARGET_NEXT != 0
    }

    /// Offset just past the arc's encoded bytes.
    #[inline]
    fn skip_arc(&self, arc: usize) -> usize {
        if self.is_next_set(arc) {
            // label + flags
            arc + 2
        } else {
            // label + flags/address
            arc + 1 + self.gtl
        }
    }
}

impl Fsa for Fsa5 {
    fn root_node(&self) -> usize {
        self.root
    }

    #[inline]
    fn first_arc(&self, node: usize) -> usize {
        node + self.node_data_length
    }

    #[inline]
    fn next_arc(&self, arc: usize) -> usize {
        if self.is_arc_last(arc) {
            0
        } else {
            self.skip_arc(arc)
        }
    }

    #[inline]
    fn arc_label(&self, arc: usize) -> u8 {
        self.arcs[arc]
    }

    #[inline]
    fn is_arc_last(&self, arc: usize) -> bool {
        self.flags(arc) & BIT_LAST_ARC != 0
    }

    #[inline]
    fn is_arc_final(&self, arc: usize) -> bool {
        self.flags(arc) & BIT_FINAL_ARC != 0
    }

    #[inline]
    fn end_node(&self, arc: usize) -> usize {
        if self.is_next_set(arc) {
            self.skip_arc(arc)
        } else {
            bytes::read_le(&self.arcs, arc + ADDRESS_OFFSET, self.gtl) >> 3
        }
    }
}
