// CFSA2: compressed automaton with a label table and v-int addresses.
//
// Variant header (after magic + version):
// - u16 big-endian flags (bit 8: nodes are prefixed with a v-int count)
// - one byte: label table size
// - the label table (index 0 unused)
//
// Arc layout:
// - flags byte: label index (bits 0-4), final (5), last (6), target-next (7)
// - explicit label byte when the label index is 0
// - v-int destination unless target-next is set

use log::debug;

use crate::bytes;
use crate::header::{self, FsaVersion, HEADER_SIZE};
use crate::{Fsa, FsaError};

/// Header flag: every node starts with a v-int (size of its right language).
pub const NUMBERS: u16 = 1 << 8;

/// The destination node follows the last arc of this node.
pub const BIT_TARGET_NEXT: u8 = 1 << 7;
/// The arc is the last one of its node.
pub const BIT_LAST_ARC: u8 = 1 << 6;
/// The arc completes a stored sequence.
pub const BIT_FINAL_ARC: u8 = 1 << 5;

/// Bits of the flags byte holding the label table index.
pub const LABEL_INDEX_BITS: u32 = 5;
pub const LABEL_INDEX_MASK: u8 = (1 << LABEL_INDEX_BITS) - 1;

/// Compressed CFSA2 automaton.
pub struct Cfsa2 {
    arcs: Vec<u8>,
    labels: Vec<u8>,
    flags: u16,
    numbered: bool,
    root: usize,
}

impl std::fmt::Debug for Cfsa2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cfsa2")
            .field("arc_bytes", &self.arcs.len())
            .field("label_table_size", &self.labels.len())
            .field("flags", &format_args!("{:#06x}", self.flags))
            .field("numbered", &self.numbered)
            .field("root", &self.root)
            .finish()
    }
}

impl Cfsa2 {
    /// Load from a complete automaton file (magic and version included).
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        let version = header::parse_header(data)?;
        if version != FsaVersion::Cfsa2 {
            return Err(FsaError::VersionMismatch {
                expected: FsaVersion::Cfsa2,
                actual: version,
            });
        }
        Self::from_body(&data[HEADER_SIZE..])
    }

    /// Load from the bytes following the common header.
    pub fn from_body(body: &[u8]) -> Result<Self, FsaError> {
        if body.len() < 3 {
            return Err(FsaError::TooShort {
                expected: HEADER_SIZE + 3,
                actual: HEADER_SIZE + body.len(),
            });
        }

        let flags = u16::from_be_bytes([body[0], body[1]]);
        let label_count = body[2] as usize;
        let arcs_start = 3 + label_count;

        if body.len() <= arcs_start {
            return Err(FsaError::TooShort {
                expected: HEADER_SIZE + arcs_start + 1,
                actual: HEADER_SIZE + body.len(),
            });
        }

        let mut fsa = Self {
            arcs: body[arcs_start..].to_vec(),
            labels: body[3..arcs_start].to_vec(),
            flags,
            numbered: flags & NUMBERS != 0,
            root: 0,
        };
        fsa.root = fsa.locate_root()?;

        debug!(
            "loaded CFSA2 automaton: {} arc bytes, {} labels, numbered={}",
            fsa.arcs.len(),
            fsa.labels.len(),
            fsa.numbered
        );

        Ok(fsa)
    }

    /// Raw header flags.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Whether nodes carry a v-int prefix.
    pub fn is_numbered(&self) -> bool {
        self.numbered
    }

    /// The label lookup table (index 0 unused).
    pub fn label_table(&self) -> &[u8] {
        &self.labels
    }

    /// Offset 0 holds a pseudo node whose single arc leads to the root.
    fn locate_root(&self) -> Result<usize, FsaError> {
        let arc = if self.numbered {
            self.v_int_end(0)?
        } else {
            0
        };
        let Some(&flags) = self.arcs.get(arc) else {
            return Err(self.too_short(arc + 1));
        };

        let mut end = arc + 1;
        if flags & LABEL_INDEX_MASK == 0 {
            end += 1;
        }
        if end > self.arcs.len() {
            return Err(self.too_short(end));
        }
        if flags & BIT_TARGET_NEXT == 0 {
            self.v_int_end(end)?;
        } else if flags & BIT_LAST_ARC == 0 {
            return Err(FsaError::InvalidHeader(
                "CFSA2 root arc is not the last arc of its node".to_string(),
            ));
        }

        Ok(self.end_node(arc))
    }

    /// Offset past the v-int at `offset`, checking it ends inside the buffer.
    fn v_int_end(&self, offset: usize) -> Result<usize, FsaError> {
        let signed = bytes::as_signed(&self.arcs);
        let mut pos = offset;
        loop {
            let Some(&b) = signed.get(pos) else {
                return Err(self.too_short(pos + 1));
            };
            pos += 1;
            if b >= 0 {
                return Ok(pos);
            }
        }
    }

    fn too_short(&self, arc_bytes: usize) -> FsaError {
        let header = HEADER_SIZE + 3 + self.labels.len();
        FsaError::TooShort {
            expected: header + arc_bytes,
            actual: header + self.arcs.len(),
        }
    }

    #[inline]
    fn is_next_set(&self, arc: usize) -> bool {
        self.arcs[arc] & BIT_TARGET_NEXT != 0
    }

    /// Offset just past the arc's encoded bytes.
    #[inline]
    fn skip_arc(&self, arc: usize) -> usize {
        let flags = self.arcs[arc];
        let mut offset = arc + 1;

        // Explicit label
        if flags & LABEL_INDEX_MASK == 0 {
            offset += 1;
        }

        // Explicit destination
        if flags & BIT_TARGET_NEXT == 0 {
            offset = bytes::skip_v_int(&self.arcs, offset);
        }

        offset
    }
}

impl Fsa for Cfsa2 {
    fn root_node(&self) -> usize {
        self.root
    }

    #[inline]
    fn first_arc(&self, node: usize) -> usize {
        if self.numbered {
            bytes::skip_v_int(&self.arcs, node)
        } else {
            node
        }
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
        let index = (self.arcs[arc] & LABEL_INDEX_MASK) as usize;
        if index > 0 {
            self.labels[index]
        } else {
            self.arcs[arc + 1]
        }
    }

    #[inline]
    fn is_arc_last(&self, arc: usize) -> bool {
        self.arcs[arc] & BIT_LAST_ARC != 0
    }

    #[inline]
    fn is_arc_final(&self, arc: usize) -> bool {
        self.arcs[arc] & BIT_FINAL_ARC != 0
    }

    fn end_node(&self, arc: usize) -> usize {
        if self.is_next_set(arc) {
            // The destination starts right after the last sibling.
            let mut last = arc;
            while !self.is_arc_last(last) {
                last = self.next_arc(last);
            }
            self.skip_arc(last)
        } else {
            // v-int after the flags byte, or after the explicit label
            let explicit = self.arcs[arc] & LABEL_INDEX_MASK == 0;
            bytes::read_v_int(&self.arcs, arc + if explicit { 2 } else { 1 })
        }
    }
}
