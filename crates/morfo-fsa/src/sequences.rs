// Iterative enumeration of the sequences stored below a node.
//
// The traversal keeps an explicit stack with one arc cursor per depth and a
// label buffer indexed the same way. Depth equals the length of the longest
// stored sequence, so recursion is never used.

use std::iter::FusedIterator;

use crate::Fsa;

/// Lazy, single-pass enumeration of every final path from a node.
///
/// Use [`advance`](Self::advance) to borrow each sequence without
/// allocating, or iterate to receive owned `Vec<u8>`s.
pub struct ByteSequences<'a, F: Fsa + ?Sized> {
    fsa: &'a F,
    /// Next arc to visit at each depth (`0` once the depth is exhausted).
    arcs: Vec<usize>,
    /// Labels along the current path.
    buffer: Vec<u8>,
}

impl<'a, F: Fsa + ?Sized> ByteSequences<'a, F> {
    /// Start enumerating the sequences reachable from `node`.
    pub fn new(fsa: &'a F, node: usize) -> Self {
        let mut arcs = Vec::with_capacity(16);
        if node != 0 {
            let first = fsa.first_arc(node);
            if first != 0 {
                arcs.push(first);
            }
        }
        Self {
            fsa,
            arcs,
            buffer: Vec::with_capacity(16),
        }
    }

    /// Produce the next sequence, borrowed from the internal buffer.
    pub fn advance(&mut self) -> Option<&[u8]> {
        while let Some(&arc) = self.arcs.last() {
            let depth = self.arcs.len() - 1;

            if arc == 0 {
                // All arcs at this depth visited.
                self.arcs.pop();
                continue;
            }

            // Move the cursor to the sibling but keep the frame, so the
            // stack depth still matches the path length.
            self.arcs[depth] = self.fsa.next_arc(arc);

            self.buffer.truncate(depth);
            self.buffer.push(self.fsa.arc_label(arc));

            let end = self.fsa.end_node(arc);
            if end != 0 {
                self.arcs.push(self.fsa.first_arc(end));
            }

            if self.fsa.is_arc_final(arc) {
                return Some(&self.buffer);
            }
        }
        None
    }
}

impl<F: Fsa + ?Sized> Iterator for ByteSequences<'_, F> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        self.advance().map(<[u8]>::to_vec)
    }
}

impl<F: Fsa + ?Sized> FusedIterator for ByteSequences<'_, F> {}

impl<F: Fsa + ?Sized> std::fmt::Debug for ByteSequences<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteSequences")
            .field("depth", &self.arcs.len())
            .field("buffer", &self.buffer)
            .finish()
    }
}
