// Walking an input sequence through the automaton.

use crate::Fsa;

/// How far an input sequence matched the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Not even the first byte has an arc.
    No,
    /// The automaton diverges from the input after a shared prefix, or a
    /// stored sequence ends before the input does.
    AutomatonHasPrefix,
    /// The input ends on a final arc.
    Exact,
    /// The input was fully consumed and stored sequences continue from the
    /// node reached.
    SequenceIsAPrefix,
}

/// Result of [`match_sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub kind: MatchKind,
    /// Index into the input where matching stopped.
    pub index: usize,
    /// Node where matching stopped.
    pub node: usize,
}

impl MatchResult {
    fn new(kind: MatchKind, index: usize, node: usize) -> Self {
        Self { kind, index, node }
    }
}

/// Match `sequence` against `fsa` starting at `node`.
///
/// Only [`MatchKind::SequenceIsAPrefix`] carries a node from which the
/// continuation of the input can be read; the other kinds report the node
/// where the last lookup happened.
pub fn match_sequence<F: Fsa + ?Sized>(fsa: &F, sequence: &[u8], mut node: usize) -> MatchResult {
    if node == 0 {
        return MatchResult::new(MatchKind::No, 0, node);
    }

    for (i, &label) in sequence.iter().enumerate() {
        let arc = fsa.find_arc(node, label);

        if arc == 0 {
            let kind = if i == 0 {
                MatchKind::No
            } else {
                MatchKind::AutomatonHasPrefix
            };
            return MatchResult::new(kind, i, node);
        }

        if i + 1 == sequence.len() && fsa.is_arc_final(arc) {
            return MatchResult::new(MatchKind::Exact, i, node);
        }

        if fsa.is_arc_terminal(arc) {
            return MatchResult::new(MatchKind::AutomatonHasPrefix, i + 1, node);
        }

        node = fsa.end_node(arc);
    }

    MatchResult::new(MatchKind::SequenceIsAPrefix, sequence.len(), node)
}
