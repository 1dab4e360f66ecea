//! Serializers for small automata, for tests and benchmarks.
//!
//! The input set is stored as a plain trie (no suffix sharing), which is a
//! valid but unminimized automaton. Nodes are laid out in pre-order with the
//! child of each node's last arc placed right after the node, so that arc can
//! use the target-next encoding.

use hashbrown::HashMap;

use crate::header::{FsaVersion, MAGIC};
use crate::{bytes, cfsa2, fsa5};

/// Layout choices for [`write_cfsa2`].
#[derive(Debug, Clone, Copy)]
pub struct Cfsa2Options {
    /// Replace up to 31 most frequent labels with a table index.
    pub label_table: bool,
    /// Prefix every node with a v-int count of the sequences below it.
    pub numbered: bool,
    /// Encode the last arc's destination as "follows this node".
    pub target_next: bool,
}

impl Default for Cfsa2Options {
    fn default() -> Self {
        Self {
            label_table: true,
            numbered: false,
            target_next: true,
        }
    }
}

/// Layout choices for [`write_fsa5`].
#[derive(Debug, Clone, Copy)]
pub struct Fsa5Options {
    /// Bytes of per-node data (a big-endian sequence count, truncated).
    pub node_data_length: u8,
    /// Encode the last arc's destination as "follows this arc".
    pub target_next: bool,
}

impl Default for Fsa5Options {
    fn default() -> Self {
        Self {
            node_data_length: 0,
            target_next: true,
        }
    }
}

struct TrieArc {
    label: u8,
    is_final: bool,
    target: Option<usize>,
}

struct Trie {
    nodes: Vec<Vec<TrieArc>>,
    /// Pre-order node sequence; the last arc's child directly follows its parent.
    order: Vec<usize>,
    /// Number of sequences stored below each node.
    counts: Vec<usize>,
}

impl Trie {
    fn build<S: AsRef<[u8]>>(sequences: &[S]) -> Self {
        let mut sorted: Vec<&[u8]> = sequences
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut nodes: Vec<Vec<TrieArc>> = vec![Vec::new()];
        for seq in sorted {
            let mut node = 0;
            for (i, &label) in seq.iter().enumerate() {
                let is_last_byte = i + 1 == seq.len();
                // Input is sorted, so an existing arc for `label` is always the last one.
                let reuse = nodes[node].last().is_some_and(|a| a.label == label);
                if !reuse {
                    nodes[node].push(TrieArc {
                        label,
                        is_final: false,
                        target: None,
                    });
                }
                let arc_index = nodes[node].len() - 1;
                if is_last_byte {
                    nodes[node][arc_index].is_final = true;
                    break;
                }
                let existing = nodes[node][arc_index].target;
                node = match existing {
                    Some(target) => target,
                    None => {
                        nodes.push(Vec::new());
                        let target = nodes.len() - 1;
                        nodes[node][arc_index].target = Some(target);
                        target
                    }
                };
            }
        }

        let mut order = Vec::with_capacity(nodes.len());
        let mut stack = vec![0usize];
        while let Some(node) = stack.pop() {
            order.push(node);
            let targets: Vec<usize> = nodes[node].iter().filter_map(|a| a.target).collect();
            let last_target = nodes[node].last().and_then(|a| a.target);
            for &t in targets.iter().rev() {
                if Some(t) != last_target {
                    stack.push(t);
                }
            }
            if let Some(t) = last_target {
                stack.push(t);
            }
        }

        let mut counts = vec![0usize; nodes.len()];
        for &node in order.iter().rev() {
            counts[node] = nodes[node]
                .iter()
                .map(|a| usize::from(a.is_final) + a.target.map_or(0, |t| counts[t]))
                .sum();
        }

        Self {
            nodes,
            order,
            counts,
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes[0].is_empty()
    }

    /// Whether `arc_index` of `node` can use the target-next encoding.
    fn follows(&self, node: usize, arc_index: usize) -> bool {
        let arcs = &self.nodes[node];
        arc_index + 1 == arcs.len() && arcs[arc_index].target.is_some()
    }
}

/// Serialize `sequences` as a CFSA2 automaton file.
pub fn write_cfsa2<S: AsRef<[u8]>>(sequences: &[S], options: Cfsa2Options) -> Vec<u8> {
    let trie = Trie::build(sequences);
    let labels = if options.label_table {
        label_table(&trie)
    } else {
        Vec::new()
    };
    let label_index: HashMap<u8, u8> = labels
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, &l)| (l, i as u8))
        .collect();

    // Addresses change v-int widths, which move addresses; iterate to a fixpoint.
    let mut offsets = vec![0usize; trie.nodes.len()];
    let arcs = loop {
        let (arcs, next_offsets) = emit_cfsa2(&trie, &label_index, &offsets, options);
        if next_offsets == offsets {
            break arcs;
        }
        offsets = next_offsets;
    };

    let mut flags: u16 = 0x0007;
    if options.numbered {
        flags |= cfsa2::NUMBERS;
    }

    let mut data = MAGIC.to_vec();
    data.push(FsaVersion::Cfsa2.byte());
    data.extend_from_slice(&flags.to_be_bytes());
    data.push(labels.len() as u8);
    data.extend_from_slice(&labels);
    data.extend_from_slice(&arcs);
    data
}

fn label_table(trie: &Trie) -> Vec<u8> {
    let mut frequency: HashMap<u8, usize> = HashMap::new();
    for arcs in &trie.nodes {
        for arc in arcs {
            *frequency.entry(arc.label).or_insert(0) += 1;
        }
    }
    let mut by_frequency: Vec<(u8, usize)> = frequency.into_iter().collect();
    by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let max_index = cfsa2::LABEL_INDEX_MASK as usize;
    let mut table = vec![0u8];
    table.extend(by_frequency.iter().take(max_index).map(|&(label, _)| label));
    table
}

fn emit_cfsa2(
    trie: &Trie,
    label_index: &HashMap<u8, u8>,
    offsets: &[usize],
    options: Cfsa2Options,
) -> (Vec<u8>, Vec<usize>) {
    let mut out = Vec::new();
    let mut next_offsets = vec![0usize; trie.nodes.len()];

    // Pseudo node at offset 0 with a single arc to the root.
    if options.numbered {
        bytes::write_v_int(trie.counts[0], &mut out);
    }
    out.push(cfsa2::BIT_LAST_ARC);
    out.push(0);
    bytes::write_v_int(if trie.is_empty() { 0 } else { offsets[0] }, &mut out);

    if trie.is_empty() {
        return (out, next_offsets);
    }

    for &node in &trie.order {
        next_offsets[node] = out.len();
        if options.numbered {
            bytes::write_v_int(trie.counts[node], &mut out);
        }
        let arcs = &trie.nodes[node];
        for (i, arc) in arcs.iter().enumerate() {
            let index = label_index.get(&arc.label).copied().unwrap_or(0);
            let next = options.target_next && trie.follows(node, i);

            let mut flags = index;
            if arc.is_final {
                flags |= cfsa2::BIT_FINAL_ARC;
            }
            if i + 1 == arcs.len() {
                flags |= cfsa2::BIT_LAST_ARC;
            }
            if next {
                flags |= cfsa2::BIT_TARGET_NEXT;
            }

            out.push(flags);
            if index == 0 {
                out.push(arc.label);
            }
            if !next {
                bytes::write_v_int(arc.target.map_or(0, |t| offsets[t]), &mut out);
            }
        }
    }

    (out, next_offsets)
}

/// Serialize `sequences` as an FSA5 automaton file.
pub fn write_fsa5<S: AsRef<[u8]>>(sequences: &[S], options: Fsa5Options) -> Vec<u8> {
    let trie = Trie::build(sequences);

    let (gtl, arcs) = (1..=size_of::<usize>())
        .find_map(|gtl| emit_fsa5(&trie, gtl, options).map(|arcs| (gtl, arcs)))
        .expect("automaton too large for FSA5 addresses");

    let mut data = MAGIC.to_vec();
    data.push(FsaVersion::Fsa5.byte());
    data.push(b'_');
    data.push(b'+');
    data.push((options.node_data_length << 4) | gtl as u8);
    data.extend_from_slice(&arcs);
    data
}

/// Lay out the arcs with `gtl`-byte addresses, or `None` if they do not fit.
fn emit_fsa5(trie: &Trie, gtl: usize, options: Fsa5Options) -> Option<Vec<u8>> {
    let ndl = options.node_data_length as usize;
    let arc_width = |node: usize, i: usize| {
        if options.target_next && trie.follows(node, i) {
            2
        } else {
            1 + gtl
        }
    };

    // Dummy terminal node, then the epsilon node pointing at the root.
    let dummy_size = ndl + 1 + gtl;
    let epsilon_size = ndl + 1 + gtl;
    let mut offsets = vec![0usize; trie.nodes.len()];
    let mut end = dummy_size + epsilon_size;
    for &node in &trie.order {
        offsets[node] = end;
        end += ndl + (0..trie.nodes[node].len()).map(|i| arc_width(node, i)).sum::<usize>();
    }

    let max_address = (end << 3) | 0x07;
    if gtl < size_of::<usize>() && max_address >> (8 * gtl) != 0 {
        return None;
    }

    let mut out = Vec::with_capacity(end);
    let push_node_data = |out: &mut Vec<u8>, count: usize| {
        for i in (0..ndl).rev() {
            out.push(count.checked_shr(8 * i as u32).unwrap_or(0) as u8);
        }
    };
    let push_address = |out: &mut Vec<u8>, address: usize, flags: u8| {
        let value = (address << 3) | flags as usize;
        for i in 0..gtl {
            out.push((value >> (8 * i)) as u8);
        }
    };

    push_node_data(&mut out, 0);
    out.push(0);
    push_address(&mut out, 0, fsa5::BIT_LAST_ARC);

    push_node_data(&mut out, trie.counts[0]);
    out.push(b'^');
    let root = if trie.is_empty() { 0 } else { offsets[0] };
    push_address(&mut out, root, fsa5::BIT_LAST_ARC);

    if trie.is_empty() {
        return Some(out);
    }

    for &node in &trie.order {
        debug_assert_eq!(out.len(), offsets[node]);
        push_node_data(&mut out, trie.counts[node]);
        let arcs = &trie.nodes[node];
        for (i, arc) in arcs.iter().enumerate() {
            let mut flags = 0u8;
            if arc.is_final {
                flags |= fsa5::BIT_FINAL_ARC;
            }
            if i + 1 == arcs.len() {
                flags |= fsa5::BIT_LAST_ARC;
            }
            out.push(arc.label);
            if options.target_next && trie.follows(node, i) {
                out.push(flags | fsa5::BIT_TARGET_NEXT);
            } else {
                push_address(&mut out, arc.target.map_or(0, |t| offsets[t]), flags);
            }
        }
    }

    Some(out)
}
