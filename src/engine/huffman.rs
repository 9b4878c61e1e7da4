use crate::engine::freq_list::FrequencyList;
use crate::protocol::constants::{ALPHABET_SIZE, CHAR_BITS};
use crate::protocol::error::CodecError;
use crate::utils::bits::{BitReader, BitWriter};

/// Index of a node inside its tree's arena
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf { unit: u16 },
    Internal { left: NodeId, right: NodeId },
}

/// Huffman tree stored as an arena of nodes.
///
/// Every internal node has exactly two children. Construction weights live
/// only in the [`FrequencyList`] and are not kept on the nodes.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn build(text: &[u16]) -> Result<Self, CodecError> {
        if text.is_empty() {
            return Err(CodecError::InvalidArgument("empty text"));
        }

        let mut freqs = vec![0u64; ALPHABET_SIZE];
        for &unit in text {
            freqs[unit as usize] += 1;
        }

        Self::from_frequencies(&freqs)
    }

    /// Builds a tree from per-unit counts, indexed by unit value.
    pub fn from_frequencies(freqs: &[u64]) -> Result<Self, CodecError> {
        let mut nodes = Vec::new();
        let mut list = FrequencyList::new();

        for (unit, &count) in (0..=u16::MAX).zip(freqs) {
            if count > 0 {
                list.insert(nodes.len(), count);
                nodes.push(HuffmanNode::Leaf { unit });
            }
        }

        while !list.has_exactly_one() {
            let (left, left_weight) = list
                .remove_min()
                .ok_or(CodecError::InvalidArgument("no characters to build a tree from"))?;
            let (right, right_weight) = list
                .remove_min()
                .ok_or(CodecError::InvalidArgument("no characters to build a tree from"))?;

            list.insert(nodes.len(), left_weight + right_weight);
            nodes.push(HuffmanNode::Internal { left, right });
        }

        let (root, _) = list
            .remove_min()
            .ok_or(CodecError::InvalidArgument("no characters to build a tree from"))?;

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<HuffmanNode> {
        self.nodes.get(id).copied()
    }

    /// Child of an internal node; `None` for leaves.
    pub fn child(&self, id: NodeId, right: bool) -> Option<NodeId> {
        match self.node(id)? {
            HuffmanNode::Internal { left, right: r } => Some(if right { r } else { left }),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    /// The only character when the whole tree is a single leaf.
    pub fn single_unit(&self) -> Option<u16> {
        match self.node(self.root)? {
            HuffmanNode::Leaf { unit } => Some(unit),
            HuffmanNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.single_unit().is_some()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, HuffmanNode::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path; 0 for a single leaf.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Some(HuffmanNode::Internal { left, right }) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                _ => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    /// Preorder: `1` + 16-bit unit for a leaf, `0` then left and right for an internal node.
    pub fn serialize(&self, out: &mut BitWriter) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.node(id) {
                Some(HuffmanNode::Leaf { unit }) => {
                    out.push_bit(true);
                    out.push_u16(unit);
                }
                Some(HuffmanNode::Internal { left, right }) => {
                    out.push_bit(false);
                    stack.push(right);
                    stack.push(left);
                }
                None => {}
            }
        }
    }

    /// Rebuilds a tree from the bits in `start..end` of `reader`.
    ///
    /// Uses a work stack of unfilled child slots instead of recursion, so a
    /// hostile file cannot exhaust the call stack. Reading at or past `end` is
    /// a format error.
    pub fn deserialize(
        reader: &BitReader<'_>,
        start: usize,
        end: usize,
        name: &str,
    ) -> Result<Self, CodecError> {
        let overrun = || CodecError::corrupt(name, "tree overruns its declared region");

        let mut nodes: Vec<HuffmanNode> = Vec::new();
        // (parent, is_right); None is the root slot
        let mut pending: Vec<Option<(NodeId, bool)>> = vec![None];
        let mut pos = start;

        while let Some(slot) = pending.pop() {
            if pos >= end {
                return Err(overrun());
            }
            let is_leaf = reader.bit(pos).ok_or_else(overrun)?;
            pos += 1;

            let id = nodes.len();
            if is_leaf {
                if pos + CHAR_BITS as usize > end {
                    return Err(overrun());
                }
                let unit = reader.read_u16(pos).ok_or_else(overrun)?;
                pos += CHAR_BITS as usize;
                nodes.push(HuffmanNode::Leaf { unit });
            } else {
                if pos >= end {
                    return Err(overrun());
                }
                // children are patched in as they are decoded
                nodes.push(HuffmanNode::Internal { left: id, right: id });
                pending.push(Some((id, true)));
                pending.push(Some((id, false)));
            }

            if let Some((parent, is_right)) = slot {
                if let Some(HuffmanNode::Internal { left, right }) = nodes.get_mut(parent) {
                    if is_right {
                        *right = id;
                    } else {
                        *left = id;
                    }
                }
            }
        }

        Ok(Self { nodes, root: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn leaf(tree: &HuffmanTree, id: Option<NodeId>) -> u16 {
        match id.and_then(|id| tree.node(id)) {
            Some(HuffmanNode::Leaf { unit }) => unit,
            other => panic!("expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(
            HuffmanTree::build(&[]),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn single_character_is_a_leaf() {
        let tree = HuffmanTree::build(&units("aaaa")).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.single_unit(), Some(b'a' as u16));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn abracadabra_shape() {
        let tree = HuffmanTree::build(&units("abracadabra")).unwrap();
        let root = tree.root();

        // a:5 sits alone on the left, everything else under the right subtree
        assert_eq!(leaf(&tree, tree.child(root, false)), b'a' as u16);
        let right = tree.child(root, true).unwrap();
        let cd = tree.child(right, false).unwrap();
        let br = tree.child(right, true).unwrap();
        assert_eq!(leaf(&tree, tree.child(cd, false)), b'c' as u16);
        assert_eq!(leaf(&tree, tree.child(cd, true)), b'd' as u16);
        assert_eq!(leaf(&tree, tree.child(br, false)), b'b' as u16);
        assert_eq!(leaf(&tree, tree.child(br, true)), b'r' as u16);

        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn serialize_then_deserialize_keeps_shape() {
        let tree = HuffmanTree::build(&units("abracadabra")).unwrap();
        let mut bits = BitWriter::new();
        tree.serialize(&mut bits);
        // 5 leaves * 17 bits + 4 internal markers
        assert_eq!(bits.bit_len(), 89);

        let reader = BitReader::new(bits.as_slice());
        let back = HuffmanTree::deserialize(&reader, 0, bits.bit_len(), "t").unwrap();
        assert_eq!(back.leaf_count(), 5);
        assert_eq!(back.depth(), 3);

        let mut again = BitWriter::new();
        back.serialize(&mut again);
        assert_eq!(again.as_slice(), bits.as_slice());
    }

    #[test]
    fn deserialize_stops_at_region_end() {
        let tree = HuffmanTree::build(&units("abracadabra")).unwrap();
        let mut bits = BitWriter::new();
        tree.serialize(&mut bits);
        let reader = BitReader::new(bits.as_slice());

        let err = HuffmanTree::deserialize(&reader, 0, bits.bit_len() - 1, "t").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn deserialize_rejects_endless_internal_chain() {
        // all zero bits: internal markers until the region runs out
        let zeros = [0u8; 64];
        let reader = BitReader::new(&zeros);
        let err = HuffmanTree::deserialize(&reader, 0, zeros.len() * 8, "t").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn from_frequencies_ignores_zero_counts() {
        let mut freqs = vec![0u64; ALPHABET_SIZE];
        freqs[0xFFFF] = 3;
        freqs[0] = 1;
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(leaf(&tree, tree.child(tree.root(), false)), 0);
        assert_eq!(leaf(&tree, tree.child(tree.root(), true)), 0xFFFF);
    }
}
