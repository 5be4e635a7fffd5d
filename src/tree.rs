use std::cmp::Ordering;
use std::collections::HashMap;

use crate::bitvec::BitVec;
use crate::min_heap::{HeapError, MinHeap};
use crate::FrequencyTable;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {

    Parent { count: usize, left: Box<Node>, right: Box<Node> },
    Leaf { count: usize, value: u8 },

}

impl Node {

    pub const fn count(&self) -> usize {
        match self {
            Node::Parent { count, .. } |
            Node::Leaf { count, .. }
                => *count
        }
    }


    /// Joins two subtrees under a new parent. `left` ends up on the 0 branch.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Parent {
            count: left.count() + right.count(),
            left: Box::new(left),
            right: Box::new(right)
        }
    }


    fn collect_codes(&self, path: &mut BitVec, table: &mut HashMap<u8, BitVec>) {

        match self {

            Node::Parent { left, right, .. } => {

                let mut left_path = path.clone();
                left_path.append_bit(false);
                left.collect_codes(&mut left_path, table);

                path.append_bit(true);
                right.collect_codes(path, table);
            },

            Node::Leaf { value, .. } => {
                table.insert(*value, path.clone());
            },
        }
    }

}


/// A node waiting in the heap, tagged with the order it was queued in.
/// Equal counts are resolved by that order, which makes the tree shape
/// a pure function of the frequency table.
#[derive(Debug)]
struct QueuedNode {

    order: usize,
    node: Node

}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node.count().cmp(&other.node.count())
            .then(self.order.cmp(&other.order))
    }
}


/// Builds the Huffman tree for a non-empty frequency table.
///
/// Leaves are queued in ascending byte order, merged nodes are queued after
/// everything already in the heap, and the first node taken out of the heap
/// becomes the left child. Compressor and decompressor both go through here,
/// so the same table always yields the same tree.
pub fn build_tree(frequencies: &FrequencyTable) -> Result<Node, HeapError> {

    let mut heap = MinHeap::with_capacity(frequencies.len());
    let mut order = 0;

    for (&value, &count) in frequencies {
        heap.add(QueuedNode { order, node: Node::Leaf { count, value } })?;
        order += 1;
    }

    while heap.len() > 1 {

        let left = heap.remove()?;
        let right = heap.remove()?;

        heap.add(QueuedNode { order, node: Node::merge(left.node, right.node) })?;
        order += 1;
    }

    Ok(heap.remove()?.node)
}


/// Maps every leaf value to its path from `root` (left = 0, right = 1).
/// A lone leaf maps to the empty path.
pub fn code_table(root: &Node) -> HashMap<u8, BitVec> {

    let mut table = HashMap::new();

    root.collect_codes(&mut BitVec::new(), &mut table);

    table
}
