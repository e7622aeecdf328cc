//! Min-priority queue of partial trees.
//!
//! Entries are ordered by `(weight, sequence)`. The sequence number is
//! assigned on push and never reused, so equal weights pop in insertion
//! order and the merge result depends only on the push order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::tree::HuffNode;

#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    sequence: u64,
    node: HuffNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse so the lightest, oldest entry is on top
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Default)]
pub struct NodeQueue {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,
}

impl NodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: HuffNode) {
        let entry = QueueEntry {
            weight: node.weight(),
            sequence: self.next_sequence,
            node,
        };
        self.next_sequence += 1;
        self.heap.push(entry);
    }

    pub fn pop(&mut self) -> Option<HuffNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lightest_first() {
        let mut queue = NodeQueue::new();
        queue.push(HuffNode::leaf(b'a', 7));
        queue.push(HuffNode::leaf(b'b', 2));
        queue.push(HuffNode::leaf(b'c', 5));
        let weights: Vec<u64> = std::iter::from_fn(|| queue.pop().map(|n| n.weight())).collect();
        assert_eq!(weights, vec![2, 5, 7]);
    }

    #[test]
    fn test_equal_weights_pop_in_insertion_order() {
        let mut queue = NodeQueue::new();
        queue.push(HuffNode::leaf(b'x', 1));
        queue.push(HuffNode::leaf(b'b', 1));
        queue.push(HuffNode::merge(HuffNode::leaf(b'p', 0), HuffNode::leaf(b'q', 1)));
        queue.push(HuffNode::leaf(b'a', 1));

        let mut order = Vec::new();
        while let Some(node) = queue.pop() {
            order.push(match node {
                HuffNode::Leaf { symbol, .. } => symbol as char,
                HuffNode::Internal { .. } => '*',
            });
        }
        assert_eq!(order, vec!['x', 'b', '*', 'a']);
    }
}
