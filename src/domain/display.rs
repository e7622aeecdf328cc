//! Render Huffman trees as `termtree` trees for terminal display.

use termtree::Tree;

use crate::domain::entities::render_symbol;
use crate::domain::tree::{HuffNode, HuffmanTree};

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for HuffmanTree {
    fn to_tree_string(&self) -> Tree<String> {
        node_tree(self.root(), None)
    }
}

impl TreeDisplay for HuffNode {
    fn to_tree_string(&self) -> Tree<String> {
        node_tree(self, None)
    }
}

fn node_tree(node: &HuffNode, edge: Option<char>) -> Tree<String> {
    let edge = edge.map(|bit| format!("{}: ", bit)).unwrap_or_default();
    match node {
        HuffNode::Leaf { symbol, weight } => {
            Tree::new(format!("{}'{}' [{}]", edge, render_symbol(*symbol), weight))
        }
        HuffNode::Internal {
            weight,
            left,
            right,
        } => Tree::new(format!("{}({})", edge, weight)).with_leaves([
            node_tree(left, Some('0')),
            node_tree(right, Some('1')),
        ]),
    }
}
