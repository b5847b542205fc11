//! Huffman tree construction
//!
//! The forest is kept as a weight-ordered list rather than a heap so that
//! ties resolve the same way on every run: leaves start in first-seen order,
//! and a merged node is inserted ahead of any node of equal weight.

use crate::error::CodecError;
use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        zero: Box<Node>,
        one: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// `a` becomes branch 0, `b` branch 1.
    fn merge(a: Node, b: Node) -> Node {
        Node::Internal {
            weight: a.weight() + b.weight(),
            zero: Box::new(a),
            one: Box::new(b),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: Node,
}

impl HuffmanTree {
    pub fn build(freq: &FrequencyTable) -> Result<Self, CodecError> {
        if freq.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut forest: Vec<Node> = freq
            .iter()
            .map(|(symbol, weight)| Node::Leaf { symbol, weight })
            .collect();
        // stable: equal weights keep first-seen order
        forest.sort_by_key(Node::weight);

        while forest.len() > 1 {
            let a = forest.remove(0);
            let b = forest.remove(0);
            let merged = Node::merge(a, b);
            let at = forest
                .iter()
                .position(|n| n.weight() >= merged.weight())
                .unwrap_or(forest.len());
            forest.insert(at, merged);
        }

        let root = forest.pop().ok_or(CodecError::EmptyInput)?;
        let tree = Self { root };
        tracing::debug!(
            weight = tree.weight(),
            depth = tree.depth(),
            symbols = freq.len(),
            "built huffman tree"
        );
        Ok(tree)
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { zero, one, .. } => 1 + depth_of(zero).max(depth_of(one)),
            }
        }
        depth_of(&self.root)
    }
}
