//! Rooted trees as seen by the LCA engine.
//! # Overview
//! A tree type only has to implement [`TreeNodes`]: an integer slot per node, which
//! the engine fills with the node's canonical index, and a way to walk the children.
//! Children are enumerated either by index (`child(node, i)` until `None`) or by
//! first-child/next-sibling links, chosen per preprocess call with [`Traversal`].
//! A tree states which of the two it provides through [`TreeNodes::supports`];
//! the engine refuses to drive it with any other.
//! [`Tree`] is a ready-made arena tree supporting both.
use std::fmt::Debug;

/// How the children of a node are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Traversal {
    /// `child(node, 0)`, `child(node, 1)`, ... until the first `None`.
    #[default]
    IndexedChildren,
    /// `first_child(node)`, then `next_sibling` until `None`.
    FirstChildNextSibling,
}

pub trait TreeNodes {
    type Node: Copy + Eq + Debug;
    /// Whether `node` belongs to this tree. Every other method may assume it does.
    fn contains(&self, node: Self::Node) -> bool;
    /// Whether the children can be enumerated with `traversal`.
    fn supports(&self, traversal: Traversal) -> bool;
    fn node_id(&self, node: Self::Node) -> Option<usize>;
    fn set_node_id(&mut self, node: Self::Node, id: usize);
    /// The `i`-th child. `None` means the `i`-th and every later child are absent.
    /// Only called when `supports(Traversal::IndexedChildren)`.
    fn child(&self, node: Self::Node, i: usize) -> Option<Self::Node>;
    /// Only called when `supports(Traversal::FirstChildNextSibling)`.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;
    /// Only called when `supports(Traversal::FirstChildNextSibling)`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;
}

/// Index of a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub next_sibling: Option<NodeIndex>,
    node_id: Option<usize>,
}

/// Arena tree. Nodes live as long as the tree and are addressed by [`NodeIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree consisting of the root only.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::default());
        Self { nodes }
    }
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn reserve_children(&mut self, parent: NodeIndex, additional: usize) {
        self.nodes[parent.0].children.reserve(additional);
    }
    /// Append a new last child to `parent` and return it.
    pub fn append_child(&mut self, parent: NodeIndex) -> NodeIndex {
        let child = NodeIndex(self.nodes.len());
        if let Some(&last) = self.nodes[parent.0].children.last() {
            self.nodes[last.0].next_sibling = Some(child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes.push(Node {
            parent: Some(parent),
            ..Node::default()
        });
        child
    }
    pub fn node(&self, node: NodeIndex) -> &Node {
        &self.nodes[node.0]
    }
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node.0].parent
    }
    pub fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.nodes[node.0].children
    }
    /// All nodes in creation order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }
    pub fn depth(&self, node: NodeIndex) -> usize {
        std::iter::successors(self.parent(node), |&p| self.parent(p)).count()
    }
}

impl TreeNodes for Tree {
    type Node = NodeIndex;
    fn contains(&self, node: NodeIndex) -> bool {
        node.0 < self.nodes.len()
    }
    fn supports(&self, _traversal: Traversal) -> bool {
        true
    }
    fn node_id(&self, node: NodeIndex) -> Option<usize> {
        self.nodes.get(node.0).and_then(|n| n.node_id)
    }
    fn set_node_id(&mut self, node: NodeIndex, id: usize) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.node_id = Some(id);
        }
    }
    fn child(&self, node: NodeIndex, i: usize) -> Option<NodeIndex> {
        self.nodes.get(node.0)?.children.get(i).copied()
    }
    fn first_child(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.child(node, 0)
    }
    fn next_sibling(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes.get(node.0)?.next_sibling
    }
}
