use crate::config::MatchConfig;
use crate::primitive::{Entry, Node};

use rstar::RTree;
use std::fmt::{Debug, Formatter};

/// A point index over the nodes of a road network.
///
/// Backed by an [`RTree`], queried through the [`Scan`](crate::Scan) trait.
/// Nearest-node queries use an expanding square scan starting at
/// [initial_radius](#field.initial_radius) and doubling at most
/// [max_doublings](#field.max_doublings) times before ordering every node
/// instead, so `k` nodes are returned whenever `k` nodes exist.
pub struct NodeIndex<E>
where
    E: Entry,
{
    pub(crate) tree: RTree<Node<E>>,

    /// The radius, in meters, of the first square scan of a nearest query.
    pub initial_radius: f64,

    /// The number of times a nearest query may double its radius.
    pub max_doublings: u32,
}

impl<E> Debug for NodeIndex<E>
where
    E: Entry,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeIndex with Nodes: {}", self.tree.size())
    }
}

impl<E> Default for NodeIndex<E>
where
    E: Entry,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> NodeIndex<E>
where
    E: Entry,
{
    pub fn new() -> Self {
        let defaults = MatchConfig::default();

        Self {
            tree: RTree::new(),
            initial_radius: defaults.initial_radius,
            max_doublings: defaults.max_doublings,
        }
    }

    /// Builds the index in one pass, which produces a better
    /// balanced tree than repeated insertion.
    pub fn bulk_load(nodes: Vec<Node<E>>) -> Self {
        Self {
            tree: RTree::bulk_load(nodes),
            ..Self::new()
        }
    }

    /// Applies the nearest-query settings of a [`MatchConfig`].
    pub fn configured(self, config: &MatchConfig) -> Self {
        Self {
            initial_radius: config.initial_radius,
            max_doublings: config.max_doublings,
            ..self
        }
    }

    pub fn insert(&mut self, node: Node<E>) {
        self.tree.insert(node);
    }

    pub fn size(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node<E>> {
        self.tree.iter()
    }
}
