use crate::config::MatchConfig;
use crate::graph::NodeIndex;
use crate::primitive::{Entry, Node, Segment};

use geo::Point;
use log::{debug, info};
use petgraph::prelude::DiGraphMap;
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};
use std::time::Instant;
use thiserror::Error;

pub type GraphStructure<E> = DiGraphMap<E, Segment<E>>;

#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("segment references node {0} which was never added")]
    MissingNode(i64),

    #[error("node {0} was added more than once")]
    DuplicateNode(i64),
}

/// An in-memory, directed road network.
///
/// Segments are stored upon a [`DiGraphMap`] keyed by node identifier, with
/// every node also held in a [`NodeIndex`] for spatial lookup. The graph is
/// immutable once [built](GraphBuilder::build), and is therefore safe to
/// share between concurrent matches.
pub struct Graph<E>
where
    E: Entry,
{
    pub(crate) graph: GraphStructure<E>,
    pub(crate) hash: FxHashMap<E, Node<E>>,
    pub(crate) labels: FxHashMap<E, String>,

    pub(crate) index: NodeIndex<E>,
}

impl<E> Debug for Graph<E>
where
    E: Entry,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with Nodes: {}, Segments: {}",
            self.hash.len(),
            self.graph.edge_count()
        )
    }
}

impl<E> Graph<E>
where
    E: Entry,
{
    pub fn builder() -> GraphBuilder<E> {
        GraphBuilder::default()
    }

    pub fn index(&self) -> &NodeIndex<E> {
        &self.index
    }

    /// Applies the nearest-query settings of a [`MatchConfig`] to the node index.
    pub fn configured(self, config: &MatchConfig) -> Self {
        Self {
            index: self.index.configured(config),
            ..self
        }
    }

    pub fn size(&self) -> usize {
        self.hash.len()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn node(&self, id: &E) -> Option<Node<E>> {
        self.hash.get(id).copied()
    }

    #[inline]
    pub fn get_position(&self, id: &E) -> Option<Point> {
        self.hash.get(id).map(|node| node.position)
    }

    pub fn label(&self, id: &E) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// The segment running from `source` to `target`, if one exists.
    #[inline]
    pub fn segment(&self, source: E, target: E) -> Option<Segment<E>> {
        self.graph.edge_weight(source, target).copied()
    }
}

/// Collects nodes and segments before constructing a [`Graph`].
///
/// ```rust
/// use geo::Point;
/// use roadtrace::Graph;
///
/// let graph = Graph::<u64>::builder()
///     .node(1, Point::new(0.0, 0.0))
///     .node(2, Point::new(0.001, 0.0))
///     .road(1, 2)
///     .build()
///     .expect("graph must build");
///
/// assert_eq!(graph.segment_count(), 2);
/// ```
pub struct GraphBuilder<E>
where
    E: Entry,
{
    nodes: Vec<Node<E>>,
    labels: Vec<(E, String)>,
    segments: Vec<Connection<E>>,
}

enum Connection<E>
where
    E: Entry,
{
    Between(E, E),
    AdHoc(E, E, Point, Point),
}

impl<E> Default for GraphBuilder<E>
where
    E: Entry,
{
    fn default() -> Self {
        Self {
            nodes: vec![],
            labels: vec![],
            segments: vec![],
        }
    }
}

impl<E> GraphBuilder<E>
where
    E: Entry,
{
    pub fn node(mut self, id: E, position: Point) -> Self {
        self.nodes.push(Node::new(position, id));
        self
    }

    pub fn labelled(mut self, id: E, position: Point, label: impl Into<String>) -> Self {
        self.labels.push((id, label.into()));
        self.node(id, position)
    }

    /// A one-way segment from `source` to `target`.
    pub fn segment(mut self, source: E, target: E) -> Self {
        self.segments.push(Connection::Between(source, target));
        self
    }

    /// A two-way road, as a segment in each direction.
    pub fn road(self, a: E, b: E) -> Self {
        self.segment(a, b).segment(b, a)
    }

    /// A one-way segment whose geometry differs from its node positions.
    pub fn ad_hoc(mut self, source: E, target: E, start: Point, end: Point) -> Self {
        self.segments
            .push(Connection::AdHoc(source, target, start, end));
        self
    }

    pub fn build(self) -> Result<Graph<E>, GraphError> {
        let start_time = Instant::now();

        let mut hash = FxHashMap::default();
        for node in &self.nodes {
            if hash.insert(node.id, *node).is_some() {
                return Err(GraphError::DuplicateNode(node.id.identifier()));
            }
        }

        let lookup = |id: &E| {
            hash.get(id)
                .copied()
                .ok_or(GraphError::MissingNode(id.identifier()))
        };

        let mut graph = GraphStructure::new();
        for node in &self.nodes {
            graph.add_node(node.id);
        }

        for connection in self.segments {
            let segment = match connection {
                Connection::Between(source, target) => {
                    Segment::new(&lookup(&source)?, &lookup(&target)?)
                }
                Connection::AdHoc(source, target, start, end) => {
                    lookup(&source)?;
                    lookup(&target)?;
                    Segment::ad_hoc(source, target, start, end)
                }
            };

            if graph
                .add_edge(segment.source, segment.target, segment)
                .is_some()
            {
                debug!("Replaced segment {:?}", segment.key());
            }
        }

        let index = NodeIndex::bulk_load(self.nodes);

        info!(
            "Built graph of {} nodes and {} segments in {:?}",
            hash.len(),
            graph.edge_count(),
            start_time.elapsed()
        );

        Ok(Graph {
            graph,
            hash,
            labels: self.labels.into_iter().collect(),
            index,
        })
    }
}
