use crate::graph::Graph;
use crate::primitive::{Entry, Node, Segment};
use crate::Network;

use petgraph::Direction;

impl<E> Network<E> for Graph<E>
where
    E: Entry,
{
    #[inline]
    fn incident_segments(&self, node: E) -> impl Iterator<Item = Segment<E>> + '_ {
        let incoming = self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .filter_map(move |source| self.graph.edge_weight(source, node).copied());

        self.outgoing_segments(node).chain(incoming)
    }

    #[inline]
    fn outgoing_segments(&self, node: E) -> impl Iterator<Item = Segment<E>> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|(_, _, segment)| *segment)
    }

    #[inline]
    fn source_node(&self, segment: &Segment<E>) -> Option<Node<E>> {
        self.node(&segment.source)
    }

    #[inline]
    fn dest_node(&self, segment: &Segment<E>) -> Option<Node<E>> {
        self.node(&segment.target)
    }
}
