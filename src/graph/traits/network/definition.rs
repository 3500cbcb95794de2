use crate::primitive::{Entry, Node, Segment};

/// The query contract of a directed road network.
///
/// The matcher only ever reads from the network, walking it segment by
/// segment from the nodes the trace starts near. Implementations must
/// return segments in a stable order for the match to be reproducible.
pub trait Network<E>
where
    E: Entry,
{
    /// All segments which either leave or enter the given node.
    fn incident_segments(&self, node: E) -> impl Iterator<Item = Segment<E>> + '_;

    /// All segments which leave the given node.
    fn outgoing_segments(&self, node: E) -> impl Iterator<Item = Segment<E>> + '_;

    /// The node a segment begins at, if it exists in the network.
    fn source_node(&self, segment: &Segment<E>) -> Option<Node<E>>;

    /// The node a segment ends at, if it exists in the network.
    fn dest_node(&self, segment: &Segment<E>) -> Option<Node<E>>;
}
