use geo::{Distance, Haversine, Line, Point};

use crate::primitive::{Entry, Node, Projection};

/// The identity of a [`Segment`] within the network, its
/// directed `(source, target)` node pair.
///
/// Keys are totally ordered, which is what allows hypotheses
/// sharing a score to be ranked deterministically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey<E>
where
    E: Entry,
{
    pub source: E,
    pub target: E,
}

/// A directed edge between a source and target node.
///
/// Every segment carries its own geometry, a [start](#field.start) and
/// [end](#field.end) position, alongside its [length](#field.length) in meters.
/// For segments of the network these are the positions of the nodes themselves,
/// but an [ad-hoc](Segment::ad_hoc) segment may carry positions which differ from
/// its nodes, such as an edge spanning two raw trace positions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment<E>
where
    E: Entry,
{
    pub source: E,
    pub target: E,

    pub start: Point,
    pub end: Point,

    /// Great-circle length of the segment, in meters.
    pub length: f64,
}

impl<E> Segment<E>
where
    E: Entry,
{
    /// Creates the segment running from `source` to `target`.
    pub fn new(source: &Node<E>, target: &Node<E>) -> Self {
        Self::ad_hoc(source.id, target.id, source.position, target.position)
    }

    /// Creates a segment between two nodes whose geometry is supplied
    /// directly, instead of being taken from the node positions.
    pub fn ad_hoc(source: E, target: E, start: Point, end: Point) -> Self {
        Segment {
            source,
            target,
            start,
            end,
            length: Haversine.distance(start, end),
        }
    }

    #[inline]
    pub fn key(&self) -> SegmentKey<E> {
        SegmentKey {
            source: self.source,
            target: self.target,
        }
    }

    #[inline]
    pub fn line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    /// Projects `position` onto the segment. See [`Projection::onto`].
    #[inline]
    pub fn project(&self, position: &Point) -> Projection {
        Projection::onto(&self.line(), position)
    }

    /// Distance, in meters, from the start of the segment to `point`.
    #[inline]
    pub fn offset(&self, point: &Point) -> f64 {
        Haversine.distance(self.start, *point)
    }

    /// If travelling `self` directly after `other` would be a U-turn.
    #[inline]
    pub fn reverses(&self, other: &Segment<E>) -> bool {
        self.source == other.target && self.target == other.source
    }
}
