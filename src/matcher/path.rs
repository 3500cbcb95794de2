use crate::primitive::{Entry, Segment, SegmentKey};

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A contiguous walk through the network, as an ordered
/// sequence of [`Segment`]s and their cumulative length.
///
/// Paths only ever grow or shrink at their end. Cloning a path
/// produces an independent copy, so hypotheses branching from
/// the same parent never share state.
#[derive(Debug, Clone, Default)]
pub struct Path<E>
where
    E: Entry,
{
    segments: Vec<Segment<E>>,
    length: f64,
}

impl<E> Path<E>
where
    E: Entry,
{
    pub fn new() -> Self {
        Self {
            segments: vec![],
            length: 0.0,
        }
    }

    pub fn from_segment(segment: Segment<E>) -> Self {
        Self {
            length: segment.length,
            segments: vec![segment],
        }
    }

    pub fn push(&mut self, segment: Segment<E>) {
        self.length += segment.length;
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<Segment<E>> {
        let segment = self.segments.pop()?;

        // Re-summed rather than subtracted, so equal walks have equal lengths.
        self.length = self.segments.iter().map(|segment| segment.length).sum();
        Some(segment)
    }

    /// Appends every segment of `other` onto this path.
    pub fn extend_from(&mut self, other: &[Segment<E>]) {
        other.iter().for_each(|segment| self.push(*segment));
    }

    /// Cumulative length of every segment within the path, in meters.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment<E>] {
        &self.segments
    }

    #[inline]
    pub fn first(&self) -> Option<&Segment<E>> {
        self.segments.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Segment<E>> {
        self.segments.last()
    }

    /// The node the walk currently ends at.
    #[inline]
    pub fn end_node(&self) -> Option<E> {
        self.last().map(|segment| segment.target)
    }

    pub fn keys(&self) -> impl Iterator<Item = SegmentKey<E>> + '_ {
        self.segments.iter().map(Segment::key)
    }

    pub fn contains(&self, key: &SegmentKey<E>) -> bool {
        self.keys().any(|k| k == *key)
    }

    /// If every segment begins where the one before it ended.
    pub fn is_connected(&self) -> bool {
        is_connected(&self.segments)
    }

    /// Orders paths by their segment count, shorter first,
    /// then by their segment identities.
    pub fn cmp_structure(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.keys().cmp(other.keys()))
    }

    pub fn into_segments(self) -> Vec<Segment<E>> {
        self.segments
    }
}

/// If every segment of the walk begins at the node the previous one ended at.
pub(crate) fn is_connected<E: Entry>(segments: &[Segment<E>]) -> bool {
    segments
        .windows(2)
        .all(|pair| pair[0].target == pair[1].source)
}

impl<E> PartialEq for Path<E>
where
    E: Entry,
{
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl<E> Hash for Path<E>
where
    E: Entry,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.keys().for_each(|key| key.hash(state));
    }
}

impl<E> FromIterator<Segment<E>> for Path<E>
where
    E: Entry,
{
    fn from_iter<I: IntoIterator<Item = Segment<E>>>(iter: I) -> Self {
        let mut path = Path::new();
        iter.into_iter().for_each(|segment| path.push(segment));
        path
    }
}
