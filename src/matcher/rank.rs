//! Quantized ranking shared by the beam and the sub-search.
//!
//! Scores within the same bucket are considered equally good, which lets the
//! structural tie-breaks (fewer segments, then segment identity) decide between
//! hypotheses whose deviation differs by less than the bucket size.

use crate::matcher::Hypothesis;
use crate::primitive::Entry;

use std::cmp::Ordering;

/// A score rounded up to the nearest multiple of the bucket size,
/// stored as the multiple.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bucket(pub u64);

impl Bucket {
    #[inline]
    pub fn of(score: f64, size: f64) -> Self {
        // Float-to-int casts saturate, so non-finite scores land in the last bucket.
        Bucket((score / size).ceil() as u64)
    }
}

/// A [`Hypothesis`] held within the beam's priority queue.
///
/// Ordered so that the [`BinaryHeap`](std::collections::BinaryHeap)
/// yields the best-ranked hypothesis first.
#[derive(Debug)]
pub(crate) struct Ranked<E>
where
    E: Entry,
{
    bucket: Bucket,
    pub(crate) hypothesis: Hypothesis<E>,
}

impl<E> Ranked<E>
where
    E: Entry,
{
    #[inline]
    pub(crate) fn new(hypothesis: Hypothesis<E>, bucket_size: f64) -> Self {
        Self {
            bucket: Bucket::of(hypothesis.score(), bucket_size),
            hypothesis,
        }
    }

    #[inline]
    fn rank(&self, other: &Self) -> Ordering {
        self.bucket
            .cmp(&other.bucket)
            .then_with(|| self.hypothesis.cmp_structure(&other.hypothesis))
    }
}

impl<E> PartialEq for Ranked<E>
where
    E: Entry,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Equal
    }
}

impl<E> Eq for Ranked<E> where E: Entry {}

impl<E> PartialOrd for Ranked<E>
where
    E: Entry,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Ranked<E>
where
    E: Entry,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.rank(self)
    }
}

#[cfg(test)]
mod test {
    use super::{Bucket, Ranked};
    use crate::graph::traits::util::linear_graph;
    use crate::matcher::Hypothesis;

    use geo::Point;
    use std::collections::BinaryHeap;

    fn pop_order(hypotheses: Vec<Hypothesis<u64>>) -> Vec<(u64, u64)> {
        let mut heap = hypotheses
            .into_iter()
            .map(|hypothesis| Ranked::new(hypothesis, 7.0))
            .collect::<BinaryHeap<_>>();

        std::iter::from_fn(|| heap.pop())
            .map(|ranked| ranked.hypothesis.path().segments()[0].key())
            .map(|key| (key.source, key.target))
            .collect()
    }

    #[test]
    fn best_score_pops_first() {
        let graph = linear_graph(4);
        let segment = |a, b| graph.segment(a, b).expect("segment must exist");

        // On (0, 1), ~667m from (1, 2) and ~1.8km from (2, 3).
        let origin = Point::new(0.004, 0.0);
        let order = pop_order(vec![
            Hypothesis::seed(segment(1, 2), origin),
            Hypothesis::seed(segment(2, 3), origin),
            Hypothesis::seed(segment(0, 1), origin),
        ]);

        assert_eq!(order, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn equal_buckets_break_on_segment_keys() {
        let graph = linear_graph(3);
        let segment = |a, b| graph.segment(a, b).expect("segment must exist");

        // Node 1 is an endpoint of all four segments, so each costs nothing.
        let origin = Point::new(0.01, 0.0);
        let order = pop_order(vec![
            Hypothesis::seed(segment(2, 1), origin),
            Hypothesis::seed(segment(1, 0), origin),
            Hypothesis::seed(segment(1, 2), origin),
            Hypothesis::seed(segment(0, 1), origin),
        ]);

        assert_eq!(order, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn rounds_up_to_bucket() {
        assert_eq!(Bucket::of(0.0, 7.0), Bucket(0));
        assert_eq!(Bucket::of(0.1, 7.0), Bucket(1));
        assert_eq!(Bucket::of(7.0, 7.0), Bucket(1));
        assert_eq!(Bucket::of(7.01, 7.0), Bucket(2));
        assert_eq!(Bucket::of(f64::INFINITY, 7.0), Bucket(u64::MAX));
    }
}
