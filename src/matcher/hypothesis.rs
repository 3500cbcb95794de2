use crate::matcher::{Path, PointMatch, SegmentSearch};
use crate::primitive::{Entry, Projection, Segment};
use crate::Network;

use geo::{Distance, Haversine, Point};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// One candidate interpretation of the trace consumed so far.
///
/// A hypothesis owns its [`Path`] through the network, one [`PointMatch`] for
/// every trace position consumed, the cumulative score (the sum of every match
/// cost) and its progress along the segment it currently sits on.
///
/// Hypotheses are values: [extending](Hypothesis::extend) one produces
/// independent successors and leaves the original untouched.
#[derive(Debug, Clone)]
pub struct Hypothesis<E>
where
    E: Entry,
{
    path: Path<E>,
    matches: Vec<PointMatch<E>>,
    score: f64,

    /// Distance from the start of the current segment to the latest projected position.
    length_on_segment: f64,
    /// Length of the current segment.
    length_of_segment: f64,
}

impl<E> Hypothesis<E>
where
    E: Entry,
{
    /// A hypothesis which has consumed only its first position, matched onto `segment`.
    pub fn seed(segment: Segment<E>, point: Point) -> Self {
        let entry = PointMatch::new(segment, point);

        Hypothesis {
            path: Path::from_segment(segment),
            score: entry.cost,
            length_on_segment: segment.offset(&entry.projected),
            length_of_segment: segment.length,
            matches: vec![entry],
        }
    }

    #[inline]
    pub fn path(&self) -> &Path<E> {
        &self.path
    }

    #[inline]
    pub fn matches(&self) -> &[PointMatch<E>] {
        &self.matches
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn length_on_segment(&self) -> f64 {
        self.length_on_segment
    }

    #[inline]
    pub fn length_of_segment(&self) -> f64 {
        self.length_of_segment
    }

    /// Consumes the next trace position, returning every successor hypothesis.
    ///
    /// If the position plausibly lies before the end of the current segment, the
    /// single successor remains upon it. Otherwise a [`SegmentSearch`] finds the
    /// walks the trace may have taken since, producing one successor per walk. An
    /// empty result means this hypothesis cannot explain the position.
    pub fn extend<N>(&self, point: &Point, search: &SegmentSearch<E, N>) -> Vec<Self>
    where
        N: Network<E>,
    {
        let Some(previous) = self.matches.last() else {
            return vec![];
        };

        let segment = previous.segment;
        let distance_last = Haversine.distance(*point, previous.projected);

        let threshold = self.length_of_segment * search.config().same_segment_fraction;
        if self.length_on_segment + distance_last < threshold {
            return vec![self.remain(segment, point)];
        }

        let target = self.path.length() + distance_last;
        search
            .search(&self.path, point, target)
            .into_iter()
            .filter_map(|extension| self.advance(extension, point))
            .collect()
    }

    /// The successor which stays upon the current segment.
    fn remain(&self, segment: Segment<E>, point: &Point) -> Self {
        let projection = segment.project(point);

        let mut next = self.clone();
        next.length_on_segment = segment.offset(&projection.point);
        next.consume(segment, point, projection);
        next
    }

    /// The successor which follows `extension`, cut short at
    /// the segment closest to `point`.
    fn advance(&self, extension: Path<E>, point: &Point) -> Option<Self> {
        let (closest, projection) = extension
            .segments()
            .iter()
            .map(|segment| segment.project(point))
            .enumerate()
            .reduce(|best, next| if next.1.cost < best.1.cost { next } else { best })?;

        let taken = &extension.segments()[..=closest];
        let segment = taken[closest];

        let mut next = self.clone();
        next.path.extend_from(taken);
        next.length_on_segment = segment.offset(&projection.point);
        next.length_of_segment = segment.length;
        next.consume(segment, point, projection);
        Some(next)
    }

    #[inline]
    fn consume(&mut self, segment: Segment<E>, point: &Point, projection: Projection) {
        let entry = PointMatch::from_projection(segment, *point, projection);
        self.score += entry.cost;
        self.matches.push(entry);
    }

    /// Orders hypotheses by their path structure, then by the cost of their
    /// latest match and finally their exact score.
    ///
    /// This is the tie-break applied between hypotheses whose scores
    /// fall into the same bucket.
    pub fn cmp_structure(&self, other: &Self) -> Ordering {
        let last_cost = |h: &Self| h.matches.last().map_or(0.0, |m| m.cost);

        self.path
            .cmp_structure(&other.path)
            .then_with(|| last_cost(self).total_cmp(&last_cost(other)))
            .then_with(|| self.score.total_cmp(&other.score))
    }

    pub(crate) fn into_parts(self) -> (Path<E>, Vec<PointMatch<E>>, f64) {
        (self.path, self.matches, self.score)
    }
}

impl<E> PartialEq for Hypothesis<E>
where
    E: Entry,
{
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
            && self.length_on_segment == other.length_on_segment
            && self.length_of_segment == other.length_of_segment
            && self.path == other.path
            && self.matches == other.matches
    }
}

// Scores and lengths are sums of distances, never NaN.
impl<E> Eq for Hypothesis<E> where E: Entry {}

impl<E> Hash for Hypothesis<E>
where
    E: Entry,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.score.to_bits().hash(state);
        self.matches.len().hash(state);
        self.path.hash(state);
    }
}
