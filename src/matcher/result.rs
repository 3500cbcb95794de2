use crate::matcher::{path, Hypothesis, PointMatch};
use crate::primitive::{Entry, Segment};

use geo::{LineString, Point};

/// The outcome of a successful match.
///
/// Holds the walk through the network the trace is believed to have followed,
/// alongside the match of every trace position onto it.
#[derive(Debug, Clone)]
pub struct MatchedRoute<E>
where
    E: Entry,
{
    segments: Vec<Segment<E>>,
    matches: Vec<PointMatch<E>>,
    score: f64,
}

impl<E> From<Hypothesis<E>> for MatchedRoute<E>
where
    E: Entry,
{
    fn from(hypothesis: Hypothesis<E>) -> Self {
        let (path, matches, score) = hypothesis.into_parts();

        MatchedRoute {
            segments: path.into_segments(),
            matches,
            score,
        }
    }
}

impl<E> MatchedRoute<E>
where
    E: Entry,
{
    /// The matched segments, in the order they were travelled.
    pub fn segments(&self) -> &[Segment<E>] {
        &self.segments
    }

    /// The match of every trace position, one-to-one with the input.
    pub fn matches(&self) -> &[PointMatch<E>] {
        &self.matches
    }

    /// Sum of the deviation, in meters, of every trace position from its match.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// If every segment begins at the node the previous one ended at.
    pub fn is_connected(&self) -> bool {
        path::is_connected(&self.segments)
    }

    /// The geometry of the matched walk, from the start of the first
    /// segment through the end of every segment.
    ///
    /// This "recovers" the turns and roadways the trace passed through
    /// between positions, which is useful for visualising a trip.
    pub fn interpolated(&self) -> LineString {
        self.segments
            .first()
            .map(|first| first.start)
            .into_iter()
            .chain(self.segments.iter().map(|segment| segment.end))
            .collect::<Vec<Point>>()
            .into()
    }

    /// The trace positions snapped onto their matched segments.
    pub fn discretized(&self) -> LineString {
        self.matches
            .iter()
            .map(|entry| entry.projected)
            .collect::<Vec<Point>>()
            .into()
    }

    pub fn into_segments(self) -> Vec<Segment<E>> {
        self.segments
    }
}
