use crate::config::MatchConfig;
use crate::matcher::rank::Ranked;
use crate::matcher::{Hypothesis, MatchError, MatchedRoute, SegmentSearch};
use crate::primitive::{Entry, Segment};
use crate::{Network, Scan};

use geo::Point;
use indexmap::IndexSet;
use log::{debug, info};
use measure_time::debug_time;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rustc_hash::FxHasher;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;
use std::marker::PhantomData;
use wkt::ToWkt;

#[cfg(feature = "tracing")]
use tracing::Level;

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// The beam-search map matcher.
///
/// Borrows a road [network](Network) and a spatial [index](Scan) over its nodes,
/// both of which are only read, so one matcher may serve many traces at once.
///
/// ### Example
///
/// ```rust
/// use geo::Point;
/// use roadtrace::{Graph, Matcher};
///
/// let graph = Graph::<u64>::builder()
///     .node(1, Point::new(0.000, 0.0))
///     .node(2, Point::new(0.010, 0.0))
///     .node(3, Point::new(0.020, 0.0))
///     .road(1, 2)
///     .road(2, 3)
///     .build()
///     .expect("graph must build");
///
/// let trace = [Point::new(0.002, 0.0), Point::new(0.015, 0.0)];
///
/// let route = Matcher::new(&graph, &graph)
///     .match_trace(&trace)
///     .expect("trace must match");
///
/// assert_eq!(route.segments().len(), 2);
/// ```
pub struct Matcher<'a, E, N, I>
where
    E: Entry,
    N: Network<E> + Sync,
    I: Scan<E>,
{
    network: &'a N,
    index: &'a I,
    config: MatchConfig,

    _entry: PhantomData<E>,
}

impl<'a, E, N, I> Matcher<'a, E, N, I>
where
    E: Entry,
    N: Network<E> + Sync,
    I: Scan<E>,
{
    /// Creates a matcher using the default [`MatchConfig`].
    pub fn new(network: &'a N, index: &'a I) -> Self {
        Self {
            network,
            index,
            config: MatchConfig::default(),
            _entry: PhantomData,
        }
    }

    /// Replaces the tuning parameters of the matcher.
    ///
    /// The configuration is not validated here, see [`MatchConfig::validate`].
    pub fn with_config(self, config: MatchConfig) -> Self {
        Self { config, ..self }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Matches the trace onto the network, seeding from the
    /// segments around the nodes nearest its first position.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    pub fn match_trace(&self, trace: &[Point]) -> Result<MatchedRoute<E>, MatchError> {
        info!("Finding matched route for {} positions", trace.len());

        let origin = trace.first().ok_or(MatchError::EmptyTrace)?;
        let seeds = self.seed(origin)?;

        self.solve(trace, seeds)
    }

    /// Matches the trace onto the network, starting from the supplied segments
    /// instead of searching around the first position.
    ///
    /// This is used to continue a match across traces which are stitched together
    /// segment by segment, where the starting segments are already known.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    pub fn match_trace_from(
        &self,
        trace: &[Point],
        seeds: &[Segment<E>],
    ) -> Result<MatchedRoute<E>, MatchError> {
        info!(
            "Continuing matched route for {} positions from {} segments",
            trace.len(),
            seeds.len()
        );

        let origin = trace.first().ok_or(MatchError::EmptyTrace)?;
        let seeds = seeds
            .iter()
            .map(|segment| Hypothesis::seed(*segment, *origin))
            .collect::<FxIndexSet<_>>();

        if seeds.is_empty() {
            return Err(MatchError::NoPlausibleSeed);
        }

        self.solve(trace, seeds.into_iter().collect())
    }

    /// Creates a hypothesis for every segment touching the nodes nearest
    /// to `origin` which lies within the seed threshold.
    fn seed(&self, origin: &Point) -> Result<Vec<Hypothesis<E>>, MatchError> {
        debug_time!("seeding");

        let nodes = self.index.nearest(origin, self.config.nearest_k);
        if nodes.is_empty() {
            return Err(MatchError::NoNearbyRoad);
        }

        let seeds = nodes
            .iter()
            .flat_map(|node| self.network.incident_segments(node.id))
            .map(|segment| Hypothesis::seed(segment, *origin))
            .filter(|hypothesis| hypothesis.score() <= self.config.seed_threshold)
            .collect::<FxIndexSet<_>>();

        debug!(
            "Seeded {} hypotheses from {} nearby nodes",
            seeds.len(),
            nodes.len()
        );

        if seeds.is_empty() {
            return Err(MatchError::NoPlausibleSeed);
        }

        Ok(seeds.into_iter().collect())
    }

    /// Runs the beam over every position after the first.
    fn solve(
        &self,
        trace: &[Point],
        seeds: Vec<Hypothesis<E>>,
    ) -> Result<MatchedRoute<E>, MatchError> {
        let search = SegmentSearch::new(self.network, &self.config);
        let mut live = self.rank(seeds);

        for (index, point) in trace.iter().enumerate().skip(1) {
            debug_time!("extension to position {index}");

            let beam = (0..self.config.beam_width)
                .map_while(|_| live.pop())
                .map(|ranked| ranked.hypothesis)
                .collect::<Vec<_>>();

            // Collected in beam order, so the outcome does not depend on scheduling.
            let successors = beam
                .par_iter()
                .map(|hypothesis| hypothesis.extend(point, &search))
                .collect::<Vec<_>>();

            let unique = successors.into_iter().flatten().collect::<FxIndexSet<_>>();

            debug!(
                "Position {index}: {} hypotheses extended into {} unique successors",
                beam.len(),
                unique.len()
            );

            if unique.is_empty() {
                return Err(MatchError::DeadEnd { index });
            }

            live = self.rank(unique.into_iter().collect());
        }

        let best = live.pop().ok_or(MatchError::DeadEnd {
            index: trace.len().saturating_sub(1),
        })?;

        let route = MatchedRoute::from(best.hypothesis);
        info!(
            "Matched {} segments with a total deviation of {:.2}m",
            route.segments().len(),
            route.score()
        );
        debug!("Matched geometry: {}", route.interpolated().wkt_string());

        Ok(route)
    }

    fn rank(&self, hypotheses: Vec<Hypothesis<E>>) -> BinaryHeap<Ranked<E>> {
        hypotheses
            .into_iter()
            .map(|hypothesis| Ranked::new(hypothesis, self.config.score_bucket))
            .collect()
    }
}

/// Matches a trace onto a network using the default configuration,
/// returning the travelled segments, or `None` if no match exists.
pub fn match_trace<E, N, I>(trace: &[Point], network: &N, index: &I) -> Option<Vec<Segment<E>>>
where
    E: Entry,
    N: Network<E> + Sync,
    I: Scan<E>,
{
    match Matcher::new(network, index).match_trace(trace) {
        Ok(route) => Some(route.into_segments()),
        Err(error) => {
            debug!("No match for trace of {} positions: {error}", trace.len());
            None
        }
    }
}

/// As [`match_trace`], continuing from already-known segments.
pub fn match_trace_from<E, N, I>(
    trace: &[Point],
    network: &N,
    index: &I,
    seeds: &[Segment<E>],
) -> Option<Vec<Segment<E>>>
where
    E: Entry,
    N: Network<E> + Sync,
    I: Scan<E>,
{
    match Matcher::new(network, index).match_trace_from(trace, seeds) {
        Ok(route) => Some(route.into_segments()),
        Err(error) => {
            debug!("No continued match for trace of {} positions: {error}", trace.len());
            None
        }
    }
}
