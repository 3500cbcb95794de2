use crate::config::MatchConfig;
use crate::matcher::rank::Bucket;
use crate::matcher::Path;
use crate::primitive::{Entry, SegmentKey};
use crate::Network;

use geo::Point;
use log::{debug, trace};
use measure_time::trace_time;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A partial walk explored by the sub-search, holding only the
/// segments added beyond the base path.
#[derive(Debug)]
struct Branch<E>
where
    E: Entry,
{
    extension: Path<E>,
    bucket: Bucket,
}

impl<E> Branch<E>
where
    E: Entry,
{
    #[inline]
    fn rank(&self, other: &Self) -> Ordering {
        self.bucket
            .cmp(&other.bucket)
            .then_with(|| self.extension.cmp_structure(&other.extension))
    }
}

impl<E> PartialEq for Branch<E>
where
    E: Entry,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Equal
    }
}

impl<E> Eq for Branch<E> where E: Entry {}

impl<E> PartialOrd for Branch<E>
where
    E: Entry,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Branch<E>
where
    E: Entry,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.rank(self)
    }
}

/// A bounded best-first search for the segments a trace moved onto
/// after leaving the segment it was last matched to.
///
/// Starting at the end of a base path, the search grows walks through the
/// network until their total length (base path included) covers the distance
/// the trace could plausibly have travelled. Walks are explored cheapest first,
/// where a walk's cost is the deviation of the target position from its last
/// segment, and any walk whose last segment deviates by the
/// [branch cutoff](MatchConfig::branch_cutoff) or more is abandoned.
///
/// A walk never turns straight back along the segment it arrived on, nor
/// repeats a segment it has already taken. Segments of the base path may be
/// travelled again, so a trace circling a block remains matchable.
///
/// The search stops after [max_search_rounds](MatchConfig::max_search_rounds)
/// batches. A search cut short this way returns only the walks found so far,
/// which can change the outcome of a match on dense networks.
pub struct SegmentSearch<'a, E, N>
where
    E: Entry,
    N: Network<E>,
{
    network: &'a N,
    config: &'a MatchConfig,

    _entry: std::marker::PhantomData<E>,
}

impl<'a, E, N> SegmentSearch<'a, E, N>
where
    E: Entry,
    N: Network<E>,
{
    pub fn new(network: &'a N, config: &'a MatchConfig) -> Self {
        Self {
            network,
            config,
            _entry: std::marker::PhantomData,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        self.config
    }

    /// Finds the walks leaving the end of `base` which plausibly lead to `point`,
    /// having covered at least `target` meters in total.
    ///
    /// Each returned [`Path`] holds only the segments following `base`. A walk which
    /// cannot be grown any further without exceeding the cutoff is returned as-is,
    /// even if it falls short of `target`.
    pub fn search(&self, base: &Path<E>, point: &Point, target: f64) -> Vec<Path<E>> {
        trace_time!("segment search");

        let mut frontier = BinaryHeap::new();
        let mut seen = FxHashSet::<Vec<SegmentKey<E>>>::default();
        let mut results = vec![];

        // The root is always grown, never returned.
        self.grow(base, &Path::new(), point, &mut frontier, &mut seen);

        let mut rounds = 0;
        while !frontier.is_empty() {
            if rounds == self.config.max_search_rounds {
                debug!(
                    "Search budget of {rounds} rounds exhausted with {} branches open",
                    frontier.len()
                );
                break;
            }
            rounds += 1;

            let batch = (0..self.config.search_batch)
                .map_while(|_| frontier.pop())
                .collect::<Vec<_>>();

            for Branch { extension, .. } in batch {
                if base.length() + extension.length() >= target {
                    results.push(extension);
                    continue;
                }

                if self.grow(base, &extension, point, &mut frontier, &mut seen) == 0 {
                    trace!("Terminal branch of {} segments", extension.len());
                    results.push(extension);
                }
            }
        }

        trace!("Search yielded {} walks in {rounds} rounds", results.len());
        results
    }

    /// Pushes every plausible one-segment continuation of `extension`
    /// onto the frontier, returning how many were pushed.
    fn grow(
        &self,
        base: &Path<E>,
        extension: &Path<E>,
        point: &Point,
        frontier: &mut BinaryHeap<Branch<E>>,
        seen: &mut FxHashSet<Vec<SegmentKey<E>>>,
    ) -> usize {
        let Some(last) = extension.last().or(base.last()) else {
            return 0;
        };

        let mut pushed = 0;
        for segment in self.network.outgoing_segments(last.target) {
            let key = segment.key();
            if segment.reverses(last) || extension.contains(&key) {
                continue;
            }

            let cost = segment.project(point).cost;
            if cost >= self.config.branch_cutoff {
                continue;
            }

            let mut grown = extension.clone();
            grown.push(segment);

            if !seen.insert(grown.keys().collect()) {
                continue;
            }

            frontier.push(Branch {
                bucket: Bucket::of(cost, self.config.score_bucket),
                extension: grown,
            });
            pushed += 1;
        }

        pushed
    }
}
