use crate::config::MatchConfig;
use crate::graph::traits::util::{grid_graph, linear_graph};
use crate::graph::Graph;
use crate::matcher::{match_trace, match_trace_from, MatchError, Matcher};
use crate::primitive::{Segment, SegmentKey};

use approx::assert_relative_eq;
use geo::{wkt, Point};

fn keys(segments: &[Segment<u64>]) -> Vec<(u64, u64)> {
    segments
        .iter()
        .map(Segment::key)
        .map(|SegmentKey { source, target }| (source, target))
        .collect()
}

fn points(trace: geo::LineString) -> Vec<Point> {
    trace.into_points()
}

/// Nodes at 0, 0.01, 0.011 and 0.019 degrees, so the middle segment is
/// only ~111m long, shorter than the gap between trace positions.
fn short_middle_graph() -> Graph<u64> {
    Graph::builder()
        .node(0, Point::new(0.000, 0.0))
        .node(1, Point::new(0.010, 0.0))
        .node(2, Point::new(0.011, 0.0))
        .node(3, Point::new(0.019, 0.0))
        .road(0, 1)
        .road(1, 2)
        .road(2, 3)
        .build()
        .expect("graph must build")
}

#[test_log::test]
fn matches_straight_trace() {
    let graph = linear_graph(4);
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0, 0.025 0.0) });

    let route = Matcher::new(&graph, &graph)
        .match_trace(&trace)
        .expect("trace must match");

    assert_eq!(keys(route.segments()), vec![(0, 1), (1, 2), (2, 3)]);
    assert_eq!(route.matches().len(), trace.len());
    assert_relative_eq!(route.score(), 0.0, epsilon = 1e-6);
}

#[test_log::test]
fn recovers_skipped_segment() {
    let graph = short_middle_graph();
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0) });

    let route = Matcher::new(&graph, &graph)
        .match_trace(&trace)
        .expect("trace must match");

    assert_eq!(keys(route.segments()), vec![(0, 1), (1, 2), (2, 3)]);
    assert!(route.is_connected());
    assert_relative_eq!(route.score(), 0.0, epsilon = 1e-6);
}

#[test_log::test]
fn rejects_unreachable_position() {
    let graph = linear_graph(4);

    // The second position lies ~5.5km north of the road.
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.05) });

    let result = Matcher::new(&graph, &graph).match_trace(&trace);
    assert_eq!(result.err(), Some(MatchError::DeadEnd { index: 1 }));

    assert!(match_trace(&trace, &graph, &graph).is_none());
}

#[test]
fn repeated_matches_are_identical() {
    let graph = grid_graph(5);
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0, 0.02 0.005, 0.02 0.015) });

    let first = match_trace(&trace, &graph, &graph).expect("trace must match");
    for _ in 0..8 {
        let next = match_trace(&trace, &graph, &graph).expect("trace must match");
        assert_eq!(first, next);
    }

    assert_eq!(keys(&first), vec![(0, 1), (1, 2), (2, 7), (7, 12)]);
}

#[test]
fn matched_walk_is_connected() {
    let graph = grid_graph(5);
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0, 0.02 0.005, 0.02 0.015) });

    let route = Matcher::new(&graph, &graph)
        .match_trace(&trace)
        .expect("trace must match");

    assert!(route.is_connected());
    for pair in route.segments().windows(2) {
        assert_eq!(pair[0].target, pair[1].source);
    }
}

#[test]
fn score_is_sum_of_match_costs() {
    let graph = grid_graph(5);

    // Positions drift up to ~20m off the roads.
    let trace = points(wkt! { LINESTRING (0.005 0.0001, 0.015 -0.00015, 0.0201 0.005, 0.01985 0.015) });

    let route = Matcher::new(&graph, &graph)
        .match_trace(&trace)
        .expect("trace must match");

    let total = route.matches().iter().map(|entry| entry.cost).sum::<f64>();
    assert_relative_eq!(route.score(), total);
    assert!(route.score() > 0.0);
    assert!(route.matches().iter().all(|entry| entry.cost >= 0.0));
}

#[test]
fn empty_trace_never_matches() {
    let graph = linear_graph(4);

    let result = Matcher::new(&graph, &graph).match_trace(&[]);
    assert_eq!(result.err(), Some(MatchError::EmptyTrace));
    assert!(match_trace(&[], &graph, &graph).is_none());

    let empty = Graph::<u64>::builder().build().expect("graph must build");
    assert!(match_trace(&[], &empty, &empty).is_none());
}

#[test]
fn single_position_yields_seed() {
    let graph = linear_graph(2);

    let route = Matcher::new(&graph, &graph)
        .match_trace(&[Point::new(0.005, 0.0)])
        .expect("position must seed");

    // Both directions of the road fit equally, the lower identity wins.
    assert_eq!(keys(route.segments()), vec![(0, 1)]);
    assert_eq!(route.matches().len(), 1);

    let result = Matcher::new(&graph, &graph).match_trace(&[Point::new(1.0, 1.0)]);
    assert_eq!(result.err(), Some(MatchError::NoPlausibleSeed));
}

#[test]
fn no_nearby_road_without_nodes() {
    let empty = Graph::<u64>::builder().build().expect("graph must build");

    let result = Matcher::new(&empty, &empty).match_trace(&[Point::new(0.0, 0.0)]);
    assert_eq!(result.err(), Some(MatchError::NoNearbyRoad));
}

#[test]
fn remains_upon_long_segment() {
    let graph = linear_graph(2);
    let trace = points(wkt! { LINESTRING (0.001 0.0, 0.002 0.0, 0.003 0.0) });

    let route = Matcher::new(&graph, &graph)
        .match_trace(&trace)
        .expect("trace must match");

    assert_eq!(keys(route.segments()), vec![(0, 1)]);
    assert_eq!(route.matches().len(), 3);
    assert!(route.matches().iter().all(|entry| entry.segment.key() == route.segments()[0].key()));
}

#[test]
fn continues_from_known_segments() {
    let graph = linear_graph(4);

    // ~33m off the road, too far to seed from but accepted as a continuation.
    let trace = points(wkt! { LINESTRING (0.015 0.0003, 0.025 0.0003) });

    let result = Matcher::new(&graph, &graph).match_trace(&trace);
    assert_eq!(result.err(), Some(MatchError::NoPlausibleSeed));

    let seed = graph.segment(1, 2).expect("segment must exist");
    let segments =
        match_trace_from(&trace, &graph, &graph, &[seed]).expect("trace must continue");

    assert_eq!(keys(&segments), vec![(1, 2), (2, 3)]);

    let result = Matcher::new(&graph, &graph).match_trace_from(&trace, &[]);
    assert_eq!(result.err(), Some(MatchError::NoPlausibleSeed));
}

#[test]
fn matches_against_segment_geometry() {
    // The segment runs ~111m north of the nodes it connects.
    let graph = Graph::<u64>::builder()
        .node(1, Point::new(0.0, 0.0))
        .node(2, Point::new(0.01, 0.0))
        .ad_hoc(1, 2, Point::new(0.0, 0.001), Point::new(0.01, 0.001))
        .build()
        .expect("graph must build");

    let route = Matcher::new(&graph, &graph)
        .match_trace(&[Point::new(0.005, 0.001)])
        .expect("position must seed");

    assert_eq!(keys(route.segments()), vec![(1, 2)]);
    assert_relative_eq!(route.score(), 0.0, epsilon = 1e-6);
    assert_eq!(route.segments()[0].start, Point::new(0.0, 0.001));
}

#[test]
fn cutoff_prunes_distant_branches() {
    let graph = short_middle_graph();
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0) });

    // The short segment deviates ~445m from the second position.
    let config = MatchConfig::default().with_branch_cutoff(400.0);
    let result = Matcher::new(&graph, &graph)
        .with_config(config)
        .match_trace(&trace);

    assert_eq!(result.err(), Some(MatchError::DeadEnd { index: 1 }));
}

#[test]
fn exhausted_search_budget_dead_ends() {
    let graph = linear_graph(4);
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0) });

    let config = MatchConfig::default().with_max_search_rounds(0);
    let result = Matcher::new(&graph, &graph)
        .with_config(config)
        .match_trace(&trace);

    assert_eq!(result.err(), Some(MatchError::DeadEnd { index: 1 }));
}

#[test]
fn narrow_beam_still_matches() {
    let graph = linear_graph(4);
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0, 0.025 0.0) });

    let config = MatchConfig::default().with_beam_width(1);
    let route = Matcher::new(&graph, &graph)
        .with_config(config)
        .match_trace(&trace)
        .expect("trace must match");

    assert_eq!(keys(route.segments()), vec![(0, 1), (1, 2), (2, 3)]);
}

#[test]
fn geometry_follows_matched_walk() {
    let graph = linear_graph(4);
    let trace = points(wkt! { LINESTRING (0.005 0.0001, 0.015 0.0001, 0.025 0.0001) });

    let route = Matcher::new(&graph, &graph)
        .match_trace(&trace)
        .expect("trace must match");

    assert_eq!(route.interpolated().0.len(), 4);

    let snapped = route.discretized();
    assert_eq!(snapped.0.len(), 3);
    for coord in snapped.0 {
        assert_relative_eq!(coord.y, 0.0, epsilon = 1e-9);
    }
}

#[test_log::test]
fn matches_trace_circling_a_block() {
    let graph = grid_graph(3);

    // Twice around the block bounded by nodes 0, 1, 4 and 3.
    let trace = points(wkt! {
        LINESTRING (0.005 0.0, 0.01 0.005, 0.005 0.01, 0.0 0.005, 0.005 0.0, 0.01 0.005, 0.005 0.01)
    });

    let route = Matcher::new(&graph, &graph)
        .match_trace(&trace)
        .expect("trace must match");

    assert_eq!(
        keys(route.segments()),
        vec![(0, 1), (1, 4), (4, 3), (3, 0), (0, 1), (1, 4), (4, 3)]
    );
    assert!(route.is_connected());
    assert_relative_eq!(route.score(), 0.0, epsilon = 1e-6);
}

#[test]
fn unbounded_search_budget_matches() {
    let graph = short_middle_graph();
    let trace = points(wkt! { LINESTRING (0.005 0.0, 0.015 0.0) });

    let config = MatchConfig::default().with_max_search_rounds(usize::MAX);
    assert!(config.validate().is_ok());

    let route = Matcher::new(&graph, &graph)
        .with_config(config)
        .match_trace(&trace)
        .expect("trace must match");

    assert_eq!(keys(route.segments()), vec![(0, 1), (1, 2), (2, 3)]);
}
