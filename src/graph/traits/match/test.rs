use crate::config::MatchConfig;
use crate::graph::traits::util::linear_graph;
use crate::Match;

use geo::wkt;

#[test_log::test]
fn graph_matches_linestring() {
    let graph = linear_graph(4);
    let linestring = wkt! { LINESTRING (0.005 0.0, 0.015 0.0, 0.025 0.0) };

    let route = graph
        .r#match(linestring, &MatchConfig::default())
        .expect("linestring must match");

    let targets = route.segments().iter().map(|s| s.target).collect::<Vec<_>>();
    assert_eq!(targets, vec![1, 2, 3]);
}

#[test]
fn graph_continues_linestring() {
    let graph = linear_graph(4);
    let linestring = wkt! { LINESTRING (0.015 0.0, 0.025 0.0) };

    let seed = graph.segment(1, 2).expect("segment must exist");
    let route = graph
        .match_from(linestring, &[seed], &MatchConfig::default())
        .expect("linestring must continue");

    assert_eq!(route.segments().len(), 2);
    assert_eq!(route.segments()[0], seed);
}
