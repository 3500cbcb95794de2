use criterion::criterion_main;
use geo::{LineString, Point};
use roadtrace::{Graph, MatchConfig, Matcher};
use wkt::TryFromWkt;

const SPACING: f64 = 0.01;
const GRID_SIZE: u64 = 40;

struct MapMatchScenario {
    name: &'static str,

    input_linestring: &'static str,
    expected_segments: usize,
}

const MATCH_CASES: [MapMatchScenario; 2] = [
    MapMatchScenario {
        name: "GRID_TURN",
        input_linestring: "LINESTRING(0.005 0.0001,0.015 -0.00015,0.0201 0.005,0.01985 0.015)",
        expected_segments: 4,
    },
    MapMatchScenario {
        name: "GRID_STAIRCASE",
        input_linestring: "LINESTRING(0.005 0,0.01 0.005,0.015 0.01,0.02 0.015,0.025 0.02,0.03 0.025,0.035 0.03)",
        expected_segments: 7,
    },
];

/// A two-way grid of `size` by `size` nodes, ~1.1km apart.
fn grid(size: u64) -> Graph<u64> {
    let id = |x: u64, y: u64| y * size + x;

    let mut builder = Graph::builder();
    for y in 0..size {
        for x in 0..size {
            builder = builder.node(id(x, y), Point::new(x as f64 * SPACING, y as f64 * SPACING));
        }
    }

    for y in 0..size {
        for x in 0..size {
            if x + 1 < size {
                builder = builder.road(id(x, y), id(x + 1, y));
            }
            if y + 1 < size {
                builder = builder.road(id(x, y), id(x, y + 1));
            }
        }
    }

    builder.build().expect("Grid must be created")
}

fn target_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("match");
    group.significance_level(0.1).sample_size(30);

    let graph = grid(GRID_SIZE);
    let config = MatchConfig::default();

    MATCH_CASES.into_iter().for_each(|sc| {
        group.bench_function(format!("match: {}", sc.name), |b| {
            b.iter(|| {
                let coordinates: LineString<f64> =
                    LineString::try_from_wkt_str(sc.input_linestring)
                        .expect("Linestring must parse successfully.");

                let route = Matcher::new(&graph, &graph)
                    .with_config(config.clone())
                    .match_trace(&coordinates.into_points())
                    .expect("Match must complete successfully");

                assert_eq!(route.segments().len(), sc.expected_segments);
            })
        });
    });

    group.finish();
}

criterion::criterion_group!(targeted_benches, target_benchmark);
criterion_main!(targeted_benches);
