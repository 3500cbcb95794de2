mod r#match;
mod network;
mod proximity;

pub use network::Network;
pub use proximity::Scan;
pub use r#match::Match;

#[cfg(test)]
pub(crate) mod util {
    use crate::graph::Graph;

    use geo::Point;

    /// Longitude spacing of the toy networks, ~1.1km at the equator.
    pub(crate) const SPACING: f64 = 0.01;

    /// A straight, two-way road along the equator of `count` evenly spaced nodes.
    pub(crate) fn linear_graph(count: u64) -> Graph<u64> {
        let builder = (0..count).fold(Graph::builder(), |builder, id| {
            builder.node(id, Point::new(id as f64 * SPACING, 0.0))
        });

        (1..count)
            .fold(builder, |builder, id| builder.road(id - 1, id))
            .build()
            .expect("linear graph must build")
    }

    /// A two-way grid of `size` by `size` nodes.
    pub(crate) fn grid_graph(size: u64) -> Graph<u64> {
        let id = |x: u64, y: u64| y * size + x;

        let mut builder = Graph::builder();
        for y in 0..size {
            for x in 0..size {
                builder = builder.node(
                    id(x, y),
                    Point::new(x as f64 * SPACING, y as f64 * SPACING),
                );
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

        builder.build().expect("grid graph must build")
    }
}
