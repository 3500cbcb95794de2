//! Projection of a position onto a straight road segment.

use geo::{Distance, Haversine, Line, LineLocatePoint, Point};

/// The closest position upon a [`Line`] to some query position.
///
/// The projection is a clamped vector projection performed in coordinate
/// space, therefore the projected point always lies between the endpoints
/// of the line. The [cost](#field.cost) is the great-circle distance, in
/// meters, between the query position and its projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// The projected point upon the line.
    pub point: Point,

    /// The fraction along the line, in `[0, 1]`, at which the projection lies.
    pub fraction: f64,

    /// Haversine distance between the query position and [point](#field.point).
    pub cost: f64,
}

impl Projection {
    /// Projects `position` onto `line`.
    ///
    /// A zero-length line projects every position onto its start.
    #[inline]
    pub fn onto(line: &Line, position: &Point) -> Self {
        // We locate the point upon the line, and then
        // interpolate that fraction (%) along the line
        // to obtain the projected point.
        let fraction = line
            .line_locate_point(position)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);

        let point = Point::from(line.start + line.delta() * fraction);

        Projection {
            point,
            fraction,
            cost: Haversine.distance(point, *position),
        }
    }
}
