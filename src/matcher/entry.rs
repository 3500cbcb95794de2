use crate::primitive::{Entry, Projection, Segment};

use geo::Point;

/// The association of one trace position with the segment it is
/// matched to, its projection upon that segment, and the deviation
/// between the two.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointMatch<E>
where
    E: Entry,
{
    pub segment: Segment<E>,

    /// The raw trace position.
    pub point: Point,

    /// The position projected onto [segment](#field.segment).
    pub projected: Point,

    /// Haversine distance between [point](#field.point) and [projected](#field.projected).
    pub cost: f64,
}

impl<E> PointMatch<E>
where
    E: Entry,
{
    pub fn new(segment: Segment<E>, point: Point) -> Self {
        Self::from_projection(segment, point, segment.project(&point))
    }

    #[inline]
    pub(crate) fn from_projection(segment: Segment<E>, point: Point, projection: Projection) -> Self {
        Self {
            segment,
            point,
            projected: projection.point,
            cost: projection.cost,
        }
    }
}
