use crate::config::MatchConfig;
use crate::matcher::{MatchError, MatchedRoute};
use crate::primitive::{Entry, Segment};

use geo::LineString;

pub trait Match<E>
where
    E: Entry,
{
    /// Matches a given [linestring](LineString) against the map.
    ///
    /// Matching involves a beam search using the [`Matcher`](crate::Matcher)
    /// to fit the given input onto the map, finding the walk through the
    /// network which best explains every input position.
    fn r#match(
        &self,
        linestring: LineString,
        config: &MatchConfig,
    ) -> Result<MatchedRoute<E>, MatchError>;

    /// Matches a given [linestring](LineString) against the map, continuing
    /// from the supplied segments instead of seeding from the first position.
    fn match_from(
        &self,
        linestring: LineString,
        seeds: &[Segment<E>],
        config: &MatchConfig,
    ) -> Result<MatchedRoute<E>, MatchError>;
}
