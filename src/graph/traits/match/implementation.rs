use crate::config::MatchConfig;
use crate::graph::Graph;
use crate::matcher::{MatchError, MatchedRoute, Matcher};
use crate::primitive::{Entry, Segment};
use crate::Match;

use geo::LineString;

#[cfg(feature = "tracing")]
use tracing::Level;

impl<E> Match<E> for Graph<E>
where
    E: Entry,
{
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    fn r#match(
        &self,
        linestring: LineString,
        config: &MatchConfig,
    ) -> Result<MatchedRoute<E>, MatchError> {
        Matcher::new(self, self)
            .with_config(config.clone())
            .match_trace(&linestring.into_points())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    fn match_from(
        &self,
        linestring: LineString,
        seeds: &[Segment<E>],
        config: &MatchConfig,
    ) -> Result<MatchedRoute<E>, MatchError> {
        Matcher::new(self, self)
            .with_config(config.clone())
            .match_trace_from(&linestring.into_points(), seeds)
    }
}
