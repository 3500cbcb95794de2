#![doc = include_str!("../README.md")]

pub mod config;
#[doc(hidden)]
pub mod graph;
pub mod matcher;
pub mod primitive;
#[doc(hidden)]
pub mod util;

use thiserror::Error;

#[doc(inline)]
pub use config::{ConfigError, MatchConfig};
#[doc(inline)]
pub use graph::{Graph, GraphBuilder, GraphError, Match, Network, NodeIndex, Scan};
#[doc(inline)]
pub use matcher::{match_trace, match_trace_from, MatchError, MatchedRoute, Matcher};
#[doc(inline)]
pub use primitive::{Entry, Node, Segment, SegmentKey};

/// Any failure raised by the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Match(MatchError),

    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Graph(GraphError),
}

crate::impl_err!(MatchError, Match);
crate::impl_err!(ConfigError, Config);
crate::impl_err!(GraphError, Graph);

pub type Result<T> = std::result::Result<T, Error>;
