//! A beam-search matcher, fitting a noisy trace
//! of positions onto the walk through a road
//! network which best explains it.
//!
//! Each [`Hypothesis`] is one interpretation of the trace so far. Per position,
//! the best-ranked hypotheses are extended, either along the segment they sit
//! on or, through a bounded [`SegmentSearch`], onto the segments which follow.
//! Successors are deduplicated and re-ranked, and the best hypothesis remaining
//! after the final position is the match.

pub mod entry;
pub mod error;
pub mod hypothesis;
pub mod path;
pub mod rank;
pub mod result;
pub mod search;
pub mod solver;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use entry::PointMatch;
#[doc(inline)]
pub use error::MatchError;
#[doc(inline)]
pub use hypothesis::Hypothesis;
#[doc(inline)]
pub use path::Path;
#[doc(inline)]
pub use result::MatchedRoute;
#[doc(inline)]
pub use search::SegmentSearch;
#[doc(inline)]
pub use solver::{match_trace, match_trace_from, Matcher};
